use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-tags"></i> {" WebClassify"}</h1>
            <p class="subtitle">{"Upload an image or take a photo to see what it contains"}</p>
        </header>
    }
}
