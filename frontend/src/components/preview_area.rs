use super::super::{Model, Msg};
use shared::{AcquisitionMode, ImageSource};
use yew::prelude::*;

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(image) = model.selector.image() else {
        return html! {};
    };

    let link = ctx.link();
    let loading = model.selector.is_classifying();
    // A request for a replaced image may still hold the client.
    let busy = model.client.is_loading();
    let alt = match image.source() {
        ImageSource::Upload { name } => name.clone(),
        ImageSource::Camera(facing) => format!("{} camera photo", facing.label()),
    };

    html! {
        <div class="image-preview">
            <img id="actual-image-preview" src={image.data_url().to_string()} alt={alt} />
            <div class="button-container">
                {
                    if model.selector.mode() == AcquisitionMode::Camera {
                        html! {
                            <button
                                class="retake-btn"
                                onclick={link.callback(|_| Msg::Retake)}
                                disabled={loading}
                            >
                                <i class="fa-solid fa-rotate-left"></i>{" Retake"}
                            </button>
                        }
                    } else {
                        html! {}
                    }
                }
                <button
                    class="classify-btn"
                    onclick={link.callback(|_| Msg::Classify)}
                    disabled={busy}
                >
                    { render_classify_button_content(loading) }
                </button>
            </div>
        </div>
    }
}

fn render_classify_button_content(loading: bool) -> Html {
    if loading {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Classifying..."}</> }
    } else {
        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Classify Image"}</> }
    }
}
