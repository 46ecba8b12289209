use super::super::{Model, Msg};
use shared::AcquisitionMode;
use strum::IntoEnumIterator;
use yew::prelude::*;

pub fn render_mode_toggle(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let current = model.selector.mode();

    html! {
        <div class="input-toggle">
            { for AcquisitionMode::iter().map(|mode| {
                let icon = match mode {
                    AcquisitionMode::Upload => "fa-solid fa-upload",
                    AcquisitionMode::Camera => "fa-solid fa-camera",
                };
                html! {
                    <button
                        class={classes!("toggle-btn", (mode == current).then_some("active"))}
                        onclick={link.callback(move |_| Msg::SelectMode(mode))}
                    >
                        <i class={icon}></i>{ format!(" {}", mode) }
                    </button>
                }
            })}
        </div>
    }
}
