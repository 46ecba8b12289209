use super::super::{Model, Msg};
use shared::SessionPhase;
use yew::prelude::*;

pub fn render_camera_section(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let phase = model.session.phase();
    let show_live = model.selector.show_live_view();
    let can_capture = show_live && matches!(phase, SessionPhase::Live { .. });

    // The element stays mounted while a still is reviewed so the stream
    // keeps its surface.
    let video_style = if show_live { "max-width: 100%; display: block;" } else { "display: none;" };

    html! {
        <div class="camera-container">
            <video
                ref={model.video.clone()}
                autoplay=true
                playsinline=true
                style={video_style}
            />
            { render_camera_status(phase, show_live) }
            <div class="camera-controls">
                <button
                    class="switch-camera-btn"
                    onclick={link.callback(|_| Msg::SwitchCamera)}
                    disabled={matches!(phase, SessionPhase::Starting { .. })}
                    title={format!("Currently using the {} camera", model.session.facing().label())}
                >
                    <i class="fa-solid fa-camera-rotate"></i>{" Switch Camera"}
                </button>
                <button
                    class="capture-btn"
                    onclick={link.callback(|_| Msg::CapturePhoto)}
                    disabled={!can_capture}
                >
                    <i class="fa-solid fa-circle-dot"></i>{" Take Photo"}
                </button>
            </div>
        </div>
    }
}

fn render_camera_status(phase: SessionPhase, show_live: bool) -> Html {
    if !show_live {
        return html! {};
    }

    match phase {
        SessionPhase::Starting { facing } => html! {
            <p class="camera-status">
                <i class="fa-solid fa-spinner fa-spin"></i>
                { format!(" Starting {} camera...", facing.label().to_lowercase()) }
            </p>
        },
        SessionPhase::Idle => html! {
            <p class="camera-status">{"Camera is off."}</p>
        },
        SessionPhase::Live { .. } => html! {},
    }
}
