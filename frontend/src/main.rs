mod api;
mod components;
mod config;
mod media;

use std::rc::Rc;

use api::FetchTransport;
use components::camera_section::render_camera_section;
use components::handlers;
use components::header::render_header;
use components::mode_toggle::render_mode_toggle;
use components::preview_area::render_preview_area;
use components::results::render_results;
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use gloo_file::File as GlooFile;
use gloo_file::callbacks::FileReader;
use gloo_timers::callback::Timeout;
use media::BrowserSession;
use shared::{
    AcquisitionMode, ClassificationClient, ClassifyError, DeviceError, InputError, InputSelector,
    PredictionList, SelectedImage,
};
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // Input source
    SelectMode(AcquisitionMode),
    FileChosen(GlooFile),
    UploadRead(u64, Result<SelectedImage, InputError>),

    // Camera operations
    CameraSettled(Result<(), DeviceError>),
    RestartCamera,
    SwitchCamera,
    CapturePhoto,
    Retake,

    // Classification
    Classify,
    Classified(u64, Result<PredictionList, ClassifyError>),

    // UI states
    SetError(Option<String>),
}

// Main component
pub struct Model {
    selector: InputSelector,
    session: Rc<BrowserSession>,
    client: Rc<ClassificationClient<FetchTransport>>,
    video: NodeRef,
    // Dropping either handle cancels the pending callback.
    file_reader: Option<FileReader>,
    retake_timeout: Option<Timeout>,
    error: Option<String>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let video = NodeRef::default();

        Self {
            selector: InputSelector::new(),
            session: Rc::new(media::browser_session(video.clone())),
            client: Rc::new(ClassificationClient::new(FetchTransport, config::load())),
            video,
            file_reader: None,
            retake_timeout: None,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Input source
            Msg::SelectMode(mode) => handlers::handle_select_mode(self, ctx, mode),
            Msg::FileChosen(file) => handlers::handle_file_chosen(self, ctx, file),
            Msg::UploadRead(ticket, result) => handlers::handle_upload_read(self, ticket, result),

            // Camera operations
            Msg::CameraSettled(result) => handlers::handle_camera_settled(self, result),
            Msg::RestartCamera => handlers::handle_restart_camera(self, ctx),
            Msg::SwitchCamera => handlers::handle_switch_camera(self, ctx),
            Msg::CapturePhoto => handlers::handle_capture_photo(self),
            Msg::Retake => handlers::handle_retake(self, ctx),

            // Classification
            Msg::Classify => handlers::handle_classify(self, ctx),
            Msg::Classified(ticket, result) => handlers::handle_classified(self, ticket, result),

            // UI states
            Msg::SetError(error) => {
                self.error = error;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }

                <main class="main-content">
                    { render_mode_toggle(self, ctx) }
                    <div class="upload-section">
                        {
                            match self.selector.mode() {
                                AcquisitionMode::Upload => render_upload_section(ctx),
                                AcquisitionMode::Camera => render_camera_section(self, ctx),
                            }
                        }
                    </div>
                    { render_error_message(self, ctx) }
                    <div class="content-section">
                        { render_preview_area(self, ctx) }
                        { render_results(self) }
                    </div>
                </main>

                <footer class="app-footer">
                    <p>{"WebClassify | Rust WASM"}</p>
                </footer>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.session.stop();
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
