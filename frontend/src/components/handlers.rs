use std::rc::Rc;

use super::super::{Model, Msg};
use gloo_file::File as GlooFile;
use gloo_file::callbacks::read_as_data_url;
use gloo_timers::callback::Timeout;
use shared::{
    AcquisitionMode, ClassifyError, DeviceError, ImageSource, InputError, PredictionList,
    SelectedImage, SessionCommand,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub fn handle_select_mode(model: &mut Model, ctx: &Context<Model>, mode: AcquisitionMode) -> bool {
    model.retake_timeout = None;
    model.file_reader = None;
    model.error = None;

    let command = model.selector.select(mode);
    run_session_command(model, ctx, command);
    true
}

pub fn run_session_command(model: &mut Model, ctx: &Context<Model>, command: SessionCommand) {
    match command {
        SessionCommand::Start => start_camera(model, ctx),
        SessionCommand::Stop => model.session.stop(),
        SessionCommand::Restart { delay_ms } => {
            let link = ctx.link().clone();
            let timeout = Timeout::new(delay_ms, move || {
                link.send_message(Msg::RestartCamera);
            });
            model.retake_timeout = Some(timeout);
        }
    }
}

fn start_camera(model: &Model, ctx: &Context<Model>) {
    spawn_local({
        let session = Rc::clone(&model.session);
        let link = ctx.link().clone();

        async move {
            let facing = session.facing();
            let result = session.start(facing).await;
            link.send_message(Msg::CameraSettled(result));
        }
    });
}

pub fn handle_restart_camera(model: &mut Model, ctx: &Context<Model>) -> bool {
    model.retake_timeout = None;
    if model.selector.mode() == AcquisitionMode::Camera {
        start_camera(model, ctx);
    }
    true
}

pub fn handle_switch_camera(model: &mut Model, ctx: &Context<Model>) -> bool {
    if model.selector.mode() != AcquisitionMode::Camera {
        return false;
    }

    spawn_local({
        let session = Rc::clone(&model.session);
        let link = ctx.link().clone();

        async move {
            let result = session.switch_facing().await;
            link.send_message(Msg::CameraSettled(result));
        }
    });
    true
}

pub fn handle_camera_settled(model: &mut Model, result: Result<(), DeviceError>) -> bool {
    match result {
        Ok(()) => {}
        Err(e) if e.is_expected() => log::debug!("{}", e),
        Err(e) => model.error = Some(e.to_string()),
    }
    true
}

pub fn handle_capture_photo(model: &mut Model) -> bool {
    match model.session.capture_frame() {
        Ok(image) => {
            model.error = None;
            model.selector.accept_capture(image)
        }
        Err(e) if e.is_expected() => {
            log::debug!("{}", e);
            false
        }
        Err(e) => {
            log::warn!("Error capturing photo: {}", e);
            model.error = Some(e.to_string());
            true
        }
    }
}

pub fn handle_retake(model: &mut Model, ctx: &Context<Model>) -> bool {
    match model.selector.request_retake() {
        Some(command) => {
            model.error = None;
            run_session_command(model, ctx, command);
            true
        }
        None => false,
    }
}

pub fn handle_file_chosen(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    let ticket = model.selector.begin_upload();
    model.error = None;

    let name = file.name();
    let link = ctx.link().clone();
    let reader = read_as_data_url(&file, move |result| {
        let image = result
            .map_err(|e| InputError::Read(e.to_string()))
            .and_then(|data_url| SelectedImage::from_data_url(data_url, ImageSource::Upload { name }));
        link.send_message(Msg::UploadRead(ticket, image));
    });
    model.file_reader = Some(reader);
    true
}

pub fn handle_upload_read(
    model: &mut Model,
    ticket: u64,
    result: Result<SelectedImage, InputError>,
) -> bool {
    if ticket != model.selector.generation() {
        log::debug!("Ignoring file read for a replaced selection");
        return false;
    }
    model.file_reader = None;

    match result {
        Ok(image) => model.selector.accept_upload(ticket, image),
        Err(e) => {
            log::error!("Error reading file: {}", e);
            model.error = Some(e.to_string());
            true
        }
    }
}

pub fn handle_classify(model: &mut Model, ctx: &Context<Model>) -> bool {
    let Some((ticket, image)) = model.selector.pending_classification() else {
        ctx.link()
            .send_message(Msg::SetError(Some("No image selected for classification.".into())));
        return false;
    };

    let guard = match model.client.begin() {
        Ok(guard) => guard,
        Err(e) => {
            log::debug!("{}", e);
            return false;
        }
    };
    model.selector.mark_classifying(ticket);
    model.error = None;

    spawn_local({
        let client = Rc::clone(&model.client);
        let link = ctx.link().clone();

        async move {
            let result = client.send(guard, &image).await;
            link.send_message(Msg::Classified(ticket, result));
        }
    });
    true
}

pub fn handle_classified(
    model: &mut Model,
    ticket: u64,
    result: Result<PredictionList, ClassifyError>,
) -> bool {
    if let Err(e) = model.selector.finish_classification(ticket, result) {
        log::error!("Error classifying image: {}", e);
        model.error = Some(e.to_string());
    }
    true
}
