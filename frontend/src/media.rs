use shared::{
    CameraDevice, CameraFacing, CameraStream, CaptureSession, DeviceError, FrameSize, VideoSurface,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, DomException, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack, MediaTrackConstraints,
};
use yew::NodeRef;

pub type BrowserSession = CaptureSession<BrowserCamera, VideoElementSurface>;

pub fn browser_session(video: NodeRef) -> BrowserSession {
    CaptureSession::new(BrowserCamera, VideoElementSurface::new(video))
}

/// `navigator.mediaDevices.getUserMedia` with a facing-mode constraint.
pub struct BrowserCamera;

impl CameraDevice for BrowserCamera {
    type Stream = MediaStreamHandle;

    async fn open(&self, facing: CameraFacing) -> Result<MediaStreamHandle, DeviceError> {
        let window = web_sys::window()
            .ok_or_else(|| DeviceError::Unavailable("no global `window` exists".into()))?;
        let devices = window.navigator().media_devices().map_err(device_error)?;

        let video = MediaTrackConstraints::new();
        video.set_facing_mode(&JsValue::from_str(facing.facing_mode()));
        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&JsValue::from(video));

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(device_error)?;
        let stream = JsFuture::from(promise).await.map_err(device_error)?;
        let stream = stream
            .dyn_into::<MediaStream>()
            .map_err(|_| DeviceError::Unavailable("getUserMedia returned no stream".into()))?;

        Ok(MediaStreamHandle { stream })
    }
}

fn device_error(error: JsValue) -> DeviceError {
    match error.dyn_ref::<DomException>() {
        Some(exception) => match exception.name().as_str() {
            "NotAllowedError" | "SecurityError" => {
                DeviceError::PermissionDenied(exception.message())
            }
            name => DeviceError::Unavailable(format!("{}: {}", name, exception.message())),
        },
        None => DeviceError::Unavailable(format!("{:?}", error)),
    }
}

pub struct MediaStreamHandle {
    stream: MediaStream,
}

impl CameraStream for MediaStreamHandle {
    fn stop_tracks(&self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

/// The `<video>` element the live stream plays in.
pub struct VideoElementSurface {
    video: NodeRef,
}

impl VideoElementSurface {
    pub fn new(video: NodeRef) -> Self {
        Self { video }
    }

    fn element(&self) -> Option<HtmlVideoElement> {
        self.video.cast::<HtmlVideoElement>()
    }
}

impl VideoSurface for VideoElementSurface {
    type Stream = MediaStreamHandle;

    fn attach(&self, stream: &MediaStreamHandle) -> Result<(), DeviceError> {
        let video = self.element().ok_or(DeviceError::SurfaceUnavailable)?;
        video.set_src_object(Some(&stream.stream));
        Ok(())
    }

    fn detach(&self) {
        if let Some(video) = self.element() {
            video.set_src_object(None);
        }
    }

    fn frame_size(&self) -> FrameSize {
        self.element()
            .map(|video| FrameSize::new(video.video_width(), video.video_height()))
            .unwrap_or_default()
    }

    fn rasterize(&self, size: FrameSize, quality: f64) -> Result<String, DeviceError> {
        let video = self.element().ok_or(DeviceError::SurfaceUnavailable)?;
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| DeviceError::Rasterize("no document".into()))?;

        let canvas = document
            .create_element("canvas")
            .map_err(rasterize_error)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| DeviceError::Rasterize("not a canvas element".into()))?;
        canvas.set_width(size.width);
        canvas.set_height(size.height);

        let context = canvas
            .get_context("2d")
            .map_err(rasterize_error)?
            .ok_or_else(|| DeviceError::Rasterize("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DeviceError::Rasterize("unexpected context type".into()))?;
        context
            .draw_image_with_html_video_element(&video, 0.0, 0.0)
            .map_err(rasterize_error)?;

        canvas
            .to_data_url_with_type_and_encoder_options("image/jpeg", &JsValue::from_f64(quality))
            .map_err(rasterize_error)
    }
}

fn rasterize_error(error: JsValue) -> DeviceError {
    DeviceError::Rasterize(format!("{:?}", error))
}
