pub mod capture;
pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod selector;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use capture::{JPEG_QUALITY, RETAKE_DELAY_MS};
pub use classify::{
    ClassificationClient, ClassifyRequest, LoadingGuard, Transport, TransportResponse,
};
pub use config::ClassifierConfig;
pub use error::{AppError, ClassifyError, DeviceError, InputError};
pub use model::{
    AcquisitionMode, CameraFacing, FrameSize, ImageSource, Prediction, PredictionList,
    SelectedImage,
};
pub use selector::{InputSelector, SessionCommand};
pub use session::{CameraDevice, CameraStream, CaptureSession, SessionPhase, VideoSurface};
