use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeviceError {
    #[error("Camera permission denied: {0}")]
    PermissionDenied(String),
    #[error("Camera unavailable: {0}")]
    Unavailable(String),
    #[error("Video surface is not mounted")]
    SurfaceUnavailable,
    #[error("Camera is not live")]
    NotLive,
    #[error("Camera request superseded by a newer request")]
    Superseded,
    #[error("Failed to rasterize video frame: {0}")]
    Rasterize(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("No image file selected")]
    EmptySelection,
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("Video frame has no pixels yet")]
    EmptyFrame,
    #[error("Malformed image data URL")]
    MalformedDataUrl,
    #[error("Image payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Failed to read file: {0}")]
    Read(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    #[error("A classification request is already in flight")]
    InFlight,
    #[error("No API credential configured")]
    MissingCredential,
    #[error("Invalid image payload: {0}")]
    Payload(#[from] InputError),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("Inference API error: {0}")]
    Api(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ClassifyError {
    /// Outcomes that are part of normal operation rather than failures.
    pub fn is_expected(&self) -> bool {
        matches!(self, ClassifyError::InFlight)
    }
}

impl DeviceError {
    pub fn is_expected(&self) -> bool {
        matches!(self, DeviceError::Superseded)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

impl AppError {
    pub fn is_expected(&self) -> bool {
        match self {
            AppError::Device(e) => e.is_expected(),
            AppError::Classify(e) => e.is_expected(),
            AppError::Input(_) => false,
        }
    }
}
