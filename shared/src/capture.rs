use crate::error::{AppError, InputError};
use crate::model::{CameraFacing, ImageSource, SelectedImage};
use crate::session::VideoSurface;

pub const JPEG_QUALITY: f64 = 0.92;

/// Grace period before a retake re-acquires the camera, so the video
/// element is mounted again when the stream arrives.
pub const RETAKE_DELAY_MS: u32 = 100;

pub fn capture_still<V: VideoSurface>(
    surface: &V,
    facing: CameraFacing,
) -> Result<SelectedImage, AppError> {
    let size = surface.frame_size();
    if size.is_empty() {
        log::warn!("Ignoring capture before the first frame ({})", size);
        return Err(InputError::EmptyFrame.into());
    }

    let data_url = surface.rasterize(size, JPEG_QUALITY)?;
    let image = SelectedImage::from_data_url(data_url, ImageSource::Camera(facing))?;
    log::info!("Captured {} still from {} camera", size, facing.label());
    Ok(image)
}
