use std::cell::RefCell;

use crate::capture;
use crate::error::{AppError, DeviceError};
use crate::model::{CameraFacing, FrameSize, SelectedImage};

/// Host camera access (`getUserMedia` in the browser).
#[allow(async_fn_in_trait)]
pub trait CameraDevice {
    type Stream: CameraStream;

    async fn open(&self, facing: CameraFacing) -> Result<Self::Stream, DeviceError>;
}

pub trait CameraStream {
    /// Stops every track of the stream. Calling it twice is harmless.
    fn stop_tracks(&self);
}

/// The element a live stream is rendered into and snapshotted from.
pub trait VideoSurface {
    type Stream;

    fn attach(&self, stream: &Self::Stream) -> Result<(), DeviceError>;
    fn detach(&self);
    fn frame_size(&self) -> FrameSize;
    /// Encodes the current frame as a JPEG data URL.
    fn rasterize(&self, size: FrameSize, quality: f64) -> Result<String, DeviceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Starting {
        facing: CameraFacing,
    },
    Live {
        facing: CameraFacing,
    },
}

struct SessionState<S> {
    phase: SessionPhase,
    facing: CameraFacing,
    stream: Option<S>,
    // Bumped by every start and stop; a start that resumes under a different
    // value has been superseded.
    generation: u64,
}

/// Owns the one camera stream the application may hold.
pub struct CaptureSession<D, V>
where
    D: CameraDevice,
    V: VideoSurface<Stream = D::Stream>,
{
    device: D,
    surface: V,
    state: RefCell<SessionState<D::Stream>>,
}

impl<D, V> CaptureSession<D, V>
where
    D: CameraDevice,
    V: VideoSurface<Stream = D::Stream>,
{
    pub fn new(device: D, surface: V) -> Self {
        Self {
            device,
            surface,
            state: RefCell::new(SessionState {
                phase: SessionPhase::Idle,
                facing: CameraFacing::default(),
                stream: None,
                generation: 0,
            }),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase
    }

    pub fn facing(&self) -> CameraFacing {
        self.state.borrow().facing
    }

    pub fn is_live(&self) -> bool {
        matches!(self.phase(), SessionPhase::Live { .. })
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase(), SessionPhase::Starting { .. })
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub async fn start(&self, facing: CameraFacing) -> Result<(), DeviceError> {
        let ticket = {
            let mut state = self.state.borrow_mut();
            self.release(&mut state);
            state.generation += 1;
            state.facing = facing;
            state.phase = SessionPhase::Starting { facing };
            state.generation
        };
        log::debug!("Requesting {} camera (request {})", facing.label(), ticket);

        let opened = self.device.open(facing).await;

        let mut state = self.state.borrow_mut();
        if state.generation != ticket {
            if let Ok(stream) = opened {
                stream.stop_tracks();
            }
            log::debug!("Discarding superseded camera request {}", ticket);
            return Err(DeviceError::Superseded);
        }

        let stream = match opened {
            Ok(stream) => stream,
            Err(e) => {
                state.phase = SessionPhase::Idle;
                log::error!("Error accessing camera: {}", e);
                return Err(e);
            }
        };

        if let Err(e) = self.surface.attach(&stream) {
            stream.stop_tracks();
            state.phase = SessionPhase::Idle;
            log::error!("Error binding camera stream: {}", e);
            return Err(e);
        }

        state.stream = Some(stream);
        state.phase = SessionPhase::Live { facing };
        log::info!("{} camera live", facing.label());
        Ok(())
    }

    pub fn stop(&self) {
        let mut state = self.state.borrow_mut();
        self.release(&mut state);
        state.generation += 1;
        state.phase = SessionPhase::Idle;
    }

    /// Toggles the facing and restarts on it. A failed restart leaves the
    /// session idle on the new facing.
    pub async fn switch_facing(&self) -> Result<(), DeviceError> {
        let facing = self.facing().toggled();
        self.start(facing).await
    }

    /// Snapshots the live frame. The session keeps running.
    pub fn capture_frame(&self) -> Result<SelectedImage, AppError> {
        let facing = match self.phase() {
            SessionPhase::Live { facing } => facing,
            _ => return Err(DeviceError::NotLive.into()),
        };
        capture::capture_still(&self.surface, facing)
    }

    fn release(&self, state: &mut SessionState<D::Stream>) {
        if let Some(stream) = state.stream.take() {
            stream.stop_tracks();
            self.surface.detach();
            log::debug!("Camera stream released");
        }
    }
}

impl<D, V> Drop for CaptureSession<D, V>
where
    D: CameraDevice,
    V: VideoSurface<Stream = D::Stream>,
{
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if let Some(stream) = state.stream.take() {
            stream.stop_tracks();
        }
    }
}
