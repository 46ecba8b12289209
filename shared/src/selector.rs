use crate::capture::RETAKE_DELAY_MS;
use crate::error::ClassifyError;
use crate::model::{AcquisitionMode, ImageSource, PredictionList, SelectedImage};

/// Camera work a selector transition asks the caller to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Stop,
    Restart { delay_ms: u32 },
}

/// Acquisition mode plus the image and predictions that flow from it.
///
/// Asynchronous work (file reads, classifications) is issued under the
/// current generation and its result is only accepted while the generation
/// is unchanged.
#[derive(Debug, Default)]
pub struct InputSelector {
    mode: AcquisitionMode,
    image: Option<SelectedImage>,
    predictions: PredictionList,
    generation: u64,
    classifying: Option<u64>,
}

impl InputSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> AcquisitionMode {
        self.mode
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    pub fn predictions(&self) -> &PredictionList {
        &self.predictions
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn select(&mut self, mode: AcquisitionMode) -> SessionCommand {
        log::info!("Switching to {} mode", mode);
        self.mode = mode;
        self.reset();
        match mode {
            AcquisitionMode::Camera => SessionCommand::Start,
            AcquisitionMode::Upload => SessionCommand::Stop,
        }
    }

    pub fn begin_upload(&mut self) -> u64 {
        self.reset();
        self.generation
    }

    pub fn accept_upload(&mut self, ticket: u64, image: SelectedImage) -> bool {
        if ticket != self.generation || self.mode != AcquisitionMode::Upload {
            log::debug!("Discarding stale upload (ticket {})", ticket);
            return false;
        }
        if let ImageSource::Upload { name } = image.source() {
            log::info!("Loaded {}", name);
        }
        self.image = Some(image);
        true
    }

    pub fn accept_capture(&mut self, image: SelectedImage) -> bool {
        if self.mode != AcquisitionMode::Camera {
            log::debug!("Ignoring capture outside camera mode");
            return false;
        }
        self.reset();
        self.image = Some(image);
        true
    }

    pub fn request_retake(&mut self) -> Option<SessionCommand> {
        if self.mode != AcquisitionMode::Camera {
            return None;
        }
        self.reset();
        Some(SessionCommand::Restart {
            delay_ms: RETAKE_DELAY_MS,
        })
    }

    pub fn show_live_view(&self) -> bool {
        self.mode == AcquisitionMode::Camera && self.image.is_none()
    }

    pub fn pending_classification(&self) -> Option<(u64, SelectedImage)> {
        self.image
            .as_ref()
            .map(|image| (self.generation, image.clone()))
    }

    /// Records that a request for `ticket` is in flight.
    pub fn mark_classifying(&mut self, ticket: u64) {
        self.classifying = Some(ticket);
    }

    /// True only while a request for the currently selected image is in flight.
    pub fn is_classifying(&self) -> bool {
        self.classifying == Some(self.generation)
    }

    /// Settles the request issued under `ticket`.
    ///
    /// Returns `Ok(true)` when predictions were installed, `Ok(false)` when the
    /// outcome belongs to a replaced image, and the error for a failure on the
    /// current image. Predictions are left as they were on failure.
    pub fn finish_classification(
        &mut self,
        ticket: u64,
        result: Result<PredictionList, ClassifyError>,
    ) -> Result<bool, ClassifyError> {
        if self.classifying == Some(ticket) {
            self.classifying = None;
        }

        match result {
            Ok(predictions) => Ok(self.apply_predictions(ticket, predictions)),
            Err(e) if ticket != self.generation => {
                log::debug!("Dropping error for a replaced image: {}", e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn apply_predictions(&mut self, ticket: u64, predictions: PredictionList) -> bool {
        if ticket != self.generation || self.image.is_none() {
            log::debug!("Discarding predictions for a replaced image (ticket {})", ticket);
            return false;
        }
        self.predictions = predictions;
        true
    }

    fn reset(&mut self) {
        self.image = None;
        self.predictions.clear();
        self.generation += 1;
    }
}
