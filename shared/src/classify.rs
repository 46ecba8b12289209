use std::cell::Cell;
use std::rc::Rc;

use serde::Deserialize;

use crate::config::ClassifierConfig;
use crate::error::ClassifyError;
use crate::model::{Prediction, PredictionList, SelectedImage};

pub const PAYLOAD_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyRequest {
    pub url: String,
    pub authorization: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One HTTP round trip. Implementations map connection failures to
/// `ClassifyError::Network` and hand back every status code as a response.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post(&self, request: ClassifyRequest) -> Result<TransportResponse, ClassifyError>;
}

/// Holds the loading flag; dropping it clears the flag.
#[derive(Debug)]
pub struct LoadingGuard {
    flag: Rc<Cell<bool>>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

pub struct ClassificationClient<T> {
    transport: T,
    config: ClassifierConfig,
    loading: Rc<Cell<bool>>,
}

impl<T: Transport> ClassificationClient<T> {
    pub fn new(transport: T, config: ClassifierConfig) -> Self {
        Self {
            transport,
            config,
            loading: Rc::new(Cell::new(false)),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Takes the loading flag, or fails with `InFlight` if it is held.
    pub fn begin(&self) -> Result<LoadingGuard, ClassifyError> {
        if self.loading.replace(true) {
            return Err(ClassifyError::InFlight);
        }
        Ok(LoadingGuard {
            flag: Rc::clone(&self.loading),
        })
    }

    pub async fn classify(&self, image: &SelectedImage) -> Result<PredictionList, ClassifyError> {
        let guard = self.begin()?;
        self.send(guard, image).await
    }

    pub async fn send(
        &self,
        guard: LoadingGuard,
        image: &SelectedImage,
    ) -> Result<PredictionList, ClassifyError> {
        let _guard = guard;

        let request = ClassifyRequest {
            url: self.config.endpoint.clone(),
            authorization: self.config.bearer()?,
            content_type: PAYLOAD_CONTENT_TYPE,
            body: image.payload()?,
        };
        log::info!(
            "Classifying {} bytes ({}) at {}",
            request.body.len(),
            image.mime_type(),
            request.url
        );

        let response = self.transport.post(request).await?;
        let predictions = parse_response(&response)?;

        if let Some(top) = predictions.top() {
            log::info!("Top prediction: {} ({})", top.label, top.percentage_label());
        }
        Ok(predictions)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ApiResponse {
    Ranked(Vec<Prediction>),
    Failure { error: String },
}

pub fn parse_response(response: &TransportResponse) -> Result<PredictionList, ClassifyError> {
    let parsed = serde_json::from_str::<ApiResponse>(&response.body);

    if !response.ok() {
        return Err(match parsed {
            Ok(ApiResponse::Failure { error }) => ClassifyError::Api(error),
            _ => ClassifyError::Status {
                status: response.status,
                body: response.body.clone(),
            },
        });
    }

    match parsed.map_err(|e| ClassifyError::Parse(e.to_string()))? {
        ApiResponse::Failure { error } => Err(ClassifyError::Api(error)),
        ApiResponse::Ranked(predictions) => {
            if let Some(bad) = predictions
                .iter()
                .find(|p| !(0.0..=1.0).contains(&p.score))
            {
                return Err(ClassifyError::Parse(format!(
                    "score {} for \"{}\" is outside [0, 1]",
                    bad.score, bad.label
                )));
            }
            Ok(PredictionList::ranked(predictions))
        }
    }
}
