use crate::error::ClassifyError;

pub const DEFAULT_ENDPOINT: &str =
    "https://router.huggingface.co/hf-inference/models/google/mobilenet_v2_1.0_224";

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    pub endpoint: String,
    api_key: Option<String>,
}

impl ClassifierConfig {
    /// Blank keys count as missing.
    pub fn new(api_key: Option<&str>) -> Self {
        let api_key = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn bearer(&self) -> Result<String, ClassifyError> {
        self.api_key
            .as_deref()
            .map(|key| format!("Bearer {}", key))
            .ok_or(ClassifyError::MissingCredential)
    }
}
