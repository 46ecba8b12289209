use shared::ClassifierConfig;

/// Credential baked in at build time from the environment or a `.env` file.
const API_KEY: Option<&str> = option_env!("HUGGINGFACE_API_KEY");
const ENDPOINT: Option<&str> = option_env!("CLASSIFIER_ENDPOINT");

pub fn load() -> ClassifierConfig {
    let mut config = ClassifierConfig::new(API_KEY);
    if let Some(endpoint) = ENDPOINT.map(str::trim).filter(|url| !url.is_empty()) {
        log::info!("Using classifier endpoint {}", endpoint);
        config = config.with_endpoint(endpoint);
    }
    if !config.has_credential() {
        log::warn!("HUGGINGFACE_API_KEY was not set at build time; classification will fail");
    }
    config
}
