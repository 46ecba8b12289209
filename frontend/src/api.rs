use gloo_net::http::Request;
use js_sys::Uint8Array;
use shared::{ClassifyError, ClassifyRequest, Transport, TransportResponse};

/// Sends classification requests with the browser's `fetch`.
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn post(&self, request: ClassifyRequest) -> Result<TransportResponse, ClassifyError> {
        let body = Uint8Array::from(request.body.as_slice());

        let response = Request::post(&request.url)
            .header("Authorization", &request.authorization)
            .header("Content-Type", request.content_type)
            .body(body)
            .map_err(|e| ClassifyError::Network(format!("Failed to build request: {}", e)))?
            .send()
            .await
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ClassifyError::Network(format!("Failed to read response body: {}", e))
        })?;
        if !response.ok() {
            log::warn!("Classifier responded with status {}", status);
        }

        Ok(TransportResponse { status, body })
    }
}
