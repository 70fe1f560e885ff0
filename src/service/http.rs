use crate::{
    config::ServiceConfig,
    error::{RestyleError, Result},
    models::{ImagePayload, QualityTier},
    service::{DesignService, StyleRequest},
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

/// HTTP-backed implementation of [`DesignService`]. The transport is a plain
/// JSON API carrying base64 image bodies; every endpoint succeeds or fails as
/// a whole.
pub struct HttpDesignService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpDesignService {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .ok_or_else(|| RestyleError::ConfigError("Service URL is required".into()))?;

        let api_key = config
            .api_key
            .ok_or_else(|| RestyleError::ConfigError("Service API key is required".into()))?;

        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn build_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Ok(value) = format!("Bearer {}", self.api_key).parse() {
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }
        if let Ok(value) = "application/json".parse() {
            headers.insert(reqwest::header::CONTENT_TYPE, value);
        }
        headers
    }

    async fn post_json(&self, path: &str, payload: Value) -> Result<Value> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .headers(self.build_headers())
            .json(&payload)
            .send()
            .await
            .map_err(|e| RestyleError::RequestError(format!("Design service request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RestyleError::RequestError(format!(
                "Design service returned {}: {}",
                status, error_text
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| RestyleError::ResponseError(e.to_string()))
    }

    fn extract_image(body: &Value) -> Result<ImagePayload> {
        let data = body["image"]["data"]
            .as_str()
            .ok_or_else(|| RestyleError::ResponseError("No image in response".into()))?;
        let mime = body["image"]["mime"].as_str().unwrap_or("image/png");
        Ok(ImagePayload::new(mime, data))
    }

    fn extract_text(body: &Value) -> Result<String> {
        body["text"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| RestyleError::ResponseError("No text in response".into()))
    }
}

/// Compose the generation prompt from the user's style selections, in the
/// order the service expects them: style, then palette, then atmosphere.
pub fn build_style_prompt(request: &StyleRequest) -> String {
    let mut prompt = format!(
        "Redesign this room in {} style, keeping the room's layout and architecture intact.",
        request.style
    );
    if let Some(palette) = &request.palette {
        prompt.push_str(&format!(" Use a {} color palette.", palette));
    }
    if let Some(atmosphere) = &request.atmosphere {
        prompt.push_str(&format!(" The atmosphere should feel {}.", atmosphere));
    }
    prompt
}

#[async_trait]
impl DesignService for HttpDesignService {
    async fn generate_styled_image(
        &self,
        source: &ImagePayload,
        request: &StyleRequest,
    ) -> Result<ImagePayload> {
        let payload = json!({
            "image": source,
            "prompt": build_style_prompt(request),
            "quality": request.quality.as_str(),
        });

        log::info!("🎨 Requesting styled generation ({})", request.style);

        let body = self.post_json("/v1/images/generate", payload).await?;
        Self::extract_image(&body)
    }

    async fn apply_style_from_reference(
        &self,
        source: &ImagePayload,
        reference: &ImagePayload,
        quality: QualityTier,
    ) -> Result<ImagePayload> {
        let payload = json!({
            "image": source,
            "reference": reference,
            "prompt": "Apply the visual treatment of the reference image to this room, \
                       preserving the room's own structural layout.",
            "quality": quality.as_str(),
        });

        log::info!("🖼️  Requesting reference-consistent restyle");

        let body = self.post_json("/v1/images/restyle", payload).await?;
        Self::extract_image(&body)
    }

    async fn refine_image(
        &self,
        base: &ImagePayload,
        instruction: &str,
        quality: QualityTier,
    ) -> Result<ImagePayload> {
        let payload = json!({
            "image": base,
            "instruction": instruction,
            "quality": quality.as_str(),
        });

        log::info!("✏️  Requesting refinement");
        log::debug!("Refinement instruction: {}", instruction);

        let body = self.post_json("/v1/images/refine", payload).await?;
        Self::extract_image(&body)
    }

    async fn conversational_reply(&self, user_text: &str) -> Result<String> {
        let payload = json!({ "message": user_text });

        log::info!("💬 Requesting conversational reply");

        let body = self.post_json("/v1/chat", payload).await?;
        Self::extract_text(&body)
    }

    async fn shopping_suggestions(&self, base: &ImagePayload, user_text: &str) -> Result<String> {
        let payload = json!({
            "image": base,
            "message": user_text,
        });

        log::info!("🛒 Requesting shopping suggestions");

        let body = self.post_json("/v1/chat/shopping", payload).await?;
        Self::extract_text(&body)
    }
}
