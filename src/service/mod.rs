pub mod http;

use crate::{
    error::Result,
    models::{ImagePayload, QualityTier},
};
use async_trait::async_trait;

pub use http::HttpDesignService;

/// Parameters of a fresh style generation. The style label is mandatory;
/// palette and atmosphere refine the prompt when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRequest {
    pub style: String,
    pub palette: Option<String>,
    pub atmosphere: Option<String>,
    pub quality: QualityTier,
}

/// The external image-generation service. Each call either succeeds with a
/// whole payload or fails as a whole; there are no partial results.
#[async_trait]
pub trait DesignService: Send + Sync {
    /// Restyle `source` according to the textual style selection.
    async fn generate_styled_image(
        &self,
        source: &ImagePayload,
        request: &StyleRequest,
    ) -> Result<ImagePayload>;

    /// Re-apply the visual treatment of an already-generated `reference` onto
    /// a new `source`, preserving the source's structural layout.
    async fn apply_style_from_reference(
        &self,
        source: &ImagePayload,
        reference: &ImagePayload,
        quality: QualityTier,
    ) -> Result<ImagePayload>;

    /// Mutate `base` according to a free-text instruction.
    async fn refine_image(
        &self,
        base: &ImagePayload,
        instruction: &str,
        quality: QualityTier,
    ) -> Result<ImagePayload>;

    /// Plain conversational reply, no image context.
    async fn conversational_reply(&self, user_text: &str) -> Result<String>;

    /// Product suggestions for the shown design. The reply text may embed
    /// `- **[NAME](URL)** - DESCRIPTION` bullets for the message parser.
    async fn shopping_suggestions(&self, base: &ImagePayload, user_text: &str) -> Result<String>;
}
