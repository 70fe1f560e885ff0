//! Restyle: a workflow engine for AI interior redesign.
//!
//! The crate orchestrates an external image-generation service into the
//! flows of a room-restyling session: batch ingestion of photos,
//! reference-consistent batch generation, chat-driven refinement with
//! shoppable suggestion parsing, mood-board curation, and preference
//! persistence. The service transport is abstracted behind
//! [`service::DesignService`]; an HTTP implementation ships in
//! [`service::HttpDesignService`].

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod parser;
pub mod service;
pub mod session;
pub mod store;

pub use config::{Config, ServiceConfig, StoreConfig};
pub use error::{RestyleError, Result};
pub use models::{
    ChatMessage, ChatMode, ImagePayload, MoodBoardItem, Preferences, QualityTier, Role, RunState,
    ShoppingItem, UploadSource, UploadedImage,
};
pub use parser::{parse_message, parse_segments, segments, MessageSegment, Segments};
pub use service::{DesignService, HttpDesignService, StyleRequest};
pub use session::{
    ingest_paths, ingest_sources, is_shopping_query, run_generation, send_message, SessionState,
};
pub use store::{KeyValueStore, PreferenceStore, PREFERENCES_KEY};
