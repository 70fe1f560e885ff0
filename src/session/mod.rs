pub mod chat;
pub mod generate;
pub mod ingest;

use uuid::Uuid;

use crate::{
    error::{RestyleError, Result},
    models::{
        ChatMessage, ImagePayload, MoodBoardItem, Preferences, QualityTier, RunState,
        ShoppingItem, UploadedImage,
    },
};

pub use chat::{is_shopping_query, send_message};
pub use generate::run_generation;
pub use ingest::{ingest_paths, ingest_sources};

/// Everything one design session owns. Workflow operations take this by
/// mutable reference and either commit whole results or return an error;
/// nothing here is shared across concurrent operations.
#[derive(Debug, Default)]
pub struct SessionState {
    pub uploads: Vec<UploadedImage>,
    /// Generated results, aligned index-for-index with `uploads`. A slot is
    /// only ever written as one whole payload.
    pub generated: Vec<Option<ImagePayload>>,
    pub chat: Vec<ChatMessage>,
    pub selected: Option<usize>,
    pub run: RunState,
    pub board: Vec<MoodBoardItem>,
    pub banner: Option<String>,
    pub explanation: Option<String>,
    pub style: Option<String>,
    pub palette: Option<String>,
    pub atmosphere: Option<String>,
    pub quality: QualityTier,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything derived from the current upload batch: results,
    /// transcript, selection, run progress, banner and explanation panel.
    pub(crate) fn reset_derived_state(&mut self) {
        self.generated.clear();
        self.chat.clear();
        self.selected = None;
        self.run = RunState::Idle;
        self.banner = None;
        self.explanation = None;
    }

    /// Remove the upload at `index` together with its generated counterpart,
    /// shifting every later pair down by one in the same step so the two
    /// sequences never go out of alignment.
    pub fn remove_upload(&mut self, index: usize) -> Result<()> {
        if index >= self.uploads.len() {
            return Err(RestyleError::IngestError(format!(
                "No uploaded image at index {}",
                index
            )));
        }

        self.uploads.remove(index);
        for (ordinal, upload) in self.uploads.iter_mut().enumerate() {
            upload.ordinal = ordinal;
        }

        if index < self.generated.len() {
            self.generated.remove(index);
        }

        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };

        log::debug!("Removed upload {} ({} remaining)", index, self.uploads.len());
        Ok(())
    }

    /// The generated payload currently selected by the user, if any.
    pub fn selected_result(&self) -> Option<&ImagePayload> {
        self.selected
            .and_then(|i| self.generated.get(i))
            .and_then(|slot| slot.as_ref())
    }

    /// Save the generated result at `index` to the mood board.
    pub fn save_design(&mut self, index: usize) -> Result<()> {
        let payload = self
            .generated
            .get(index)
            .and_then(|slot| slot.clone())
            .ok_or_else(|| {
                RestyleError::GenerationError(format!("No generated image at index {}", index))
            })?;

        let style = self.style.clone().unwrap_or_else(|| "Custom".to_string());
        self.board.push(MoodBoardItem::Design {
            id: Uuid::new_v4().to_string(),
            payload,
            style,
        });
        Ok(())
    }

    /// Save a shopping reference to the mood board.
    pub fn save_item(&mut self, item: ShoppingItem) {
        self.board.push(MoodBoardItem::Item {
            id: Uuid::new_v4().to_string(),
            item,
        });
    }

    /// Remove a mood board entry by id. Returns whether anything was removed.
    pub fn remove_board_item(&mut self, id: &str) -> bool {
        let before = self.board.len();
        self.board.retain(|entry| entry.id() != id);
        self.board.len() != before
    }

    /// Merge stored preferences into the current selection. Absent optional
    /// fields leave the in-memory choice untouched.
    pub fn apply_preferences(&mut self, prefs: &Preferences) {
        if let Some(style) = &prefs.style {
            self.style = Some(style.clone());
        }
        if let Some(palette) = &prefs.palette {
            self.palette = Some(palette.clone());
        }
        if let Some(atmosphere) = &prefs.atmosphere {
            self.atmosphere = Some(atmosphere.clone());
        }
        self.quality = prefs.quality;
    }

    /// Snapshot the current selection as a preferences record.
    pub fn current_preferences(&self) -> Preferences {
        Preferences {
            style: self.style.clone(),
            palette: self.palette.clone(),
            atmosphere: self.atmosphere.clone(),
            quality: self.quality,
        }
    }
}
