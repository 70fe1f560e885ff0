use serde::{Deserialize, Serialize};

use super::image::ImagePayload;

/// A shoppable product reference extracted from a model reply or saved by the
/// user from one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    pub url: String,
    pub description: String,
}

/// One entry on the mood board. Insertion order is display order; entries are
/// removed by id only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoodBoardItem {
    Design {
        id: String,
        payload: ImagePayload,
        style: String,
    },
    Item {
        id: String,
        item: ShoppingItem,
    },
}

impl MoodBoardItem {
    pub fn id(&self) -> &str {
        match self {
            MoodBoardItem::Design { id, .. } => id,
            MoodBoardItem::Item { id, .. } => id,
        }
    }
}
