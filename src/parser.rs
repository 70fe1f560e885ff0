//! Extraction of shoppable product references from model replies.
//!
//! Model shopping replies embed single-line bullets of the form
//! `- **[NAME](URL)** - DESCRIPTION`. The scanner here splits a message into
//! literal text runs and structured items, in original order, without
//! touching any state. Parsing is purely presentational: the same text
//! always yields the same segments.

use crate::models::{ChatMessage, Role, ShoppingItem};

const BULLET_MARKER: &str = "- **[";

/// One display segment of a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSegment {
    /// A verbatim run of text.
    Text(String),
    /// A well-formed shopping reference, ready to be saved to the mood board.
    Item(ShoppingItem),
}

/// Lazy iterator over the segments of a message text. Restartable: calling
/// [`segments`] again (or cloning) rescans from the beginning.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    pos: usize,
    pending: Option<MessageSegment>,
    emitted_any: bool,
    finished: bool,
}

pub fn segments(text: &str) -> Segments<'_> {
    Segments {
        text,
        pos: 0,
        pending: None,
        emitted_any: false,
        finished: false,
    }
}

/// Eager convenience over [`segments`].
pub fn parse_segments(text: &str) -> Vec<MessageSegment> {
    segments(text).collect()
}

/// Segment a chat message for display. Only model messages are scanned for
/// shopping bullets; user messages are opaque literal text.
pub fn parse_message(message: &ChatMessage) -> Vec<MessageSegment> {
    match message.role {
        Role::Model => parse_segments(&message.text),
        Role::User => vec![MessageSegment::Text(message.text.clone())],
    }
}

impl Iterator for Segments<'_> {
    type Item = MessageSegment;

    fn next(&mut self) -> Option<MessageSegment> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }
        if self.finished {
            return None;
        }

        match find_next_item(self.text, self.pos) {
            Some((start, end, item)) => {
                // The literal run before a bullet is emitted even when empty.
                let literal = self.text[self.pos..start].to_string();
                self.pos = end;
                self.emitted_any = true;
                self.pending = Some(MessageSegment::Item(item));
                Some(MessageSegment::Text(literal))
            }
            None => {
                self.finished = true;
                if self.pos < self.text.len() || !self.emitted_any {
                    self.emitted_any = true;
                    Some(MessageSegment::Text(self.text[self.pos..].to_string()))
                } else {
                    None
                }
            }
        }
    }
}

fn find_next_item(text: &str, from: usize) -> Option<(usize, usize, ShoppingItem)> {
    let mut search = from;
    while let Some(rel) = text.get(search..)?.find(BULLET_MARKER) {
        let start = search + rel;
        if let Some((end, item)) = parse_item_at(text, start) {
            return Some((start, end, item));
        }
        // Malformed candidate: fall back to literal text and keep scanning.
        search = start + BULLET_MARKER.len();
    }
    None
}

/// Validate one `- **[NAME](URL)** - DESCRIPTION` bullet starting at `start`.
/// Every part must sit on the same line and be non-empty.
fn parse_item_at(text: &str, start: usize) -> Option<(usize, ShoppingItem)> {
    let after_marker = &text[start + BULLET_MARKER.len()..];

    let name_end = after_marker.find("](")?;
    let name = &after_marker[..name_end];
    if name.is_empty() || name.contains('\n') {
        return None;
    }

    let after_name = &after_marker[name_end + 2..];
    let url_end = after_name.find(")**")?;
    let url = &after_name[..url_end];
    if url.is_empty() || url.contains('\n') {
        return None;
    }

    let after_url = &after_name[url_end + 3..];
    let description_tail = after_url.strip_prefix(" - ")?;
    let description_end = description_tail.find('\n').unwrap_or(description_tail.len());
    let description = description_tail[..description_end].trim_end_matches('\r');
    if description.trim().is_empty() {
        return None;
    }

    let end = start
        + BULLET_MARKER.len()
        + name_end
        + 2
        + url_end
        + 3
        + 3
        + description_end;

    Some((
        end,
        ShoppingItem {
            name: name.to_string(),
            url: url.to_string(),
            description: description.trim().to_string(),
        },
    ))
}
