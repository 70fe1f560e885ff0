use crate::{
    error::Result,
    models::{ChatMessage, ChatMode, ImagePayload},
    service::DesignService,
    session::SessionState,
};

/// Fixed acknowledgement appended after an in-place refinement.
pub(crate) const REFINEMENT_ACK: &str =
    "I've updated the design based on your feedback. Take a look!";

/// Fixed reply appended when any chat or refinement call fails.
pub(crate) const CHAT_APOLOGY: &str =
    "Sorry, I ran into a problem handling that request. Please try again.";

const SHOPPING_KEYWORDS: [&str; 7] =
    ["shop", "buy", "purchase", "link", "find", "product", "item"];

/// Heuristic classification of a chat message as a product-search request:
/// case-insensitive membership of any keyword in the raw input.
pub fn is_shopping_query(text: &str) -> bool {
    let lowered = text.to_lowercase();
    SHOPPING_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

enum Reply {
    Text(String),
    Refined(ImagePayload),
}

enum Target {
    Conversation,
    Design(ImagePayload),
}

/// Send a chat message against the current selection.
///
/// The user's message is appended optimistically and always receives exactly
/// one model message in response: the returned text, the fixed refinement
/// acknowledgement, or the fixed apology when the call fails. Without an
/// active selection the operation is a no-op. Call failures stay local to the
/// transcript; no other session state changes.
pub async fn send_message(
    state: &mut SessionState,
    service: &dyn DesignService,
    mode: ChatMode,
    text: &str,
) -> Result<()> {
    let Some(index) = state.selected else {
        log::debug!("Chat message ignored: no result selected");
        return Ok(());
    };

    // Design mode needs the selected slot itself; resolve it before the
    // optimistic append so an unusable selection stays a no-op.
    let target = match mode {
        ChatMode::Design => match state.selected_result() {
            Some(payload) => Target::Design(payload.clone()),
            None => {
                log::debug!("Chat message ignored: selected slot {} is empty", index);
                return Ok(());
            }
        },
        ChatMode::General => Target::Conversation,
    };

    state.chat.push(ChatMessage::user(text));

    let outcome = match target {
        Target::Conversation => service.conversational_reply(text).await.map(Reply::Text),
        Target::Design(base) => {
            if is_shopping_query(text) {
                service
                    .shopping_suggestions(&base, text)
                    .await
                    .map(Reply::Text)
            } else {
                service
                    .refine_image(&base, text, state.quality)
                    .await
                    .map(Reply::Refined)
            }
        }
    };

    match outcome {
        Ok(Reply::Text(reply)) => {
            state.chat.push(ChatMessage::model(reply));
        }
        Ok(Reply::Refined(payload)) => {
            state.generated[index] = Some(payload);
            state.chat.push(ChatMessage::model(REFINEMENT_ACK));
        }
        Err(e) => {
            log::warn!("⚠️ Chat call failed: {}", e);
            state.chat.push(ChatMessage::model(CHAT_APOLOGY));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shopping_keywords_match_case_insensitively() {
        assert!(is_shopping_query("find a similar lamp"));
        assert!(is_shopping_query("Where can I BUY this rug?"));
        assert!(is_shopping_query("got a link to that mirror?"));
        assert!(is_shopping_query("show me products like the armchair"));
    }

    #[test]
    fn plain_instructions_are_not_shopping() {
        assert!(!is_shopping_query("make the walls sage green"));
        assert!(!is_shopping_query("brighter lighting please"));
        assert!(!is_shopping_query(""));
    }
}
