use std::sync::Mutex;

use async_trait::async_trait;
use restyle::{
    ingest_sources, run_generation, send_message, ChatMode, DesignService, ImagePayload,
    QualityTier, RestyleError, Result, Role, RunState, SessionState, StyleRequest, UploadSource,
};

/// Service double that records every call in order and can be told to fail
/// at specific points.
#[derive(Default)]
struct ScriptedService {
    calls: Mutex<Vec<String>>,
    fail_generate: bool,
    /// Fail the nth `apply_style_from_reference` call (0-based).
    fail_apply_at: Option<usize>,
    apply_count: Mutex<usize>,
    fail_chat_calls: bool,
}

impl ScriptedService {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DesignService for ScriptedService {
    async fn generate_styled_image(
        &self,
        source: &ImagePayload,
        request: &StyleRequest,
    ) -> Result<ImagePayload> {
        self.record(format!("generate({},{})", source.data, request.style));
        if self.fail_generate {
            return Err(RestyleError::RequestError("scripted failure".into()));
        }
        Ok(ImagePayload::new("image/png", format!("styled:{}", source.data)))
    }

    async fn apply_style_from_reference(
        &self,
        source: &ImagePayload,
        reference: &ImagePayload,
        _quality: QualityTier,
    ) -> Result<ImagePayload> {
        let ordinal = {
            let mut count = self.apply_count.lock().unwrap();
            let ordinal = *count;
            *count += 1;
            ordinal
        };
        self.record(format!("apply({},{})", source.data, reference.data));
        if self.fail_apply_at == Some(ordinal) {
            return Err(RestyleError::RequestError("scripted failure".into()));
        }
        Ok(ImagePayload::new(
            "image/png",
            format!("ref[{}]:{}", reference.data, source.data),
        ))
    }

    async fn refine_image(
        &self,
        base: &ImagePayload,
        instruction: &str,
        _quality: QualityTier,
    ) -> Result<ImagePayload> {
        self.record(format!("refine({},{})", base.data, instruction));
        if self.fail_chat_calls {
            return Err(RestyleError::RequestError("scripted failure".into()));
        }
        Ok(ImagePayload::new("image/png", format!("refined:{}", base.data)))
    }

    async fn conversational_reply(&self, user_text: &str) -> Result<String> {
        self.record(format!("chat({})", user_text));
        if self.fail_chat_calls {
            return Err(RestyleError::RequestError("scripted failure".into()));
        }
        Ok("Happy to help with your room!".to_string())
    }

    async fn shopping_suggestions(&self, base: &ImagePayload, user_text: &str) -> Result<String> {
        self.record(format!("shopping({},{})", base.data, user_text));
        if self.fail_chat_calls {
            return Err(RestyleError::RequestError("scripted failure".into()));
        }
        Ok("- **[Sofa](http://x)** - Grey linen sofa".to_string())
    }
}

fn upload(tag: &str) -> UploadSource {
    UploadSource {
        name: format!("{}.png", tag),
        mime: "image/png".to_string(),
        bytes: tag.as_bytes().to_vec(),
    }
}

fn session_with_photos(style: &str, tags: &[&str]) -> SessionState {
    let mut state = SessionState::new();
    let sources = tags.iter().map(|tag| upload(tag)).collect();
    ingest_sources(&mut state, sources).unwrap();
    state.style = Some(style.to_string());
    state
}

#[tokio::test]
async fn single_photo_makes_exactly_one_style_call() {
    let service = ScriptedService::default();
    let mut state = session_with_photos("Scandinavian", &["a"]);

    run_generation(&mut state, &service).await.unwrap();

    let calls = service.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("generate("));
    assert!(calls[0].contains("Scandinavian"));
    assert_eq!(state.run, RunState::Ready);
    assert_eq!(state.generated.len(), 1);
    assert!(state.generated[0].is_some());
}

#[tokio::test]
async fn batch_uses_first_result_as_shared_reference() {
    let service = ScriptedService::default();
    let mut state = session_with_photos("Industrial", &["a", "b", "c"]);
    let reference_data = {
        use base64::{engine::general_purpose::STANDARD, Engine as _};
        format!("styled:{}", STANDARD.encode(b"a"))
    };

    run_generation(&mut state, &service).await.unwrap();

    let calls = service.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].starts_with("generate("));
    assert!(calls[1].starts_with("apply("));
    assert!(calls[2].starts_with("apply("));
    // Both derived calls condition on the image-0 result, in ascending order.
    assert!(calls[1].ends_with(&format!(",{})", reference_data)));
    assert!(calls[2].ends_with(&format!(",{})", reference_data)));

    assert_eq!(state.run, RunState::Ready);
    assert_eq!(state.generated.iter().flatten().count(), 3);
    assert!(state.explanation.is_some());
}

#[tokio::test]
async fn mid_batch_failure_keeps_committed_results() {
    let service = ScriptedService {
        fail_apply_at: Some(1), // second reference-apply call
        ..Default::default()
    };
    let mut state = session_with_photos("Industrial", &["a", "b", "c"]);

    let result = run_generation(&mut state, &service).await;

    assert!(result.is_err());
    assert_eq!(service.calls().len(), 3);
    assert!(state.generated[0].is_some());
    assert!(state.generated[1].is_some());
    assert!(state.generated[2].is_none());
    assert_eq!(state.run, RunState::Idle);
    assert!(state.banner.is_some());
}

#[tokio::test]
async fn first_call_failure_leaves_no_results() {
    let service = ScriptedService {
        fail_generate: true,
        ..Default::default()
    };
    let mut state = session_with_photos("Bohemian", &["a", "b"]);

    assert!(run_generation(&mut state, &service).await.is_err());
    assert_eq!(service.calls().len(), 1);
    assert!(state.generated.iter().all(|slot| slot.is_none()));
    assert_eq!(state.run, RunState::Idle);
}

#[tokio::test]
async fn generation_requires_photos_and_style() {
    let service = ScriptedService::default();

    let mut empty = SessionState::new();
    empty.style = Some("Japandi".to_string());
    assert!(run_generation(&mut empty, &service).await.is_err());

    let mut unstyled = session_with_photos("x", &["a"]);
    unstyled.style = None;
    assert!(run_generation(&mut unstyled, &service).await.is_err());

    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn concurrent_run_is_refused() {
    let service = ScriptedService::default();
    let mut state = session_with_photos("Industrial", &["a"]);
    state.run = RunState::Generating { current: 0, total: 1 };

    assert!(run_generation(&mut state, &service).await.is_err());
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn generation_restart_clears_transcript() {
    let service = ScriptedService::default();
    let mut state = session_with_photos("Industrial", &["a"]);

    run_generation(&mut state, &service).await.unwrap();
    state.selected = Some(0);
    send_message(&mut state, &service, ChatMode::General, "hi")
        .await
        .unwrap();
    assert_eq!(state.chat.len(), 2);

    run_generation(&mut state, &service).await.unwrap();
    assert!(state.chat.is_empty());
}

#[tokio::test]
async fn chat_without_selection_is_a_noop() {
    let service = ScriptedService::default();
    let mut state = session_with_photos("Industrial", &["a"]);

    send_message(&mut state, &service, ChatMode::Design, "make it brighter")
        .await
        .unwrap();

    assert!(state.chat.is_empty());
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn refinement_replaces_only_the_selected_slot() {
    let service = ScriptedService::default();
    let mut state = session_with_photos("Industrial", &["a", "b"]);
    run_generation(&mut state, &service).await.unwrap();

    let untouched = state.generated[0].clone();
    state.selected = Some(1);
    send_message(&mut state, &service, ChatMode::Design, "warmer lighting")
        .await
        .unwrap();

    let calls = service.calls();
    assert!(calls.last().unwrap().starts_with("refine("));
    assert_eq!(state.generated[0], untouched);
    assert!(state.generated[1].as_ref().unwrap().data.starts_with("refined:"));

    assert_eq!(state.chat.len(), 2);
    assert_eq!(state.chat[0].role, Role::User);
    assert_eq!(state.chat[1].role, Role::Model);
}

#[tokio::test]
async fn shopping_intent_routes_to_suggestions() {
    let service = ScriptedService::default();
    let mut state = session_with_photos("Industrial", &["a"]);
    run_generation(&mut state, &service).await.unwrap();
    state.selected = Some(0);

    send_message(&mut state, &service, ChatMode::Design, "find a similar lamp")
        .await
        .unwrap();

    let calls = service.calls();
    assert!(calls.last().unwrap().starts_with("shopping("));
    assert!(!calls.iter().any(|c| c.starts_with("refine(")));
    // Raw reply text is stored for the parser to pick apart at render time.
    assert_eq!(
        state.chat[1].text,
        "- **[Sofa](http://x)** - Grey linen sofa"
    );
}

#[tokio::test]
async fn general_mode_ignores_the_selected_image() {
    let service = ScriptedService::default();
    let mut state = session_with_photos("Industrial", &["a"]);
    run_generation(&mut state, &service).await.unwrap();
    state.selected = Some(0);

    send_message(&mut state, &service, ChatMode::General, "buy nothing, just chat")
        .await
        .unwrap();

    let calls = service.calls();
    assert!(calls.last().unwrap().starts_with("chat("));
}

#[tokio::test]
async fn failed_chat_call_appends_apology_only() {
    let service = ScriptedService {
        fail_chat_calls: true,
        ..Default::default()
    };
    let mut state = session_with_photos("Industrial", &["a"]);
    state.generated = vec![Some(ImagePayload::new("image/png", "gen0"))];
    state.selected = Some(0);

    send_message(&mut state, &service, ChatMode::Design, "make it brighter")
        .await
        .unwrap();

    assert_eq!(state.chat.len(), 2);
    assert_eq!(state.chat[0].role, Role::User);
    assert_eq!(state.chat[1].role, Role::Model);
    assert!(state.chat[1].text.starts_with("Sorry"));
    // The selected slot is untouched on failure.
    assert_eq!(state.generated[0].as_ref().unwrap().data, "gen0");
}

#[tokio::test]
async fn full_batch_fills_every_slot() {
    let service = ScriptedService::default();
    let mut state = session_with_photos("Coastal", &["a", "b", "c", "d"]);

    run_generation(&mut state, &service).await.unwrap();

    assert_eq!(state.run, RunState::Ready);
    for slot in &state.generated {
        assert!(slot.is_some());
    }
}
