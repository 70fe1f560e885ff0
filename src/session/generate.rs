use crate::{
    error::{RestyleError, Result},
    models::RunState,
    service::{DesignService, StyleRequest},
    session::SessionState,
};

pub(crate) const GENERATION_FAILED_BANNER: &str =
    "Something went wrong while generating your designs. Please try again.";

/// Run the batch generation workflow over the current upload sequence.
///
/// One photo: a single styled generation. Several photos: the first result is
/// generated from the style selection and becomes the reference; every
/// remaining photo is then restyled against that reference, one call at a
/// time in ascending index order, so the whole batch shares one visual
/// treatment. Results are committed slot by slot as they arrive.
///
/// On failure the remaining steps are abandoned and the run returns to idle,
/// but slots committed by earlier steps of the same run stay visible.
pub async fn run_generation(
    state: &mut SessionState,
    service: &dyn DesignService,
) -> Result<()> {
    if state.run.is_generating() {
        return Err(RestyleError::GenerationError(
            "A generation run is already in progress".into(),
        ));
    }
    if state.uploads.is_empty() {
        return Err(RestyleError::GenerationError(
            "No photos uploaded".into(),
        ));
    }
    let style = state.style.clone().ok_or_else(|| {
        RestyleError::GenerationError("A primary style must be selected".into())
    })?;

    let total = state.uploads.len();
    let request = StyleRequest {
        style,
        palette: state.palette.clone(),
        atmosphere: state.atmosphere.clone(),
        quality: state.quality,
    };

    state.generated = vec![None; total];
    state.chat.clear();
    state.selected = None;
    state.banner = None;
    state.explanation = None;
    state.run = RunState::Generating { current: 0, total };

    log::info!("🎨 Starting generation run: {} photo(s), style '{}'", total, request.style);

    match generate_batch(state, service, &request).await {
        Ok(()) => {
            state.run = RunState::Ready;
            state.explanation = Some(explanation_text(&request.style, total));
            log::info!("✅ Generation run complete");
            Ok(())
        }
        Err(e) => {
            state.run = RunState::Idle;
            state.banner = Some(GENERATION_FAILED_BANNER.to_string());
            log::error!("❌ Generation run aborted: {}", e);
            Err(e)
        }
    }
}

async fn generate_batch(
    state: &mut SessionState,
    service: &dyn DesignService,
    request: &StyleRequest,
) -> Result<()> {
    let total = state.uploads.len();

    let reference = service
        .generate_styled_image(&state.uploads[0].payload, request)
        .await?;
    state.generated[0] = Some(reference.clone());
    state.run = RunState::Generating { current: 1, total };
    log::debug!("Committed reference result (1/{})", total);

    for index in 1..total {
        let styled = service
            .apply_style_from_reference(&state.uploads[index].payload, &reference, request.quality)
            .await?;
        state.generated[index] = Some(styled);
        state.run = RunState::Generating {
            current: index + 1,
            total,
        };
        log::debug!("Committed restyled result ({}/{})", index + 1, total);
    }

    Ok(())
}

fn explanation_text(style: &str, total: usize) -> String {
    if total == 1 {
        format!("Applied the {} treatment to your photo.", style)
    } else {
        format!(
            "Applied the {} treatment across {} photos, using the first result \
             as the shared style reference so every room matches.",
            style, total
        )
    }
}
