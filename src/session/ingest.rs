use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::future::try_join_all;

use crate::{
    error::{RestyleError, Result},
    models::{ImagePayload, UploadSource, UploadedImage},
    session::SessionState,
};

pub(crate) const INGEST_FAILED_BANNER: &str =
    "Could not read one of the selected files. Please try again.";

/// Ingest in-memory files into the session. Non-image entries are silently
/// dropped; if nothing survives the filter, no state changes. On commit the
/// new payloads are appended to the batch and every piece of
/// generation-dependent state is reset. Returns the number of images added.
pub fn ingest_sources(state: &mut SessionState, sources: Vec<UploadSource>) -> Result<usize> {
    let images: Vec<UploadSource> = sources
        .into_iter()
        .filter(|source| source.mime.starts_with("image/"))
        .collect();

    if images.is_empty() {
        return Ok(0);
    }

    let payloads: Vec<ImagePayload> = images
        .iter()
        .map(|source| ImagePayload::new(source.mime.clone(), STANDARD.encode(&source.bytes)))
        .collect();

    Ok(commit_uploads(state, payloads))
}

/// Ingest photos from disk. Paths without a recognized image extension are
/// silently dropped; all surviving files are read concurrently and the batch
/// is committed only once every read has succeeded. A single failed read
/// rejects the whole batch and leaves the session untouched apart from the
/// error banner.
pub async fn ingest_paths(state: &mut SessionState, paths: &[PathBuf]) -> Result<usize> {
    let accepted: Vec<(&PathBuf, &'static str)> = paths
        .iter()
        .filter_map(|path| mime_for_path(path).map(|mime| (path, mime)))
        .collect();

    if accepted.is_empty() {
        return Ok(0);
    }

    let reads = accepted.iter().map(|(path, _)| tokio::fs::read(path));
    let contents = match try_join_all(reads).await {
        Ok(contents) => contents,
        Err(e) => {
            log::error!("❌ Failed to read upload batch: {}", e);
            state.banner = Some(INGEST_FAILED_BANNER.to_string());
            return Err(RestyleError::IngestError(e.to_string()));
        }
    };

    let payloads: Vec<ImagePayload> = accepted
        .iter()
        .zip(contents.iter())
        .map(|((_, mime), bytes)| ImagePayload::new(*mime, STANDARD.encode(bytes)))
        .collect();

    Ok(commit_uploads(state, payloads))
}

fn commit_uploads(state: &mut SessionState, payloads: Vec<ImagePayload>) -> usize {
    let added = payloads.len();
    let start = state.uploads.len();

    for (offset, payload) in payloads.into_iter().enumerate() {
        state.uploads.push(UploadedImage {
            ordinal: start + offset,
            payload,
        });
    }
    state.reset_derived_state();

    log::info!("📥 Ingested {} photo(s), batch size now {}", added, state.uploads.len());
    added
}

fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
