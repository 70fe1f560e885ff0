pub mod file;
pub mod memory;
pub mod traits;

use std::sync::Arc;

use crate::{
    config::StoreConfig,
    error::{RestyleError, Result},
    models::Preferences,
};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;

/// The single fixed key the serialized preferences record lives under.
pub const PREFERENCES_KEY: &str = "restyle.preferences";

/// Preference persistence over a pluggable key-value backend. Reads and
/// writes happen only on explicit user action; there is no autosave.
pub struct PreferenceStore {
    backend: Arc<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let backend: Arc<dyn KeyValueStore> = if config.in_memory {
            Arc::new(MemoryStore::new())
        } else if let Some(path) = config.path {
            Arc::new(FileStore::new(path))
        } else {
            return Err(RestyleError::ConfigError(
                "Preference store needs a file path or the in-memory backend".into(),
            ));
        };

        Ok(Self { backend })
    }

    pub fn with_backend(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Load the stored record. A malformed record is logged and treated as
    /// absent so the in-memory defaults stay in effect.
    pub async fn load(&self) -> Result<Option<Preferences>> {
        let Some(raw) = self.backend.get(PREFERENCES_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Preferences>(&raw) {
            Ok(prefs) => Ok(Some(prefs)),
            Err(e) => {
                log::warn!("⚠️ Ignoring malformed stored preferences: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn save(&self, prefs: &Preferences) -> Result<()> {
        let raw = serde_json::to_string(prefs)
            .map_err(|e| RestyleError::SerializationError(e.to_string()))?;
        self.backend.put(PREFERENCES_KEY, raw).await?;
        log::info!("💾 Preferences saved");
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        self.backend.remove(PREFERENCES_KEY).await?;
        log::info!("🧹 Preferences cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QualityTier;

    #[tokio::test]
    async fn preferences_round_trip() {
        let store = PreferenceStore::new(StoreConfig::in_memory()).unwrap();

        let prefs = Preferences::new()
            .with_style("Scandinavian")
            .with_palette("warm neutrals")
            .with_atmosphere("cozy")
            .with_quality(QualityTier::High);

        store.save(&prefs).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, prefs);

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn absent_quality_falls_back_to_standard() {
        let store = PreferenceStore::new(StoreConfig::in_memory()).unwrap();
        store
            .backend
            .put(PREFERENCES_KEY, r#"{"style":"Industrial"}"#.to_string())
            .await
            .unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.style.as_deref(), Some("Industrial"));
        assert_eq!(loaded.palette, None);
        assert_eq!(loaded.quality, QualityTier::Standard);
    }

    #[tokio::test]
    async fn malformed_record_is_ignored() {
        let store = PreferenceStore::new(StoreConfig::in_memory()).unwrap();
        store
            .backend
            .put(PREFERENCES_KEY, "not json at all".to_string())
            .await
            .unwrap();

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[test]
    fn store_config_requires_a_backend() {
        assert!(PreferenceStore::new(StoreConfig::new()).is_err());
        assert!(PreferenceStore::new(StoreConfig::in_memory()).is_ok());
    }
}
