use std::{collections::HashSet, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::AppError;

/// Where a client remembers which modules it has already rated.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn rated_modules(&self) -> Result<HashSet<Uuid>, AppError>;

    async fn record_rated(&self, module_id: Uuid) -> Result<(), AppError>;

    async fn clear(&self) -> Result<(), AppError>;
}

#[async_trait]
impl<S: PreferenceStore + ?Sized> PreferenceStore for Arc<S> {
    async fn rated_modules(&self) -> Result<HashSet<Uuid>, AppError> {
        (**self).rated_modules().await
    }

    async fn record_rated(&self, module_id: Uuid) -> Result<(), AppError> {
        (**self).record_rated(module_id).await
    }

    async fn clear(&self) -> Result<(), AppError> {
        (**self).clear().await
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    rated: Arc<Mutex<HashSet<Uuid>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn rated_modules(&self) -> Result<HashSet<Uuid>, AppError> {
        Ok(self.rated.lock().await.clone())
    }

    async fn record_rated(&self, module_id: Uuid) -> Result<(), AppError> {
        self.rated.lock().await.insert(module_id);
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        self.rated.lock().await.clear();
        Ok(())
    }
}

/// JSON file holding `{ "rated_modules": [ids...] }`, the on-disk
/// counterpart of browser local storage.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Arc<Mutex<()>>,
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct StoredPreferences {
    #[serde(default)]
    rated_modules: Vec<Uuid>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load(&self) -> Result<StoredPreferences, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| AppError::Deserialization(format!("Corrupt preference file: {e}"))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoredPreferences::default()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn save(&self, prefs: &StoredPreferences) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(prefs)
            .map_err(|e| AppError::Serialization(e.to_string()))?;

        // Write then rename so a crash never leaves a half-written file
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn rated_modules(&self) -> Result<HashSet<Uuid>, AppError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.rated_modules.into_iter().collect())
    }

    async fn record_rated(&self, module_id: Uuid) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut prefs = self.load().await?;
        if !prefs.rated_modules.contains(&module_id) {
            prefs.rated_modules.push(module_id);
            self.save(&prefs).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}
