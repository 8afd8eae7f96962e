//! Screener presets
//!
//! Named, per-user filter selections. Saving a name that already exists for
//! the user replaces the whole record; there are no partial updates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{PresetError, PresetResult};
use crate::filters::ScreenerFilterSelection;

/// Preset identifier
pub type PresetId = Uuid;

/// Saved screener preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Preset id
    pub id: PresetId,
    /// Owner
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Human-readable selection
    pub filters: ScreenerFilterSelection,
    /// When this record was written
    pub created_at: DateTime<Utc>,
}

/// Preset store
#[async_trait]
pub trait PresetStore: Send + Sync {
    /// Save under `name`, replacing any preset of the same name for the user
    async fn save(
        &self,
        user_id: &str,
        name: &str,
        filters: &ScreenerFilterSelection,
    ) -> PresetResult<PresetId>;

    /// User's presets, newest first
    async fn list(&self, user_id: &str) -> PresetResult<Vec<Preset>>;

    /// Delete by id
    async fn delete(&self, user_id: &str, id: PresetId) -> PresetResult<()>;
}

fn validate_name(name: &str) -> PresetResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PresetError::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}

fn upsert(
    presets: &mut Vec<Preset>,
    user_id: &str,
    name: &str,
    filters: &ScreenerFilterSelection,
    now: DateTime<Utc>,
) -> PresetResult<PresetId> {
    let name = validate_name(name)?;

    if let Some(existing) = presets
        .iter_mut()
        .find(|p| p.user_id == user_id && p.name.eq_ignore_ascii_case(name))
    {
        *existing = Preset {
            id: existing.id,
            user_id: user_id.to_string(),
            name: name.to_string(),
            filters: filters.clone(),
            created_at: now,
        };
        return Ok(existing.id);
    }

    let preset = Preset {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        name: name.to_string(),
        filters: filters.clone(),
        created_at: now,
    };
    let id = preset.id;
    presets.push(preset);
    Ok(id)
}

fn for_user(presets: &[Preset], user_id: &str) -> Vec<Preset> {
    let mut list: Vec<Preset> = presets
        .iter()
        .filter(|p| p.user_id == user_id)
        .cloned()
        .collect();
    list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    list
}

fn remove(presets: &mut Vec<Preset>, user_id: &str, id: PresetId) -> PresetResult<()> {
    let before = presets.len();
    presets.retain(|p| !(p.id == id && p.user_id == user_id));
    if presets.len() == before {
        return Err(PresetError::NotFound(id));
    }
    Ok(())
}

/// In-memory preset store (for testing and development)
pub struct InMemoryPresetStore {
    presets: RwLock<Vec<Preset>>,
}

impl InMemoryPresetStore {
    /// Empty store
    pub fn new() -> Self {
        Self {
            presets: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPresetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PresetStore for InMemoryPresetStore {
    async fn save(
        &self,
        user_id: &str,
        name: &str,
        filters: &ScreenerFilterSelection,
    ) -> PresetResult<PresetId> {
        upsert(&mut self.presets.write(), user_id, name, filters, Utc::now())
    }

    async fn list(&self, user_id: &str) -> PresetResult<Vec<Preset>> {
        Ok(for_user(&self.presets.read(), user_id))
    }

    async fn delete(&self, user_id: &str, id: PresetId) -> PresetResult<()> {
        remove(&mut self.presets.write(), user_id, id)
    }
}

/// JSON-file preset store. The whole file is rewritten on every change.
pub struct FilePresetStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl FilePresetStore {
    /// Store backed by `path`; the file is created on first save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> PresetResult<Vec<Preset>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn persist(&self, presets: &[Preset]) -> PresetResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(presets)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl PresetStore for FilePresetStore {
    async fn save(
        &self,
        user_id: &str,
        name: &str,
        filters: &ScreenerFilterSelection,
    ) -> PresetResult<PresetId> {
        let _guard = self.write_lock.lock().await;
        let mut presets = self.load().await?;
        let id = upsert(&mut presets, user_id, name, filters, Utc::now())?;
        self.persist(&presets).await?;
        tracing::debug!(%user_id, %id, path = %self.path.display(), "preset saved");
        Ok(id)
    }

    async fn list(&self, user_id: &str) -> PresetResult<Vec<Preset>> {
        let presets = self.load().await?;
        Ok(for_user(&presets, user_id))
    }

    async fn delete(&self, user_id: &str, id: PresetId) -> PresetResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut presets = self.load().await?;
        remove(&mut presets, user_id, id)?;
        self.persist(&presets).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_screen() -> ScreenerFilterSelection {
        ScreenerFilterSelection::new()
            .with("pe", "Under 10")
            .with("dividendYield", "Over 3%")
    }

    #[tokio::test]
    async fn test_in_memory_crud() {
        let store = InMemoryPresetStore::new();

        let id = store.save("u1", "Value", &value_screen()).await.unwrap();
        store
            .save("u2", "Other user", &ScreenerFilterSelection::new())
            .await
            .unwrap();

        let list = store.list("u1").await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, id);
        assert_eq!(list[0].filters.get("pe"), Some("Under 10"));

        store.delete("u1", id).await.unwrap();
        assert!(store.list("u1").await.unwrap().is_empty());
        assert_eq!(store.list("u2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_same_name_replaces_record() {
        let store = InMemoryPresetStore::new();
        let first = store.save("u1", "Value", &value_screen()).await.unwrap();

        let replacement = ScreenerFilterSelection::new().with("price", "Under $10");
        let second = store.save("u1", " value ", &replacement).await.unwrap();

        assert_eq!(first, second);
        let list = store.list("u1").await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].filters, replacement);
        assert!(list[0].filters.get("pe").is_none());
    }

    #[tokio::test]
    async fn test_delete_checks_owner() {
        let store = InMemoryPresetStore::new();
        let id = store.save("u1", "Mine", &value_screen()).await.unwrap();

        assert!(matches!(store.delete("u2", id).await, Err(PresetError::NotFound(_))));
        assert_eq!(store.list("u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let store = InMemoryPresetStore::new();
        let err = store.save("u1", "   ", &value_screen()).await.unwrap_err();
        assert!(matches!(err, PresetError::InvalidName(_)));
    }

    #[tokio::test]
    async fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("presets.json");

        let id = {
            let store = FilePresetStore::new(&path);
            assert!(store.list("u1").await.unwrap().is_empty());
            store.save("u1", "Value", &value_screen()).await.unwrap()
        };

        let reopened = FilePresetStore::new(&path);
        let list = reopened.list("u1").await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, id);
        assert_eq!(list[0].filters, value_screen());

        reopened.delete("u1", id).await.unwrap();
        assert!(reopened.list("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_store_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FilePresetStore::new(&path);
        assert!(matches!(store.list("u1").await, Err(PresetError::Corrupt(_))));
    }
}
