//! Sidebar folder grouping
//!
//! Folders are a purely local organization of the remote session list.
//! They are persisted as JSON strings through the settings store; the
//! backend never sees them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use meku_storage::Database;

use crate::error::CoreError;
use crate::Result;

const KEY_FOLDERS: &str = "sidebar_folders";
const KEY_FOLDER_MAP: &str = "sidebar_folder_map";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub collapsed: bool,
}

#[derive(Clone)]
pub struct FolderStore {
    db: Database,
}

impl FolderStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn folders(&self) -> Result<Vec<Folder>> {
        match self.db.get_setting(KEY_FOLDERS)? {
            Some(value) => Ok(serde_json::from_str(&value).unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    pub fn create_folder(&self, name: &str) -> Result<Folder> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Config(
                "Folder name cannot be empty".to_string(),
            ));
        }

        let folder = Folder {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            collapsed: false,
        };

        let mut folders = self.folders()?;
        folders.push(folder.clone());
        self.save_folders(&folders)?;

        tracing::info!(folder = %folder.name, "Created sidebar folder");

        Ok(folder)
    }

    pub fn rename_folder(&self, id: &str, name: &str) -> Result<Vec<Folder>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Config(
                "Folder name cannot be empty".to_string(),
            ));
        }

        let mut folders = self.folders()?;
        let folder = folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| CoreError::Config("Folder not found".to_string()))?;
        folder.name = name.to_string();

        self.save_folders(&folders)?;
        Ok(folders)
    }

    pub fn set_collapsed(&self, id: &str, collapsed: bool) -> Result<Vec<Folder>> {
        let mut folders = self.folders()?;
        let folder = folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| CoreError::Config("Folder not found".to_string()))?;
        folder.collapsed = collapsed;

        self.save_folders(&folders)?;
        Ok(folders)
    }

    /// Remove a folder. Sessions assigned to it fall back to the top
    /// level of the sidebar.
    pub fn remove_folder(&self, id: &str) -> Result<Vec<Folder>> {
        let mut folders = self.folders()?;
        folders.retain(|f| f.id != id);
        self.save_folders(&folders)?;

        let mut map = self.assignments()?;
        map.retain(|_, folder_id| folder_id != id);
        self.save_assignments(&map)?;

        Ok(folders)
    }

    /// session id → folder id
    pub fn assignments(&self) -> Result<HashMap<String, String>> {
        match self.db.get_setting(KEY_FOLDER_MAP)? {
            Some(value) => Ok(serde_json::from_str(&value).unwrap_or_default()),
            None => Ok(HashMap::new()),
        }
    }

    pub fn assign_session(&self, session_id: &str, folder_id: Option<&str>) -> Result<()> {
        let mut map = self.assignments()?;
        match folder_id {
            Some(folder_id) => {
                if !self.folders()?.iter().any(|f| f.id == folder_id) {
                    return Err(CoreError::Config("Folder not found".to_string()));
                }
                map.insert(session_id.to_string(), folder_id.to_string());
            }
            None => {
                map.remove(session_id);
            }
        }
        self.save_assignments(&map)
    }

    /// Drop the assignment of a deleted session, if it had one.
    pub fn forget_session(&self, session_id: &str) -> Result<()> {
        let mut map = self.assignments()?;
        if map.remove(session_id).is_some() {
            self.save_assignments(&map)?;
        }
        Ok(())
    }

    fn save_folders(&self, folders: &[Folder]) -> Result<()> {
        let serialized = serde_json::to_string(folders)?;
        self.db.set_setting(KEY_FOLDERS, &serialized)?;
        Ok(())
    }

    fn save_assignments(&self, map: &HashMap<String, String>) -> Result<()> {
        let serialized = serde_json::to_string(map)?;
        self.db.set_setting(KEY_FOLDER_MAP, &serialized)?;
        Ok(())
    }
}
