//! Map files under the installation plus the client-local favorites set.
//!
//! Favorites live in their own key-set store (`favorites.json` in the app
//! config dir) with an explicit load/save contract rather than piggybacking
//! on any other state.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RecordError;

pub fn maps_dir(install: &Path) -> PathBuf {
    install.join("cstrike/maps")
}

/// List map names (`.bsp` stems), sorted.
pub fn list_maps(install: &Path) -> Result<Vec<String>, RecordError> {
    let dir = maps_dir(install);
    if !dir.exists() {
        return Err(RecordError::FileNotFound(dir.display().to_string()));
    }

    let mut maps = vec![];
    for entry in fs::read_dir(&dir).map_err(RecordError::IoError)? {
        let path = entry.map_err(RecordError::IoError)?.path();
        if path.extension().map_or(false, |ext| ext == "bsp") {
            if let Some(name) = path.file_stem() {
                maps.push(name.to_string_lossy().into_owned());
            }
        }
    }
    maps.sort();
    Ok(maps)
}

/// Delete every file belonging to the map (bsp, txt, res, overviews share
/// the stem). Returns whether anything was removed.
pub fn delete_map_files(install: &Path, map_name: &str) -> Result<bool, RecordError> {
    let dir = maps_dir(install);
    let mut deleted = false;

    for entry in fs::read_dir(&dir).map_err(RecordError::IoError)? {
        let path = entry.map_err(RecordError::IoError)?.path();
        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if file_name.starts_with(map_name) {
                fs::remove_file(&path).map_err(RecordError::IoError)?;
                deleted = true;
            }
        }
    }

    Ok(deleted)
}

/// Copy an external `.bsp` into the maps directory. Returns the map name.
pub fn import_map(install: &Path, source: &Path) -> Result<String, RecordError> {
    if source.extension().map_or(true, |ext| ext != "bsp") {
        return Err(RecordError::InvalidRecord(
            "map files must have a .bsp extension".to_string(),
        ));
    }
    let file_name = source
        .file_name()
        .ok_or_else(|| RecordError::InvalidRecord("map file has no name".to_string()))?;
    let dir = maps_dir(install);
    fs::create_dir_all(&dir).map_err(RecordError::IoError)?;
    fs::copy(source, dir.join(file_name)).map_err(RecordError::IoError)?;
    Ok(source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default())
}

/// Dedicated key-set store for favorite maps.
pub struct FavoriteMaps {
    path: PathBuf,
    set: BTreeSet<String>,
}

impl FavoriteMaps {
    /// Load the set from `favorites.json` in `dir`; a missing or unreadable
    /// file yields an empty set.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join("favorites.json");
        let set = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str::<BTreeSet<String>>(&content).ok())
            .unwrap_or_default();
        FavoriteMaps { path, set }
    }

    pub fn contains(&self, map_name: &str) -> bool {
        self.set.contains(map_name)
    }

    /// Flip membership and persist. Returns the new membership state.
    pub fn toggle(&mut self, map_name: &str) -> Result<bool, RecordError> {
        let now_favorite = if !self.set.remove(map_name) {
            self.set.insert(map_name.to_string());
            true
        } else {
            false
        };
        self.save()?;
        Ok(now_favorite)
    }

    /// Drop a favorite whose map no longer exists.
    pub fn remove(&mut self, map_name: &str) -> Result<(), RecordError> {
        if self.set.remove(map_name) {
            self.save()?;
        }
        Ok(())
    }

    fn save(&self) -> Result<(), RecordError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(RecordError::IoError)?;
        }
        let json = serde_json::to_string_pretty(&self.set).map_err(RecordError::InvalidJson)?;
        fs::write(&self.path, json).map_err(RecordError::IoError)?;
        Ok(())
    }
}
