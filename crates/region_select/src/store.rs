use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::atomic_io::write_text_atomic;
use crate::config::{StoreConfig, SELECTION_FILE_EXTENSION};
use crate::record::{parse_selection_json, SelectionParseError};
use crate::selection::RegionSelection;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read selection file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write selection file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to delete selection file {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to list selections in {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid selection file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: SelectionParseError,
    },
    #[error("failed to encode selection {id}: {source}")]
    Encode {
        id: String,
        #[source]
        source: SelectionParseError,
    },
    #[error("selection name cannot be used as a file name: {name:?}")]
    InvalidName { name: String },
    #[error("a selection file already exists at {path}")]
    AlreadyExists { path: PathBuf },
    #[error("selection is not loaded: {id}")]
    NotLoaded { id: String },
}

/// Selections backed by `.json` files, keyed by file path.
///
/// Editable and read-only copies are cached separately so that browsing a
/// directory does not turn every previewed file into an editable selection.
#[derive(Debug)]
pub struct SelectionStore {
    config: StoreConfig,
    selections: HashMap<String, RegionSelection>,
    read_only_selections: HashMap<String, RegionSelection>,
    current_selection_id: Option<String>,
}

impl SelectionStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            selections: HashMap::new(),
            read_only_selections: HashMap::new(),
            current_selection_id: None,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn selections_dir(&self) -> &Path {
        &self.config.selections_dir
    }

    pub fn selection_path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{name}.{SELECTION_FILE_EXTENSION}"))
    }

    pub fn selection_id(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    /// Selection ids of every `.json` file directly inside `dir`, sorted.
    pub fn list_selection_ids(dir: &Path) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(dir).map_err(|source| StoreError::ListDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::ListDir {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            let is_selection_file = path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(SELECTION_FILE_EXTENSION));
            if is_selection_file {
                ids.push(Self::selection_id(&path));
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Creates an empty selection in a new file and makes it current.
    /// Taken file names get a `" 1"`, `" 2"`, ... suffix.
    pub fn create_selection(
        &mut self,
        dir: &Path,
        desired_name: &str,
    ) -> Result<String, StoreError> {
        validate_selection_name(desired_name)?;

        let mut name = desired_name.to_string();
        let mut suffix = 1u32;
        while Self::selection_path(dir, &name).exists() {
            name = format!("{desired_name} {suffix}");
            suffix += 1;
        }

        let path = Self::selection_path(dir, &name);
        let id = Self::selection_id(&path);
        let mut selection = RegionSelection::new();
        selection.set_name(name);
        write_selection_file(&path, &id, &selection)?;

        info!(selection_id = %id, "selection_created");
        self.selections.insert(id.clone(), selection);
        self.current_selection_id = Some(id.clone());
        Ok(id)
    }

    pub fn get_selection(&self, id: &str) -> Option<&RegionSelection> {
        self.selections.get(id)
    }

    pub fn get_or_load_selection(
        &mut self,
        id: &str,
    ) -> Result<&mut RegionSelection, StoreError> {
        if !self.selections.contains_key(id) {
            let selection = match self.read_only_selections.remove(id) {
                Some(selection) => selection,
                None => load_selection_file(Path::new(id))?,
            };
            self.selections.insert(id.to_string(), selection);
        }
        self.selections.get_mut(id).ok_or_else(|| StoreError::NotLoaded {
            id: id.to_string(),
        })
    }

    /// Prefers an already-editable copy, otherwise loads into the read-only cache.
    pub fn get_or_load_selection_read_only(
        &mut self,
        id: &str,
    ) -> Result<&RegionSelection, StoreError> {
        if let Some(selection) = self.selections.get(id) {
            return Ok(selection);
        }
        if !self.read_only_selections.contains_key(id) {
            let selection = load_selection_file(Path::new(id))?;
            self.read_only_selections.insert(id.to_string(), selection);
        }
        self.read_only_selections
            .get(id)
            .ok_or_else(|| StoreError::NotLoaded { id: id.to_string() })
    }

    pub fn save_selection(&self, id: &str) -> Result<(), StoreError> {
        let selection = self.selections.get(id).ok_or_else(|| StoreError::NotLoaded {
            id: id.to_string(),
        })?;
        write_selection_file(Path::new(id), id, selection)?;
        info!(
            selection_id = %id,
            box_count = selection.sub_region_box_count(),
            "selection_saved"
        );
        Ok(())
    }

    /// Deletes the file and forgets any cached copy. Returns whether a file was removed.
    pub fn remove_selection(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = delete_file_if_present(Path::new(id))?;
        self.selections.remove(id);
        self.read_only_selections.remove(id);
        if self.current_selection_id.as_deref() == Some(id) {
            self.current_selection_id = None;
        }
        info!(selection_id = %id, removed, "selection_removed");
        Ok(removed)
    }

    /// Writes the selection under `dir/<new_name>.json` with `new_name` as its
    /// display name and deletes the old file. Returns the new selection id.
    /// If the old file cannot be deleted the new file is removed again and the
    /// store is left as it was.
    pub fn rename_selection(
        &mut self,
        dir: &Path,
        id: &str,
        new_name: &str,
    ) -> Result<String, StoreError> {
        validate_selection_name(new_name)?;
        let new_path = Self::selection_path(dir, new_name);
        if new_path.exists() {
            return Err(StoreError::AlreadyExists { path: new_path });
        }

        let mut selection = match self
            .selections
            .get(id)
            .or_else(|| self.read_only_selections.get(id))
        {
            Some(selection) => selection.clone(),
            None => load_selection_file(Path::new(id))?,
        };
        selection.set_name(new_name);

        let new_id = Self::selection_id(&new_path);
        write_selection_file(&new_path, &new_id, &selection)?;
        if let Err(error) = delete_file_if_present(Path::new(id)) {
            if let Err(cleanup) = fs::remove_file(&new_path) {
                warn!(
                    path = %new_path.display(),
                    error = %cleanup,
                    "selection_rename_cleanup_failed"
                );
            }
            return Err(error);
        }

        self.selections.remove(id);
        self.read_only_selections.remove(id);
        self.selections.insert(new_id.clone(), selection);
        if self.current_selection_id.as_deref() == Some(id) {
            self.current_selection_id = Some(new_id.clone());
        }

        info!(old_id = %id, new_id = %new_id, "selection_renamed");
        Ok(new_id)
    }

    pub fn current_selection_id(&self) -> Option<&str> {
        self.current_selection_id.as_deref()
    }

    pub fn set_current_selection(&mut self, id: Option<&str>) {
        debug!(selection_id = ?id, "selection_current_changed");
        self.current_selection_id = id.map(ToString::to_string);
    }

    pub fn current_selection_mut(
        &mut self,
    ) -> Result<Option<&mut RegionSelection>, StoreError> {
        match self.current_selection_id.clone() {
            Some(id) => self.get_or_load_selection(&id).map(Some),
            None => Ok(None),
        }
    }
}

fn validate_selection_name(name: &str) -> Result<(), StoreError> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || name.contains(['/', '\\']);
    if invalid {
        return Err(StoreError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn load_selection_file(path: &Path) -> Result<RegionSelection, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let selection = parse_selection_json(&raw).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        box_count = selection.sub_region_box_count(),
        "selection_loaded"
    );
    Ok(selection)
}

fn write_selection_file(
    path: &Path,
    id: &str,
    selection: &RegionSelection,
) -> Result<(), StoreError> {
    let json = selection.to_json_string().map_err(|source| StoreError::Encode {
        id: id.to_string(),
        source,
    })?;
    write_text_atomic(path, &json).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn delete_file_if_present(path: &Path) -> Result<bool, StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(StoreError::Delete {
            path: path.to_path_buf(),
            source,
        }),
    }
}
