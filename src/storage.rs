//! Key-value persistence backends and the blob codec for the note list.
use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

use log::{debug, error, trace};
use tempfile::NamedTempFile;

use crate::{Note, NotesError, Result};

/// Local key-value persistence. Each key names one slot holding one blob.
pub trait KeyValueStore {
    /// Reads the blob stored under `key`, or `None` when the slot is empty.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Overwrites the slot `key` with `bytes`.
    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<()>;
}

/// Serializes the full ordered note list into one blob.
pub fn encode(notes: &[Note]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(notes)?)
}

/// Restores a note list from a blob written by [`encode`], preserving order.
pub fn decode(bytes: &[u8]) -> Result<Vec<Note>> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Stores each slot as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Helper method to get the file path for a slot
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.slot_path(key);
        debug!("Reading slot '{}' from {}", key, path.display());

        match fs::read(&path) {
            Ok(bytes) => {
                trace!("Read {} bytes from {}", bytes.len(), path.display());
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Slot file {} does not exist yet", path.display());
                Ok(None)
            }
            Err(e) => {
                error!("Failed to read slot file {}: {}", path.display(), e);
                Err(NotesError::Io(e))
            }
        }
    }

    /// Writes through a temporary file in the same directory so a crash never leaves a torn blob.
    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        if !self.dir.exists() {
            debug!("Creating data directory: {}", self.dir.display());
            fs::create_dir_all(&self.dir).map_err(|e| {
                error!("Failed to create directory {}: {}", self.dir.display(), e);
                NotesError::DirectoryError {
                    path: self.dir.clone(),
                }
            })?;
        }

        let file_path = self.slot_path(key);

        debug!("Creating temporary file in directory: {}", self.dir.display());
        let mut temp_file = NamedTempFile::new_in(&self.dir).map_err(|e| {
            error!("Failed to create temporary file: {}", e);
            NotesError::Io(e)
        })?;

        trace!("Writing {} bytes to temporary file", bytes.len());
        temp_file.write_all(bytes).map_err(|e| {
            error!("Failed to write to temporary file: {}", e);
            NotesError::Io(e)
        })?;

        temp_file.flush().map_err(|e| {
            error!("Failed to flush temporary file: {}", e);
            NotesError::Io(e)
        })?;

        debug!("Performing atomic move of temporary file to {}", file_path.display());
        temp_file.persist(&file_path).map_err(|e| {
            error!(
                "Failed to persist file {}: {}",
                file_path.display(),
                e.error
            );
            NotesError::Io(e.error)
        })?;

        Ok(())
    }
}

/// In-memory slots. Clones share the same backing map, so a second store
/// opened on a clone sees what the first one wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Rc<RefCell<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places raw bytes in a slot, bypassing any store.
    pub fn insert_raw(&self, key: &str, bytes: impl Into<Vec<u8>>) {
        self.slots.borrow_mut().insert(key.to_string(), bytes.into());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        self.slots.borrow_mut().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{ColorTag, NoteFields};

    fn sample_notes() -> Vec<Note> {
        let mut custom = Note::new(NoteFields {
            title: "Paint".into(),
            content: "Teal for the door".into(),
            location: "Garage".into(),
            date: Utc.with_ymd_and_hms(2023, 3, 14, 15, 9, 26).unwrap(),
            color_tag: ColorTag::Custom(Some("#1a2b3c".into())),
        });
        custom.update_content(custom.fields());

        vec![
            custom,
            Note::new(NoteFields {
                title: "Émoji 📝 and \"quotes\"".into(),
                content: "line one\nline two".into(),
                color_tag: ColorTag::Orange,
                ..NoteFields::default()
            }),
            Note::new(NoteFields {
                color_tag: ColorTag::Custom(None),
                ..NoteFields::default()
            }),
            Note::new(NoteFields::default()),
        ]
    }

    #[test]
    fn decode_of_encode_reproduces_sequence() {
        let notes = sample_notes();
        let blob = encode(&notes).unwrap();
        assert_eq!(decode(&blob).unwrap(), notes);
    }

    #[test]
    fn empty_list_round_trips() {
        let blob = encode(&[]).unwrap();
        assert!(decode(&blob).unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode(b"not json"), Err(NotesError::Serialization(_))));
        assert!(decode(b"{\"id\": 1}").is_err());
    }

    #[test]
    fn file_store_reports_missing_slot_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get("notes").unwrap().is_none());
    }

    #[test]
    fn file_store_overwrites_slot_and_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        store.set("notes", b"first").unwrap();
        store.set("notes", b"second").unwrap();

        assert_eq!(store.get("notes").unwrap().as_deref(), Some(&b"second"[..]));
        assert!(store.slot_path("notes").ends_with("notes.json"));
        let leftovers = fs::read_dir(store.dir()).unwrap().count();
        assert_eq!(leftovers, 1, "temporary files should not linger");
    }

    #[test]
    fn memory_store_clones_share_slots() {
        let mut store = MemoryStore::new();
        let other = store.clone();
        store.set("notes", b"[]").unwrap();
        assert_eq!(other.get("notes").unwrap().as_deref(), Some(&b"[]"[..]));
        assert!(other.get("other").unwrap().is_none());
    }
}
