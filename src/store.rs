//! The note store: the single authoritative, ordered list of notes and its
//! persistence slot.
//!
//! Index 0 always holds the most recently added or updated note. Every
//! mutation rewrites the whole list into the slot and then notifies
//! subscribers. Persistence is best effort: a failed write is logged and the
//! in-memory list stays authoritative for the session.
use std::collections::{BTreeSet, HashSet};

use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::{decode, encode, KeyValueStore, Note, Result};

/// Slot key used when none is configured.
pub const DEFAULT_SLOT: &str = "notes";

/// What happened when the store read its slot at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The slot held nothing.
    Empty,
    /// The slot decoded into this many notes.
    Restored(usize),
    /// The slot could not be read or decoded; the store started empty.
    Recovered(String),
}

/// Handle returned by [`NoteStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&[Note])>;

/// Manages the ordered note list and keeps it in sync with one persistence slot.
pub struct NoteStore<S: KeyValueStore> {
    backend: S,
    key: String,
    notes: Vec<Note>,
    load_status: LoadStatus,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Opens the store on the default slot, restoring whatever it holds.
    pub fn open(backend: S) -> Self {
        Self::open_with_key(backend, DEFAULT_SLOT)
    }

    /// Opens the store on the slot named `key`.
    ///
    /// A missing or undecodable slot yields an empty store; the outcome is
    /// available through [`NoteStore::load_status`].
    pub fn open_with_key(backend: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            backend,
            key: key.into(),
            notes: Vec::new(),
            load_status: LoadStatus::Empty,
            observers: Vec::new(),
            next_subscription: 0,
        };

        match store.load() {
            Ok(None) => {
                debug!("Slot '{}' is empty, starting with no notes", store.key);
            }
            Ok(Some(notes)) => {
                info!("Restored {} notes from slot '{}'", notes.len(), store.key);
                store.load_status = LoadStatus::Restored(notes.len());
                store.notes = notes;
            }
            Err(e) => {
                warn!(
                    "Could not restore notes from slot '{}', starting empty: {}",
                    store.key, e
                );
                store.load_status = LoadStatus::Recovered(e.to_string());
            }
        }

        store
    }

    /// Reads and decodes the slot. `None` means the slot holds nothing.
    pub(crate) fn load(&self) -> Result<Option<Vec<Note>>> {
        match self.backend.get(&self.key)? {
            Some(bytes) => decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Encodes the whole list and overwrites the slot.
    pub(crate) fn save(&mut self) -> Result<()> {
        let blob = encode(&self.notes)?;
        self.backend.set(&self.key, &blob)?;
        debug!(
            "Saved {} notes ({} bytes) to slot '{}'",
            self.notes.len(),
            blob.len(),
            self.key
        );
        Ok(())
    }

    /// Persists and notifies after a mutation. Save failures stop here.
    fn commit(&mut self) {
        if let Err(e) = self.save() {
            error!(
                "Failed to save notes to slot '{}', changes are kept in memory only: {}",
                self.key, e
            );
        }
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.notes);
        }
    }

    /// Inserts `note` at the front of the list.
    pub fn add(&mut self, note: Note) {
        info!("Adding note {}", note.id);
        self.notes.insert(0, note);
        self.commit();
    }

    /// Replaces the note with the same id and moves it to the front.
    ///
    /// Returns `false`, without persisting or notifying, when no note has that id.
    pub fn update(&mut self, note: Note) -> bool {
        let Some(position) = self.position_of(&note.id) else {
            debug!("Update ignored, no note with id {}", note.id);
            return false;
        };

        info!("Updating note {} (was at position {})", note.id, position);
        self.notes.remove(position);
        self.notes.insert(0, note);
        self.commit();
        true
    }

    /// Removes the notes at `positions` in one pass.
    ///
    /// Survivors keep their relative order. Out-of-range positions are
    /// ignored, and the list is persisted even when nothing was removed.
    pub fn delete(&mut self, positions: impl IntoIterator<Item = usize>) {
        let doomed: HashSet<usize> = positions.into_iter().collect();
        let before = self.notes.len();

        let mut index = 0;
        self.notes.retain(|_| {
            let keep = !doomed.contains(&index);
            index += 1;
            keep
        });

        info!(
            "Deleted {} notes ({} positions requested)",
            before - self.notes.len(),
            doomed.len()
        );
        self.commit();
    }

    /// The current ordered list. Mutate only through the store.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &Uuid) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub fn position_of(&self, id: &Uuid) -> Option<usize> {
        self.notes.iter().position(|note| &note.id == id)
    }

    /// Store positions of the given ids; unknown ids are skipped.
    pub fn positions_of<'a>(&self, ids: impl IntoIterator<Item = &'a Uuid>) -> BTreeSet<usize> {
        ids.into_iter()
            .filter_map(|id| self.position_of(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Registers `observer` to be called with the new list after every mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&[Note]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }
}
