//! Read-only filtered views over the note list.
use uuid::Uuid;

use crate::Note;

/// Notes matching `query`, in their original order.
pub fn filter<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    notes.iter().filter(|note| note.matches(query)).collect()
}

/// A filtered view that remembers where each row lives in the unfiltered list.
#[derive(Debug)]
pub struct SearchView<'a> {
    rows: Vec<(usize, &'a Note)>,
}

impl<'a> SearchView<'a> {
    pub fn new(notes: &'a [Note], query: &str) -> Self {
        let rows = notes
            .iter()
            .enumerate()
            .filter(|(_, note)| note.matches(query))
            .collect();
        Self { rows }
    }

    pub fn notes(&self) -> impl Iterator<Item = &'a Note> + '_ {
        self.rows.iter().map(|(_, note)| *note)
    }

    pub fn get(&self, row: usize) -> Option<&'a Note> {
        self.rows.get(row).map(|(_, note)| *note)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ids of the notes at the given view rows; rows past the end are skipped.
    pub fn ids_at(&self, rows: impl IntoIterator<Item = usize>) -> Vec<Uuid> {
        rows.into_iter()
            .filter_map(|row| self.get(row).map(|note| note.id))
            .collect()
    }

    /// Matching notes paired with their position in the unfiltered list.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &'a Note)> + '_ {
        self.rows.iter().copied()
    }
}
