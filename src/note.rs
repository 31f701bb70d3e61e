//! Core data structures for the tintnotes application.
//!
//! This module contains the `Note` record, the editable field set used by the
//! add and edit flows, and the flat wire record notes are serialized through.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ColorKind, ColorTag};

/// Represents a single note in our system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NoteRecord", into = "NoteRecord")]
pub struct Note {
    /// Unique identifier, fixed at creation
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Free-text place the note refers to
    pub location: String,
    /// When the note was created; never changes
    pub date_created: DateTime<Utc>,
    /// Last time the editable fields were rewritten
    pub date_modified: DateTime<Utc>,
    /// User-chosen date, independent of the two timestamps above
    pub date: DateTime<Utc>,
    pub color_tag: ColorTag,
}

/// The user-editable part of a note.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteFields {
    pub title: String,
    pub content: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub color_tag: ColorTag,
}

impl Default for NoteFields {
    fn default() -> Self {
        NoteFields {
            title: String::new(),
            content: String::new(),
            location: String::new(),
            date: Utc::now(),
            color_tag: ColorTag::None,
        }
    }
}

impl NoteFields {
    /// Fields with the given title and everything else defaulted
    pub fn titled(title: impl Into<String>) -> Self {
        NoteFields {
            title: title.into(),
            ..NoteFields::default()
        }
    }
}

impl Note {
    /// Creates a new note with a fresh id and both timestamps set to now
    pub fn new(fields: NoteFields) -> Self {
        let now = Utc::now();
        Note {
            id: Uuid::new_v4(),
            title: fields.title,
            content: fields.content,
            location: fields.location,
            date_created: now,
            date_modified: now,
            date: fields.date,
            color_tag: fields.color_tag,
        }
    }

    /// Overwrites every editable field and refreshes `date_modified`.
    ///
    /// `id` and `date_created` are left alone.
    pub fn update_content(&mut self, fields: NoteFields) {
        self.title = fields.title;
        self.content = fields.content;
        self.location = fields.location;
        self.date = fields.date;
        self.color_tag = fields.color_tag;
        self.date_modified = Utc::now().max(self.date_created);
    }

    pub fn fields(&self) -> NoteFields {
        NoteFields {
            title: self.title.clone(),
            content: self.content.clone(),
            location: self.location.clone(),
            date: self.date,
            color_tag: self.color_tag.clone(),
        }
    }

    /// Case-insensitive substring match on title, content, location and colour label.
    ///
    /// An empty query matches every note.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        [
            self.title.as_str(),
            self.content.as_str(),
            self.location.as_str(),
            self.color_tag.label(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Flat on-disk shape of a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteRecord {
    id: Uuid,
    title: String,
    content: String,
    date_created: DateTime<Utc>,
    date_modified: DateTime<Utc>,
    location: String,
    date: DateTime<Utc>,
    color_tag: ColorKind,
    #[serde(default)]
    custom_color_hex: Option<String>,
}

impl From<Note> for NoteRecord {
    fn from(note: Note) -> Self {
        let color_tag = note.color_tag.kind();
        let custom_color_hex = match note.color_tag {
            ColorTag::Custom(hex) => hex,
            _ => None,
        };
        NoteRecord {
            id: note.id,
            title: note.title,
            content: note.content,
            date_created: note.date_created,
            date_modified: note.date_modified,
            location: note.location,
            date: note.date,
            color_tag,
            custom_color_hex,
        }
    }
}

impl From<NoteRecord> for Note {
    fn from(record: NoteRecord) -> Self {
        Note {
            id: record.id,
            title: record.title,
            content: record.content,
            location: record.location,
            date_created: record.date_created,
            date_modified: record.date_modified,
            date: record.date,
            color_tag: ColorTag::from_parts(record.color_tag, record.custom_color_hex),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn new_note_has_matching_timestamps() {
        let note = Note::new(NoteFields::titled("Groceries"));
        assert_eq!(note.date_created, note.date_modified);
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.color_tag, ColorTag::None);
    }

    #[test]
    fn new_notes_get_distinct_ids() {
        let a = Note::new(NoteFields::default());
        let b = Note::new(NoteFields::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn update_content_keeps_identity_and_refreshes_modified() {
        let mut note = Note::new(NoteFields::titled("Draft"));
        let id = note.id;
        let created = note.date_created;
        let before = note.date_modified;

        let date = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap();
        note.update_content(NoteFields {
            title: "Final".into(),
            content: "body".into(),
            location: "Lisbon".into(),
            date,
            color_tag: ColorTag::Green,
        });

        assert_eq!(note.id, id);
        assert_eq!(note.date_created, created);
        assert!(note.date_modified >= before);
        assert!(note.date_created <= note.date_modified);
        assert_eq!(note.title, "Final");
        assert_eq!(note.location, "Lisbon");
        assert_eq!(note.date, date);
        assert_eq!(note.color_tag, ColorTag::Green);
    }

    #[test]
    fn modified_never_precedes_created() {
        let mut note = Note::new(NoteFields::default());
        note.date_created = Utc::now() + chrono::Duration::hours(1);
        note.update_content(note.fields());
        assert!(note.date_created <= note.date_modified);
    }

    #[test]
    fn matches_is_case_insensitive_substring() {
        let note = Note::new(NoteFields::titled("Grocery List"));
        assert!(note.matches("grocery"));
        assert!(note.matches("LIST"));
        assert!(note.matches(""));
        assert!(!note.matches("xyz"));
    }

    #[test]
    fn matches_location_content_and_colour_label() {
        let note = Note::new(NoteFields {
            title: "Trip".into(),
            content: "Pack the tent".into(),
            location: "Yosemite".into(),
            color_tag: ColorTag::Purple,
            ..NoteFields::default()
        });
        assert!(note.matches("TENT"));
        assert!(note.matches("semi"));
        assert!(note.matches("purple"));
        assert!(!note.matches("red"));
    }

    #[test]
    fn serializes_with_camel_case_wire_fields() {
        let note = Note::new(NoteFields {
            color_tag: ColorTag::custom(crate::Rgb::new(1, 2, 3)),
            ..NoteFields::titled("A")
        });
        let value = serde_json::to_value(&note).unwrap();

        assert_eq!(value["id"], json!(note.id.to_string()));
        assert_eq!(value["colorTag"], json!("custom"));
        assert_eq!(value["customColorHex"], json!("010203"));
        assert!(value["dateCreated"].is_string());
        assert!(value["dateModified"].is_string());
        assert!(value["date"].is_string());
        assert_eq!(value["location"], json!(""));
    }

    #[test]
    fn fixed_tag_writes_null_hex() {
        let note = Note::new(NoteFields {
            color_tag: ColorTag::Blue,
            ..NoteFields::default()
        });
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["colorTag"], json!("blue"));
        assert!(value["customColorHex"].is_null());
    }

    #[test]
    fn stray_hex_on_fixed_tag_is_dropped_on_read() {
        let raw = json!({
            "id": "6f9619ff-8b86-d011-b42d-00c04fc964ff",
            "title": "t",
            "content": "",
            "dateCreated": "2024-01-01T00:00:00Z",
            "dateModified": "2024-01-02T00:00:00Z",
            "location": "",
            "date": "2024-01-01T00:00:00Z",
            "colorTag": "red",
            "customColorHex": "00FF00"
        });
        let note: Note = serde_json::from_value(raw).unwrap();
        assert_eq!(note.color_tag, ColorTag::Red);
    }

    #[test]
    fn missing_hex_field_is_accepted() {
        let raw = json!({
            "id": "6f9619ff-8b86-d011-b42d-00c04fc964ff",
            "title": "t",
            "content": "",
            "dateCreated": "2024-01-01T00:00:00Z",
            "dateModified": "2024-01-01T00:00:00Z",
            "location": "",
            "date": "2024-01-01T00:00:00Z",
            "colorTag": "custom"
        });
        let note: Note = serde_json::from_value(raw).unwrap();
        assert_eq!(note.color_tag, ColorTag::Custom(None));
    }
}
