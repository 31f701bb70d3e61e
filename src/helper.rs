use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{ColorKind, ColorTag, NoteStore, KeyValueStore, NotesError, Result, Rgb};

/// A note addressed on the command line, either by list position or by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Position(usize),
    Id(Uuid),
}

impl Target {
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if let Ok(position) = value.parse::<usize>() {
            return Ok(Target::Position(position));
        }
        Uuid::parse_str(value)
            .map(Target::Id)
            .map_err(|_| NotesError::ApplicationError {
                message: format!("'{}' is neither a list position nor a note id", value),
            })
    }

    /// Resolves to a position in `store`, failing if nothing is there.
    pub fn resolve<S: KeyValueStore>(&self, store: &NoteStore<S>) -> Result<usize> {
        match *self {
            Target::Position(position) if position < store.len() => Ok(position),
            Target::Position(position) => Err(NotesError::InvalidPosition {
                position,
                len: store.len(),
            }),
            Target::Id(id) => store.position_of(&id).ok_or(NotesError::NoteNotFound {
                id: id.to_string(),
            }),
        }
    }
}

/// Parses `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| NotesError::InvalidDate {
            value: value.to_string(),
        })
}

/// Combines the `--color` and `--hex` arguments into a tag.
///
/// A hex alone implies a custom tag. A custom tag without a hex keeps the
/// `current` payload when `current` is already custom and is rejected
/// otherwise, as is a hex next to one of the fixed colours.
pub fn resolve_color(
    kind: Option<ColorKind>,
    hex: Option<&str>,
    current: &ColorTag,
) -> Result<Option<ColorTag>> {
    match (kind, hex) {
        (None, None) => Ok(None),
        (None | Some(ColorKind::Custom), Some(hex)) => {
            let color: Rgb = hex.parse()?;
            Ok(Some(ColorTag::custom(color)))
        }
        (Some(ColorKind::Custom), None) if current.kind() == ColorKind::Custom => {
            Ok(Some(current.clone()))
        }
        (Some(ColorKind::Custom), None) => Err(NotesError::ApplicationError {
            message: "--color custom needs --hex RRGGBB".to_string(),
        }),
        (Some(kind), Some(_)) => Err(NotesError::ApplicationError {
            message: format!("--hex only applies to custom colours, not {:?}", kind),
        }),
        (Some(kind), None) => Ok(Some(ColorTag::from_parts(kind, None))),
    }
}

/// Nearest entry in the 6x6x6 cube of the 256-colour terminal palette
pub fn ansi256(color: Rgb) -> u8 {
    let level = |c: u8| ((u16::from(c) * 5 + 127) / 255) as u8;
    16 + 36 * level(color.r) + 6 * level(color.g) + level(color.b)
}

/// First non-empty line, cut to `max_chars` characters
pub fn content_preview(content: &str, max_chars: usize) -> String {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("")
        .trim();

    if first_line.chars().count() <= max_chars {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
