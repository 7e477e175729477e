//! Integer identifiers and the lenient parsing applied to ids that arrive
//! as text (form fields, DOM data attributes).

use serde::{Deserialize, Deserializer, Serialize};

pub type BoardId = i64;
pub type ListId = i64;
pub type CardId = i64;

/// Address of a list: the board that owns it plus the list id within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRef {
    pub board_id: BoardId,
    pub list_id: ListId,
}

impl ListRef {
    pub fn new(board_id: BoardId, list_id: ListId) -> Self {
        Self { board_id, list_id }
    }
}

/// Parse an id with leading-integer semantics: surrounding whitespace is
/// ignored, an optional sign is accepted, and parsing stops at the first
/// non-digit. `"12abc"` is 12; `"abc"` and `""` are no id at all.
pub fn parse_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Serde adapter for optional ids that may be sent as JSON numbers or as
/// strings. Anything unparseable becomes `None`.
pub fn deserialize_lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawId::Int(id)) => Some(id),
        Some(RawId::Float(f)) if f.is_finite() => Some(f.trunc() as i64),
        Some(RawId::Float(_)) => None,
        Some(RawId::Text(text)) => parse_id(&text),
        None => None,
    })
}
