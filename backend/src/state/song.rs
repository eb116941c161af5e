// Song records
// Open-ended JSON objects keyed by their `id` field, plus the field ordering used by playlist sort

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Unique identifier for a song
pub type SongId = String;

/// Name of the field holding a song's identifier
pub const ID_FIELD: &str = "id";

/// Key used when a client leaves an identifier out or sends `null`
pub const ABSENT_KEY: &str = "null";

/// An identifier as clients send it in a request body
///
/// Numbers and booleans are keyed by their JSON text so a song created with
/// `{"id": 42}` is the same song as `{"song_id": 42}` and `/songs/42`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SongKey {
    /// Plain string identifier
    Text(String),
    /// Numeric identifier
    Number(serde_json::Number),
    /// Boolean identifier
    Flag(bool),
}

impl From<SongKey> for SongId {
    fn from(key: SongKey) -> Self {
        match key {
            SongKey::Text(text) => text,
            SongKey::Number(number) => number.to_string(),
            SongKey::Flag(flag) => flag.to_string(),
        }
    }
}

/// Resolve an optional identifier, falling back to [`ABSENT_KEY`]
pub fn key_or_absent(key: Option<SongKey>) -> SongId {
    key.map(SongId::from)
        .unwrap_or_else(|| ABSENT_KEY.to_string())
}

/// A song record
///
/// The field set is entirely caller-defined. Any top-level field can later
/// be used as a playlist sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Song {
    fields: Map<String, Value>,
}

impl Song {
    /// Build a song from a client payload, returning the key it is stored under
    ///
    /// A missing or `null` id is stored under [`ABSENT_KEY`]. Arrays and
    /// objects cannot key a song.
    pub fn from_fields(fields: Map<String, Value>) -> Result<(SongId, Self), String> {
        let key = match fields.get(ID_FIELD) {
            None | Some(Value::Null) => None,
            Some(id) => Some(
                SongKey::deserialize(id)
                    .map_err(|_| "Song id must be a string, number or boolean".to_string())?,
            ),
        };
        Ok((key_or_absent(key), Self { fields }))
    }

    /// Look up a top-level field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// All fields of the record
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Shallow merge: every top-level field in `patch` overwrites the stored one
    ///
    /// The `id` field is left untouched so the record stays in sync with its key.
    pub fn merge(&mut self, patch: Map<String, Value>) {
        for (name, value) in patch {
            if name == ID_FIELD {
                continue;
            }
            self.fields.insert(name, value);
        }
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_numbers(a: &serde_json::Number, b: &serde_json::Number) -> Ordering {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return a.cmp(&b);
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return a.cmp(&b);
    }
    let a = a.as_f64().unwrap_or(f64::NAN);
    let b = b.as_f64().unwrap_or(f64::NAN);
    a.total_cmp(&b)
}

/// Total order over JSON values used when sorting playlists
///
/// Values of different types order by type: null, bool, number, string,
/// array, object. Within a type the natural order applies; arrays and
/// objects compare element by element.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => {
            for (x, y) in a.iter().zip(b.iter()) {
                let ord = compare_values(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.len().cmp(&b.len())
        }
        (Value::Object(a), Value::Object(b)) => {
            // serde_json keeps object keys sorted
            for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
                let ord = ka.cmp(kb).then_with(|| compare_values(va, vb));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.len().cmp(&b.len())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
