use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// One captured prompt.
///
/// Entries are immutable once stored. The history only ever inserts,
/// deletes, or evicts whole entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEntry")]
pub struct Entry {
    pub text: String,
    pub created_at: Timestamp,
    /// Hostname the text was captured on. Empty when unknown.
    pub site: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl Entry {
    /// Build an entry from a draft, stamping it with `created_at`.
    ///
    /// Fails if the draft text is blank after trimming.
    pub fn from_draft(draft: NewEntry, created_at: Timestamp) -> Result<Self, CoreError> {
        let text = draft
            .trimmed_text()
            .ok_or_else(|| CoreError::InvalidEntry("text is empty".to_string()))?
            .to_string();
        Ok(Self {
            text,
            created_at,
            site: draft.site,
            source_url: draft.source_url,
        })
    }

    /// Whether `text` or `site` contains `needle`.
    pub fn matches(&self, needle: &str, case_insensitive: bool) -> bool {
        if case_insensitive {
            let needle = needle.to_lowercase();
            self.text.to_lowercase().contains(&needle) || self.site.to_lowercase().contains(&needle)
        } else {
            self.text.contains(needle) || self.site.contains(needle)
        }
    }
}

/// Text handed to the history by a capture path, before it is stamped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub text: String,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub source_url: Option<String>,
}

impl NewEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// The dedup key: text with surrounding whitespace removed, or `None` if
    /// nothing is left.
    pub fn trimmed_text(&self) -> Option<&str> {
        let t = self.text.trim();
        (!t.is_empty()).then_some(t)
    }
}

/// On-disk shape accepted when reading the store.
///
/// Older capture paths wrote either an ISO `timestamp` string or a Unix
/// millisecond `ts` instead of `created_at`, and sometimes omitted `site`.
/// Time and site fields are read leniently: a value that does not parse is
/// treated as absent, so one odd record never poisons the whole list.
#[derive(Deserialize)]
struct RawEntry {
    text: String,
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(default)]
    timestamp: Option<Value>,
    #[serde(default)]
    ts: Option<Value>,
    #[serde(default)]
    site: Option<Value>,
    #[serde(default, alias = "sourceUrl")]
    source_url: Option<Value>,
}

/// An RFC 3339 string or a Unix millisecond number.
fn parse_time(value: Option<&Value>) -> Option<Timestamp> {
    match value? {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => {
            let ms = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Timestamp::from_millisecond(ms).ok()
        }
        _ => None,
    }
}

fn string_field(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        _ => None,
    }
}

impl From<RawEntry> for Entry {
    fn from(raw: RawEntry) -> Self {
        let created_at = parse_time(raw.created_at.as_ref())
            .or_else(|| parse_time(raw.timestamp.as_ref()))
            .or_else(|| parse_time(raw.ts.as_ref()))
            .unwrap_or(Timestamp::UNIX_EPOCH);
        Self {
            text: raw.text,
            created_at,
            site: string_field(raw.site).unwrap_or_default(),
            source_url: string_field(raw.source_url),
        }
    }
}
