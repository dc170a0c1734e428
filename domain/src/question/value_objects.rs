//! Question value objects.
//!
//! # Identifiers
//! - [`QuestionId`] - store key of a question, generated client-side
//!
//! # Content
//! - [`AskerIdentity`] - who asked (a display name or the signed-in email)
//! - [`QuestionText`] - the question body
//! - [`Timestamp`] - milliseconds since the Unix epoch

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier of a question.
///
/// Assigned once at creation time and used as the record key in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a QuestionId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh id in UUID v4 text form.
    ///
    /// Ids generated within one process never repeat.
    pub fn generate() -> Self {
        Self(uuid_v4())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display string identifying who asked a question.
///
/// A free-text name on an open board, the user's email on an
/// authenticated board. Not unique: the leaderboard groups on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AskerIdentity(String);

impl AskerIdentity {
    /// Returns `None` when the name is empty or only whitespace.
    pub fn try_new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AskerIdentity {
    type Error = crate::DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or(crate::DomainError::EmptyAsker)
    }
}

impl From<AskerIdentity> for String {
    fn from(value: AskerIdentity) -> Self {
        value.0
    }
}

impl std::fmt::Display for AskerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text body of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuestionText(String);

impl QuestionText {
    /// Returns `None` when the text is empty or only whitespace.
    pub fn try_new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for QuestionText {
    type Error = crate::DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or(crate::DomainError::EmptyText)
    }
}

impl From<QuestionText> for String {
    fn from(value: QuestionText) -> Self {
        value.0
    }
}

impl std::fmt::Display for QuestionText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }
}

/// Generate a UUID v4 shaped id (without external dependency).
///
/// The high bits come from the clock; the low 48 bits are a per-process
/// sequence XORed with a per-process seed, so they cannot collide within
/// one process.
fn uuid_v4() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    static SEQUENCE: AtomicU64 = AtomicU64::new(0);
    static SEED: OnceLock<u64> = OnceLock::new();

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;
    let seed = *SEED.get_or_init(|| splitmix64(nanos ^ ((std::process::id() as u64) << 32)));
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);

    let node = (seq ^ seed) & 0xffff_ffff_ffff;
    let clock_seq = (splitmix64(seed ^ nanos) >> 48) as u16;

    format!(
        "{:08x}-{:04x}-4{:03x}-{:04x}-{:012x}",
        (nanos >> 32) as u32,
        (nanos >> 16) as u16,
        nanos as u16 & 0x0fff,
        (clock_seq & 0x3fff) | 0x8000,
        node
    )
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}
