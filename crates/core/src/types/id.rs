//! Opaque identifiers for stored contact responses.

use core::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};

/// Number of random characters appended to the time component.
const RANDOM_SUFFIX_LEN: usize = 9;

/// Unique identifier of a [`ResponseRecord`](super::ResponseRecord).
///
/// Generated IDs are the creation time in milliseconds encoded in base 36,
/// followed by nine random lowercase alphanumerics. Two IDs minted in the
/// same millisecond collide only if the random suffixes also collide.
///
/// IDs read back from storage are accepted as-is; the type makes no claim
/// about their shape beyond being a string.
///
/// ```
/// use chrono::Utc;
/// use mathsoc_core::ResponseId;
///
/// let a = ResponseId::generate(Utc::now());
/// let b = ResponseId::generate(Utc::now());
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseId(String);

impl ResponseId {
    /// Mint a fresh ID for a record created at `now`.
    #[must_use]
    pub fn generate(now: DateTime<Utc>) -> Self {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(RANDOM_SUFFIX_LEN)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();

        Self(format!("{}{suffix}", to_base36(millis)))
    }

    /// Wrap an existing ID string.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResponseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        let digit = usize::try_from(value % 36).unwrap_or_default();
        if let Some(&d) = DIGITS.get(digit) {
            out.push(char::from(d));
        }
        value /= 36;
    }
    out.iter().rev().collect()
}
