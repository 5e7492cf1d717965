#![forbid(unsafe_code)]

//! Person identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, immutable identifier of one person.
///
/// Fresh identifiers use the braced UUID v4 text form
/// (`{xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx}`). Identifiers read from a
/// document are accepted verbatim, so callers must not assume that shape.
///
/// The empty identifier is never a valid person; documents use it to mark
/// "no parent" on the root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Wrap an existing identifier string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        let raw: u128 = rand::random();
        // Version nibble (4) and RFC 4122 variant bits (10).
        let raw = (raw & !(0xF_u128 << 76)) | (0x4_u128 << 76);
        let raw = (raw & !(0x3_u128 << 62)) | (0x2_u128 << 62);
        let hex = format!("{raw:032x}");
        Self(format!(
            "{{{}-{}-{}-{}-{}}}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        ))
    }

    /// Borrow the identifier text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the empty (invalid) identifier.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PersonId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for PersonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
