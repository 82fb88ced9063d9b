//! Commit identifier type

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A validated git commit identifier
///
/// Exactly 40 lowercase hexadecimal characters. Validation happens at
/// construction time; a `CommitId` in hand is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitId(String);

impl CommitId {
    /// Parses and validates a commit string
    pub fn parse(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        if Self::is_valid(&s) {
            Ok(Self(s))
        } else {
            Err(CoreError::MalformedIdentifier(format!(
                "invalid commit string '{}'",
                s
            )))
        }
    }

    /// Checks the 40-lowercase-hex shape without constructing
    pub fn is_valid(s: &str) -> bool {
        s.len() == 40 && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }

    /// The 7-character short form
    pub fn short(&self) -> &str {
        &self.0[..7]
    }

    /// The full 40-character form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CommitId {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<CommitId> for String {
    fn from(commit: CommitId) -> Self {
        commit.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "1a2b3c4d5e6f7a8b9c0d1a2b3c4d5e6f7a8b9c0d";

    #[test]
    fn test_valid_commit() {
        let commit = CommitId::parse(VALID).unwrap();
        assert_eq!(commit.as_str(), VALID);
        assert_eq!(commit.short(), "1a2b3c4");
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(CommitId::parse("abc123").is_err());
        assert!(CommitId::parse(format!("{}0", VALID)).is_err());
        assert!(CommitId::parse("").is_err());
    }

    #[test]
    fn test_rejects_uppercase() {
        assert!(CommitId::parse(VALID.to_uppercase()).is_err());
    }

    #[test]
    fn test_rejects_non_hex() {
        let bad = format!("{}g", &VALID[..39]);
        assert!(CommitId::parse(bad).is_err());
        let spaced = format!("{} ", &VALID[..39]);
        assert!(CommitId::parse(spaced).is_err());
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let ok: std::result::Result<CommitId, _> =
            serde_json::from_str(&format!("\"{}\"", VALID));
        assert!(ok.is_ok());

        let bad: std::result::Result<CommitId, _> = serde_json::from_str("\"NOTHEX\"");
        assert!(bad.is_err());
    }
}
