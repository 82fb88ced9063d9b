//! User profile domain type

use serde::{Deserialize, Serialize};

/// A student profile from the user directory
///
/// Looked up by username during descriptor assembly. A profile may be
/// missing from the directory; grading proceeds regardless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    /// Course-assigned id
    pub csid: String,
    /// Student number
    pub snum: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_url: String,
}
