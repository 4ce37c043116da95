//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
///
/// The provider-issued subject doubles as the document ID, so the storage
/// layer itself guarantees at most one record per identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Google-issued subject (also used as document ID)
    pub id: String,
    /// Display name from the ID token
    pub name: String,
    /// Email address from the ID token
    pub email: String,
    /// When the user first registered (ISO 8601); never updated afterwards
    pub created_at: String,
}
