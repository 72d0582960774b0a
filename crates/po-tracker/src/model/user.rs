//! Users are actor references: they appear as "who did this" on tracks,
//! issues, and activity entries. Beyond registration and directory lookups,
//! user mutation is out of scope here.

use crate::model::Department;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique by convention; the directory checks before registering.
    pub username: String,
    pub name: String,
    pub role: String,
    pub department: Option<Department>,
    pub active: bool,
    /// Opaque credential hash. Issuance and verification live with the
    /// authentication collaborator, not here.
    #[serde(skip_serializing)]
    pub credential_hash: String,
}

#[derive(Debug, Clone)]
pub struct UserCreate {
    pub username: String,
    pub name: String,
    pub role: String,
    pub department: Option<Department>,
    pub credential_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub active: Option<bool>,
}

/// Directory lookup predicates.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub username: Option<String>,
}
