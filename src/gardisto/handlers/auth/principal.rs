//! Authenticated principal and its structured-response subset.

use serde::{Deserialize, Serialize};

/// The authenticated entity. Owned by the strategy layer; the gate only
/// stores a serialized reference in the session and never interprets the id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Field subset returned to structured (JSON) clients after login.
#[derive(Debug, Serialize, Deserialize)]
pub struct PrincipalPayload {
    pub email: String,
    pub name: String,
}

impl From<&Principal> for PrincipalPayload {
    fn from(principal: &Principal) -> Self {
        Self {
            email: principal.email.clone(),
            name: principal.name.clone(),
        }
    }
}
