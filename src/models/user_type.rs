use serde::{Deserialize, Serialize};

/// A user type as stored by the backend (`COMPETITOR`, `ORGANIZER`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTypeRecord {
    pub id: i64,
    pub name: String,
}

/// Create/update body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTypeRequest {
    pub name: String,
}
