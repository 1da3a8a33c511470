use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gender {
    pub id: i64,
    pub name: String,
}

/// Create/update body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderRequest {
    pub name: String,
}
