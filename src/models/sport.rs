use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sport {
    pub id: i64,
    pub name: String,
}

/// Create/update body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SportRequest {
    pub name: String,
}
