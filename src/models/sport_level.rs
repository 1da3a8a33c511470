use serde::{Deserialize, Serialize};

use super::Sport;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportLevel {
    pub id: i64,
    pub name: String,
    pub sport: Sport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportLevelCreate {
    pub sport_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportLevelUpdate {
    pub name: String,
    pub sport_id: i64,
}
