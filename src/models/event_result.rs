use serde::{Deserialize, Serialize};

use super::{Category, Event, User};

/// A competitor's placing in one category of an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResult {
    pub id: i64,
    pub event: Event,
    pub category: Category,
    pub competitor: User,
    pub position: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResultCreate {
    pub event_id: i64,
    pub category_id: i64,
    pub competitor_id: i64,
    pub position: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResultUpdate {
    pub position: i32,
    pub notes: Option<String>,
}
