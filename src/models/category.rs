use serde::{Deserialize, Serialize};

/// A competition category. `sport`, `gender` and `level` are names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
    pub sport: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub sport_id: i64,
    pub name: String,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
    pub gender_id: i64,
    pub level_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: String,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
    pub level_id: Option<i64>,
}

/// Search filters. Unset fields never reach the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sport_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<f64>,
}
