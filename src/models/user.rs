use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Gender, UserTypeRecord};

/// Full user profile as returned by the `/user` resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub dni: Option<String>,
    #[serde(rename = "type")]
    pub user_type: Option<UserTypeRecord>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(rename = "genderId")]
    pub gender: Option<Gender>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub phone: Option<i64>,
    pub avatar: Option<String>,
    pub is_verified: Option<bool>,
    pub created_at: Option<NaiveDateTime>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub dni: String,
    pub type_id: i64,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender_id: i64,
    pub country: String,
    pub city: String,
    pub phone: Option<i64>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub country: String,
    pub city: String,
    pub phone: Option<i64>,
    pub is_verified: Option<bool>,
}

/// Credentials patch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSecurityUpdate {
    pub email: String,
    pub new_password: String,
}
