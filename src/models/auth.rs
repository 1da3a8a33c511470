//! Authentication payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::auth::role::UserType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by both login and registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: String,
}

impl LoginResponse {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            user_id: self.user_id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            user_type: self.user_type.clone(),
        }
    }
}

pub type RegistrationResult = LoginResponse;

/// Identity snapshot captured at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Raw role string; see [`UserType`] for the known values
    pub user_type: String,
}

impl UserSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<i64>,
    pub date_of_birth: NaiveDate,
    pub country: String,
    pub city: String,
    /// Defaults to [`UserType::Competitor`] when absent
    pub user_type: Option<UserType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenValidation {
    pub valid: bool,
    pub user_id: i64,
    pub email: String,
    pub user_type: String,
}
