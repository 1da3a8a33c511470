use serde::Serialize;

use crate::api::{ApiClient, ApiError};
use crate::models::{Location, User, UserCreate, UserSecurityUpdate, UserUpdate};

const RESOURCE: &str = "user";

#[derive(Serialize)]
struct SearchQuery<'q> {
    query: &'q str,
}

/// User administration
pub struct UserService<'a> {
    api: &'a ApiClient,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.api.get(&[RESOURCE]).await
    }

    pub async fn list_by_type(&self, type_id: i64) -> Result<Vec<User>, ApiError> {
        self.api
            .get(&[RESOURCE, "type", &type_id.to_string()])
            .await
    }

    pub async fn list_by_gender(&self, gender_id: i64) -> Result<Vec<User>, ApiError> {
        self.api
            .get(&[RESOURCE, "gender", &gender_id.to_string()])
            .await
    }

    pub async fn list_by_location(&self, location: &Location) -> Result<Vec<User>, ApiError> {
        self.api
            .get_with_query(&[RESOURCE, "location"], location)
            .await
    }

    /// Match on name or e-mail
    pub async fn search(&self, query: &str) -> Result<Vec<User>, ApiError> {
        self.api
            .get_with_query(&[RESOURCE, "search"], &SearchQuery { query })
            .await
    }

    pub async fn get(&self, id: i64) -> Result<User, ApiError> {
        self.api.get(&[RESOURCE, &id.to_string()]).await
    }

    pub async fn get_by_dni(&self, dni: &str) -> Result<User, ApiError> {
        self.api.get(&[RESOURCE, "dni", dni]).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<User, ApiError> {
        self.api.get(&[RESOURCE, "email", email]).await
    }

    pub async fn create(&self, body: &UserCreate) -> Result<User, ApiError> {
        let user = self.api.post(&[RESOURCE], body).await?;
        self.api.notify_success("User created successfully.");
        Ok(user)
    }

    pub async fn update(&self, id: i64, body: &UserUpdate) -> Result<User, ApiError> {
        let user = self.api.put(&[RESOURCE, &id.to_string()], body).await?;
        self.api.notify_success("User updated successfully.");
        Ok(user)
    }

    pub async fn update_security(
        &self,
        id: i64,
        body: &UserSecurityUpdate,
    ) -> Result<User, ApiError> {
        let user = self
            .api
            .patch(&[RESOURCE, &id.to_string(), "security"], body)
            .await?;
        self.api
            .notify_success("User security information updated successfully.");
        Ok(user)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&[RESOURCE, &id.to_string()]).await?;
        self.api.notify_success("User deleted successfully.");
        Ok(())
    }
}
