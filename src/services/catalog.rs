//! Flat `{id, name}` catalogs: sports, genders and user types share one
//! path layout and differ only in resource name.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{ApiClient, ApiError};
use crate::models::{Gender, GenderRequest, Sport, SportRequest, UserTypeRecord, UserTypeRequest};

pub type SportService<'a> = CatalogService<'a, Sport, SportRequest>;
pub type GenderService<'a> = CatalogService<'a, Gender, GenderRequest>;
pub type UserTypeService<'a> = CatalogService<'a, UserTypeRecord, UserTypeRequest>;

pub struct CatalogService<'a, T, B> {
    api: &'a ApiClient,
    resource: &'static str,
    label: &'static str,
    _marker: PhantomData<fn() -> (T, B)>,
}

impl<'a, T, B> CatalogService<'a, T, B>
where
    T: DeserializeOwned,
    B: Serialize,
{
    pub(crate) fn new(api: &'a ApiClient, resource: &'static str, label: &'static str) -> Self {
        Self {
            api,
            resource,
            label,
            _marker: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<T>, ApiError> {
        self.api.get(&[self.resource]).await
    }

    pub async fn get(&self, id: i64) -> Result<T, ApiError> {
        self.api.get(&[self.resource, &id.to_string()]).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<T, ApiError> {
        self.api.get(&[self.resource, "name", name]).await
    }

    pub async fn create(&self, body: &B) -> Result<T, ApiError> {
        let created = self.api.post(&[self.resource], body).await?;
        self.announce("created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, body: &B) -> Result<T, ApiError> {
        let updated = self.api.put(&[self.resource, &id.to_string()], body).await?;
        self.announce("updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&[self.resource, &id.to_string()]).await?;
        self.announce("deleted");
        Ok(())
    }

    fn announce(&self, verb: &str) {
        self.api
            .notify_success(&format!("{} {} successfully.", self.label, verb));
    }
}
