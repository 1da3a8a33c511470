//! One-to-one wrappers over the backend resources.
//!
//! Every accessor borrows the shared [`ApiClient`], issues exactly one call
//! per operation and hands back the decoded body. Failures come back as the
//! [`ApiError`](crate::api::ApiError) the client already classified and
//! reported; accessors never add notifications of their own on failure.
//! Mutations announce themselves with one success notification once the
//! call has resolved.

mod catalog;
mod category;
mod event;
mod event_result;
mod inscription;
mod sport_level;
mod user;

pub use catalog::{CatalogService, GenderService, SportService, UserTypeService};
pub use category::CategoryService;
pub use event::EventService;
pub use event_result::ResultService;
pub use inscription::InscriptionService;
pub use sport_level::SportLevelService;
pub use user::UserService;

use crate::api::ApiClient;
use crate::auth::AuthService;

impl ApiClient {
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    pub fn sports(&self) -> SportService<'_> {
        CatalogService::new(self, "sport", "Sport")
    }

    pub fn genders(&self) -> GenderService<'_> {
        CatalogService::new(self, "gender", "Gender")
    }

    pub fn user_types(&self) -> UserTypeService<'_> {
        CatalogService::new(self, "user-types", "User type")
    }

    pub fn sport_levels(&self) -> SportLevelService<'_> {
        SportLevelService::new(self)
    }

    pub fn categories(&self) -> CategoryService<'_> {
        CategoryService::new(self)
    }

    pub fn events(&self) -> EventService<'_> {
        EventService::new(self)
    }

    pub fn inscriptions(&self) -> InscriptionService<'_> {
        InscriptionService::new(self)
    }

    pub fn results(&self) -> ResultService<'_> {
        ResultService::new(self)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }
}
