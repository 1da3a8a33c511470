pub mod access;
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod models;
pub mod notifications;
pub mod services;

pub use api::{ApiClient, ApiError, ErrorKind};
pub use auth::{AuthService, SessionContext, SessionEvent, UserType};
pub use config::Config;
pub use notifications::{ConsoleNotifier, MemoryNotifier, Notifier};
