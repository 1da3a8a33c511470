//! Authentication lifecycle: login, registration, token validation and
//! logout, plus the role checks every gated feature relies on.

pub mod role;
pub mod session;

pub use role::UserType;
pub use session::{
    FileSessionStore, MemorySessionStore, SessionContext, SessionEvent, SessionStore,
    SessionStoreError, StoredSession,
};

use crate::api::{ApiClient, ApiError};
use crate::models::{
    LoginRequest, LoginResponse, RegisterRequest, RegistrationResult, TokenValidation, UserSummary,
};

/// Auth endpoints plus read access to the session they manage
pub struct AuthService<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    fn session(&self) -> &SessionContext {
        self.api.session()
    }

    /// Exchange credentials for a session.
    ///
    /// The token, token type, role and user summary are stored as one unit
    /// only after the backend accepted the credentials. A rejected login
    /// does not write anything; a 401 still tears down whatever session
    /// was active, like any other 401.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<UserSummary, ApiError> {
        let response: LoginResponse = self.api.post(&["auth", "login"], credentials).await?;
        let summary = response.summary();
        let stored = StoredSession::new(&response.token, &response.token_type, &summary)?;
        self.session().establish(stored)?;

        tracing::info!(
            user_id = summary.user_id,
            role = %summary.user_type,
            "Logged in"
        );
        Ok(summary)
    }

    /// Create an account. Defaults the role to competitor and never logs in.
    pub async fn register(&self, mut profile: RegisterRequest) -> Result<RegistrationResult, ApiError> {
        let role = *profile.user_type.get_or_insert_with(UserType::default);
        let registered: RegistrationResult = self.api.post(&["auth", "register"], &profile).await?;
        tracing::info!(user_id = registered.user_id, role = %role, "Registered");
        Ok(registered)
    }

    /// Ask the backend whether the stored token is still good. Any failure
    /// clears the session before the error is returned.
    pub async fn validate_token(&self) -> Result<TokenValidation, ApiError> {
        match self.api.get::<TokenValidation>(&["auth", "validate"]).await {
            Ok(validation) if validation.valid => Ok(validation),
            Ok(validation) => {
                tracing::info!(user_id = validation.user_id, "Token reported invalid");
                self.session().clear(SessionEvent::Invalidated);
                Ok(validation)
            }
            Err(e) => {
                tracing::info!(error = %e, "Token validation failed");
                self.session().clear(SessionEvent::Invalidated);
                Err(e)
            }
        }
    }

    /// Drop the local session. No request is made.
    pub fn logout(&self) {
        self.session().clear(SessionEvent::LoggedOut);
    }

    pub fn current_user(&self) -> Option<UserSummary> {
        self.session().current_user()
    }

    pub fn current_role(&self) -> Option<String> {
        self.session().role()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    pub fn has_role(&self, role: UserType) -> bool {
        self.session().has_role(role)
    }

    pub fn has_any_role(&self, roles: &[UserType]) -> bool {
        self.session().has_any_role(roles)
    }

    pub fn is_admin(&self) -> bool {
        self.session().is_admin()
    }

    pub fn is_organizer(&self) -> bool {
        self.session().is_organizer()
    }

    pub fn is_competitor(&self) -> bool {
        self.session().is_competitor()
    }
}
