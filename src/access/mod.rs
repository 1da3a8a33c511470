//! Local access gates.
//!
//! These decide what the console offers before anything is sent. The
//! backend enforces its own rules; a gate that says no means no request
//! is made at all.

use crate::auth::{SessionContext, UserType};
use crate::models::Event;

pub const ADMIN_ROUTE: &str = "/admin";
pub const EVENTS_ROUTE: &str = "/event";

/// Only competitors sign up for events
pub fn can_register(session: &SessionContext) -> bool {
    session.is_competitor()
}

pub fn can_add_event(session: &SessionContext) -> bool {
    session.has_any_role(&[UserType::Admin, UserType::Organizer])
}

/// Admin dashboards and user administration
pub fn can_administer(session: &SessionContext) -> bool {
    session.is_admin()
}

pub fn is_event_owner(session: &SessionContext, event: &Event) -> bool {
    session.is_authenticated()
        && session
            .current_user()
            .is_some_and(|user| user.user_id == event.organizer.id)
}

/// Admins manage every event, organizers only their own
pub fn can_manage_event(session: &SessionContext, event: &Event) -> bool {
    session.is_admin() || (session.is_organizer() && is_event_owner(session, event))
}

/// Where a user lands after login
pub fn landing_route(session: &SessionContext) -> &'static str {
    if session.is_admin() {
        ADMIN_ROUTE
    } else {
        EVENTS_ROUTE
    }
}
