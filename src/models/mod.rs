//! Request and response shapes of the TappedOut REST API, plus the
//! client-side orderings the console applies before rendering lists.

mod auth;
mod category;
mod event;
mod event_result;
mod gender;
mod inscription;
mod sport;
mod sport_level;
mod user;
mod user_type;

pub use auth::*;
pub use category::*;
pub use event::*;
pub use event_result::*;
pub use gender::*;
pub use inscription::*;
pub use sport::*;
pub use sport_level::*;
pub use user::*;
pub use user_type::*;

use std::cmp::Ordering;

/// Records with a backend-assigned numeric id
pub trait Identified {
    fn id(&self) -> i64;
}

/// Records listed by display name
pub trait Named {
    fn name(&self) -> &str;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> i64 {
                    self.id
                }
            }

            impl Named for $ty {
                fn name(&self) -> &str {
                    &self.name
                }
            }
        )*
    };
}

impl_record!(Sport, Gender, UserTypeRecord, SportLevel, Category, Event);

impl Identified for User {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Inscription {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for EventResult {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Ascending by id, as the admin dashboards list records
pub fn sort_by_id<T: Identified>(items: &mut [T]) {
    items.sort_by_key(|item| item.id());
}

/// Case-insensitive by name; exact name breaks ties so the order is stable
pub fn sort_by_name<T: Named>(items: &mut [T]) {
    items.sort_by(|a, b| compare_names(a.name(), b.name()));
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Nearest start date first
pub fn sort_events_by_start(events: &mut [Event]) {
    events.sort_by_key(|event| event.start_date);
}

/// By the start date of the event each inscription belongs to
pub fn sort_inscriptions_by_event_start(inscriptions: &mut [Inscription]) {
    inscriptions.sort_by_key(|inscription| inscription.event.start_date);
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::NaiveDate;

    pub fn user(id: i64, role: &str) -> User {
        User {
            id,
            dni: Some(format!("X{:07}", id)),
            user_type: Some(UserTypeRecord {
                id: 1,
                name: role.to_string(),
            }),
            email: format!("user{}@example.com", id),
            first_name: "Test".to_string(),
            last_name: format!("User{}", id),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1),
            gender: None,
            country: Some("SPAIN".to_string()),
            city: Some("MADRID".to_string()),
            phone: None,
            avatar: None,
            is_verified: Some(true),
            created_at: None,
        }
    }

    pub fn event(id: i64, organizer_id: i64, start: (i32, u32, u32)) -> Event {
        let start_date = NaiveDate::from_ymd_opt(start.0, start.1, start.2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Event {
            id,
            organizer: user(organizer_id, "ORGANIZER"),
            sport: Sport {
                id: 1,
                name: "Judo".to_string(),
            },
            name: format!("Open {}", id),
            description: None,
            start_date,
            end_date: start_date + chrono::Duration::hours(8),
            status: "PLANNED".to_string(),
            country: "SPAIN".to_string(),
            city: "MADRID".to_string(),
            address: None,
            logo: None,
            created_at: None,
            registration_fee: Some(25.0),
        }
    }

    pub fn category(id: i64) -> Category {
        Category {
            id,
            name: format!("-{}kg", 60 + id),
            min_age: Some(18),
            max_age: None,
            min_weight: None,
            max_weight: Some(60.0 + id as f64),
            sport: Some("Judo".to_string()),
            gender: Some("MALE".to_string()),
            level: None,
        }
    }
}
