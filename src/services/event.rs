use crate::api::{ApiClient, ApiError};
use crate::models::{Category, Event, EventCreate, EventSearch, EventStatus, EventUpdate, Location};

const RESOURCE: &str = "event";

pub struct EventService<'a> {
    api: &'a ApiClient,
}

impl<'a> EventService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Event>, ApiError> {
        self.api.get(&[RESOURCE]).await
    }

    pub async fn upcoming(&self) -> Result<Vec<Event>, ApiError> {
        self.api.get(&[RESOURCE, "upcoming"]).await
    }

    pub async fn past(&self) -> Result<Vec<Event>, ApiError> {
        self.api.get(&[RESOURCE, "past"]).await
    }

    pub async fn list_by_sport(&self, sport_id: i64) -> Result<Vec<Event>, ApiError> {
        self.api
            .get(&[RESOURCE, "sport", &sport_id.to_string()])
            .await
    }

    pub async fn list_by_organizer(&self, organizer_id: i64) -> Result<Vec<Event>, ApiError> {
        self.api
            .get(&[RESOURCE, "organizer", &organizer_id.to_string()])
            .await
    }

    pub async fn list_by_status(&self, status: EventStatus) -> Result<Vec<Event>, ApiError> {
        self.api
            .get(&[RESOURCE, "status", &status.to_string()])
            .await
    }

    pub async fn list_by_location(&self, location: &Location) -> Result<Vec<Event>, ApiError> {
        self.api
            .get_with_query(&[RESOURCE, "location"], location)
            .await
    }

    pub async fn search(&self, search: &EventSearch) -> Result<Vec<Event>, ApiError> {
        self.api.get_with_query(&[RESOURCE, "search"], search).await
    }

    pub async fn get(&self, id: i64) -> Result<Event, ApiError> {
        self.api.get(&[RESOURCE, &id.to_string()]).await
    }

    pub async fn categories(&self, event_id: i64) -> Result<Vec<Category>, ApiError> {
        self.api
            .get(&[RESOURCE, &event_id.to_string(), "categories"])
            .await
    }

    pub async fn add_category(&self, event_id: i64, category_id: i64) -> Result<(), ApiError> {
        self.api
            .post_empty(&[
                RESOURCE,
                &event_id.to_string(),
                "category",
                &category_id.to_string(),
            ])
            .await?;
        self.api
            .notify_success("Category added to event successfully.");
        Ok(())
    }

    pub async fn remove_category(&self, event_id: i64, category_id: i64) -> Result<(), ApiError> {
        self.api
            .delete(&[
                RESOURCE,
                &event_id.to_string(),
                "category",
                &category_id.to_string(),
            ])
            .await?;
        self.api
            .notify_success("Category removed from event successfully.");
        Ok(())
    }

    pub async fn create(&self, body: &EventCreate) -> Result<Event, ApiError> {
        let event = self.api.post(&[RESOURCE], body).await?;
        self.api.notify_success("Event created successfully.");
        Ok(event)
    }

    pub async fn update(&self, id: i64, body: &EventUpdate) -> Result<Event, ApiError> {
        let event = self.api.put(&[RESOURCE, &id.to_string()], body).await?;
        self.api.notify_success("Event updated successfully.");
        Ok(event)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&[RESOURCE, &id.to_string()]).await?;
        self.api.notify_success("Event deleted successfully.");
        Ok(())
    }
}
