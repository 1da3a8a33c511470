use crate::api::{ApiClient, ApiError};
use crate::models::{EventResult, EventResultCreate, EventResultUpdate};

const RESOURCE: &str = "results";

/// Placings per event and category
pub struct ResultService<'a> {
    api: &'a ApiClient,
}

impl<'a> ResultService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<EventResult>, ApiError> {
        self.api.get(&[RESOURCE]).await
    }

    pub async fn list_by_event(&self, event_id: i64) -> Result<Vec<EventResult>, ApiError> {
        self.api
            .get(&[RESOURCE, "event", &event_id.to_string()])
            .await
    }

    pub async fn list_by_event_and_category(
        &self,
        event_id: i64,
        category_id: i64,
    ) -> Result<Vec<EventResult>, ApiError> {
        self.api
            .get(&[
                RESOURCE,
                "event",
                &event_id.to_string(),
                "category",
                &category_id.to_string(),
            ])
            .await
    }

    pub async fn list_by_competitor_and_event(
        &self,
        competitor_id: i64,
        event_id: i64,
    ) -> Result<Vec<EventResult>, ApiError> {
        self.api
            .get(&[
                RESOURCE,
                "competitor",
                &competitor_id.to_string(),
                "event",
                &event_id.to_string(),
            ])
            .await
    }

    pub async fn list_by_competitor(&self, competitor_id: i64) -> Result<Vec<EventResult>, ApiError> {
        self.api
            .get(&[RESOURCE, "competitor", &competitor_id.to_string()])
            .await
    }

    pub async fn list_by_position(
        &self,
        event_id: i64,
        position: i32,
    ) -> Result<Vec<EventResult>, ApiError> {
        self.api
            .get(&[
                RESOURCE,
                "event",
                &event_id.to_string(),
                "position",
                &position.to_string(),
            ])
            .await
    }

    pub async fn get(&self, id: i64) -> Result<EventResult, ApiError> {
        self.api.get(&[RESOURCE, &id.to_string()]).await
    }

    /// Winner of one category
    pub async fn winners(&self, event_id: i64, category_id: i64) -> Result<EventResult, ApiError> {
        self.api
            .get(&[
                RESOURCE,
                "event",
                &event_id.to_string(),
                "category",
                &category_id.to_string(),
                "winners",
            ])
            .await
    }

    pub async fn create(&self, body: &EventResultCreate) -> Result<EventResult, ApiError> {
        let result = self.api.post(&[RESOURCE], body).await?;
        self.api.notify_success("Result created successfully.");
        Ok(result)
    }

    pub async fn update(&self, id: i64, body: &EventResultUpdate) -> Result<EventResult, ApiError> {
        let result = self.api.put(&[RESOURCE, &id.to_string()], body).await?;
        self.api.notify_success("Result updated successfully.");
        Ok(result)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&[RESOURCE, &id.to_string()]).await?;
        self.api.notify_success("Result deleted successfully.");
        Ok(())
    }
}
