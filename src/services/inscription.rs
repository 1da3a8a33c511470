use crate::api::{ApiClient, ApiError};
use crate::models::{Inscription, InscriptionCreate, InscriptionUpdate, PaymentStatus};

const RESOURCE: &str = "inscription";

/// Competitor registrations for event categories
pub struct InscriptionService<'a> {
    api: &'a ApiClient,
}

impl<'a> InscriptionService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Inscription>, ApiError> {
        self.api.get(&[RESOURCE]).await
    }

    pub async fn list_by_competitor(&self, competitor_id: i64) -> Result<Vec<Inscription>, ApiError> {
        self.api
            .get(&[RESOURCE, "competitor", &competitor_id.to_string()])
            .await
    }

    pub async fn list_by_event(&self, event_id: i64) -> Result<Vec<Inscription>, ApiError> {
        self.api
            .get(&[RESOURCE, "event", &event_id.to_string()])
            .await
    }

    pub async fn list_by_event_and_category(
        &self,
        event_id: i64,
        category_id: i64,
    ) -> Result<Vec<Inscription>, ApiError> {
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

    pub async fn list_by_status(&self, status: PaymentStatus) -> Result<Vec<Inscription>, ApiError> {
        self.api
            .get(&[RESOURCE, "status", &status.to_string()])
            .await
    }

    pub async fn list_paid(&self, event_id: i64) -> Result<Vec<Inscription>, ApiError> {
        self.api
            .get(&[RESOURCE, "event", &event_id.to_string(), "paid"])
            .await
    }

    pub async fn count_paid(&self, event_id: i64) -> Result<u64, ApiError> {
        self.api
            .get(&[RESOURCE, "event", &event_id.to_string(), "paid", "count"])
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Inscription, ApiError> {
        self.api.get(&[RESOURCE, &id.to_string()]).await
    }

    /// A competitor may hold one inscription per category of the same event
    pub async fn list_by_competitor_and_event(
        &self,
        competitor_id: i64,
        event_id: i64,
    ) -> Result<Vec<Inscription>, ApiError> {
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

    pub async fn create(&self, body: &InscriptionCreate) -> Result<Inscription, ApiError> {
        let inscription = self.api.post(&[RESOURCE], body).await?;
        self.api.notify_success("Inscription created successfully.");
        Ok(inscription)
    }

    pub async fn update(&self, id: i64, body: &InscriptionUpdate) -> Result<Inscription, ApiError> {
        let inscription = self.api.put(&[RESOURCE, &id.to_string()], body).await?;
        self.api.notify_success("Inscription updated successfully.");
        Ok(inscription)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&[RESOURCE, &id.to_string()]).await?;
        self.api.notify_success("Inscription deleted successfully.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{harness, login_as_user};
    use crate::models::{fixtures, InscriptionCreate, PaymentStatus};
    use axum::extract::Path;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    fn inscription_json(id: i64, competitor_id: i64, event_id: i64, status: &str) -> Value {
        json!({
            "id": id,
            "competitor": fixtures::user(competitor_id, "COMPETITOR"),
            "event": fixtures::event(event_id, 10, (2026, 6, 1)),
            "category": fixtures::category(1),
            "registerDate": "2026-02-01T12:00:00",
            "paymentStatus": status
        })
    }

    fn router() -> Router {
        Router::new()
            .route(
                "/inscription/competitor/:id",
                get(|Path(id): Path<i64>| async move {
                    Json(json!([inscription_json(1, id, 3, "PAID")]))
                }),
            )
            .route(
                "/inscription/competitor/:competitor_id/event/:event_id",
                get(|Path((competitor_id, event_id)): Path<(i64, i64)>| async move {
                    Json(json!([inscription_json(4, competitor_id, event_id, "PENDING")]))
                }),
            )
            .route(
                "/inscription/event/:id/paid",
                get(|Path(id): Path<i64>| async move {
                    Json(json!([
                        inscription_json(1, 5, id, "PAID"),
                        inscription_json(6, 8, id, "PAID"),
                    ]))
                }),
            )
            .route("/inscription/event/:id/paid/count", get(|| async { Json(json!(12)) }))
            .route(
                "/inscription",
                post(|Json(body): Json<Value>| async move {
                    let status = body["paymentStatus"].as_str().unwrap_or_default().to_string();
                    Json(inscription_json(
                        2,
                        body["competitorId"].as_i64().unwrap_or_default(),
                        body["eventId"].as_i64().unwrap_or_default(),
                        &status,
                    ))
                }),
            )
    }

    #[tokio::test]
    async fn test_competitor_inscriptions() {
        let h = harness(router()).await;
        login_as_user(&h.api, 5, "COMPETITOR");

        let mine = h.api.inscriptions().list_by_competitor(5).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].competitor.id, 5);
        assert_eq!(mine[0].payment_status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_competitor_event_inscriptions_are_a_list() {
        let h = harness(router()).await;
        let found = h
            .api
            .inscriptions()
            .list_by_competitor_and_event(5, 3)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].competitor.id, 5);
        assert_eq!(found[0].event.id, 3);
        assert_eq!(found[0].payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_list_paid() {
        let h = harness(router()).await;
        let paid = h.api.inscriptions().list_paid(3).await.unwrap();
        assert_eq!(paid.len(), 2);
        assert!(paid
            .iter()
            .all(|i| i.event.id == 3 && i.payment_status == PaymentStatus::Paid));
    }

    #[tokio::test]
    async fn test_paid_count_is_a_number() {
        let h = harness(router()).await;
        assert_eq!(h.api.inscriptions().count_paid(3).await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_create_defaults_to_pending() {
        let h = harness(router()).await;
        login_as_user(&h.api, 5, "COMPETITOR");

        let created = h
            .api
            .inscriptions()
            .create(&InscriptionCreate {
                competitor_id: 5,
                event_id: 3,
                category_id: 1,
                payment_status: PaymentStatus::default(),
            })
            .await
            .unwrap();
        assert_eq!(created.payment_status, PaymentStatus::Pending);
        assert_eq!(created.event.id, 3);
        assert_eq!(
            h.notifier.take()[0].message,
            "Inscription created successfully."
        );
    }
}
