use crate::api::{ApiClient, ApiError};
use crate::models::{SportLevel, SportLevelCreate, SportLevelUpdate};

const RESOURCE: &str = "sport-level";

/// Skill levels, scoped to a sport
pub struct SportLevelService<'a> {
    api: &'a ApiClient,
}

impl<'a> SportLevelService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<SportLevel>, ApiError> {
        self.api.get(&[RESOURCE]).await
    }

    pub async fn list_by_sport(&self, sport_id: i64) -> Result<Vec<SportLevel>, ApiError> {
        self.api
            .get(&[RESOURCE, "sport", &sport_id.to_string()])
            .await
    }

    pub async fn get(&self, id: i64) -> Result<SportLevel, ApiError> {
        self.api.get(&[RESOURCE, &id.to_string()]).await
    }

    pub async fn get_by_sport_and_name(
        &self,
        sport_id: i64,
        name: &str,
    ) -> Result<SportLevel, ApiError> {
        self.api
            .get(&[RESOURCE, "sport", &sport_id.to_string(), "name", name])
            .await
    }

    pub async fn create(&self, body: &SportLevelCreate) -> Result<SportLevel, ApiError> {
        let level = self.api.post(&[RESOURCE], body).await?;
        self.api.notify_success("Sport level created successfully.");
        Ok(level)
    }

    pub async fn update(&self, id: i64, body: &SportLevelUpdate) -> Result<SportLevel, ApiError> {
        let level = self.api.put(&[RESOURCE, &id.to_string()], body).await?;
        self.api.notify_success("Sport level updated successfully.");
        Ok(level)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&[RESOURCE, &id.to_string()]).await?;
        self.api.notify_success("Sport level deleted successfully.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{harness, login_as};
    use crate::models::{SportLevelCreate, SportLevelUpdate};
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{get, post, put};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    fn level(id: i64, name: &str, sport_id: i64) -> Value {
        json!({"id": id, "name": name, "sport": {"id": sport_id, "name": "Judo"}})
    }

    fn router() -> Router {
        Router::new()
            .route(
                "/sport-level/sport/:sport_id",
                get(|Path(sport_id): Path<i64>| async move {
                    Json(json!([level(1, "Beginner", sport_id), level(2, "Advanced", sport_id)]))
                }),
            )
            .route(
                "/sport-level/sport/:sport_id/name/:name",
                get(|Path((sport_id, name)): Path<(i64, String)>| async move {
                    Json(level(5, &name, sport_id))
                }),
            )
            .route(
                "/sport-level/:id",
                put(|Path(id): Path<i64>, Json(body): Json<Value>| async move {
                    let sport_id = body["sportId"].as_i64().unwrap_or_default();
                    let name = body["name"].as_str().unwrap_or_default().to_string();
                    Json(level(id, &name, sport_id))
                })
                .delete(|| async { StatusCode::NO_CONTENT }),
            )
            .route(
                "/sport-level",
                post(|Json(body): Json<Value>| async move {
                    let sport_id = body["sportId"].as_i64().unwrap_or_default();
                    let name = body["name"].as_str().unwrap_or_default().to_string();
                    Json(level(6, &name, sport_id))
                }),
            )
    }

    #[tokio::test]
    async fn test_levels_by_sport() {
        let h = harness(router()).await;
        login_as(&h.api, "ORGANIZER");

        let levels = h.api.sport_levels().list_by_sport(4).await.unwrap();
        assert_eq!(levels.len(), 2);
        assert!(levels.iter().all(|l| l.sport.id == 4));

        let black_belt = h
            .api
            .sport_levels()
            .get_by_sport_and_name(4, "Black Belt")
            .await
            .unwrap();
        assert_eq!(black_belt.name, "Black Belt");
    }

    #[tokio::test]
    async fn test_create_sends_sport_id() {
        let h = harness(router()).await;
        login_as(&h.api, "ADMIN");

        let created = h
            .api
            .sport_levels()
            .create(&SportLevelCreate {
                sport_id: 2,
                name: "Intermediate".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.sport.id, 2);
        assert_eq!(created.name, "Intermediate");
        assert_eq!(
            h.notifier.take()[0].message,
            "Sport level created successfully."
        );
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let h = harness(router()).await;
        login_as(&h.api, "ADMIN");

        let updated = h
            .api
            .sport_levels()
            .update(
                6,
                &SportLevelUpdate {
                    name: "Expert".to_string(),
                    sport_id: 2,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, 6);
        assert_eq!(updated.name, "Expert");
        assert_eq!(updated.sport.id, 2);

        h.api.sport_levels().delete(6).await.unwrap();

        let messages: Vec<_> = h.notifier.take().into_iter().map(|n| n.message).collect();
        assert_eq!(
            messages,
            vec![
                "Sport level updated successfully.",
                "Sport level deleted successfully.",
            ]
        );
    }
}
