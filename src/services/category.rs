use reqwest::{Method, Request};

use crate::api::{ApiClient, ApiError};
use crate::models::{Category, CategoryCreate, CategoryFilter, CategoryUpdate};

const RESOURCE: &str = "category";

/// Competition categories (age, weight, gender and level brackets)
pub struct CategoryService<'a> {
    api: &'a ApiClient,
}

impl<'a> CategoryService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        self.api.get(&[RESOURCE]).await
    }

    pub async fn list_by_sport(&self, sport_id: i64) -> Result<Vec<Category>, ApiError> {
        self.api
            .get(&[RESOURCE, "sport", &sport_id.to_string()])
            .await
    }

    pub async fn list_by_gender(&self, gender_id: i64) -> Result<Vec<Category>, ApiError> {
        self.api
            .get(&[RESOURCE, "gender", &gender_id.to_string()])
            .await
    }

    pub async fn list_by_level(&self, level_id: i64) -> Result<Vec<Category>, ApiError> {
        self.api
            .get(&[RESOURCE, "level", &level_id.to_string()])
            .await
    }

    /// Build the search request without sending it. Only the filters that
    /// are set end up in the query string.
    pub fn search_request(&self, filter: &CategoryFilter) -> Result<Request, ApiError> {
        self.api
            .request(Method::GET, &[RESOURCE, "search"])?
            .query(filter)
            .build()
            .map_err(ApiError::from_transport)
    }

    pub async fn search(&self, filter: &CategoryFilter) -> Result<Vec<Category>, ApiError> {
        let request = self.search_request(filter)?;
        let response = self.api.execute(request).await?;
        response.json().await.map_err(ApiError::from_transport)
    }

    pub async fn get(&self, id: i64) -> Result<Category, ApiError> {
        self.api.get(&[RESOURCE, &id.to_string()]).await
    }

    pub async fn get_by_sport_and_name(
        &self,
        sport_id: i64,
        name: &str,
    ) -> Result<Category, ApiError> {
        self.api
            .get(&[RESOURCE, "sport", &sport_id.to_string(), "name", name])
            .await
    }

    pub async fn create(&self, body: &CategoryCreate) -> Result<Category, ApiError> {
        let category = self.api.post(&[RESOURCE], body).await?;
        self.api.notify_success("Category created successfully.");
        Ok(category)
    }

    pub async fn update(&self, id: i64, body: &CategoryUpdate) -> Result<Category, ApiError> {
        let category = self.api.put(&[RESOURCE, &id.to_string()], body).await?;
        self.api.notify_success("Category updated successfully.");
        Ok(category)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&[RESOURCE, &id.to_string()]).await?;
        self.api.notify_success("Category deleted successfully.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{harness, login_as};
    use crate::models::{CategoryCreate, CategoryFilter, CategoryUpdate};
    use axum::extract::{Path, RawQuery};
    use axum::http::StatusCode;
    use axum::routing::{get, post, put};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    /// Backend response: sport, gender and level come back as names
    fn category_json(id: i64, body: &Value) -> Value {
        json!({
            "id": id,
            "name": body["name"],
            "minAge": body["minAge"],
            "maxAge": body["maxAge"],
            "minWeight": body["minWeight"],
            "maxWeight": body["maxWeight"],
            "sport": "Judo",
            "gender": "FEMALE",
            "level": body["levelId"].as_i64().map(|_| "Advanced")
        })
    }

    fn crud_router() -> Router {
        Router::new()
            .route(
                "/category",
                post(|Json(body): Json<Value>| async move { Json(category_json(9, &body)) }),
            )
            .route(
                "/category/:id",
                put(|Path(id): Path<i64>, Json(body): Json<Value>| async move {
                    Json(category_json(id, &body))
                })
                .delete(|| async { StatusCode::NO_CONTENT }),
            )
            .route(
                "/category/sport/:sport_id/name/:name",
                get(|Path((_, name)): Path<(i64, String)>| async move {
                    Json(category_json(4, &json!({"name": name, "minAge": 18})))
                }),
            )
    }

    fn router() -> Router {
        Router::new().route(
            "/category/search",
            get(|RawQuery(query): RawQuery| async move {
                Json(json!([{
                    "id": 1,
                    "name": query.unwrap_or_default(),
                    "minAge": 18,
                    "maxAge": null,
                    "minWeight": null,
                    "maxWeight": 66.0,
                    "sport": "Judo",
                    "gender": "MALE",
                    "level": null
                }]))
            }),
        )
    }

    #[tokio::test]
    async fn test_search_query_contains_only_set_filters() {
        let h = harness(router()).await;
        let filter = CategoryFilter {
            sport_id: Some(3),
            min_age: Some(18),
            ..Default::default()
        };

        let request = h.api.categories().search_request(&filter).unwrap();
        assert_eq!(request.url().query(), Some("sportId=3&minAge=18"));
    }

    #[tokio::test]
    async fn test_search_query_keeps_field_order() {
        let h = harness(router()).await;
        let filter = CategoryFilter {
            max_weight: Some(73.5),
            gender_id: Some(1),
            level_id: Some(2),
            ..Default::default()
        };

        let request = h.api.categories().search_request(&filter).unwrap();
        assert_eq!(
            request.url().query(),
            Some("genderId=1&levelId=2&maxWeight=73.5")
        );
    }

    #[tokio::test]
    async fn test_empty_filter_sends_no_query() {
        let h = harness(router()).await;
        let request = h
            .api
            .categories()
            .search_request(&CategoryFilter::default())
            .unwrap();
        assert_eq!(request.url().query(), None);
        assert!(request.url().path().ends_with("/category/search"));
    }

    #[tokio::test]
    async fn test_search_round_trip() {
        let h = harness(router()).await;
        login_as(&h.api, "COMPETITOR");

        let filter = CategoryFilter {
            sport_id: Some(3),
            min_age: Some(18),
            ..Default::default()
        };
        let found = h.api.categories().search(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        // The stub echoes the raw query string back as the name
        assert_eq!(found[0].name, "sportId=3&minAge=18");
        assert_eq!(found[0].max_weight, Some(66.0));
    }

    #[tokio::test]
    async fn test_category_crud() {
        let h = harness(crud_router()).await;
        login_as(&h.api, "ADMIN");
        let categories = h.api.categories();

        let created = categories
            .create(&CategoryCreate {
                sport_id: 3,
                name: "-57kg".to_string(),
                min_age: Some(18),
                max_age: None,
                min_weight: None,
                max_weight: Some(57.0),
                gender_id: 2,
                level_id: None,
            })
            .await
            .unwrap();
        assert_eq!(created.id, 9);
        assert_eq!(created.gender.as_deref(), Some("FEMALE"));
        assert_eq!(created.level, None);
        assert_eq!(created.max_weight, Some(57.0));

        let updated = categories
            .update(
                9,
                &CategoryUpdate {
                    name: "-57kg Senior".to_string(),
                    min_age: Some(21),
                    max_age: Some(35),
                    min_weight: None,
                    max_weight: Some(57.0),
                    level_id: Some(2),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "-57kg Senior");
        assert_eq!(updated.max_age, Some(35));
        assert_eq!(updated.level.as_deref(), Some("Advanced"));

        categories.delete(9).await.unwrap();

        let messages: Vec<_> = h.notifier.take().into_iter().map(|n| n.message).collect();
        assert_eq!(
            messages,
            vec![
                "Category created successfully.",
                "Category updated successfully.",
                "Category deleted successfully.",
            ]
        );
    }

    #[tokio::test]
    async fn test_get_by_sport_and_name_encodes_name() {
        let h = harness(crud_router()).await;
        let found = h
            .api
            .categories()
            .get_by_sport_and_name(3, "+100kg Open")
            .await
            .unwrap();
        assert_eq!(found.name, "+100kg Open");
        assert_eq!(found.min_age, Some(18));
    }

    #[tokio::test]
    async fn test_search_request_carries_bearer() {
        let h = harness(router()).await;
        login_as(&h.api, "COMPETITOR");
        let request = h
            .api
            .categories()
            .search_request(&CategoryFilter::default())
            .unwrap();
        assert_eq!(
            request.headers()["authorization"].to_str().unwrap(),
            "Bearer test-token"
        );
    }
}
