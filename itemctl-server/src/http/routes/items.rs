//! Item endpoints
//!
//! `/item` accepts both POST (JSON body) and GET (query string). GET is a
//! mutating write here; both verbs end in the same insert.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::value::format_timestamp;
use crate::db::{self, Item, ItemRepo};
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::{FieldSource, ItemText, ValidationError};

/// Item response
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: i32,
    pub text: String,
    pub update_time: String,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            text: item.text,
            update_time: format_timestamp(&item.update_time),
        }
    }
}

/// Confirmation body for a successful write
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Where the text of a new item is read from, decided by the HTTP verb
#[derive(Debug)]
pub enum ItemSource {
    /// POST: `{"text": ...}`
    Body(JsonBody),
    /// GET: `?text=...`
    Query(HashMap<String, String>),
}

impl ItemSource {
    /// Extract and validate the item text.
    pub fn text(&self) -> Result<ItemText, ValidationError> {
        match self {
            Self::Body(body) => ItemText::new(body.required_str("text")?),
            Self::Query(params) => match params.get("text") {
                Some(text) if !text.is_empty() => ItemText::new(text.as_str()),
                _ => Err(ValidationError::Missing {
                    field: "text",
                    source: FieldSource::Query,
                }),
            },
        }
    }
}

/// Validate, then insert. Nothing connects to the store until the text is valid.
async fn add_item(
    state: &AppState,
    source: ItemSource,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let text = source.text()?;

    let mut conn = state.connect().await?;
    let result = ItemRepo::new(&mut conn).insert(&text).await;
    db::release(conn).await;
    result?;

    tracing::info!(chars = text.as_str().chars().count(), "item added");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Item added successfully",
        }),
    ))
}

/// POST /item - add an item from the JSON body
async fn add_item_from_body(
    State(state): State<Arc<AppState>>,
    body: JsonBody,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    add_item(&state, ItemSource::Body(body)).await
}

/// GET /item - add an item from the `text` query parameter
async fn add_item_from_query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    add_item(&state, ItemSource::Query(params)).await
}

/// GET /items - list every item
async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let mut conn = state.connect().await?;
    let result = ItemRepo::new(&mut conn).list().await;
    db::release(conn).await;

    let items = result?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/item", get(add_item_from_query).post(add_item_from_body))
        .route("/items", get(list_items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn query(pairs: &[(&str, &str)]) -> ItemSource {
        ItemSource::Query(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn query_source_requires_text() {
        assert_eq!(
            query(&[("text", "buy milk")]).text().unwrap().as_str(),
            "buy milk"
        );

        let err = query(&[("other", "x")]).text().unwrap_err();
        assert_eq!(err.to_string(), "Missing 'text' parameter in URL");

        let err = query(&[("text", "")]).text().unwrap_err();
        assert_eq!(err.to_string(), "Missing 'text' parameter in URL");
    }

    #[test]
    fn body_source_requires_text() {
        let body = JsonBody(json!({"text": "buy milk"}).as_object().cloned());
        assert_eq!(ItemSource::Body(body).text().unwrap().as_str(), "buy milk");

        let err = ItemSource::Body(JsonBody(None)).text().unwrap_err();
        assert_eq!(err.to_string(), "Missing 'text' in request body");
    }

    #[test]
    fn body_text_present_but_empty_is_not_reported_missing() {
        let body = JsonBody(json!({"text": ""}).as_object().cloned());
        let err = ItemSource::Body(body).text().unwrap_err();
        assert_eq!(err.to_string(), "text cannot be empty");

        let body = JsonBody(json!({"text": null}).as_object().cloned());
        let err = ItemSource::Body(body).text().unwrap_err();
        assert_eq!(err.to_string(), "text: must be a string");
    }

    #[test]
    fn body_text_longer_than_column_is_rejected() {
        let body = JsonBody(json!({"text": "x".repeat(256)}).as_object().cloned());
        let err = ItemSource::Body(body).text().unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 255, .. }));
    }

    #[test]
    fn response_formats_update_time() {
        let item = Item {
            id: 1,
            text: "buy milk".into(),
            update_time: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_micro_opt(3, 4, 5, 678_000)
                .unwrap(),
        };

        let value = serde_json::to_value(ItemResponse::from(item)).unwrap();
        assert_eq!(
            value,
            json!({"id": 1, "text": "buy milk", "update_time": "2024-01-02 03:04:05"})
        );
    }
}
