//! Normalized request input for the mutating item endpoints.
//!
//! Clients may send fields either as a JSON object body or as URL query
//! parameters. Both are folded into one key-value map before validation.

use axum::extract::{FromRequest, Query, Request};
use axum::http::{header, HeaderMap};
use axum::Json;
use serde_json::{Map, Value as JsonValue};

use crate::error::{ApiError, ValidationError};
use crate::models::{ItemPatch, NewItem};

pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";
pub const PRICE: &str = "price";

/// Key-value fields supplied by the client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, JsonValue>);

impl Payload {
    /// Accepts only a JSON object; any other JSON value is rejected.
    pub fn from_json(value: JsonValue) -> Result<Self, ApiError> {
        match value {
            JsonValue::Object(map) => Ok(Payload(map)),
            other => Err(ApiError::MalformedBody(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// A key given more than once keeps its first value.
    pub fn from_query(params: Vec<(String, String)>) -> Self {
        let mut fields = Map::new();
        for (key, value) in params {
            fields.entry(key).or_insert(JsonValue::String(value));
        }
        Payload(fields)
    }

    fn require(&self, field: &'static str) -> Result<&JsonValue, ValidationError> {
        self.0.get(field).ok_or(ValidationError::MissingField(field))
    }

    /// Full set of fields, as needed by create and replace.
    pub fn new_item(&self) -> Result<NewItem, ValidationError> {
        Ok(NewItem {
            name: parse_name(self.require(NAME)?)?,
            description: parse_description(self.require(DESCRIPTION)?)?,
            price: parse_price(self.require(PRICE)?)?,
        })
    }

    /// Only the fields that are present, as needed by amend.
    pub fn item_patch(&self) -> Result<ItemPatch, ValidationError> {
        Ok(ItemPatch {
            name: self.0.get(NAME).map(parse_name).transpose()?,
            description: self.0.get(DESCRIPTION).map(parse_description).transpose()?,
            price: self.0.get(PRICE).map(parse_price).transpose()?,
        })
    }
}

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if has_json_content_type(req.headers()) {
            let Json(value) = Json::<JsonValue>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
            Payload::from_json(value)
        } else {
            let Query(params) = Query::<Vec<(String, String)>>::try_from_uri(req.uri())
                .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
            Ok(Payload::from_query(params))
        }
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

fn parse_name(value: &JsonValue) -> Result<String, ValidationError> {
    match value {
        JsonValue::String(name) if !name.trim().is_empty() => Ok(name.clone()),
        JsonValue::String(_) => Err(ValidationError::InvalidValue {
            field: NAME,
            reason: "must not be empty".to_string(),
        }),
        other => Err(ValidationError::InvalidValue {
            field: NAME,
            reason: format!("expected a string, got {}", other),
        }),
    }
}

fn parse_description(value: &JsonValue) -> Result<Option<String>, ValidationError> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::String(description) => Ok(Some(description.clone())),
        other => Err(ValidationError::InvalidValue {
            field: DESCRIPTION,
            reason: format!("expected a string or null, got {}", other),
        }),
    }
}

fn parse_price(value: &JsonValue) -> Result<f64, ValidationError> {
    let parsed = match value {
        JsonValue::Number(number) => number.as_f64(),
        JsonValue::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|price| price.is_finite())
        .ok_or_else(|| ValidationError::InvalidValue {
            field: PRICE,
            reason: format!("could not convert {} to a number", value),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde_json::json;

    fn payload(value: JsonValue) -> Payload {
        Payload::from_json(value).unwrap()
    }

    #[test]
    fn test_new_item_from_json() {
        let item = payload(json!({"name": "Widget", "description": "A widget", "price": 9.99}))
            .new_item()
            .unwrap();

        assert_eq!(
            item,
            NewItem {
                name: "Widget".to_string(),
                description: Some("A widget".to_string()),
                price: 9.99,
            }
        );
    }

    #[test]
    fn test_new_item_accepts_numeric_string_price() {
        let item = payload(json!({"name": "Widget", "description": null, "price": " 12.5 "}))
            .new_item()
            .unwrap();
        assert_eq!(item.price, 12.5);
        assert_eq!(item.description, None);
    }

    #[test]
    fn test_new_item_from_query() {
        let params = vec![
            ("name".to_string(), "Widget".to_string()),
            ("description".to_string(), "From query".to_string()),
            ("price".to_string(), "3".to_string()),
        ];
        let item = Payload::from_query(params).new_item().unwrap();
        assert_eq!(item.name, "Widget");
        assert_eq!(item.description.as_deref(), Some("From query"));
        assert_eq!(item.price, 3.0);
    }

    #[test]
    fn test_missing_fields_are_reported_by_name() {
        let err = payload(json!({"name": "Widget", "description": "d"}))
            .new_item()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField(PRICE));

        let err = payload(json!({"name": "Widget", "price": 1}))
            .new_item()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField(DESCRIPTION));
    }

    #[test]
    fn test_invalid_price_values() {
        for price in [json!("abc"), json!(true), json!(null), json!([1]), json!("NaN"), json!("inf")] {
            let err = payload(json!({"name": "Widget", "description": "d", "price": price.clone()}))
                .new_item()
                .unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidValue { field: PRICE, .. }),
                "price {} should be rejected",
                price
            );
        }
    }

    #[test]
    fn test_invalid_price_message_carries_value() {
        let err = payload(json!({"name": "Widget", "description": "d", "price": "abc"}))
            .new_item()
            .unwrap_err();
        assert!(err.to_string().contains("price"));
        assert!(err.to_string().contains("\"abc\""));
    }

    #[test]
    fn test_invalid_name_values() {
        for name in [json!(""), json!("   "), json!(42), json!(null)] {
            let err = payload(json!({"name": name, "description": "d", "price": 1}))
                .new_item()
                .unwrap_err();
            assert!(matches!(err, ValidationError::InvalidValue { field: NAME, .. }));
        }
    }

    #[test]
    fn test_item_patch_only_present_fields() {
        let patch = payload(json!({"name": "X"})).item_patch().unwrap();
        assert_eq!(
            patch,
            ItemPatch {
                name: Some("X".to_string()),
                description: None,
                price: None,
            }
        );

        let patch = payload(json!({"description": null, "price": "2"}))
            .item_patch()
            .unwrap();
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.price, Some(2.0));

        assert!(payload(json!({})).item_patch().unwrap().is_empty());
    }

    #[test]
    fn test_item_patch_rejects_bad_price() {
        let err = payload(json!({"price": "abc"})).item_patch().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { field: PRICE, .. }));
    }

    #[test]
    fn test_non_object_json_is_malformed() {
        assert!(matches!(
            Payload::from_json(json!([1, 2, 3])),
            Err(ApiError::MalformedBody(_))
        ));
    }

    #[test]
    fn test_json_content_type_detection() {
        let mut headers = HeaderMap::new();
        assert!(!has_json_content_type(&headers));

        headers.insert(header::CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        assert!(has_json_content_type(&headers));

        headers.insert(header::CONTENT_TYPE, "application/merge-patch+json".parse().unwrap());
        assert!(has_json_content_type(&headers));

        headers.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
        assert!(!has_json_content_type(&headers));
    }

    #[tokio::test]
    async fn test_extractor_prefers_json_body() {
        let req = axum::http::Request::builder()
            .uri("/create?name=FromQuery")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name": "FromBody"}"#))
            .unwrap();

        let payload = Payload::from_request(req, &()).await.unwrap();
        assert_eq!(payload.item_patch().unwrap().name.as_deref(), Some("FromBody"));
    }

    #[tokio::test]
    async fn test_extractor_falls_back_to_query() {
        let req = axum::http::Request::builder()
            .uri("/create?name=Widget&description=Query%20item&price=4.25")
            .body(Body::empty())
            .unwrap();

        let item = Payload::from_request(req, &()).await.unwrap().new_item().unwrap();
        assert_eq!(item.description.as_deref(), Some("Query item"));
        assert_eq!(item.price, 4.25);
    }

    #[tokio::test]
    async fn test_repeated_query_key_keeps_first_value() {
        let req = axum::http::Request::builder()
            .uri("/create?name=A&name=B&description=d&price=1&price=2")
            .body(Body::empty())
            .unwrap();

        let item = Payload::from_request(req, &()).await.unwrap().new_item().unwrap();
        assert_eq!(item.name, "A");
        assert_eq!(item.price, 1.0);
    }

    #[tokio::test]
    async fn test_extractor_rejects_broken_json() {
        let req = axum::http::Request::builder()
            .uri("/create")
            .header("content-type", "application/json")
            .body(Body::from("{invalid json}"))
            .unwrap();

        let result = Payload::from_request(req, &()).await;
        assert!(matches!(result, Err(ApiError::MalformedBody(_))));
    }
}
