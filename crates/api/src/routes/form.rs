//! Text form decoding shared by the storefront and account routes.
//!
//! Clients post these forms as JSON, url-encoded, or multipart bodies.
//! [`FormFields`] accepts any of the three and exposes the fields as text,
//! leaving typed parsing to the model constructors.

use std::collections::HashMap;

use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::Value;

use crate::error::AppError;
use crate::models::ValidationError;

/// Text fields of a submitted form, keyed by name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    /// Value of a field, if sent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn from_json(value: Value) -> Result<Self, ValidationError> {
        let Value::Object(object) = value else {
            return Err(ValidationError::Malformed(
                "expected a JSON object".to_string(),
            ));
        };

        let fields = object
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => return None,
                };
                Some((key, text))
            })
            .collect();
        Ok(Self(fields))
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ValidationError> {
        let mut fields = HashMap::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ValidationError::Malformed(e.body_text()))?
        {
            // These forms carry no files.
            if field.file_name().is_some() {
                continue;
            }
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let text = field
                .text()
                .await
                .map_err(|e| ValidationError::Malformed(e.body_text()))?;
            fields.insert(name, text);
        }
        Ok(Self(fields))
    }
}

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let fields = if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ValidationError::Malformed(e.body_text()))?;
            Self::from_multipart(multipart).await?
        } else if content_type.starts_with("application/json") {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|e| ValidationError::Malformed(e.body_text()))?;
            Self::from_json(value)?
        } else {
            let Form(map) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ValidationError::Malformed(e.body_text()))?;
            Self(map)
        };

        Ok(fields)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use serde_json::json;

    use super::*;

    async fn decode(content_type: &str, body: impl Into<Body>) -> Result<FormFields, AppError> {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, content_type)
            .body(body.into())
            .unwrap();
        FormFields::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_json_scalars_become_text() {
        let body = json!({"name": "Ana", "stars": 5, "extra": null, "tags": ["a"]}).to_string();
        let fields = decode("application/json", body).await.unwrap();

        assert_eq!(fields.get("name"), Some("Ana"));
        assert_eq!(fields.get("stars"), Some("5"));
        assert_eq!(fields.get("extra"), None);
        assert_eq!(fields.get("tags"), None);
    }

    #[tokio::test]
    async fn test_json_must_be_object() {
        let err = decode("application/json", "[1,2]").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_urlencoded() {
        let fields = decode(
            "application/x-www-form-urlencoded",
            "email=fan%40example.com&name=A+B",
        )
        .await
        .unwrap();
        assert_eq!(fields.get("email"), Some("fan@example.com"));
        assert_eq!(fields.get("name"), Some("A B"));
    }

    #[tokio::test]
    async fn test_multipart_text_fields() {
        let body = "--XYZ\r\n\
            Content-Disposition: form-data; name=\"product_id\"\r\n\r\n\
            3\r\n\
            --XYZ\r\n\
            Content-Disposition: form-data; name=\"quantity\"\r\n\r\n\
            2\r\n\
            --XYZ--\r\n";
        let fields = decode("multipart/form-data; boundary=XYZ", body)
            .await
            .unwrap();
        assert_eq!(fields.get("product_id"), Some("3"));
        assert_eq!(fields.get("quantity"), Some("2"));
    }
}
