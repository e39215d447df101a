//! Firestore REST client.
//!
//! Documents travel as typed `fields` maps (`{"firstName": {"stringValue":
//! "Ada"}}`); `encode_fields` and `decode_fields` translate to and from plain
//! JSON objects so the rest of the crate never sees the typed form.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Number, Value};
use url::Url;
use userdesk_domain::UserId;

use super::{endpoint, SessionSlot};
use crate::ports::{DocumentStore, StoreError};

#[derive(Clone)]
pub struct FirestoreClient {
    client: Client,
    base_url: Url,
    project_id: String,
    session: SessionSlot,
}

#[derive(Deserialize)]
struct DocumentBody {
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl FirestoreClient {
    pub fn new(
        client: Client,
        base_url: Url,
        project_id: impl Into<String>,
        session: SessionSlot,
    ) -> Self {
        Self {
            client,
            base_url,
            project_id: project_id.into(),
            session,
        }
    }

    fn document_url(&self, collection: &str, key: &UserId) -> Result<Url, StoreError> {
        endpoint(
            &self.base_url,
            &[
                "v1",
                "projects",
                &self.project_id,
                "databases",
                "(default)",
                "documents",
                collection,
                key.as_str(),
            ],
        )
        .ok_or_else(|| StoreError::rejected(0, "Firestore base URL cannot carry a path"))
    }

    fn id_token(&self) -> Result<String, StoreError> {
        self.session.id_token().ok_or(StoreError::Unauthenticated)
    }
}

/// Turn a non-success response into a `StoreError`.
async fn error_from(response: reqwest::Response) -> StoreError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED => StoreError::Unauthenticated,
        StatusCode::FORBIDDEN => StoreError::PermissionDenied(message),
        _ => StoreError::rejected(status.as_u16(), message),
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn get_document(
        &self,
        collection: &str,
        key: &UserId,
    ) -> Result<Option<Value>, StoreError> {
        let url = self.document_url(collection, key)?;
        let token = self.id_token()?;

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(StoreError::network)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let err = error_from(response).await;
            tracing::debug!(collection, key = %key, error = %err, "Firestore read failed");
            return Err(err);
        }

        let document: DocumentBody = response.json().await.map_err(StoreError::serialization)?;
        decode_fields(document.fields).map(Some)
    }

    async fn put_document(
        &self,
        collection: &str,
        key: &UserId,
        value: &Value,
    ) -> Result<(), StoreError> {
        let Value::Object(object) = value else {
            return Err(StoreError::serialization("documents must be JSON objects"));
        };
        let url = self.document_url(collection, key)?;
        let token = self.id_token()?;
        let body = json!({ "fields": encode_fields(object)? });

        let response = self
            .client
            .patch(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(StoreError::network)?;

        if !response.status().is_success() {
            let err = error_from(response).await;
            tracing::debug!(collection, key = %key, error = %err, "Firestore write failed");
            return Err(err);
        }
        Ok(())
    }
}

pub(crate) fn encode_fields(object: &Map<String, Value>) -> Result<Value, StoreError> {
    let mut fields = Map::with_capacity(object.len());
    for (name, value) in object {
        fields.insert(name.clone(), encode_value(value)?);
    }
    Ok(Value::Object(fields))
}

fn encode_value(value: &Value) -> Result<Value, StoreError> {
    Ok(match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // Firestore carries 64-bit integers as decimal strings.
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => {
                let f = n
                    .as_f64()
                    .ok_or_else(|| StoreError::serialization(format!("unsupported number {n}")))?;
                json!({ "doubleValue": f })
            }
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values = items.iter().map(encode_value).collect::<Result<Vec<_>, _>>()?;
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(object) => json!({ "mapValue": { "fields": encode_fields(object)? } }),
    })
}

pub(crate) fn decode_fields(fields: Map<String, Value>) -> Result<Value, StoreError> {
    let mut object = Map::with_capacity(fields.len());
    for (name, value) in fields {
        let decoded = decode_value(&value)
            .map_err(|e| StoreError::serialization(format!("field `{name}`: {e}")))?;
        object.insert(name, decoded);
    }
    Ok(Value::Object(object))
}

fn decode_value(value: &Value) -> Result<Value, String> {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Err("expected a typed value".to_string());
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| "booleanValue is not a bool".to_string()),
        "integerValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                Value::Number(n) => n.as_i64(),
                _ => None,
            };
            parsed
                .map(|i| Value::Number(i.into()))
                .ok_or_else(|| format!("integerValue {inner} is not an integer"))
        }
        "doubleValue" => inner
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| format!("doubleValue {inner} is not finite")),
        "stringValue" | "timestampValue" | "referenceValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| format!("{kind} is not a string")),
        "arrayValue" => {
            let values: &[Value] = match inner.get("values") {
                Some(Value::Array(values)) => values,
                None => &[],
                Some(other) => return Err(format!("arrayValue.values is {other}")),
            };
            values
                .iter()
                .map(decode_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        "mapValue" => {
            let fields = match inner.get("fields") {
                Some(Value::Object(fields)) => fields.clone(),
                None => Map::new(),
                Some(other) => return Err(format!("mapValue.fields is {other}")),
            };
            decode_fields(fields).map_err(|e| e.to_string())
        }
        other => Err(format!("unsupported value type `{other}`")),
    }
}
