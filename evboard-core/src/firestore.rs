//! Firestore REST client.
//!
//! Implements [`EventStore`] over the Firestore v1 REST API. Documents live
//! under the fixed public collection path
//! `artifacts/{deploymentId}/public/data/events`, partitioned per deployment.
//!
//! Firestore's JSON wire format wraps every field in a typed value object
//! (`stringValue`, `doubleValue`, `mapValue`, ...). The codec here is
//! deliberately tolerant on decode: sparse or oddly-typed documents become
//! events with defaulted fields rather than errors, so one bad record never
//! breaks the mirror.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::auth::Identity;
use crate::error::{BoardError, BoardResult};
use crate::event::{Coordinates, Event, StoredEvent};
use crate::store::EventStore;

const BASE_URL: &str = "https://firestore.googleapis.com/v1";

pub struct Firestore {
    client: reqwest::Client,
    project_id: String,
    deployment_id: String,
    id_token: String,
}

impl Firestore {
    pub fn new(
        project_id: impl Into<String>,
        deployment_id: impl Into<String>,
        identity: &Identity,
    ) -> Self {
        Firestore {
            client: reqwest::Client::new(),
            project_id: project_id.into(),
            deployment_id: deployment_id.into(),
            id_token: identity.id_token.clone(),
        }
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/artifacts/{}/public/data/events",
            BASE_URL, self.project_id, self.deployment_id
        )
    }
}

#[async_trait]
impl EventStore for Firestore {
    async fn list(&self) -> BoardResult<Vec<StoredEvent>> {
        let response = self
            .client
            .get(self.collection_url())
            .bearer_auth(&self.id_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BoardError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| BoardError::Store(format!("Malformed list response: {}", e)))?;

        Ok(decode_collection(&body))
    }

    async fn create(&self, event: &Event) -> BoardResult<String> {
        let response = self
            .client
            .post(self.collection_url())
            .bearer_auth(&self.id_token)
            .json(&json!({ "fields": encode_fields(event) }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BoardError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| BoardError::Store(format!("Malformed create response: {}", e)))?;

        Ok(document_id(&body).unwrap_or_default())
    }
}

/// Decode a `documents.list` response body, preserving upstream order.
fn decode_collection(body: &Value) -> Vec<StoredEvent> {
    body.get("documents")
        .and_then(Value::as_array)
        .map(|docs| docs.iter().filter_map(decode_document).collect())
        .unwrap_or_default()
}

/// Decode one document into a stored event. Only documents without a name
/// are dropped; missing fields default.
fn decode_document(doc: &Value) -> Option<StoredEvent> {
    let id = document_id(doc)?;
    let fields = doc.get("fields");

    Some(StoredEvent {
        id,
        event: Event {
            title: string_field(fields, "title"),
            date: string_field(fields, "date"),
            mode: string_field(fields, "mode"),
            description: string_field(fields, "description"),
            location: opt_string_field(fields, "location"),
            coordinates: decode_coordinates(fields),
        },
    })
}

/// Document key: last path segment of the resource name.
fn document_id(doc: &Value) -> Option<String> {
    doc.get("name")
        .and_then(Value::as_str)
        .and_then(|name| name.rsplit('/').next())
        .map(String::from)
}

fn opt_string_field(fields: Option<&Value>, key: &str) -> Option<String> {
    let value = fields?
        .get(key)?
        .get("stringValue")?
        .as_str()?
        .to_string();
    if value.is_empty() { None } else { Some(value) }
}

fn string_field(fields: Option<&Value>, key: &str) -> String {
    opt_string_field(fields, key).unwrap_or_default()
}

fn double_field(fields: Option<&Value>, key: &str) -> Option<f64> {
    let value = fields?.get(key)?;
    // Firestore serializes integral doubles as integerValue strings
    if let Some(d) = value.get("doubleValue") {
        return d.as_f64().or_else(|| d.as_str()?.parse().ok());
    }
    value.get("integerValue")?.as_str()?.parse().ok()
}

fn decode_coordinates(fields: Option<&Value>) -> Option<Coordinates> {
    let inner = fields?.get("coordinates")?.get("mapValue")?.get("fields");
    Some(Coordinates {
        lat: double_field(inner, "lat")?,
        lng: double_field(inner, "lng")?,
    })
}

/// Encode an event as Firestore typed-value fields.
fn encode_fields(event: &Event) -> Value {
    let mut fields = json!({
        "title": { "stringValue": &event.title },
        "date": { "stringValue": &event.date },
        "mode": { "stringValue": &event.mode },
        "description": { "stringValue": &event.description },
    });

    if let Some(location) = &event.location {
        fields["location"] = json!({ "stringValue": location });
    }

    if let Some(coords) = &event.coordinates {
        fields["coordinates"] = json!({
            "mapValue": {
                "fields": {
                    "lat": { "doubleValue": coords.lat },
                    "lng": { "doubleValue": coords.lng },
                }
            }
        });
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> Value {
        json!({
            "name": "projects/p/databases/(default)/documents/artifacts/d/public/data/events/abc123",
            "fields": {
                "title": { "stringValue": "DevFest 2025" },
                "date": { "stringValue": "2025-10-12" },
                "mode": { "stringValue": "In-person" },
                "description": { "stringValue": "Annual developer festival." },
                "location": { "stringValue": "Community Hall" },
                "coordinates": {
                    "mapValue": {
                        "fields": {
                            "lat": { "doubleValue": 12.97 },
                            "lng": { "doubleValue": 77.59 }
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn decode_full_document() {
        let stored = decode_document(&sample_doc()).unwrap();

        assert_eq!(stored.id, "abc123");
        assert_eq!(stored.event.title, "DevFest 2025");
        assert_eq!(stored.event.mode, "In-person");
        assert_eq!(stored.event.location.as_deref(), Some("Community Hall"));
        let coords = stored.event.coordinates.unwrap();
        assert_eq!(coords.lat, 12.97);
        assert_eq!(coords.lng, 77.59);
    }

    #[test]
    fn decode_sparse_document_defaults_fields() {
        let doc = json!({
            "name": "projects/p/databases/(default)/documents/x/events/sparse1",
            "fields": {
                "title": { "stringValue": "Minimal" }
            }
        });

        let stored = decode_document(&doc).unwrap();
        assert_eq!(stored.event.title, "Minimal");
        assert_eq!(stored.event.date, "");
        assert!(stored.event.location.is_none());
        assert!(stored.event.coordinates.is_none());
    }

    #[test]
    fn decode_integer_coordinates() {
        let doc = json!({
            "name": "c/events/int1",
            "fields": {
                "coordinates": {
                    "mapValue": {
                        "fields": {
                            "lat": { "integerValue": "13" },
                            "lng": { "integerValue": "77" }
                        }
                    }
                }
            }
        });

        let coords = decode_document(&doc).unwrap().event.coordinates.unwrap();
        assert_eq!(coords.lat, 13.0);
        assert_eq!(coords.lng, 77.0);
    }

    #[test]
    fn decode_collection_preserves_order() {
        let body = json!({
            "documents": [
                { "name": "c/events/first", "fields": { "title": { "stringValue": "A" } } },
                { "name": "c/events/second", "fields": { "title": { "stringValue": "B" } } },
            ]
        });

        let events = decode_collection(&body);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "first");
        assert_eq!(events[1].id, "second");
    }

    #[test]
    fn decode_empty_collection() {
        assert!(decode_collection(&json!({})).is_empty());
    }

    #[test]
    fn encode_round_trips_through_decode() {
        let event = crate::event::sample_event();
        let doc = json!({
            "name": "c/events/rt1",
            "fields": encode_fields(&event),
        });

        let decoded = decode_document(&doc).unwrap();
        assert_eq!(decoded.event, event);
    }

    #[test]
    fn encode_omits_absent_optionals() {
        let event = Event {
            title: "Online Only".into(),
            date: "2025-09-01".into(),
            mode: "Online".into(),
            description: String::new(),
            location: None,
            coordinates: None,
        };

        let fields = encode_fields(&event);
        assert!(fields.get("location").is_none());
        assert!(fields.get("coordinates").is_none());
    }
}
