//! Data models for the Deployment Registry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Deployment record, the unit of storage
///
/// Every field decodes to its zero value when omitted so that the validator,
/// not the decoder, decides what is missing. An explicit `null` counts as
/// omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Registry key. The nil UUID means "not supplied".
    #[serde(default, deserialize_with = "nil_if_blank")]
    pub id: Uuid,

    /// Free-form label
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,

    /// Desired instance count
    #[serde(default, deserialize_with = "null_as_default")]
    pub replicas: i64,

    /// Container image reference
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub ports: Vec<Port>,

    /// When the registry accepted this deployment
    #[serde(default, alias = "createAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Port exposed by a deployment
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Port {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Port number, valid range 1..=65535
    #[serde(
        default,
        rename = "port",
        alias = "number",
        deserialize_with = "null_as_default"
    )]
    pub number: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` and `""` both mean no id was supplied
fn nil_if_blank<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(Uuid::nil()),
        Some(raw) => Uuid::parse_str(raw).map_err(serde::de::Error::custom),
    }
}

impl Deployment {
    /// Stamp the acceptance time onto a candidate
    pub fn accepted(mut self) -> Self {
        self.created_at = Some(Utc::now());
        self
    }
}

/// Deployment fields checked by the accumulating validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Replicas,
    Image,
    Ports,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Replicas => "replicas",
            Field::Image => "image",
            Field::Ports => "ports",
        }
    }
}

/// Error body returned for every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,

    pub code: u32,

    /// Extra detail keyed by category, e.g. `failed_fields`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<HashMap<String, Vec<String>>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_decode_to_zero_values() {
        let deployment: Deployment = serde_json::from_value(json!({})).unwrap();

        assert!(deployment.id.is_nil());
        assert_eq!(deployment.replicas, 0);
        assert!(deployment.image.is_empty());
        assert!(deployment.ports.is_empty());
        assert!(deployment.labels.is_empty());
        assert!(deployment.created_at.is_none());
    }

    #[test]
    fn test_null_and_blank_decode_to_zero_values() {
        let deployment: Deployment = serde_json::from_value(json!({
            "id": null,
            "name": null,
            "labels": null,
            "replicas": null,
            "image": null,
            "ports": [{ "name": null, "port": null }]
        }))
        .unwrap();

        assert!(deployment.id.is_nil());
        assert!(deployment.name.is_empty());
        assert!(deployment.labels.is_empty());
        assert_eq!(deployment.replicas, 0);
        assert!(deployment.image.is_empty());
        assert_eq!(deployment.ports, vec![Port::default()]);

        let blank_id: Deployment = serde_json::from_value(json!({ "id": "" })).unwrap();
        assert!(blank_id.id.is_nil());
    }

    #[test]
    fn test_unparseable_id_is_a_decode_error() {
        let result = serde_json::from_value::<Deployment>(json!({ "id": "not-a-uuid" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_port_number_wire_names() {
        let by_port: Port = serde_json::from_value(json!({ "name": "http", "port": 80 })).unwrap();
        let by_number: Port = serde_json::from_value(json!({ "number": 443 })).unwrap();

        assert_eq!(by_port.number, 80);
        assert_eq!(by_number.number, 443);
        assert_eq!(serde_json::to_value(&by_port).unwrap()["port"], 80);
    }

    #[test]
    fn test_legacy_create_at_is_accepted() {
        let deployment: Deployment =
            serde_json::from_value(json!({ "createAt": "2024-01-02T03:04:05Z" })).unwrap();
        assert!(deployment.created_at.is_some());

        let value = serde_json::to_value(&deployment).unwrap();
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_error_body_omits_empty_extras() {
        let body = ErrorBody {
            message: "Deployment not found".to_string(),
            code: 5,
            extras: None,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("extras").is_none());
    }
}
