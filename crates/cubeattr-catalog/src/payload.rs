//! Wire shapes of the discovery call
//!
//! Request: `{"clusterName": "...", "source": "..."}`
//! Response: `{"attributes": [{"name": "...", "type": "...", "special": "..."}]}`

use crate::adapter::{DiscoveryError, SourceRef};
use cubeattr_core::Attribute;
use serde::{Deserialize, Serialize};

/// Body of a discovery request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryRequest {
    pub cluster_name: String,
    pub source: String,
}

impl DiscoveryRequest {
    /// Key of this request in a catalog document, `cluster/source`
    pub fn catalog_key(&self) -> String {
        format!("{}/{}", self.cluster_name, self.source)
    }
}

impl From<&SourceRef> for DiscoveryRequest {
    fn from(source: &SourceRef) -> Self {
        Self {
            cluster_name: source.cluster.clone(),
            source: source.source.clone(),
        }
    }
}

/// Body of a successful discovery response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryResponse {
    pub attributes: Vec<Attribute>,
}

/// Decode a response body
///
/// Any structural problem (not JSON, missing `attributes`, an attribute
/// without `name` or with an unknown `type`) is reported as
/// [`DiscoveryError::InvalidResponse`].
pub fn decode_response(body: &str) -> Result<Vec<Attribute>, DiscoveryError> {
    serde_json::from_str::<DiscoveryResponse>(body)
        .map(|response| response.attributes)
        .map_err(|e| DiscoveryError::InvalidResponse(e.to_string()))
}

/// Decode an already parsed response body
pub fn decode_value(value: serde_json::Value) -> Result<Vec<Attribute>, DiscoveryError> {
    serde_json::from_value::<DiscoveryResponse>(value)
        .map(|response| response.attributes)
        .map_err(|e| DiscoveryError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeattr_core::AttributeType;
    use serde_json::json;

    #[test]
    fn request_uses_backend_field_names() {
        let request = DiscoveryRequest::from(&SourceRef::new("druid", "wikipedia"));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"clusterName": "druid", "source": "wikipedia"})
        );
        assert_eq!(request.catalog_key(), "druid/wikipedia");
    }

    #[test]
    fn decode_keeps_backend_order() {
        let attributes = decode_response(
            r#"{"attributes": [
                {"name": "time", "type": "TIME"},
                {"name": "user", "type": "STRING", "special": "unique"},
                {"name": "tags", "type": "SET/STRING"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            attributes,
            vec![
                Attribute::new("time", AttributeType::Time),
                Attribute::new("user", AttributeType::String).with_special("unique"),
                Attribute::new("tags", AttributeType::SetString),
            ]
        );
    }

    #[test]
    fn malformed_bodies_are_invalid_responses() {
        let bodies = [
            "not json",
            r#"{"columns": []}"#,
            r#"{"attributes": [{"type": "STRING"}]}"#,
            r#"{"attributes": [{"name": "x"}]}"#,
            r#"{"attributes": [{"name": "x", "type": "VARCHAR"}]}"#,
        ];

        for body in bodies {
            assert!(
                matches!(decode_response(body), Err(DiscoveryError::InvalidResponse(_))),
                "expected invalid response for {}",
                body
            );
        }
    }

    #[test]
    fn decode_value_matches_decode_response() {
        let value = json!({"attributes": [{"name": "page", "type": "STRING"}]});
        assert_eq!(
            decode_value(value.clone()).unwrap(),
            decode_response(&value.to_string()).unwrap()
        );
        assert!(decode_value(json!([])).is_err());
    }
}
