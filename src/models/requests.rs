use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateApplicantRequest {
    #[serde(rename = "externalUserId")]
    pub external_user_id: String,
}

/// Metadata part of an ID-document upload. Serialized to a JSON string and
/// sent as the `metadata` field of the multipart form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocMetadata {
    #[serde(rename = "idDocType")]
    pub id_doc_type: String,
    pub country: String,
}

impl DocMetadata {
    pub fn new(id_doc_type: impl Into<String>, country: impl Into<String>) -> Self {
        DocMetadata {
            id_doc_type: id_doc_type.into(),
            country: country.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_applicant_request_wire_format() {
        let request = CreateApplicantRequest {
            external_user_id: "user-123".to_string(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"externalUserId":"user-123"}"#);
    }

    #[test]
    fn test_doc_metadata_wire_format() {
        let metadata = DocMetadata::new("PASSPORT", "USA");
        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(json, r#"{"idDocType":"PASSPORT","country":"USA"}"#);
    }
}
