use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Applicant as returned by the creation endpoint. The server-issued `id` is
/// narrowed out for convenience; everything else the server sent stays
/// reachable through `extra`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Applicant {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RequiredDocsStatus {
    #[serde(rename = "reviewStatus")]
    pub review_status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applicant_keeps_id_and_extras() {
        let applicant: Applicant = serde_json::from_str(
            r#"{"id":"abc123","externalUserId":"user-1","review":{"reviewStatus":"init"}}"#,
        )
        .unwrap();

        assert_eq!(applicant.id, "abc123");
        assert_eq!(applicant.extra["externalUserId"], "user-1");
        assert_eq!(applicant.extra["review"]["reviewStatus"], "init");
    }

    #[test]
    fn test_required_docs_status() {
        let status: RequiredDocsStatus =
            serde_json::from_str(r#"{"reviewStatus":"pending"}"#).unwrap();
        assert_eq!(status.review_status, "pending");
    }
}
