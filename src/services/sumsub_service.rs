use std::fs;
use std::path::Path;

use log::{debug, info};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::{ConfigError, SumsubConfig};
use crate::models::requests::{CreateApplicantRequest, DocMetadata};
use crate::models::responses::{Applicant, RequiredDocsStatus};
use crate::services::crypto::{
    CryptoError, SigningService, APP_TOKEN_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};

/// Response header carrying the server-assigned ID of an uploaded document.
pub const IMAGE_ID_HEADER: &str = "X-Image-Id";

#[derive(Error, Debug)]
pub enum SumsubServiceError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to sign request: {0}")]
    Signing(#[from] CryptoError),

    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Authentication rejected (HTTP {status}): {body}")]
    Auth { status: u16, body: String },

    #[error("Resource not found (HTTP {status}): {body}")]
    NotFound { status: u16, body: String },

    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Response missing {0} header")]
    MissingHeader(String),
}

/// Client for the Sumsub KYC API. Holds the immutable credential triple and
/// signs every outgoing request; each operation is a single stateless round
/// trip keyed by a server-issued applicant ID.
pub struct SumsubClient {
    config: SumsubConfig,
    signer: SigningService,
    http: Client,
}

impl SumsubClient {
    pub fn new(config: SumsubConfig) -> Self {
        let signer = SigningService::new(config.secret.as_str(), config.app_token.as_str());
        SumsubClient {
            signer,
            http: Client::new(),
            config,
        }
    }

    /// Create an applicant at the given verification level. Returns the
    /// parsed applicant; the server-issued ID keys all later operations.
    pub fn create_applicant(
        &self,
        external_user_id: &str,
        level_name: &str,
    ) -> Result<Applicant, SumsubServiceError> {
        let path = format!("/resources/applicants?levelName={}", level_name);
        let body = serde_json::to_value(CreateApplicantRequest {
            external_user_id: external_user_id.to_string(),
        })?;

        info!("Creating applicant for external user {}", external_user_id);

        let response = self.send(Method::POST, &path, Some(&body), None)?;
        let applicant = response.json::<Applicant>()?;

        info!("Created applicant {}", applicant.id);

        Ok(applicant)
    }

    /// Upload an identity document for an applicant. The file is read before
    /// any network traffic, so a missing file fails locally. Returns the
    /// document ID assigned by the server.
    pub fn add_id_document(
        &self,
        applicant_id: &str,
        document_path: &Path,
        metadata: &DocMetadata,
    ) -> Result<String, SumsubServiceError> {
        let content = fs::read(document_path)?;

        let path = format!("/resources/applicants/{}/info/idDoc", applicant_id);
        let metadata_json = serde_json::to_string(metadata)?;
        // The signature covers the JSON metadata, not the file bytes.
        let body = json!({ "metadata": metadata_json });

        let file_name = document_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let form = Form::new()
            .text("metadata", metadata_json)
            .part("content", Part::bytes(content).file_name(file_name));

        info!("Uploading ID document for applicant {}", applicant_id);

        let response = self.send(Method::POST, &path, Some(&body), Some(form))?;
        let doc_id = response
            .headers()
            .get(IMAGE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| SumsubServiceError::MissingHeader(IMAGE_ID_HEADER.to_string()))?;

        info!("Uploaded document {} for applicant {}", doc_id, applicant_id);

        Ok(doc_id)
    }

    /// Fetch the review status of an applicant's required documents.
    pub fn get_verification_status(
        &self,
        applicant_id: &str,
    ) -> Result<String, SumsubServiceError> {
        let path = format!("/resources/applicants/{}/requiredIdDocsStatus", applicant_id);

        let response = self.send(Method::GET, &path, None, None)?;
        let status = response.json::<RequiredDocsStatus>()?;

        Ok(status.review_status)
    }

    /// Fetch the full verification data for an applicant. Persisting or
    /// displaying the payload is the caller's concern.
    pub fn get_verification_data(&self, applicant_id: &str) -> Result<Value, SumsubServiceError> {
        let path = format!("/resources/applicants/{}/info", applicant_id);

        let response = self.send(Method::GET, &path, None, None)?;

        Ok(response.json::<Value>()?)
    }

    // One signed round trip. `path` is server-relative and already carries
    // its query string, so the signed path and the sent URL agree. A
    // multipart form replaces the JSON body on the wire; the signature is
    // still computed over `body`.
    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        form: Option<Form>,
    ) -> Result<Response, SumsubServiceError> {
        let url = format!("{}{}", self.config.base_url, path);
        let auth = self.signer.sign(method.as_str(), path, body)?;

        let mut headers = HeaderMap::new();
        if form.is_none() {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }
        headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static("utf-8"));
        headers.insert(APP_TOKEN_HEADER, HeaderValue::from_str(&auth.app_token)?);
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_str(&auth.signature)?);
        headers.insert(TIMESTAMP_HEADER, HeaderValue::from_str(&auth.timestamp)?);

        debug!("{} {}", method, path);

        let mut request = self.http.request(method, url.as_str()).headers(headers);
        if let Some(form) = form {
            request = request.multipart(form);
        } else if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text()?;
            return Err(map_status(status, body));
        }

        Ok(response)
    }
}

// Map HTTP failures onto the error taxonomy, keeping status and body
// recoverable from every variant.
fn map_status(status: StatusCode, body: String) -> SumsubServiceError {
    match status.as_u16() {
        401 | 403 => SumsubServiceError::Auth {
            status: status.as_u16(),
            body,
        },
        404 => SumsubServiceError::NotFound {
            status: status.as_u16(),
            body,
        },
        code => SumsubServiceError::Api { status: code, body },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> SumsubClient {
        // Unresolvable base URL: any test that reaches the network fails
        // with an HttpRequest error instead of the expected local one.
        let config = SumsubConfig::new("secret", "token", "http://127.0.0.1:1").unwrap();
        SumsubClient::new(config)
    }

    #[test]
    fn test_map_status_unauthorized() {
        let err = map_status(StatusCode::UNAUTHORIZED, r#"{"description":"bad sig"}"#.into());
        match err {
            SumsubServiceError::Auth { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("bad sig"));
            }
            other => panic!("expected Auth, got {:?}", other),
        }
    }

    #[test]
    fn test_map_status_forbidden() {
        let err = map_status(StatusCode::FORBIDDEN, String::new());
        assert!(matches!(err, SumsubServiceError::Auth { status: 403, .. }));
    }

    #[test]
    fn test_map_status_not_found() {
        let err = map_status(StatusCode::NOT_FOUND, "no such applicant".into());
        match err {
            SumsubServiceError::NotFound { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such applicant");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_map_status_bad_request() {
        let err = map_status(StatusCode::BAD_REQUEST, r#"{"error":"bad level"}"#.into());
        match err {
            SumsubServiceError::Api { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, r#"{"error":"bad level"}"#);
            }
            other => panic!("expected Api, got {:?}", other),
        }
    }

    #[test]
    fn test_add_id_document_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("some_document.jpg");
        std::fs::write(&doc, b"fake image bytes").unwrap();

        let client = test_client();
        let err = client
            .add_id_document("abc123", &doc, &DocMetadata::new("PASSPORT", "USA"))
            .unwrap_err();

        // The read succeeded; the failure comes from the unreachable server.
        assert!(matches!(err, SumsubServiceError::HttpRequest(_)));
    }

    #[test]
    fn test_add_id_document_missing_file_fails_before_network() {
        let client = test_client();
        let metadata = DocMetadata::new("PASSPORT", "USA");

        let err = client
            .add_id_document("abc123", Path::new("does_not_exist.jpg"), &metadata)
            .unwrap_err();

        match err {
            SumsubServiceError::Io(io) => {
                assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io, got {:?}", other),
        }
    }
}
