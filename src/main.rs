use std::fs::File;
use std::path::Path;

use dotenvy::dotenv;
use log::info;
use uuid::Uuid;

use sumsub_client::models::requests::DocMetadata;
use sumsub_client::{SumsubClient, SumsubConfig, SumsubServiceError};

const DOCUMENT_PATH: &str = "some_document.jpg";
const LEVEL_NAME: &str = "basic-kyc-level";

// Demonstration flow: create an applicant, upload a document, print the
// review status and dump the verification data to a per-applicant file.
fn main() -> Result<(), SumsubServiceError> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    // Load .env file
    dotenv().ok();

    let config = SumsubConfig::from_env()?;
    let client = SumsubClient::new(config);

    let external_user_id = Uuid::new_v4().to_string();
    let applicant = client.create_applicant(&external_user_id, LEVEL_NAME)?;
    println!("Applicant ID: {}", applicant.id);

    let metadata = DocMetadata::new("PASSPORT", "USA");
    let doc_id = client.add_id_document(&applicant.id, Path::new(DOCUMENT_PATH), &metadata)?;
    println!("Document ID: {}", doc_id);

    let review_status = client.get_verification_status(&applicant.id)?;
    println!("Review Status: {}", review_status);

    let verification_data = client.get_verification_data(&applicant.id)?;
    let out_path = format!("{}.json", applicant.id);
    serde_json::to_writer(File::create(&out_path)?, &verification_data)?;
    info!("Verification data written to {}", out_path);

    Ok(())
}
