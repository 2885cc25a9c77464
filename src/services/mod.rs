pub mod crypto;
pub mod sumsub_service;
