pub mod handlers;
pub mod ingest;
pub mod prompts;
pub mod upload_store;
