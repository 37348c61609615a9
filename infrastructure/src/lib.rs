pub mod config;
pub mod embedder;
pub mod llm_client;
pub mod orcid_client;
pub mod search;
