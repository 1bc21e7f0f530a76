// Documents: ingestion, text extraction, CV keyword parsing and persistence
// for job descriptions and CVs. Similarity scoring reads from here by id.

pub mod cv_parser;
pub mod extraction;
pub mod handlers;
pub mod store;
