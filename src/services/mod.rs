pub mod archive_service;
pub mod zip_builder;
