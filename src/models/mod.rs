//! Core data models for the folder archiving service.
//!
//! The only entity with real structure is the validated folder name; key
//! derivation lives next to it so every request computes its prefix and
//! destination key the same way.

pub mod folder;
