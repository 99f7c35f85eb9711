//! Command-line collaborator for `notelink-core`: loads a note corpus from a
//! JSON file and exposes the linking operations as named tools.

pub mod config;
pub mod corpus;
pub mod tools;
