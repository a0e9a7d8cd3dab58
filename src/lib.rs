//! Build-time generator for gridded-component state specs.
//!
//! Pipeline: the reader turns the blocked spec file into raw per-category
//! rows; digestion validates each row against the option schema and the
//! standard rules, producing ordered `SpecRecord`s; emission renders each
//! record into registration, pointer-declaration, and pointer-retrieval
//! fragments.

pub mod digest;
pub mod emit;
pub mod error;
pub mod model;
pub mod reader;
pub mod rules;
pub mod schema;

pub type Result<T> = anyhow::Result<T>;
