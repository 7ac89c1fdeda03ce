//! Core decision logic: types, recipe loading, directive parsing, resolution.

pub mod catalog;
pub mod directive;
pub mod parser;
pub mod resolver;
pub mod types;
