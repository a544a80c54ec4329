//! Conference records extracted from a markdown list of `### YYYY` sections and tables.

pub mod fetch;
pub mod model;
pub mod parser;
pub mod settings;
pub mod tool;
