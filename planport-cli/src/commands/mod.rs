//! CLI command implementations

pub mod fields;
pub mod import;

pub use fields::FieldsArgs;
pub use import::ImportArgs;
