pub mod dataset;
pub mod hero;
pub mod registry;
pub mod sources;
pub mod validate;
