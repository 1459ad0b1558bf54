pub mod corpus;
pub mod selection;
pub mod selector_config;
