pub mod model;
pub mod types;
pub mod viewer;
