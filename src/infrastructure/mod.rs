pub mod audio;
pub mod classifier;
pub mod models;
pub mod observability;
