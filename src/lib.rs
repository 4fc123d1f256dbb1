pub mod config;
pub mod descriptions;
pub mod dom;
pub mod errors;
pub mod models;
pub mod utils;
pub mod worker;

pub use config::Config;
pub use descriptions::DescriptionController;
pub use worker::ImageCacheWorker;
