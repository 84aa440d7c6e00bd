// Infrastructure layer modules
pub mod config;
pub mod logging;
pub mod url_repository;

// Re-exports
pub use config::{DynamoDbConfig, DynamoDbConfigError};
pub use logging::init_logging;
pub use url_repository::{DynamoUrlRepository, RepositoryError, UrlRepository};
