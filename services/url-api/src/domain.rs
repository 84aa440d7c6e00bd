// Domain layer modules
pub mod api_response;
pub mod record;
pub mod record_id;
pub mod route;

// Re-exports
pub use api_response::{
    ApiResponse, ProxyResponse, STATUS_NOT_FOUND, STATUS_OK, STATUS_OPERATION_FAILED,
};
pub use record::{Record, WriteAck};
pub use record_id::{AlphanumericIdGenerator, IdGenerator, RECORD_ID_LENGTH};
pub use route::{Route, URLS_PATH};
