// アプリケーション層モジュール
pub mod crud_dispatcher;
pub mod gateway_event;

// 再エクスポート
pub use crud_dispatcher::{CrudDispatcher, DispatchError};
pub use gateway_event::{ApiGatewayEvent, CreateUrlRequest, ParseError, UpdateUrlRequest};
