/// CRUDディスパッチャー
///
/// API Gatewayイベントをルートに解決し、UrlRepositoryへの呼び出し1回に変換して
/// `{ statusCode, body? }`形式のレスポンスを返す。
///
/// 失敗時のレスポンスは原因に関係なく一律501（ボディなし）とする。
/// 原因の区別（入力不正・ストレージ障害・レスポンス構築失敗）はDispatchErrorで保持し、
/// ログにのみ出力する。
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::application::gateway_event::{
    ApiGatewayEvent, CreateUrlRequest, ParseError, UpdateUrlRequest,
};
use crate::domain::{ApiResponse, IdGenerator, Record, Route, WriteAck};
use crate::infrastructure::{RepositoryError, UrlRepository};

/// ディスパッチのエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DispatchError {
    /// リクエスト側の不備（不正なボディ、必須フィールドやクエリの欠落）
    #[error("Validation error: {0}")]
    Validation(#[from] ParseError),

    /// ストレージ側の障害
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),

    /// 操作結果をレスポンスボディに変換できない
    #[error("Response error: {0}")]
    Response(String),
}

impl DispatchError {
    /// ログ出力用のエラー種別
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::Validation(_) => "validation",
            DispatchError::Storage(_) => "storage",
            DispatchError::Response(_) => "response",
        }
    }
}

/// CRUDディスパッチャー
///
/// 呼び出しごとに状態を持たない。リポジトリとID生成器のみを保持する。
pub struct CrudDispatcher<R, G>
where
    R: UrlRepository,
    G: IdGenerator,
{
    /// URLリポジトリ
    repository: R,
    /// レコードID生成器
    id_generator: G,
}

impl<R, G> CrudDispatcher<R, G>
where
    R: UrlRepository,
    G: IdGenerator,
{
    /// 新しいCrudDispatcherを作成
    pub fn new(repository: R, id_generator: G) -> Self {
        Self {
            repository,
            id_generator,
        }
    }

    /// イベントを処理してレスポンスを生成
    ///
    /// # 処理フロー
    /// 1. (path, httpMethod, クエリ有無) からルートを解決
    /// 2. 一致しなければ404
    /// 3. ルートに対応するストレージ操作を1回実行
    /// 4. 成功なら200、失敗なら501
    pub async fn dispatch(&self, event: &ApiGatewayEvent) -> ApiResponse {
        info!(
            path = %event.path,
            http_method = %event.http_method,
            has_query = event.has_query(),
            "リクエスト受信"
        );

        let Some(route) = Route::resolve(&event.path, &event.http_method, event.has_query())
        else {
            warn!(
                path = %event.path,
                http_method = %event.http_method,
                "対応するルートなし"
            );
            return ApiResponse::not_found();
        };

        match self.execute(route, event).await {
            Ok(response) => response,
            Err(err) => {
                error!(
                    route = route.as_str(),
                    error_kind = err.kind(),
                    error = %err,
                    "ディスパッチ失敗"
                );
                ApiResponse::operation_failed()
            }
        }
    }

    async fn execute(
        &self,
        route: Route,
        event: &ApiGatewayEvent,
    ) -> Result<ApiResponse, DispatchError> {
        match route {
            Route::ListAll => {
                let records = self.repository.scan_all().await?;
                debug!(count = records.len(), "全件取得");
                Ok(ApiResponse::ok(to_body(&records)?))
            }
            Route::GetById => {
                let id = event.required_query_param("id")?;
                match self.repository.get(id).await? {
                    Some(record) => Ok(ApiResponse::ok(to_body(&record)?)),
                    None => {
                        debug!(id = id, "レコードなし");
                        Ok(ApiResponse::ok_empty())
                    }
                }
            }
            Route::Create => {
                let request: CreateUrlRequest = event.parse_body()?;
                let record = Record::new(self.id_generator.generate(), request.url);
                self.repository.put(&record).await?;
                info!(id = %record.id, "レコード作成");

                let ack = WriteAck::with_url(record.id, Some(record.url));
                Ok(ApiResponse::ok(to_body(&ack)?))
            }
            Route::Update => {
                let request: UpdateUrlRequest = event.parse_body()?;
                let updated_url = self
                    .repository
                    .update_url(&request.id, &request.url)
                    .await?;
                info!(id = %request.id, "レコード更新");

                let ack = WriteAck::with_url(request.id, updated_url);
                Ok(ApiResponse::ok(to_body(&ack)?))
            }
            Route::DeleteById => {
                let id = event.required_query_param("id")?;
                self.repository.delete(id).await?;
                info!(id = id, "レコード削除");

                Ok(ApiResponse::ok(to_body(&WriteAck::id_only(id))?))
            }
        }
    }
}

/// レスポンスボディ用にJSON値へ変換
fn to_body<T: Serialize>(value: &T) -> Result<Value, DispatchError> {
    serde_json::to_value(value).map_err(|e| DispatchError::Response(e.to_string()))
}
