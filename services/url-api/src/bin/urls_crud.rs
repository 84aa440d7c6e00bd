/// URLレコードCRUD Lambdaエントリポイント
///
/// API Gateway（RESTプロキシ統合）からのイベントを受け取り、
/// CrudDispatcherでDynamoDBへの操作に変換してプロキシレスポンスを返却する。
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{error, info_span, Instrument};
use url_api::application::{ApiGatewayEvent, CrudDispatcher};
use url_api::domain::{AlphanumericIdGenerator, ApiResponse, ProxyResponse};
use url_api::infrastructure::{
    init_logging, DynamoDbConfig, DynamoDbConfigError, DynamoUrlRepository,
};

type Dispatcher = CrudDispatcher<DynamoUrlRepository, AlphanumericIdGenerator>;

/// ディスパッチャーの静的インスタンス
///
/// Lambda warm start時にDynamoDBクライアントを再利用するため、
/// 一度初期化したディスパッチャーを静的に保持する。
static DISPATCHER: OnceCell<Dispatcher> = OnceCell::const_new();

/// ディスパッチャーを取得（初期化されていなければ初期化）
async fn get_dispatcher() -> Result<&'static Dispatcher, DynamoDbConfigError> {
    DISPATCHER
        .get_or_try_init(|| async {
            let config = DynamoDbConfig::from_env().await?;
            let repository = DynamoUrlRepository::new(
                config.client().clone(),
                config.table_name().to_string(),
            );
            Ok(CrudDispatcher::new(
                repository,
                AlphanumericIdGenerator::default(),
            ))
        })
        .await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // Lambda関数を初期化して実行
    let func = service_fn(handler);
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// 処理中の失敗はすべてレスポンス（501など）に変換するため、
/// Lambda自体のエラーとしては返さない。
async fn handler(event: LambdaEvent<Value>) -> Result<ProxyResponse, Error> {
    let span = info_span!("request", request_id = %event.context.request_id);
    let response = handle_payload(event.payload).instrument(span).await;

    Ok(response.into_proxy_response())
}

/// ペイロードを解析してディスパッチ
///
/// # 処理フロー
/// 1. ペイロードをApiGatewayEventとして解析（失敗時は501）
/// 2. ディスパッチャーを取得（設定不備の場合は501）
/// 3. ディスパッチ結果を返却
async fn handle_payload(payload: Value) -> ApiResponse {
    let event = match ApiGatewayEvent::from_value(payload) {
        Ok(event) => event,
        Err(err) => {
            error!(error_kind = "validation", error = %err, "イベント解析失敗");
            return ApiResponse::operation_failed();
        }
    };

    let dispatcher = match get_dispatcher().await {
        Ok(dispatcher) => dispatcher,
        Err(err) => {
            error!(error_kind = "config", error = %err, "DynamoDB設定の読み込みに失敗");
            return ApiResponse::operation_failed();
        }
    };

    dispatcher.dispatch(&event).await
}
