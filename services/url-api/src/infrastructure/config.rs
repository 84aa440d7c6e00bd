/// DynamoDB接続設定
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;

/// テーブル名を指定する環境変数
pub const TABLE_NAME_ENV: &str = "TABLE_NAME";

/// 旧デプロイ定義が設定していたテーブル名の環境変数
pub const LEGACY_TABLE_NAME_ENV: &str = "tableName";

/// DynamoDB設定のエラー型
#[derive(Debug, Error)]
pub enum DynamoDbConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// テーブル名とクライアントを持つDynamoDB設定
///
/// テーブル名は`TABLE_NAME`環境変数から読み込む。
/// 未設定の場合は旧名の`tableName`を参照する。
#[derive(Debug, Clone)]
pub struct DynamoDbConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    /// URLテーブル名
    table_name: String,
}

impl DynamoDbConfig {
    /// 環境からAWS設定を読み込み、環境変数からテーブル名を読み取って新しいDynamoDbConfigを作成
    ///
    /// 環境変数:
    /// - AWS認証情報・リージョン: aws-configにより自動読み込み
    /// - TABLE_NAME（または tableName）: URL用DynamoDBテーブル名
    pub async fn from_env() -> Result<Self, DynamoDbConfigError> {
        // テーブル名を先に検証し、未設定ならAWS設定の読み込みを省く
        let table_name = table_name_from_env()?;

        // 環境からAWS設定を読み込み（認証情報、リージョンなど）
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = DynamoDbClient::new(&aws_config);

        Ok(Self { client, table_name })
    }

    /// 明示的な値で新しいDynamoDbConfigを作成（テスト用）
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// URLテーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

/// 環境変数からテーブル名を解決
///
/// 空文字や空白のみの値は未設定として扱う。
fn table_name_from_env() -> Result<String, DynamoDbConfigError> {
    let read = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

    read(TABLE_NAME_ENV)
        .or_else(|| read(LEGACY_TABLE_NAME_ENV))
        .ok_or_else(|| DynamoDbConfigError::MissingEnvVar(TABLE_NAME_ENV.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // テストで環境変数を安全に設定/削除するヘルパー
    // 注: Rust 2024エディションでset_var/remove_varはunsafe
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    unsafe fn cleanup() {
        unsafe {
            remove_env(TABLE_NAME_ENV);
            remove_env(LEGACY_TABLE_NAME_ENV);
        }
    }

    #[test]
    fn test_missing_env_var_error_display() {
        let error = DynamoDbConfigError::MissingEnvVar("TABLE_NAME".to_string());
        assert_eq!(error.to_string(), "Missing environment variable: TABLE_NAME");
    }

    #[tokio::test]
    async fn test_dynamodb_config_new() {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = DynamoDbClient::new(&aws_config);

        let config = DynamoDbConfig::new(client, "test-urls".to_string());

        assert_eq!(config.table_name(), "test-urls");
        let _client_ref = config.client();
    }

    #[test]
    #[serial(table_env)]
    fn test_table_name_from_primary_var() {
        unsafe {
            cleanup();
            set_env(TABLE_NAME_ENV, "urls-primary");
            set_env(LEGACY_TABLE_NAME_ENV, "urls-legacy");
        }

        assert_eq!(table_name_from_env().unwrap(), "urls-primary");

        unsafe { cleanup() };
    }

    #[test]
    #[serial(table_env)]
    fn test_table_name_falls_back_to_legacy_var() {
        unsafe {
            cleanup();
            set_env(LEGACY_TABLE_NAME_ENV, "urls-legacy");
        }

        assert_eq!(table_name_from_env().unwrap(), "urls-legacy");

        unsafe { cleanup() };
    }

    #[test]
    #[serial(table_env)]
    fn test_table_name_missing() {
        unsafe { cleanup() };

        match table_name_from_env() {
            Err(DynamoDbConfigError::MissingEnvVar(var)) => assert_eq!(var, "TABLE_NAME"),
            Ok(name) => panic!("unexpected table name: {}", name),
        }
    }

    // 空白のみの値は未設定扱い
    #[test]
    #[serial(table_env)]
    fn test_blank_table_name_is_missing() {
        unsafe {
            cleanup();
            set_env(TABLE_NAME_ENV, "   ");
        }

        assert!(table_name_from_env().is_err());

        unsafe { cleanup() };
    }

    #[tokio::test]
    #[serial(table_env)]
    async fn test_from_env_success() {
        unsafe {
            cleanup();
            set_env(TABLE_NAME_ENV, "my-urls-table");
        }

        let config = DynamoDbConfig::from_env().await.unwrap();
        assert_eq!(config.table_name(), "my-urls-table");

        unsafe { cleanup() };
    }
}
