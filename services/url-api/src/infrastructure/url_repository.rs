/// DynamoDBでURLレコードを管理するためのリポジトリ
///
/// テーブルはパーティションキー`id`（S）のみを持つ単一テーブル。
use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use serde_dynamo::{from_item, to_item};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::Record;

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// アイテムとRecordの変換に失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// URLレコード永続化用トレイト
///
/// 実際のDynamoDB実装とテスト用モックを差し替えられるように抽象化する。
/// 各メソッドはストレージへの呼び出し1回に対応する（全件取得のページングを除く）。
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// 全レコードを取得
    ///
    /// # 戻り値
    /// * `Ok(Vec<Record>)` - 全レコード（順序は不定、0件なら空）
    ///   `id`/`url`を文字列で持たないアイテムは警告ログを出してスキップする
    /// * `Err(RepositoryError)` - 読み取りに失敗
    async fn scan_all(&self) -> Result<Vec<Record>, RepositoryError>;

    /// IDでレコードを取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(Record))`
    /// * 見つからなかった場合は`Ok(None)`
    /// * 失敗時は`Err(RepositoryError)`
    async fn get(&self, id: &str) -> Result<Option<Record>, RepositoryError>;

    /// レコードを保存（同じIDがあれば置き換え）
    async fn put(&self, record: &Record) -> Result<(), RepositoryError>;

    /// 指定IDのレコードのURLを書き換え
    ///
    /// 存在確認は行わない。該当IDのレコードがなければ
    /// ストア側で新規作成される（upsert）。
    ///
    /// # 戻り値
    /// * `Ok(Some(url))` - ストアが返した更新後のURL
    /// * `Ok(None)` - ストアが更新後の値を返さなかった
    /// * `Err(RepositoryError)` - 書き込みに失敗
    async fn update_url(&self, id: &str, url: &str) -> Result<Option<String>, RepositoryError>;

    /// IDでレコードを削除
    ///
    /// 存在しないIDの削除も成功として扱う。
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}

/// パーティションキー名
const KEY_ATTRIBUTE: &str = "id";

/// UrlRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoUrlRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// URLテーブル名
    table_name: String,
}

impl DynamoUrlRepository {
    /// 新しいDynamoUrlRepositoryを作成
    ///
    /// # 引数
    /// * `client` - DynamoDBクライアント
    /// * `table_name` - URLテーブルの名前
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    fn key(id: &str) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }

    /// UpdateItemの返却属性から更新後のURLを取り出す
    fn updated_url(attributes: Option<HashMap<String, AttributeValue>>) -> Option<String> {
        attributes
            .and_then(|mut attrs| attrs.remove("url"))
            .and_then(|value| value.as_s().ok().cloned())
    }

    /// Scan結果のアイテムをRecordに変換
    ///
    /// 変換できないアイテムは全件取得を失敗させず、スキップする。
    fn records_from_items(items: Vec<HashMap<String, AttributeValue>>) -> Vec<Record> {
        let mut records = Vec::with_capacity(items.len());

        for item in items {
            let id = item.get(KEY_ATTRIBUTE).and_then(|v| v.as_s().ok()).cloned();
            let converted: Result<Record, _> = from_item(item);
            match converted {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        id = id.as_deref().unwrap_or("unknown"),
                        error = %e,
                        "Recordに変換できないアイテム、スキップ"
                    );
                }
            }
        }

        records
    }
}

#[async_trait]
impl UrlRepository for DynamoUrlRepository {
    async fn scan_all(&self) -> Result<Vec<Record>, RepositoryError> {
        let mut records = Vec::new();
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;

        // 1MBを超えるテーブルではScanが分割されるため、LastEvaluatedKeyがなくなるまで読む
        loop {
            let response = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await
                .map_err(|e| RepositoryError::ReadError(e.into_service_error().to_string()))?;

            if let Some(items) = response.items {
                records.extend(Self::records_from_items(items));
            }

            match response.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }

        debug!(count = records.len(), table = %self.table_name, "Scan完了");
        Ok(records)
    }

    async fn get(&self, id: &str) -> Result<Option<Record>, RepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, Self::key(id))
            .send()
            .await
            .map_err(|e| RepositoryError::ReadError(e.into_service_error().to_string()))?;

        match result.item {
            Some(item) => {
                let record: Record = from_item(item)
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, record: &Record) -> Result<(), RepositoryError> {
        let item: HashMap<String, AttributeValue> =
            to_item(record).map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.into_service_error().to_string()))?;

        Ok(())
    }

    async fn update_url(&self, id: &str, url: &str) -> Result<Option<String>, RepositoryError> {
        // urlはDynamoDBの予約語なので属性名プレースホルダーを使う
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, Self::key(id))
            .update_expression("SET #url = :url")
            .expression_attribute_names("#url", "url")
            .expression_attribute_values(":url", AttributeValue::S(url.to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.into_service_error().to_string()))?;

        Ok(Self::updated_url(result.attributes))
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, Self::key(id))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.into_service_error().to_string()))?;

        Ok(())
    }
}
