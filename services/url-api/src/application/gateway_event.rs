/// API Gatewayイベントの解析
///
/// Lambdaに渡されるプロキシ統合イベントのうち、ディスパッチに必要な
/// `path`・`httpMethod`・`queryStringParameters`・`body`だけを取り出す。
/// その他のフィールド（requestContext、headersなど）は無視する。
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// イベント・ボディ解析のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// イベントが期待する形をしていない
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    /// ボディが存在しない
    #[error("Missing request body")]
    MissingBody,

    /// ボディのJSONが不正、または必須フィールドが欠落
    #[error("Malformed body: {0}")]
    MalformedBody(String),

    /// 必須のクエリパラメータが欠落
    #[error("Missing query parameter: {0}")]
    MissingQueryParameter(String),
}

/// API Gatewayプロキシ統合イベント（ディスパッチに使う部分のみ）
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayEvent {
    /// リソースパス（例: "/urls"）
    pub path: String,
    /// HTTPメソッド（例: "GET"）
    pub http_method: String,
    /// クエリパラメータ（API Gatewayはなしの場合にnullを送る）
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    /// リクエストボディ（JSON文字列）
    #[serde(default)]
    pub body: Option<String>,
}

impl ApiGatewayEvent {
    /// Lambdaペイロードからイベントを解析
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        serde_json::from_value(value).map_err(|e| ParseError::MalformedEvent(e.to_string()))
    }

    /// 空でないクエリパラメータがあるか
    ///
    /// `null`と空オブジェクトはどちらも「クエリなし」として扱う。
    pub fn has_query(&self) -> bool {
        self.query_string_parameters
            .as_ref()
            .is_some_and(|params| !params.is_empty())
    }

    /// クエリパラメータを取得
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }

    /// 必須のクエリパラメータを取得
    pub fn required_query_param(&self, key: &str) -> Result<&str, ParseError> {
        self.query_param(key)
            .ok_or_else(|| ParseError::MissingQueryParameter(key.to_string()))
    }

    /// ボディをJSONとして解析
    pub fn parse_body<T: DeserializeOwned>(&self) -> Result<T, ParseError> {
        let body = self.body.as_deref().ok_or(ParseError::MissingBody)?;
        serde_json::from_str(body).map_err(|e| ParseError::MalformedBody(e.to_string()))
    }
}

/// POST /urls のボディ
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateUrlRequest {
    pub url: String,
}

/// PUT /urls のボディ
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateUrlRequest {
    pub id: String,
    pub url: String,
}
