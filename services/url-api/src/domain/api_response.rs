// レスポンスエンベロープ
//
// ディスパッチ結果を`{ statusCode, body? }`の形で表現し、
// API Gatewayプロキシ統合が受け付けるJSONに変換する。

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

/// 成功
pub const STATUS_OK: u16 = 200;

/// どのルートにも一致しない
pub const STATUS_NOT_FOUND: u16 = 404;

/// 操作失敗（入力不正・ストレージエラーを区別しない）
pub const STATUS_OPERATION_FAILED: u16 = 501;

/// ディスパッチャーのレスポンスエンベロープ
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTPステータスコード
    pub status_code: u16,
    /// レスポンスボディ（なしの場合は省略）
    pub body: Option<Value>,
}

impl ApiResponse {
    /// ボディ付きの200レスポンス
    pub fn ok(body: Value) -> Self {
        Self {
            status_code: STATUS_OK,
            body: Some(body),
        }
    }

    /// ボディなしの200レスポンス（ID指定取得で該当なしの場合）
    pub fn ok_empty() -> Self {
        Self {
            status_code: STATUS_OK,
            body: None,
        }
    }

    /// 未対応ルートへの404レスポンス
    pub fn not_found() -> Self {
        Self {
            status_code: STATUS_NOT_FOUND,
            body: None,
        }
    }

    /// 操作失敗の501レスポンス
    pub fn operation_failed() -> Self {
        Self {
            status_code: STATUS_OPERATION_FAILED,
            body: None,
        }
    }

    /// API Gatewayプロキシレスポンスに変換
    ///
    /// ボディはJSON文字列にシリアライズし、Content-Typeヘッダーを付与する。
    pub fn into_proxy_response(self) -> ProxyResponse {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        ProxyResponse {
            status_code: self.status_code,
            headers,
            body: self.body.map(|body| body.to_string()),
        }
    }
}

/// API Gatewayプロキシ統合のレスポンス形式
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProxyResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructors() {
        assert_eq!(ApiResponse::ok(json!([])).status_code, 200);
        assert_eq!(ApiResponse::ok_empty().status_code, 200);
        assert_eq!(ApiResponse::not_found().status_code, 404);
        assert_eq!(ApiResponse::operation_failed().status_code, 501);

        assert!(ApiResponse::ok_empty().body.is_none());
        assert!(ApiResponse::not_found().body.is_none());
        assert!(ApiResponse::operation_failed().body.is_none());
    }

    #[test]
    fn test_proxy_response_serializes_body_as_json_text() {
        let response = ApiResponse::ok(json!([{"id": "abc12345", "url": "https://example.com"}]));

        let proxy = response.into_proxy_response();
        let value = serde_json::to_value(&proxy).unwrap();

        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["headers"]["Content-Type"], "application/json");

        let body_text = value["body"].as_str().unwrap();
        let body: Value = serde_json::from_str(body_text).unwrap();
        assert_eq!(body[0]["url"], "https://example.com");
    }

    // ボディがない場合はbodyキー自体を出力しない
    #[test]
    fn test_proxy_response_omits_missing_body() {
        let proxy = ApiResponse::operation_failed().into_proxy_response();
        let value = serde_json::to_value(&proxy).unwrap();

        assert_eq!(value["statusCode"], 501);
        assert!(value.get("body").is_none());
    }
}
