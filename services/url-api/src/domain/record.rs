// URLレコード
//
// DynamoDBテーブルに保存される唯一のエンティティと、
// 書き込み系操作のレスポンスとして返す確認応答を定義する。

use serde::{Deserialize, Serialize};

/// URLレコード
///
/// `id`がパーティションキー。作成時に生成され、以後変更されない。
/// `url`は任意の文字列で、更新リクエストで書き換えられる唯一の属性。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// レコードID（パーティションキー）
    pub id: String,
    /// URL文字列
    pub url: String,
}

impl Record {
    /// 新しいレコードを作成
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// 書き込み確認応答
///
/// 作成・更新・削除の成功時にレスポンスボディとして返す。
/// 削除では`url`を持たない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteAck {
    /// 書き込み対象のレコードID
    pub id: String,
    /// 書き込み後のURL（ストアが返した値）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl WriteAck {
    /// URL付きの確認応答を作成
    pub fn with_url(id: impl Into<String>, url: Option<String>) -> Self {
        Self { id: id.into(), url }
    }

    /// IDのみの確認応答を作成（削除用）
    pub fn id_only(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_serializes_to_id_and_url() {
        let record = Record::new("abc12345", "https://example.com");

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value, json!({"id": "abc12345", "url": "https://example.com"}));
    }

    #[test]
    fn test_record_deserializes_from_json() {
        let record: Record =
            serde_json::from_str(r#"{"id":"abc12345","url":"https://example.com"}"#).unwrap();

        assert_eq!(record, Record::new("abc12345", "https://example.com"));
    }

    #[test]
    fn test_write_ack_with_url() {
        let ack = WriteAck::with_url("abc12345", Some("https://new.example".to_string()));

        let value = serde_json::to_value(&ack).unwrap();

        assert_eq!(value, json!({"id": "abc12345", "url": "https://new.example"}));
    }

    // 削除の確認応答はurlフィールドを省略する
    #[test]
    fn test_write_ack_id_only_omits_url() {
        let ack = WriteAck::id_only("abc12345");

        let value = serde_json::to_value(&ack).unwrap();

        assert_eq!(value, json!({"id": "abc12345"}));
        assert!(value.get("url").is_none());
    }
}
