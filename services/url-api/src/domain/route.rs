// ルート解決
//
// (path, httpMethod, クエリ有無) の組から実行するストレージ操作を決定する。
// 規則は上から順に評価され、最初に一致したものを採用する。

/// URLリソースのパス
pub const URLS_PATH: &str = "/urls";

/// 解決済みルート
///
/// 各ルートは1回のストレージ呼び出しに対応する。
/// パラメータ（idやbody）の抽出と検証はディスパッチャーが行う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// GET /urls（クエリなし）: 全件取得
    ListAll,
    /// GET /urls?id=...: ID指定で1件取得
    GetById,
    /// POST /urls: 新規作成
    Create,
    /// PUT /urls: URLの更新
    ///
    /// 存在確認をせずに書き込むため、未登録のIDを指定すると新規作成になる（upsert）。
    Update,
    /// DELETE /urls?id=...: ID指定で削除
    DeleteById,
}

impl Route {
    /// リクエスト記述子からルートを解決
    ///
    /// # 引数
    /// * `path` - リクエストパス
    /// * `http_method` - HTTPメソッド（大文字）
    /// * `has_query` - 空でないクエリパラメータが存在するか
    ///
    /// # 戻り値
    /// * 一致するルートがあれば`Some(Route)`
    /// * どの規則にも一致しなければ`None`
    pub fn resolve(path: &str, http_method: &str, has_query: bool) -> Option<Self> {
        if path != URLS_PATH {
            return None;
        }

        match (http_method, has_query) {
            ("GET", false) => Some(Route::ListAll),
            ("GET", true) => Some(Route::GetById),
            ("POST", _) => Some(Route::Create),
            ("PUT", _) => Some(Route::Update),
            ("DELETE", true) => Some(Route::DeleteById),
            _ => None,
        }
    }

    /// ログ出力用のルート名
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::ListAll => "list_all",
            Route::GetById => "get_by_id",
            Route::Create => "create",
            Route::Update => "update",
            Route::DeleteById => "delete_by_id",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_without_query_is_list_all() {
        assert_eq!(Route::resolve("/urls", "GET", false), Some(Route::ListAll));
    }

    #[test]
    fn test_get_with_query_is_get_by_id() {
        assert_eq!(Route::resolve("/urls", "GET", true), Some(Route::GetById));
    }

    // POST/PUTはクエリの有無に関係なく一致する
    #[test]
    fn test_post_and_put_ignore_query() {
        assert_eq!(Route::resolve("/urls", "POST", false), Some(Route::Create));
        assert_eq!(Route::resolve("/urls", "POST", true), Some(Route::Create));
        assert_eq!(Route::resolve("/urls", "PUT", false), Some(Route::Update));
        assert_eq!(Route::resolve("/urls", "PUT", true), Some(Route::Update));
    }

    #[test]
    fn test_delete_requires_query() {
        assert_eq!(Route::resolve("/urls", "DELETE", true), Some(Route::DeleteById));
        assert_eq!(Route::resolve("/urls", "DELETE", false), None);
    }

    #[test]
    fn test_unknown_path_is_unmatched() {
        assert_eq!(Route::resolve("/users", "GET", false), None);
        assert_eq!(Route::resolve("/urls/", "GET", false), None);
        assert_eq!(Route::resolve("/", "POST", false), None);
    }

    #[test]
    fn test_unknown_method_is_unmatched() {
        assert_eq!(Route::resolve("/urls", "PATCH", false), None);
        assert_eq!(Route::resolve("/urls", "OPTIONS", false), None);
        assert_eq!(Route::resolve("/urls", "HEAD", true), None);
    }

    // メソッド名は大文字小文字を区別する
    #[test]
    fn test_method_is_case_sensitive() {
        assert_eq!(Route::resolve("/urls", "get", false), None);
    }

    #[test]
    fn test_route_names() {
        assert_eq!(Route::ListAll.as_str(), "list_all");
        assert_eq!(Route::GetById.as_str(), "get_by_id");
        assert_eq!(Route::Create.as_str(), "create");
        assert_eq!(Route::Update.as_str(), "update");
        assert_eq!(Route::DeleteById.as_str(), "delete_by_id");
    }
}
