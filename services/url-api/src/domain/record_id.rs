// レコードID生成
//
// 固定長の英数字ランダム文字列を生成する。
// 既存キーとの衝突チェックは行わないため、一意性は確率的にのみ保証される。

use rand::distributions::Alphanumeric;
use rand::Rng;

/// 生成するレコードIDのデフォルト長
pub const RECORD_ID_LENGTH: usize = 8;

/// レコードID生成器
///
/// テストで決定的なIDを注入できるようにトレイトで抽象化する。
pub trait IdGenerator: Send + Sync {
    /// 新しいレコードIDを生成
    fn generate(&self) -> String;
}

/// `[A-Za-z0-9]`からなる固定長IDを生成する実装
#[derive(Debug, Clone, Copy)]
pub struct AlphanumericIdGenerator {
    length: usize,
}

impl AlphanumericIdGenerator {
    /// 指定長のIDを生成する生成器を作成
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for AlphanumericIdGenerator {
    fn default() -> Self {
        Self::new(RECORD_ID_LENGTH)
    }
}

impl IdGenerator for AlphanumericIdGenerator {
    fn generate(&self) -> String {
        generate_alphanumeric_id(self.length)
    }
}

/// 指定長の英数字ランダム文字列を生成
pub fn generate_alphanumeric_id(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
