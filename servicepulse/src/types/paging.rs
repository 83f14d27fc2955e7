//! ページング結果型

use serde::Serialize;

/// ページ単位のビュー
///
/// `total_pages` / `has_next` / `has_previous` は生成時に導出される。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    /// 現在ページの要素
    pub items: Vec<T>,
    /// 全ページの総件数
    pub total_count: i64,
    /// 現在のページ番号（1始まり）
    pub page_number: i64,
    /// ページサイズ
    pub page_size: i64,
    /// 総ページ数
    pub total_pages: i64,
    /// 次ページが存在するか
    pub has_next: bool,
    /// 前ページが存在するか
    pub has_previous: bool,
}

impl<T> PagedResult<T> {
    /// ページング結果を生成する
    ///
    /// `page_size` は1以上であること（呼び出し側で検証済み）。
    pub fn new(items: Vec<T>, total_count: i64, page_number: i64, page_size: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total_count + page_size - 1) / page_size
        } else {
            0
        };
        Self {
            items,
            total_count,
            page_number,
            page_size,
            total_pages,
            has_next: page_number.saturating_mul(page_size) < total_count,
            has_previous: page_number > 1,
        }
    }

    /// 要素を変換した同一ページを返す
    pub fn map<U, F>(self, f: F) -> PagedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_number: self.page_number,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

/// ページ番号とサイズからSQLのOFFSETを求める
pub fn page_offset(page_number: i64, page_size: i64) -> i64 {
    (page_number - 1).max(0).saturating_mul(page_size)
}
