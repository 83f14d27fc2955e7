//! サービス型定義
//!
//! 監視対象として登録された外部サービス

use chrono::{DateTime, Utc};

/// 登録済みサービス
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    /// 一意識別子（自動採番）
    pub id: i64,
    /// サービス名（大文字小文字を区別して一意）
    pub name: String,
    /// ベースURL
    pub base_url: Option<String>,
    /// 説明
    pub description: Option<String>,
    /// 登録日時
    pub registered_at: DateTime<Utc>,
    /// 最終確認時刻（ヘルスチェック受信時に更新）
    pub last_seen_at: Option<DateTime<Utc>>,
}

/// サービス登録の入力
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    /// サービス名
    pub name: String,
    /// ベースURL
    pub base_url: Option<String>,
    /// 説明
    pub description: Option<String>,
}

impl NewService {
    /// 登録時刻を付与してサービスを生成する（IDは未採番）
    pub fn into_service(self, now: DateTime<Utc>) -> Service {
        Service {
            id: 0,
            name: self.name,
            base_url: self.base_url,
            description: self.description,
            registered_at: now,
            last_seen_at: Some(now),
        }
    }
}

/// サービス更新の入力
///
/// 名前・ベースURL・説明を上書きする。タイムスタンプは変更しない。
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceChanges {
    /// 新しいサービス名
    pub name: String,
    /// 新しいベースURL
    pub base_url: Option<String>,
    /// 新しい説明
    pub description: Option<String>,
}

impl Service {
    /// 更新内容を適用する
    pub fn apply(&mut self, changes: ServiceChanges) {
        self.name = changes.name;
        self.base_url = changes.base_url;
        self.description = changes.description;
    }
}
