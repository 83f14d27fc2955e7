//! 共通定義
//!
//! 全レイヤーで共有するエラー型

/// エラー型定義
pub mod error;
