//! サービス登録管理
//!
//! サービスのCRUD・検索・ページングとヘルスサマリー取得

pub mod services;

pub use services::RegistrationService;
