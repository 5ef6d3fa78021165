/// 共有モジュール
///
/// 複数の機能で使われるエラー型、設定、HTTPクライアント、ユーティリティ。
pub mod api_client;
pub mod config;
pub mod download;
pub mod errors;
pub mod utils;

#[cfg(test)]
pub mod test_support;
