/// 機能別モジュール
///
/// 各機能モジュールは、その機能に関連するモデル、APIコマンド、画面ロジックを
/// まとめた自己完結型のユニットです。
pub mod api;
pub mod auth;
pub mod categories;
pub mod entries;
pub mod exports;
pub mod pages;
pub mod receipts;
pub mod years;
