// エクスポート機能モジュール

pub mod api_commands;

pub use api_commands::ExportFormat;
