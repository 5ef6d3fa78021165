// 領収書ファイル機能モジュール

pub mod api_commands;
pub mod models;

pub use api_commands::{download_filename, FILE_ACCEPT};
pub use models::{AttachedFile, UploadedFile};
