// 取引記録機能モジュール

pub mod api_commands;
pub mod form;
pub mod list;
pub mod models;

pub use form::AddEntryForm;
pub use list::EntryList;
pub use models::{CreateEntryDto, Entry};
