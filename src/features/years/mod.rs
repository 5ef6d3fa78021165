// 年度機能モジュール

pub mod api_commands;
pub mod form;
pub mod list;
pub mod models;

pub use form::AddYearForm;
pub use list::{YearList, YearListState};
pub use models::{CreateYearDto, ProfitResponse, Year, MAX_YEAR, MIN_YEAR};
