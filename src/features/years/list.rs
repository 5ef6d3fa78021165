/// 年度一覧の表示状態
use crate::features::api::BookkeepingApi;
use crate::features::years::models::Year;
use log::{error, info};

pub const EMPTY_MESSAGE: &str = "No years available.";
pub const FAILED_MESSAGE: &str = "Failed to fetch years. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub enum YearListState {
    Loading,
    Failed(String),
    Empty,
    Loaded(Vec<Year>),
}

pub struct YearList {
    state: YearListState,
}

impl Default for YearList {
    fn default() -> Self {
        Self::new()
    }
}

impl YearList {
    pub fn new() -> Self {
        Self {
            state: YearListState::Loading,
        }
    }

    /// 年度一覧を取得して状態を更新する
    pub async fn load(&mut self, api: &dyn BookkeepingApi) {
        self.state = match api.get_years().await {
            Ok(years) if years.is_empty() => YearListState::Empty,
            Ok(years) => {
                info!("年度一覧を表示します: count={}", years.len());
                YearListState::Loaded(years)
            }
            Err(e) => {
                error!("年度一覧の取得に失敗しました: {e}");
                YearListState::Failed(FAILED_MESSAGE.to_string())
            }
        };
    }

    pub fn state(&self) -> &YearListState {
        &self.state
    }

    pub fn render(&self) -> String {
        match &self.state {
            YearListState::Loading => "Loading...".to_string(),
            YearListState::Failed(message) => message.clone(),
            YearListState::Empty => EMPTY_MESSAGE.to_string(),
            YearListState::Loaded(years) => years
                .iter()
                .map(|year| format!("- {}  (yatt year {})", year.year, year.id))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}
