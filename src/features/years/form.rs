/// 年度追加フォーム
use crate::features::api::BookkeepingApi;
use crate::features::years::models::{CreateYearDto, Year, MAX_YEAR, MIN_YEAR};
use crate::shared::errors::{AppError, AppResult};
use log::{error, info};

#[derive(Debug, Default)]
pub struct AddYearForm {
    year: String,
}

impl AddYearForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_year(&mut self, value: impl Into<String>) {
        self.year = value.into();
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    /// 入力欄の制約（required, min=2010, max=2024）を確認する
    pub fn validate(&self) -> AppResult<i32> {
        let trimmed = self.year.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("年度は必須項目です"));
        }

        let year: i32 = trimmed
            .parse()
            .map_err(|_| AppError::validation("年度は整数で入力してください"))?;

        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(AppError::validation(format!(
                "年度は{MIN_YEAR}から{MAX_YEAR}の範囲で入力してください"
            )));
        }

        Ok(year)
    }

    /// 年度を作成し、成功したら入力欄を空にする
    pub async fn submit(&mut self, api: &dyn BookkeepingApi) -> AppResult<Year> {
        let year = self.validate()?;

        let created = api
            .create_year(&CreateYearDto { year })
            .await
            .map_err(|e| {
                error!("年度の作成に失敗しました: {e}");
                e
            })?;

        info!("年度を作成しました: id={}, year={}", created.id, created.year);
        self.year.clear();
        Ok(created)
    }
}
