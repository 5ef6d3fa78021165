/// ホーム画面（年度一覧と年度追加フォーム）
use crate::features::api::BookkeepingApi;
use crate::features::years::form::AddYearForm;
use crate::features::years::list::YearList;
use crate::features::years::models::Year;
use crate::shared::errors::AppResult;

pub const TITLE: &str = "Yet Another Tax Tool for Small Businesses";

#[derive(Default)]
pub struct HomePage {
    pub year_list: YearList,
    pub add_year_form: AddYearForm,
}

impl HomePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, api: &dyn BookkeepingApi) {
        self.year_list.load(api).await;
    }

    /// 年度を追加し、成功したら一覧を取得し直す
    pub async fn add_year(&mut self, api: &dyn BookkeepingApi, value: &str) -> AppResult<Year> {
        self.add_year_form.set_year(value);
        let created = self.add_year_form.submit(api).await?;
        self.year_list.load(api).await;
        Ok(created)
    }

    pub fn render(&self) -> String {
        format!("{TITLE}\n\nYears\n{}", self.year_list.render())
    }
}
