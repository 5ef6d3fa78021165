/// 年度詳細画面
///
/// 取得結果は `CancellationToken` を確認してから反映する。
/// キャンセル済みの場合は取得した値を捨て、状態を変更しない。
use crate::features::api::BookkeepingApi;
use crate::features::entries::form::AddEntryForm;
use crate::features::entries::list::EntryList;
use crate::features::entries::models::Entry;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::format_euro;
use log::{error, info};
use tokio_util::sync::CancellationToken;

pub struct YearPage {
    year_id: i64,
    entries: Vec<Entry>,
    profit: f64,
    loading: bool,
    pub entry_form: AddEntryForm,
}

async fn fetch_entries_into(api: &dyn BookkeepingApi, year_id: i64, entries: &mut Vec<Entry>) {
    match api.get_entries(year_id).await {
        Ok(updated) => *entries = updated,
        Err(e) => error!("取引記録の再取得に失敗しました: year_id={year_id}, error={e}"),
    }
}

impl YearPage {
    pub fn new(year_id: i64) -> Self {
        Self {
            year_id,
            entries: Vec::new(),
            profit: 0.0,
            loading: true,
            entry_form: AddEntryForm::new(year_id),
        }
    }

    pub fn year_id(&self) -> i64 {
        self.year_id
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn profit(&self) -> f64 {
        self.profit
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 取引記録と利益を順に取得する
    ///
    /// 取得に失敗した場合もログを残してローディングを終える。
    pub async fn load(
        &mut self,
        api: &dyn BookkeepingApi,
        cancel: &CancellationToken,
    ) -> AppResult<()> {
        self.loading = true;
        let year_id = self.year_id;

        let fetched = async {
            let entries = api.get_entries(year_id).await?;
            if cancel.is_cancelled() {
                return Err(AppError::Cancelled);
            }
            let profit = api.get_profit(year_id).await?;
            Ok((entries, profit))
        }
        .await;

        if cancel.is_cancelled() {
            info!("年度詳細の取得結果を破棄しました: year_id={year_id}");
            return Err(AppError::Cancelled);
        }

        match fetched {
            Ok((entries, profit)) => {
                self.entries = entries;
                self.profit = profit;
            }
            Err(e) => error!("年度詳細の取得に失敗しました: year_id={year_id}, error={e}"),
        }
        self.loading = false;

        self.entry_form.load_categories(api).await;
        Ok(())
    }

    pub async fn refresh_entries(&mut self, api: &dyn BookkeepingApi) {
        fetch_entries_into(api, self.year_id, &mut self.entries).await;
    }

    /// フォームを送信し、成功したら取引記録を再取得する
    pub async fn submit_entry(&mut self, api: &dyn BookkeepingApi) -> AppResult<Entry> {
        let year_id = self.year_id;
        let entries = &mut self.entries;
        self.entry_form
            .submit(api, move || fetch_entries_into(api, year_id, entries))
            .await
    }

    pub fn render(&self) -> String {
        if self.loading {
            return "Loading...".to_string();
        }

        let mut sections = vec![
            format!("Year {}", self.year_id),
            format!("Total Profit: {}", format_euro(self.profit)),
            format!("Entries\n{}", EntryList::new(&self.entries).render()),
        ];

        let categories = self.entry_form.categories();
        if !categories.is_empty() {
            let options = categories
                .iter()
                .map(|c| format!("{}: {}", c.id, c.name))
                .collect::<Vec<_>>()
                .join(", ");
            sections.push(format!("Categories: {options}"));
        }

        sections.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::Category;
    use crate::shared::test_support::{ApiCall, RecordingApi};
    use chrono::NaiveDate;

    fn seeded_api() -> RecordingApi {
        let api = RecordingApi::new();
        *api.entries.lock().unwrap() = vec![Entry {
            id: 1,
            date: 1_704_067_200,
            revenue: 50.0,
            cost: 80.0,
            cat_id: Some(1),
            file_id: None,
            year_id: 7,
        }];
        *api.profit.lock().unwrap() = 1234.5;
        *api.categories.lock().unwrap() = vec![Category {
            id: 1,
            name: "Office".to_string(),
        }];
        api
    }

    #[tokio::test]
    async fn test_load_fetches_entries_then_profit() {
        let api = seeded_api();
        let mut page = YearPage::new(7);
        assert_eq!(page.render(), "Loading...");

        page.load(&api, &CancellationToken::new()).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![
                ApiCall::GetEntries(7),
                ApiCall::GetProfit(7),
                ApiCall::GetCategories
            ]
        );
        assert!(!page.is_loading());
        assert_eq!(page.entries().len(), 1);

        let rendered = page.render();
        assert!(rendered.starts_with("Year 7\n\nTotal Profit: 1234.50€"));
        assert!(rendered.contains("Total Profit: -30.00€"));
        assert!(rendered.contains("Categories: 1: Office"));
    }

    #[tokio::test]
    async fn test_cancelled_load_commits_nothing() {
        let api = seeded_api();
        let cancel = CancellationToken::new();
        *api.cancel_during_get_entries.lock().unwrap() = Some(cancel.clone());
        let mut page = YearPage::new(7);

        let error = page.load(&api, &cancel).await.unwrap_err();

        assert!(matches!(error, AppError::Cancelled));
        assert!(page.entries().is_empty());
        assert!(page.is_loading());
        assert_eq!(api.calls(), vec![ApiCall::GetEntries(7)]);
    }

    #[tokio::test]
    async fn test_failed_fetch_ends_loading() {
        let api = seeded_api();
        api.fail_on("get_profit");
        let mut page = YearPage::new(7);

        page.load(&api, &CancellationToken::new()).await.unwrap();

        assert!(!page.is_loading());
        assert!(page.entries().is_empty());
        assert_eq!(page.profit(), 0.0);
    }

    #[tokio::test]
    async fn test_submit_entry_refetches_entries() {
        let api = seeded_api();
        let mut page = YearPage::new(7);
        page.load(&api, &CancellationToken::new()).await.unwrap();

        page.entry_form.set_revenue("10").unwrap();
        page.entry_form.set_cost("1").unwrap();
        page.entry_form
            .set_date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        page.submit_entry(&api).await.unwrap();

        assert_eq!(page.entries().len(), 2);
        assert_eq!(api.calls().last(), Some(&ApiCall::GetEntries(7)));
    }

    #[tokio::test]
    async fn test_failed_submit_does_not_refetch() {
        let api = seeded_api();
        api.fail_on("create_entry");
        let mut page = YearPage::new(7);
        page.entry_form
            .set_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert!(page.submit_entry(&api).await.is_err());
        assert_eq!(api.count(|c| matches!(c, ApiCall::GetEntries(_))), 0);
    }
}
