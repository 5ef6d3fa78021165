/// 取引記録追加フォーム
///
/// 添付ファイルがある場合は必ずアップロードを先に完了させ、
/// 採番されたファイルIDを取引記録の作成リクエストに含める。
/// 作成に失敗した場合はアップロード済みIDを保持し、再送信時に再利用する。
use crate::features::api::BookkeepingApi;
use crate::features::categories::models::Category;
use crate::features::entries::models::{CreateEntryDto, Entry};
use crate::features::receipts::models::AttachedFile;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{date_input_value, date_to_unix_seconds, parse_amount_input};
use chrono::NaiveDate;
use log::{debug, error, info, warn};
use std::future::Future;

pub const DEFAULT_CATEGORY_ID: i64 = 1;

#[derive(Debug)]
pub struct AddEntryForm {
    year_id: i64,
    revenue: f64,
    cost: f64,
    /// Unix秒（0は未入力）
    date: i64,
    file: Option<AttachedFile>,
    cat_id: i64,
    categories: Vec<Category>,
    categories_requested: bool,
    uploaded_file_id: Option<i64>,
}

impl AddEntryForm {
    pub fn new(year_id: i64) -> Self {
        Self {
            year_id,
            revenue: 0.0,
            cost: 0.0,
            date: 0,
            file: None,
            cat_id: DEFAULT_CATEGORY_ID,
            categories: Vec::new(),
            categories_requested: false,
            uploaded_file_id: None,
        }
    }

    /// カテゴリー一覧を取得する（初回のみ）
    pub async fn load_categories(&mut self, api: &dyn BookkeepingApi) {
        if self.categories_requested {
            return;
        }
        self.categories_requested = true;

        match api.get_categories().await {
            Ok(categories) => self.categories = categories,
            Err(e) => error!("カテゴリー一覧の取得に失敗しました: {e}"),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn set_revenue(&mut self, value: &str) -> AppResult<()> {
        self.revenue = parse_amount_input(value, "収入")?;
        Ok(())
    }

    pub fn set_cost(&mut self, value: &str) -> AppResult<()> {
        self.cost = parse_amount_input(value, "支出")?;
        Ok(())
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date_to_unix_seconds(date);
    }

    /// 日付入力欄に表示する値（YYYY-MM-DD、未入力は空文字）
    pub fn date_input_value(&self) -> String {
        date_input_value(self.date)
    }

    pub fn date(&self) -> i64 {
        self.date
    }

    /// 選択肢にないカテゴリーは選べない
    pub fn set_category(&mut self, cat_id: i64) -> AppResult<()> {
        if !self.categories.is_empty() && !self.categories.iter().any(|c| c.id == cat_id) {
            return Err(AppError::validation(format!(
                "カテゴリーID {cat_id} は選択肢にありません"
            )));
        }
        self.cat_id = cat_id;
        Ok(())
    }

    pub fn cat_id(&self) -> i64 {
        self.cat_id
    }

    /// 添付ファイルを差し替えると、前回のアップロード結果は使わない
    pub fn set_file(&mut self, file: Option<AttachedFile>) {
        self.file = file;
        self.uploaded_file_id = None;
    }

    pub fn file(&self) -> Option<&AttachedFile> {
        self.file.as_ref()
    }

    pub fn uploaded_file_id(&self) -> Option<i64> {
        self.uploaded_file_id
    }

    fn reset(&mut self) {
        self.revenue = 0.0;
        self.cost = 0.0;
        self.date = 0;
        self.file = None;
        self.cat_id = DEFAULT_CATEGORY_ID;
        self.uploaded_file_id = None;
    }

    async fn resolve_file_id(&mut self, api: &dyn BookkeepingApi) -> AppResult<Option<i64>> {
        let Some(file) = &self.file else {
            return Ok(None);
        };

        if let Some(id) = self.uploaded_file_id {
            debug!("アップロード済みのファイルIDを再利用します: file_id={id}");
            return Ok(Some(id));
        }

        let id = api.upload_file(file).await.map_err(|e| {
            error!("ファイルのアップロードに失敗しました: {e}");
            e
        })?;
        self.uploaded_file_id = Some(id);
        Ok(Some(id))
    }

    /// 取引記録を作成する
    ///
    /// 成功時は `on_entry_added` を呼んでから全項目を初期値に戻す。
    /// 失敗時は入力内容を保持する。
    pub async fn submit<F, Fut>(
        &mut self,
        api: &dyn BookkeepingApi,
        on_entry_added: F,
    ) -> AppResult<Entry>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        if self.date == 0 {
            return Err(AppError::validation("日付は必須項目です"));
        }

        let file_id = self.resolve_file_id(api).await?;

        let dto = CreateEntryDto {
            revenue: self.revenue,
            cost: self.cost,
            date: self.date,
            year_id: self.year_id,
            cat_id: self.cat_id,
            file_id,
        };

        let entry = match api.create_entry(&dto).await {
            Ok(entry) => entry,
            Err(e) => {
                if let Some(id) = file_id {
                    warn!("取引記録の作成に失敗しました。アップロード済みファイルは再送信時に再利用します: file_id={id}");
                }
                error!("取引記録の作成に失敗しました: {e}");
                return Err(e);
            }
        };

        info!("取引記録を作成しました: id={}, year_id={}", entry.id, entry.year_id);
        on_entry_added().await;
        self.reset();
        Ok(entry)
    }
}
