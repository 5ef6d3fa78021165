/// 画面（フォーム・一覧・ページ）から見たAPIの境界
///
/// 画面側はこのトレイトだけに依存し、HTTPの詳細は `ApiClient` が受け持つ。
use crate::features::auth::models::{CurrentUser, LoginResponse};
use crate::features::categories::models::Category;
use crate::features::entries::models::{CreateEntryDto, Entry};
use crate::features::exports::ExportFormat;
use crate::features::receipts::models::AttachedFile;
use crate::features::years::models::{CreateYearDto, Year};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait BookkeepingApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> AppResult<LoginResponse>;
    async fn register(&self, username: &str, password: &str) -> AppResult<()>;
    async fn logout(&self) -> AppResult<()>;
    async fn current_user(&self) -> AppResult<CurrentUser>;

    async fn get_years(&self) -> AppResult<Vec<Year>>;
    async fn create_year(&self, dto: &CreateYearDto) -> AppResult<Year>;
    async fn delete_year(&self, year_id: i64) -> AppResult<()>;
    async fn get_profit(&self, year_id: i64) -> AppResult<f64>;

    async fn get_entries(&self, year_id: i64) -> AppResult<Vec<Entry>>;
    async fn get_entry(&self, year_id: i64, entry_id: i64) -> AppResult<Entry>;
    async fn create_entry(&self, dto: &CreateEntryDto) -> AppResult<Entry>;
    async fn update_entry(&self, entry_id: i64, dto: &CreateEntryDto) -> AppResult<Entry>;
    async fn delete_entry(&self, year_id: i64, entry_id: i64) -> AppResult<()>;

    async fn get_categories(&self) -> AppResult<Vec<Category>>;

    async fn upload_file(&self, file: &AttachedFile) -> AppResult<i64>;
    async fn download_file(&self, file_id: i64) -> AppResult<PathBuf>;
    async fn export_year(&self, year_id: i64, format: ExportFormat) -> AppResult<PathBuf>;

    async fn export_csv(&self, year_id: i64) -> AppResult<PathBuf> {
        self.export_year(year_id, ExportFormat::Csv).await
    }

    async fn export_pdf(&self, year_id: i64) -> AppResult<PathBuf> {
        self.export_year(year_id, ExportFormat::Pdf).await
    }
}

#[async_trait]
impl BookkeepingApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> AppResult<LoginResponse> {
        ApiClient::login(self, username, password).await
    }

    async fn register(&self, username: &str, password: &str) -> AppResult<()> {
        ApiClient::register(self, username, password).await
    }

    async fn logout(&self) -> AppResult<()> {
        ApiClient::logout(self).await
    }

    async fn current_user(&self) -> AppResult<CurrentUser> {
        ApiClient::current_user(self).await
    }

    async fn get_years(&self) -> AppResult<Vec<Year>> {
        ApiClient::get_years(self).await
    }

    async fn create_year(&self, dto: &CreateYearDto) -> AppResult<Year> {
        ApiClient::create_year(self, dto).await
    }

    async fn delete_year(&self, year_id: i64) -> AppResult<()> {
        ApiClient::delete_year(self, year_id).await
    }

    async fn get_profit(&self, year_id: i64) -> AppResult<f64> {
        ApiClient::get_profit(self, year_id).await
    }

    async fn get_entries(&self, year_id: i64) -> AppResult<Vec<Entry>> {
        ApiClient::get_entries(self, year_id).await
    }

    async fn get_entry(&self, year_id: i64, entry_id: i64) -> AppResult<Entry> {
        ApiClient::get_entry(self, year_id, entry_id).await
    }

    async fn create_entry(&self, dto: &CreateEntryDto) -> AppResult<Entry> {
        ApiClient::create_entry(self, dto).await
    }

    async fn update_entry(&self, entry_id: i64, dto: &CreateEntryDto) -> AppResult<Entry> {
        ApiClient::update_entry(self, entry_id, dto).await
    }

    async fn delete_entry(&self, year_id: i64, entry_id: i64) -> AppResult<()> {
        ApiClient::delete_entry(self, year_id, entry_id).await
    }

    async fn get_categories(&self) -> AppResult<Vec<Category>> {
        ApiClient::get_categories(self).await
    }

    async fn upload_file(&self, file: &AttachedFile) -> AppResult<i64> {
        ApiClient::upload_file(self, file).await
    }

    async fn download_file(&self, file_id: i64) -> AppResult<PathBuf> {
        ApiClient::download_file(self, file_id).await
    }

    async fn export_year(&self, year_id: i64, format: ExportFormat) -> AppResult<PathBuf> {
        ApiClient::export_year(self, year_id, format).await
    }
}
