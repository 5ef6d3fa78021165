/// API Server経由でのカテゴリー操作
use crate::features::categories::models::Category;
use crate::shared::api_client::{ApiClient, DataResponse};
use crate::shared::errors::AppResult;
use log::info;

impl ApiClient {
    /// カテゴリー一覧を取得する
    pub async fn get_categories(&self) -> AppResult<Vec<Category>> {
        let response: DataResponse<Vec<Category>> = self.get("/categories").await?;

        info!("カテゴリー一覧取得成功: count={}", response.data.len());
        Ok(response.data)
    }
}
