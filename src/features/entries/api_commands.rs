/// API Server経由でのエントリー操作
use crate::features::entries::models::{CreateEntryDto, Entry};
use crate::shared::api_client::{ApiClient, DataResponse, MaybeWrapped, MessageResponse};
use crate::shared::errors::AppResult;
use log::info;

impl ApiClient {
    /// 年度のエントリー一覧を取得する
    pub async fn get_entries(&self, year_id: i64) -> AppResult<Vec<Entry>> {
        let response: DataResponse<Vec<Entry>> =
            self.get(&format!("/years/{year_id}/entries")).await?;

        info!(
            "エントリー一覧取得成功: year_id={year_id}, count={}",
            response.data.len()
        );
        Ok(response.data)
    }

    /// エントリーを1件取得する
    pub async fn get_entry(&self, year_id: i64, entry_id: i64) -> AppResult<Entry> {
        let response: MaybeWrapped<Entry> = self
            .get(&format!("/years/{year_id}/entries/{entry_id}"))
            .await?;
        Ok(response.into_inner())
    }

    /// エントリーを作成する（送信先はペイロードの年度）
    pub async fn create_entry(&self, dto: &CreateEntryDto) -> AppResult<Entry> {
        let response: MaybeWrapped<Entry> = self
            .post(&format!("/years/{}/entries", dto.year_id), dto)
            .await?;
        let entry = response.into_inner();

        info!(
            "エントリー作成成功: entry_id={}, year_id={}, file_id={:?}",
            entry.id, entry.year_id, entry.file_id
        );
        Ok(entry)
    }

    /// エントリーを更新する
    pub async fn update_entry(&self, entry_id: i64, dto: &CreateEntryDto) -> AppResult<Entry> {
        let response: MaybeWrapped<Entry> = self
            .put(&format!("/years/{}/entries/{entry_id}", dto.year_id), dto)
            .await?;

        info!("エントリー更新成功: entry_id={entry_id}");
        Ok(response.into_inner())
    }

    /// エントリーを削除する
    pub async fn delete_entry(&self, year_id: i64, entry_id: i64) -> AppResult<()> {
        let _response: MessageResponse = self
            .delete(&format!("/years/{year_id}/entries/{entry_id}"))
            .await?;

        info!("エントリー削除成功: year_id={year_id}, entry_id={entry_id}");
        Ok(())
    }
}
