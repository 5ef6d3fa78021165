/// API Server経由での領収書ファイル操作
use crate::features::receipts::models::{AttachedFile, UploadedFile};
use crate::shared::api_client::{ApiClient, DataResponse};
use crate::shared::errors::{AppError, AppResult};
use log::info;
use reqwest::multipart;
use std::path::PathBuf;

/// ダウンロード時のAcceptヘッダー
pub const FILE_ACCEPT: &str = "application/octet-stream";

/// ダウンロードしたファイルの保存名
pub fn download_filename(file_id: i64) -> String {
    format!("file_{file_id}")
}

impl ApiClient {
    /// ファイルをアップロードし、採番されたファイルIDを返す
    pub async fn upload_file(&self, file: &AttachedFile) -> AppResult<i64> {
        info!(
            "ファイルアップロード開始: filename={}, size={}",
            file.file_name,
            file.content.len()
        );

        let part = multipart::Part::bytes(file.content.clone())
            .file_name(file.file_name.clone())
            .mime_str(file.content_type())
            .map_err(|e| AppError::validation(format!("MIMEタイプ設定エラー: {e}")))?;
        let form = multipart::Form::new().part("file", part);

        let response: DataResponse<UploadedFile> =
            self.post_multipart("/years/uploads", form).await?;

        info!("ファイルアップロード成功: file_id={}", response.data.id);
        Ok(response.data.id)
    }

    /// アップロード済みファイルをダウンロードして `file_{id}` として保存する
    pub async fn download_file(&self, file_id: i64) -> AppResult<PathBuf> {
        self.download(
            &format!("/years/uploads/{file_id}"),
            FILE_ACCEPT,
            &download_filename(file_id),
        )
        .await
    }
}
