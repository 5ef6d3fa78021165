/// API Server経由での年度エクスポート
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use std::path::PathBuf;

/// エクスポート形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Acceptヘッダーの値
    pub fn accept(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// 保存ファイル名（`year_{yearId}_export.{ext}`）
    pub fn filename(self, year_id: i64) -> String {
        format!("year_{year_id}_export.{}", self.extension())
    }
}

impl ApiClient {
    /// 年度をエクスポートして保存する
    pub async fn export_year(&self, year_id: i64, format: ExportFormat) -> AppResult<PathBuf> {
        self.download(
            &format!("/years/{year_id}/export/{}", format.extension()),
            format.accept(),
            &format.filename(year_id),
        )
        .await
    }

    /// 年度をCSVでエクスポートする
    pub async fn export_csv(&self, year_id: i64) -> AppResult<PathBuf> {
        self.export_year(year_id, ExportFormat::Csv).await
    }

    /// 年度をPDFでエクスポートする
    pub async fn export_pdf(&self, year_id: i64) -> AppResult<PathBuf> {
        self.export_year(year_id, ExportFormat::Pdf).await
    }
}
