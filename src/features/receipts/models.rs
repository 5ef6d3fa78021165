use serde::{Deserialize, Serialize};
use std::path::Path;

/// アップロード済みファイル（IDのみ参照する）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UploadedFile {
    pub id: i64,
}

/// エントリーフォームに添付された領収書ファイル
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl AttachedFile {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    /// ローカルファイルを読み込む
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "receipt".to_string());
        Ok(Self { file_name, content })
    }

    /// ファイル名からContent-Typeを取得
    pub fn content_type(&self) -> &'static str {
        let extension = Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "pdf" => "application/pdf",
            "txt" => "text/plain",
            _ => "application/octet-stream",
        }
    }
}
