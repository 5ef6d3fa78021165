/// ダウンロードファイルの保存
///
/// APIから受け取ったバイナリを、一時ファイルに書き出してから最終ファイル名で確定する。
/// 一時ファイルは確定と同時に手放すため、保存先に残らない。
use crate::shared::errors::{AppError, AppResult};
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};

/// ダウンロードしたバイナリの保存先
pub trait FileSaver: Send + Sync {
    /// `filename` でバイナリを保存し、保存したパスを返す
    fn save(&self, filename: &str, content: &[u8]) -> AppResult<PathBuf>;
}

/// 指定ディレクトリに保存する
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSaver for DirectorySaver {
    fn save(&self, filename: &str, content: &[u8]) -> AppResult<PathBuf> {
        validate_filename(filename)?;
        std::fs::create_dir_all(&self.dir)?;

        let target = self.dir.join(filename);
        let mut staged = tempfile::NamedTempFile::new_in(&self.dir)?;
        debug!("一時ファイルに書き込み中: {}", staged.path().display());

        staged.write_all(content)?;
        staged.flush()?;
        staged
            .persist(&target)
            .map_err(|e| AppError::Io(e.error))?;

        info!(
            "ファイルを保存しました: path={}, size={}",
            target.display(),
            content.len()
        );
        Ok(target)
    }
}

/// パス区切りを含むファイル名は受け付けない
fn validate_filename(filename: &str) -> AppResult<()> {
    let is_plain = !filename.is_empty()
        && Path::new(filename)
            .file_name()
            .is_some_and(|name| name == filename);
    if !is_plain {
        return Err(AppError::validation(format!(
            "保存ファイル名が不正です: {filename}"
        )));
    }
    Ok(())
}
