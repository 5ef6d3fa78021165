/// セッションストアモジュール
///
/// ログインで取得したベアラートークンを保存・取得・削除します。
/// トークンの読み書きはこのモジュールの `SessionStore` だけが担当します。
use crate::shared::errors::{AppError, AppResult};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// セッションストアのキー定義
pub struct SessionStoreKeys;

impl SessionStoreKeys {
    /// セッショントークンのキー
    pub const TOKEN: &'static str = "token";
}

/// セッショントークンの保存先
pub trait SessionStore: Send + Sync {
    /// 保存済みトークンを取得する（存在しない場合はNone）
    fn token(&self) -> AppResult<Option<String>>;

    /// トークンを保存する
    fn set_token(&self, token: &str) -> AppResult<()>;

    /// トークンを削除する
    fn clear(&self) -> AppResult<()>;

    /// 空でないトークンが保存されているか
    fn has_token(&self) -> AppResult<bool> {
        Ok(self
            .token()?
            .is_some_and(|token| !token.trim().is_empty()))
    }
}

/// JSONファイルにトークンを保存するストア
///
/// `{"token": "..."}` の形式で保存し、有効期限などのメタデータは持たない
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    /// 新しいFileSessionStoreを作成する
    ///
    /// ファイルは最初の書き込み時に作成される
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> AppResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| AppError::session(format!("ストアの読み込みに失敗しました: {e}")))?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(AppError::session(format!(
                "ストアの形式が不正です: {}",
                self.path.display()
            ))),
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> AppResult<()> {
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)
            .map_err(|e| AppError::session(format!("ストアディレクトリの作成に失敗しました: {e}")))?;

        let mut staged = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| AppError::session(format!("ストアの保存に失敗しました: {e}")))?;
        serde_json::to_writer_pretty(&mut staged, document)?;
        staged
            .flush()
            .map_err(|e| AppError::session(format!("ストアの保存に失敗しました: {e}")))?;
        staged
            .persist(&self.path)
            .map_err(|e| AppError::session(format!("ストアの保存に失敗しました: {}", e.error)))?;
        Ok(())
    }

    fn guard(&self) -> AppResult<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| AppError::session("ストアのロック取得に失敗しました"))
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> AppResult<Option<String>> {
        let _guard = self.guard()?;
        let document = self.read_document()?;
        Ok(document
            .get(SessionStoreKeys::TOKEN)
            .and_then(|v| v.as_str().map(|s| s.to_string())))
    }

    fn set_token(&self, token: &str) -> AppResult<()> {
        let _guard = self.guard()?;
        let mut document = self.read_document()?;
        document.insert(
            SessionStoreKeys::TOKEN.to_string(),
            Value::String(token.to_string()),
        );
        self.write_document(&document)?;

        log::info!("セッショントークンを保存しました");
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        let _guard = self.guard()?;
        let mut document = self.read_document()?;
        if document.remove(SessionStoreKeys::TOKEN).is_some() {
            self.write_document(&document)?;
        }

        log::info!("セッショントークンを削除しました");
        Ok(())
    }
}

/// プロセス内だけで保持するストア
#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    fn slot(&self) -> AppResult<std::sync::MutexGuard<'_, Option<String>>> {
        self.token
            .lock()
            .map_err(|_| AppError::session("ストアのロック取得に失敗しました"))
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> AppResult<Option<String>> {
        Ok(self.slot()?.clone())
    }

    fn set_token(&self, token: &str) -> AppResult<()> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self.slot()? = None;
        Ok(())
    }
}
