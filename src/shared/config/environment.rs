use crate::shared::errors::{AppError, AppResult};
use log::LevelFilter;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// 実行環境
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` の値から判定する（未設定ならビルド設定に従う）
    pub fn detect() -> Self {
        match env_var("ENVIRONMENT") {
            Some(value) => Self::parse(&value),
            None if cfg!(debug_assertions) => Environment::Development,
            None => Environment::Production,
        }
    }

    /// "production" 以外はすべて開発環境として扱う
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    fn default_log_level(self) -> LevelFilter {
        match self {
            Environment::Development => LevelFilter::Debug,
            Environment::Production => LevelFilter::Info,
        }
    }
}

/// 空白のみの値は未設定として扱う
fn env_var(name: &str) -> Option<String> {
    let value = std::env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn env_var_or(name: &str, default: &str) -> String {
    env_var(name).unwrap_or_else(|| {
        log::debug!("環境変数 {name} が未設定のため既定値を使用します: {default}");
        default.to_string()
    })
}

/// 実行環境とログレベル
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: Environment,
    pub log_level: LevelFilter,
}

impl EnvironmentConfig {
    /// `ENVIRONMENT` と `LOG_LEVEL` から読み込む
    pub fn from_env() -> Self {
        let environment = Environment::detect();
        let log_level = env_var("LOG_LEVEL")
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| environment.default_log_level());

        Self {
            environment,
            log_level,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

/// 開発ビルドでのみ `.env` を読み込む
///
/// ロガー初期化前に呼ぶため、読み込んだパスを返して呼び出し側でログに残す
pub fn load_environment_variables() -> Option<PathBuf> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok()
    } else {
        None
    }
}

/// env_loggerを初期化する（`RUST_LOG` があればそちらを優先）
///
/// 既に初期化済みの場合は何もしない
pub fn initialize_logging_system(config: &EnvironmentConfig) {
    let result = env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .format_timestamp_secs()
        .format_target(false)
        .try_init();

    if result.is_ok() {
        log::debug!(
            "ロガーを初期化しました: level={}, environment={}",
            config.log_level,
            config.environment.as_str()
        );
    }
}

/// APIサーバーの接続設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// 末尾の `/` を除いたベースURL
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ApiConfig {
    /// `API_URL` と `API_TIMEOUT_SECONDS` から読み込む
    pub fn from_env() -> Self {
        let base_url = env_var_or("API_URL", DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        let timeout_seconds = match env_var("API_TIMEOUT_SECONDS").map(|raw| raw.parse::<u64>()) {
            Some(Ok(seconds)) => seconds,
            Some(Err(e)) => {
                log::warn!("API_TIMEOUT_SECONDSが数値ではありません ({e})。{DEFAULT_TIMEOUT_SECONDS}秒を使用します");
                DEFAULT_TIMEOUT_SECONDS
            }
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        Self {
            base_url,
            timeout_seconds,
        }
    }

    /// ベースURLを解析し、http(s)かつタイムアウトが正であることを確認する
    pub fn validate(&self) -> AppResult<url::Url> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            AppError::configuration(format!("API_URLを解析できません: '{}' ({e})", self.base_url))
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(AppError::configuration(format!(
                    "API_URLのスキーム '{scheme}' には対応していません"
                )))
            }
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::configuration("API_TIMEOUT_SECONDSは1以上にしてください"));
        }

        Ok(parsed)
    }

    pub fn is_localhost(&self) -> bool {
        url::Url::parse(&self.base_url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(|host| host == "localhost" || host == "127.0.0.1"))
            .unwrap_or(false)
    }
}

/// セッションファイルとダウンロード先
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub session_store_path: PathBuf,
    pub download_dir: PathBuf,
}

impl StorageConfig {
    /// `SESSION_STORE_PATH` と `DOWNLOAD_DIR` から読み込む
    ///
    /// 未設定の場合は `<config_dir>/yatt/secure.json` と
    /// OSのダウンロードフォルダ（無ければカレントディレクトリ）
    pub fn from_env() -> Self {
        let session_store_path = env_var("SESSION_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_session_store_path);

        let download_dir = env_var("DOWNLOAD_DIR")
            .map(PathBuf::from)
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        log::debug!(
            "保存先: session_store={}, download_dir={}",
            session_store_path.display(),
            download_dir.display()
        );

        Self {
            session_store_path,
            download_dir,
        }
    }
}

fn default_session_store_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("yatt")
        .join("secure.json")
}
