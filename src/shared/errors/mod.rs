use thiserror::Error;

/// クライアント全体のエラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// 2xx以外のステータス。`message` はサーバーの `detail` か汎用文言
    #[error("HTTPエラー: status={status} - {message}")]
    Http { status: u16, message: String },

    /// 接続できない、または応答を受信できない
    #[error("通信エラー: {0}")]
    Network(String),

    /// 入力欄の制約違反（必須・数値・範囲）
    #[error("入力エラー: {0}")]
    Validation(String),

    #[error("設定エラー: {0}")]
    Configuration(String),

    /// セッションファイルの読み書き失敗
    #[error("セッションエラー: {0}")]
    Session(String),

    /// `AuthProvider` の外で `use_auth` を呼んだなどの配線ミス
    #[error("コンテキストエラー: {0}")]
    Context(String),

    #[error("未認証: {0}")]
    Unauthenticated(String),

    /// 結果を反映する前にキャンセルされた
    #[error("処理がキャンセルされました")]
    Cancelled,

    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),
}

/// エラーの重要度（終了時のログレベルに使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 利用者の操作で解決できる
    Low,
    /// サーバーや環境の一時的な問題
    Medium,
    /// 設定やローカルストレージの問題
    High,
    /// プログラムの配線ミス
    Critical,
}

impl AppError {
    /// 画面に表示する文言
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Http { message, .. } => message,
            AppError::Validation(message) | AppError::Context(message) => message,
            AppError::Network(_) => "APIサーバーに接続できませんでした",
            AppError::Configuration(_) => "設定に誤りがあります",
            AppError::Session(_) => "セッション情報を読み書きできませんでした",
            AppError::Unauthenticated(_) => "ログインしてください",
            AppError::Cancelled => "処理がキャンセルされました",
            AppError::Io(_) => "ファイルを読み書きできませんでした",
            AppError::Json(_) => "サーバーの応答を解析できませんでした",
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Http { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            AppError::Http { .. }
            | AppError::Validation(_)
            | AppError::Unauthenticated(_)
            | AppError::Cancelled => ErrorSeverity::Low,
            AppError::Network(_) | AppError::Io(_) | AppError::Json(_) => ErrorSeverity::Medium,
            AppError::Configuration(_) | AppError::Session(_) => ErrorSeverity::High,
            AppError::Context(_) => ErrorSeverity::Critical,
        }
    }

    /// HTTPエラーのステータスコード
    pub fn status(&self) -> Option<u16> {
        if let AppError::Http { status, .. } = self {
            Some(*status)
        } else {
            None
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        AppError::Http {
            status,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn session(message: impl Into<String>) -> Self {
        AppError::Session(message.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
