/// 認証コンテキスト
///
/// `AuthProvider` が起動時にセッションストアを一度だけ読み、
/// 認証済みフラグを `provide` のスコープ内へ公開する。
use crate::features::auth::session_store::SessionStore;
use crate::shared::errors::{AppError, AppResult};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

tokio::task_local! {
    static AUTH_CONTEXT: AuthContext;
}

/// 認証状態（フラグとセッター）
#[derive(Clone)]
pub struct AuthContext {
    is_authenticated: Arc<AtomicBool>,
    session: Arc<dyn SessionStore>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated.load(Ordering::SeqCst)
    }

    pub fn set_authenticated(&self, value: bool) {
        self.is_authenticated.store(value, Ordering::SeqCst);
        log::debug!("認証状態を更新しました: is_authenticated={value}");
    }

    /// 未認証の場合はエラーを返す
    pub fn require_authenticated(&self) -> AppResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::Unauthenticated(
                "セッショントークンがありません。先にloginを実行してください".to_string(),
            ))
        }
    }

    pub fn session(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.session)
    }
}

/// 認証コンテキストの提供元
pub struct AuthProvider {
    context: AuthContext,
}

impl AuthProvider {
    /// セッションストアを読み、空でないトークンがあれば認証済みとする
    pub fn new(session: Arc<dyn SessionStore>) -> AppResult<Self> {
        let is_authenticated = session.has_token()?;
        log::info!("認証状態を初期化しました: is_authenticated={is_authenticated}");

        Ok(Self {
            context: AuthContext {
                is_authenticated: Arc::new(AtomicBool::new(is_authenticated)),
                session,
            },
        })
    }

    pub fn context(&self) -> AuthContext {
        self.context.clone()
    }

    /// `future` の実行中だけ `use_auth` を有効にする
    pub async fn provide<F>(&self, future: F) -> F::Output
    where
        F: Future,
    {
        AUTH_CONTEXT.scope(self.context.clone(), future).await
    }
}

/// 現在のスコープの認証コンテキストを取得する
///
/// `AuthProvider::provide` の外で呼ばれた場合は配線ミスなので即座にエラーを返す
pub fn use_auth() -> AppResult<AuthContext> {
    AUTH_CONTEXT.try_with(|context| context.clone()).map_err(|_| {
        log::error!("use_authがAuthProviderの外で呼び出されました");
        AppError::Context("use_authはAuthProviderの内側で使用する必要があります".to_string())
    })
}
