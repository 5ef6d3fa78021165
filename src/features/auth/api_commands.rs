/// API Server経由での認証操作
use crate::features::auth::models::{CurrentUser, LoginResponse, RegisterDto};
use crate::shared::api_client::{ApiClient, MessageResponse};
use crate::shared::errors::AppResult;
use log::{info, warn};

impl ApiClient {
    /// ユーザー名・パスワードをトークンと交換し、セッションストアに保存する
    ///
    /// フォーム形式（application/x-www-form-urlencoded）で送信する
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResponse> {
        let response: LoginResponse = self
            .post_form_anonymous("/login", &[("username", username), ("password", password)])
            .await?;

        self.session().set_token(&response.access_token)?;
        info!("ログイン成功: username={username}");
        Ok(response)
    }

    /// ユーザーを登録する
    pub async fn register(&self, username: &str, password: &str) -> AppResult<()> {
        let dto = RegisterDto {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: MessageResponse = self.post_anonymous("/register", &dto).await?;

        info!(
            "ユーザー登録成功: username={username}, message={}",
            response.message.unwrap_or_default()
        );
        Ok(())
    }

    /// ログアウトする
    ///
    /// サーバー側の応答に関係なくローカルのトークンは削除する
    pub async fn logout(&self) -> AppResult<()> {
        if let Err(e) = self.post::<_, MessageResponse>("/logout", &()).await {
            warn!("サーバー側のログアウトに失敗しました（ローカルのトークンは削除します）: {e}");
        }

        self.session().clear()?;
        info!("ログアウトしました");
        Ok(())
    }

    /// ログイン中のユーザーを取得する
    pub async fn current_user(&self) -> AppResult<CurrentUser> {
        self.get("/users/me").await
    }
}
