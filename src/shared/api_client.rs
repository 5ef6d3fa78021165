/// 汎用APIクライアント
///
/// 帳簿APIサーバーとの通信を行う。認証付きのリクエストには
/// セッションストアのトークンを `Authorization: Bearer` として付与する。
use crate::features::auth::session_store::SessionStore;
use crate::shared::config::ApiConfig;
use crate::shared::download::FileSaver;
use crate::shared::errors::{AppError, AppResult};
use log::{debug, error, info, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{multipart, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// APIサーバーからのエラーレスポンス（FastAPI形式）
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: serde_json::Value,
}

impl ErrorResponse {
    fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// `{"data": ...}` でネストされたレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// ネストされていてもいなくても受け付けるレスポンス
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MaybeWrapped<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> MaybeWrapped<T> {
    pub fn into_inner(self) -> T {
        match self {
            MaybeWrapped::Wrapped { data } => data,
            MaybeWrapped::Bare(value) => value,
        }
    }
}

/// メッセージのみのレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// 汎用APIクライアント
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
    session: Arc<dyn SessionStore>,
    saver: Arc<dyn FileSaver>,
}

impl ApiClient {
    /// 設定を指定してAPIクライアントを作成
    pub fn new(
        config: ApiConfig,
        session: Arc<dyn SessionStore>,
        saver: Arc<dyn FileSaver>,
    ) -> AppResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self {
            client,
            config,
            session,
            saver,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// エンドポイントの完全なURL
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url)
    }

    /// リクエストを組み立てる（`authorized` の場合はトークンがあれば付与）
    fn request(&self, method: Method, endpoint: &str, authorized: bool) -> AppResult<RequestBuilder> {
        let mut request = self.client.request(method, self.url(endpoint));

        if authorized {
            match self.session.token()? {
                Some(token) if !token.is_empty() => {
                    request = request.header(AUTHORIZATION, format!("Bearer {token}"));
                }
                _ => debug!("トークン未保存のためAuthorizationヘッダーなしで送信: {endpoint}"),
            }
        }

        Ok(request)
    }

    /// GETリクエストを送信
    pub async fn get<T>(&self, endpoint: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");
        let request = self.request(Method::GET, endpoint, true)?;
        self.send_json(request, "GET", endpoint).await
    }

    /// POSTリクエストを送信
    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        info!("POSTリクエスト送信: endpoint={endpoint}");
        let request = self.request(Method::POST, endpoint, true)?.json(body);
        self.send_json(request, "POST", endpoint).await
    }

    /// トークンを付与せずにPOSTリクエストを送信
    pub async fn post_anonymous<B, T>(&self, endpoint: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        info!("POSTリクエスト送信（認証なし）: endpoint={endpoint}");
        let request = self.request(Method::POST, endpoint, false)?.json(body);
        self.send_json(request, "POST", endpoint).await
    }

    /// トークンを付与せずにフォーム形式でPOSTリクエストを送信
    pub async fn post_form_anonymous<T>(&self, endpoint: &str, form: &[(&str, &str)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("フォームPOSTリクエスト送信（認証なし）: endpoint={endpoint}");
        let request = self.request(Method::POST, endpoint, false)?.form(form);
        self.send_json(request, "POST", endpoint).await
    }

    /// マルチパート形式でPOSTリクエストを送信
    pub async fn post_multipart<T>(&self, endpoint: &str, form: multipart::Form) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("マルチパートPOSTリクエスト送信: endpoint={endpoint}");
        let request = self.request(Method::POST, endpoint, true)?.multipart(form);
        self.send_json(request, "POST", endpoint).await
    }

    /// PUTリクエストを送信
    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        info!("PUTリクエスト送信: endpoint={endpoint}");
        let request = self.request(Method::PUT, endpoint, true)?.json(body);
        self.send_json(request, "PUT", endpoint).await
    }

    /// DELETEリクエストを送信
    pub async fn delete<T>(&self, endpoint: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("DELETEリクエスト送信: endpoint={endpoint}");
        let request = self.request(Method::DELETE, endpoint, true)?;
        self.send_json(request, "DELETE", endpoint).await
    }

    /// バイナリを取得して `filename` で一度だけ保存する
    pub async fn download(&self, endpoint: &str, accept: &str, filename: &str) -> AppResult<PathBuf> {
        info!("ダウンロード開始: endpoint={endpoint}, accept={accept}");

        let request = self
            .request(Method::GET, endpoint, true)?
            .header(ACCEPT, accept);
        let response = self.send(request, "GET", endpoint).await?;
        let bytes = response.bytes().await.map_err(|e| {
            error!("ダウンロードデータの受信に失敗しました: {e}");
            AppError::Network(format!("レスポンス受信エラー: {e}"))
        })?;

        let path = self.saver.save(filename, &bytes)?;
        info!("ダウンロード完了: endpoint={endpoint}, path={}", path.display());
        Ok(path)
    }

    async fn send_json<T>(&self, request: RequestBuilder, method: &str, endpoint: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request, method, endpoint).await?;
        let body = response.bytes().await.map_err(|e| {
            AppError::Network(format!("レスポンス受信エラー: {e}"))
        })?;

        let result = serde_json::from_slice(&body).map_err(|e| {
            error!("レスポンス解析エラー: endpoint={endpoint}, error={e}");
            AppError::Json(e)
        })?;

        info!("{method}リクエスト成功: endpoint={endpoint}");
        Ok(result)
    }

    /// リクエストを送信し、2xx以外はHTTPエラーにする（リトライはしない）
    async fn send(&self, request: RequestBuilder, method: &str, endpoint: &str) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            error!("APIサーバーへの接続に失敗しました: {method} {endpoint}: {e}");
            AppError::Network(format!("APIサーバーへの接続に失敗しました: {e}"))
        })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::handle_error_response(response, method, endpoint).await)
        }
    }

    /// エラーレスポンスをステータスコード付きのHTTPエラーに変換
    async fn handle_error_response(response: Response, method: &str, endpoint: &str) -> AppError {
        let status_code = response.status().as_u16();
        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| "レスポンス読み取り失敗".to_string());

        let message = match serde_json::from_str::<ErrorResponse>(&response_text) {
            Ok(error_response) => {
                debug!(
                    "APIサーバーから構造化エラーレスポンスを受信: status={status_code}, detail={}",
                    error_response.detail
                );
                error_response.message()
            }
            Err(_) => {
                warn!(
                    "APIサーバーから非構造化エラーレスポンス: status={status_code}, body={response_text}"
                );
                generic_status_message(status_code).to_string()
            }
        };

        error!("{method}リクエスト失敗: endpoint={endpoint}, status={status_code}, message={message}");
        AppError::http(status_code, message)
    }
}

/// ステータスコードごとの汎用メッセージ
fn generic_status_message(status_code: u16) -> &'static str {
    match status_code {
        400 => "リクエストの形式が正しくありません",
        401 => "認証に失敗しました。再度ログインしてください",
        403 => "この操作を実行する権限がありません",
        404 => "指定されたリソースが見つかりません",
        413 => "データサイズが制限を超えています",
        415 => "サポートされていないデータ形式です",
        422 => "入力内容に誤りがあります",
        429 => "リクエストが多すぎます。しばらく待ってから再試行してください",
        500 => "サーバー内部エラーが発生しました",
        502 => "APIサーバーとの通信でエラーが発生しました",
        503 => "APIサーバーが一時的に利用できません",
        504 => "APIサーバーからの応答がタイムアウトしました",
        _ => "不明なエラーが発生しました",
    }
}
