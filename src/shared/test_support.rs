//! テスト用のスタブHTTPサーバーと記録用フェイク
//!
//! `StubServer` は127.0.0.1の空きポートで待ち受け、受信したリクエストを記録して
//! 登録済みのレスポンスを返す。

use crate::features::api::BookkeepingApi;
use crate::features::auth::models::{CurrentUser, LoginResponse};
use crate::features::auth::session_store::SessionStore;
use crate::features::categories::models::Category;
use crate::features::entries::models::{CreateEntryDto, Entry};
use crate::features::exports::ExportFormat;
use crate::features::receipts::models::AttachedFile;
use crate::features::years::models::{CreateYearDto, Year};
use crate::shared::api_client::ApiClient;
use crate::shared::config::ApiConfig;
use crate::shared::download::FileSaver;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// スタブサーバーが受信したリクエスト
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// 登録済みレスポンス
#[derive(Debug, Clone)]
pub struct StubResponse {
    method: String,
    path: String,
    status: u16,
    content_type: String,
    body: Vec<u8>,
}

impl StubResponse {
    pub fn json(method: &str, path: &str, status: u16, body: &str) -> Self {
        Self::text(method, path, status, "application/json", body)
    }

    pub fn text(method: &str, path: &str, status: u16, content_type: &str, body: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            status,
            content_type: content_type.to_string(),
            body: body.as_bytes().to_vec(),
        }
    }
}

/// テスト用スタブHTTPサーバー
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: tokio::task::JoinHandle<()>,
}

impl StubServer {
    /// サーバーをバックグラウンドで開始する
    pub async fn start(routes: Vec<StubResponse>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes = Arc::new(routes);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let task = {
            let requests = Arc::clone(&requests);
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    let routes = Arc::clone(&routes);
                    let requests = Arc::clone(&requests);
                    tokio::spawn(async move {
                        let service = service_fn(move |req| {
                            handle_request(req, Arc::clone(&routes), Arc::clone(&requests))
                        });
                        if let Err(err) = http1::Builder::new()
                            .serve_connection(TokioIo::new(stream), service)
                            .await
                        {
                            log::debug!("スタブサーバー接続エラー: {err}");
                        }
                    });
                }
            })
        };

        Self {
            addr,
            requests,
            task,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// 何も待ち受けていないURL
    pub fn unreachable_base_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}")
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle_request(
    req: Request<Incoming>,
    routes: Arc<Vec<StubResponse>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let headers = req
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_lowercase(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes().to_vec(),
        Err(_) => Vec::new(),
    };

    requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        headers,
        body,
    });

    let response = match routes
        .iter()
        .find(|route| route.method == method && route.path == path)
    {
        Some(route) => Response::builder()
            .status(route.status)
            .header("Content-Type", route.content_type.as_str())
            .body(Full::new(Bytes::from(route.body.clone()))),
        None => Response::builder()
            .status(404)
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from_static(br#"{"detail": "Not Found"}"#))),
    };

    Ok(response.unwrap())
}

/// 保存内容を記録するFileSaver
#[derive(Default)]
pub struct RecordingSaver {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingSaver {
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }
}

impl FileSaver for RecordingSaver {
    fn save(&self, filename: &str, content: &[u8]) -> AppResult<PathBuf> {
        self.saved
            .lock()
            .unwrap()
            .push((filename.to_string(), content.to_vec()));
        Ok(PathBuf::from(filename))
    }
}

/// スタブサーバー向けのApiClientを作成する
pub fn stub_client(
    server: &StubServer,
    session: Arc<dyn SessionStore>,
) -> (ApiClient, Arc<RecordingSaver>) {
    let saver = Arc::new(RecordingSaver::default());
    let client = stub_client_with_saver(server, session, saver.clone());
    (client, saver)
}

pub fn stub_client_with_saver(
    server: &StubServer,
    session: Arc<dyn SessionStore>,
    saver: Arc<dyn FileSaver>,
) -> ApiClient {
    ApiClient::new(
        ApiConfig {
            base_url: server.base_url(),
            timeout_seconds: 5,
        },
        session,
        saver,
    )
    .unwrap()
}

/// 接続できないサーバー向けのApiClientを作成する
pub fn unreachable_client(session: Arc<dyn SessionStore>) -> (ApiClient, Arc<RecordingSaver>) {
    let saver = Arc::new(RecordingSaver::default());
    let client = ApiClient::new(
        ApiConfig {
            base_url: StubServer::unreachable_base_url(),
            timeout_seconds: 2,
        },
        session,
        saver.clone(),
    )
    .unwrap();
    (client, saver)
}

/// RecordingApiが受けた呼び出し
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Login(String),
    Register(String),
    Logout,
    CurrentUser,
    GetYears,
    CreateYear(i32),
    DeleteYear(i64),
    GetProfit(i64),
    GetEntries(i64),
    GetEntry(i64, i64),
    CreateEntry(CreateEntryDto),
    UpdateEntry(i64, CreateEntryDto),
    DeleteEntry(i64, i64),
    GetCategories,
    UploadFile(String),
    DownloadFile(i64),
    ExportYear(i64, ExportFormat),
}

/// 呼び出しを記録するBookkeepingApiのフェイク
#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<ApiCall>>,
    failing: Mutex<Vec<&'static str>>,
    pub years: Mutex<Vec<Year>>,
    pub entries: Mutex<Vec<Entry>>,
    pub categories: Mutex<Vec<Category>>,
    pub profit: Mutex<f64>,
    pub next_file_id: Mutex<i64>,
    /// get_entriesの応答直前にキャンセルするトークン
    pub cancel_during_get_entries: Mutex<Option<CancellationToken>>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self {
            next_file_id: Mutex::new(100),
            ..Self::default()
        }
    }

    /// 指定した操作を失敗させる（例: "create_entry"）
    pub fn fail_on(&self, operation: &'static str) {
        self.failing.lock().unwrap().push(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failing.lock().unwrap().retain(|op| *op != operation);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, operation: &'static str, call: ApiCall) -> AppResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(&operation) {
            return Err(AppError::http(500, format!("{operation} failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl BookkeepingApi for RecordingApi {
    async fn login(&self, username: &str, _password: &str) -> AppResult<LoginResponse> {
        self.record("login", ApiCall::Login(username.to_string()))?;
        Ok(LoginResponse {
            access_token: format!("token-for-{username}"),
            token_type: Some("bearer".to_string()),
        })
    }

    async fn register(&self, username: &str, _password: &str) -> AppResult<()> {
        self.record("register", ApiCall::Register(username.to_string()))
    }

    async fn logout(&self) -> AppResult<()> {
        self.record("logout", ApiCall::Logout)
    }

    async fn current_user(&self) -> AppResult<CurrentUser> {
        self.record("current_user", ApiCall::CurrentUser)?;
        Ok(CurrentUser {
            username: "tester".to_string(),
        })
    }

    async fn get_years(&self) -> AppResult<Vec<Year>> {
        self.record("get_years", ApiCall::GetYears)?;
        Ok(self.years.lock().unwrap().clone())
    }

    async fn create_year(&self, dto: &CreateYearDto) -> AppResult<Year> {
        self.record("create_year", ApiCall::CreateYear(dto.year))?;
        let mut years = self.years.lock().unwrap();
        let year = Year {
            id: years.len() as i64 + 1,
            year: dto.year,
        };
        years.push(year.clone());
        Ok(year)
    }

    async fn delete_year(&self, year_id: i64) -> AppResult<()> {
        self.record("delete_year", ApiCall::DeleteYear(year_id))?;
        self.years.lock().unwrap().retain(|year| year.id != year_id);
        Ok(())
    }

    async fn get_profit(&self, year_id: i64) -> AppResult<f64> {
        self.record("get_profit", ApiCall::GetProfit(year_id))?;
        Ok(*self.profit.lock().unwrap())
    }

    async fn get_entries(&self, year_id: i64) -> AppResult<Vec<Entry>> {
        self.record("get_entries", ApiCall::GetEntries(year_id))?;
        if let Some(token) = self.cancel_during_get_entries.lock().unwrap().as_ref() {
            token.cancel();
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.year_id == year_id)
            .cloned()
            .collect())
    }

    async fn get_entry(&self, year_id: i64, entry_id: i64) -> AppResult<Entry> {
        self.record("get_entry", ApiCall::GetEntry(year_id, entry_id))?;
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|entry| entry.id == entry_id)
            .cloned()
            .ok_or_else(|| AppError::http(404, "Entry not found"))
    }

    async fn create_entry(&self, dto: &CreateEntryDto) -> AppResult<Entry> {
        self.record("create_entry", ApiCall::CreateEntry(dto.clone()))?;
        let mut entries = self.entries.lock().unwrap();
        let entry = Entry {
            id: entries.len() as i64 + 1,
            date: dto.date,
            revenue: dto.revenue,
            cost: dto.cost,
            cat_id: Some(dto.cat_id),
            file_id: dto.file_id,
            year_id: dto.year_id,
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn update_entry(&self, entry_id: i64, dto: &CreateEntryDto) -> AppResult<Entry> {
        self.record("update_entry", ApiCall::UpdateEntry(entry_id, dto.clone()))?;
        Ok(Entry {
            id: entry_id,
            date: dto.date,
            revenue: dto.revenue,
            cost: dto.cost,
            cat_id: Some(dto.cat_id),
            file_id: dto.file_id,
            year_id: dto.year_id,
        })
    }

    async fn delete_entry(&self, year_id: i64, entry_id: i64) -> AppResult<()> {
        self.record("delete_entry", ApiCall::DeleteEntry(year_id, entry_id))?;
        self.entries.lock().unwrap().retain(|entry| entry.id != entry_id);
        Ok(())
    }

    async fn get_categories(&self) -> AppResult<Vec<Category>> {
        self.record("get_categories", ApiCall::GetCategories)?;
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn upload_file(&self, file: &AttachedFile) -> AppResult<i64> {
        self.record("upload_file", ApiCall::UploadFile(file.file_name.clone()))?;
        let mut next = self.next_file_id.lock().unwrap();
        let id = *next;
        *next += 1;
        Ok(id)
    }

    async fn download_file(&self, file_id: i64) -> AppResult<PathBuf> {
        self.record("download_file", ApiCall::DownloadFile(file_id))?;
        Ok(PathBuf::from(format!("file_{file_id}")))
    }

    async fn export_year(&self, year_id: i64, format: ExportFormat) -> AppResult<PathBuf> {
        self.record("export_year", ApiCall::ExportYear(year_id, format))?;
        Ok(PathBuf::from(format.filename(year_id)))
    }
}
