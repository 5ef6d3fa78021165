pub mod cli;
pub mod features;
pub mod shared;

use clap::Parser;
use cli::Cli;
use features::auth::context::AuthProvider;
use features::auth::session_store::{FileSessionStore, SessionStore};
use log::{info, warn};
use shared::api_client::ApiClient;
use shared::config::{
    initialize_logging_system, load_environment_variables, ApiConfig, EnvironmentConfig,
    StorageConfig,
};
use shared::download::{DirectorySaver, FileSaver};
use shared::errors::AppResult;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 設定を読み込み、コマンドを1つ実行して表示内容を返す
pub async fn run() -> AppResult<String> {
    let dotenv_path = load_environment_variables();
    let env_config = EnvironmentConfig::from_env();
    initialize_logging_system(&env_config);
    if let Some(path) = dotenv_path {
        info!(".envファイルを読み込みました: {}", path.display());
    }

    let cli = Cli::parse();

    let api_config = ApiConfig::from_env();
    let storage_config = StorageConfig::from_env();
    info!(
        "アプリケーションを初期化しています: environment={}, api_url={}",
        env_config.environment.as_str(),
        api_config.base_url
    );
    if env_config.is_production() && api_config.is_localhost() {
        warn!("本番環境でローカルのAPIサーバーを使用しています: {}", api_config.base_url);
    }

    let session: Arc<dyn SessionStore> =
        Arc::new(FileSessionStore::new(storage_config.session_store_path));
    let saver: Arc<dyn FileSaver> = Arc::new(DirectorySaver::new(storage_config.download_dir));
    let client = ApiClient::new(api_config, Arc::clone(&session), saver)?;
    let provider = AuthProvider::new(session)?;

    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("中断を受け付けました");
                cancel.cancel();
            }
        })
    };

    let result = cli::execute(cli.command, &client, &provider, &cancel).await;
    watcher.abort();
    result
}
