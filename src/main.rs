use log::{error, warn};
use std::process::ExitCode;
use yatt_lib::shared::errors::ErrorSeverity;

#[tokio::main]
async fn main() -> ExitCode {
    match yatt_lib::run().await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            if e.severity() >= ErrorSeverity::High {
                error!("コマンドの実行に失敗しました: {e}");
            } else {
                warn!("コマンドの実行に失敗しました: {e}");
            }
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
