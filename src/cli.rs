/// コマンドライン（ターミナル画面）
///
/// login/register 以外のコマンドは `AuthProvider::provide` のスコープ内で実行し、
/// 未認証の場合は何も送信せずにエラーを返す。
use crate::features::api::BookkeepingApi;
use crate::features::auth::context::{use_auth, AuthProvider};
use crate::features::exports::ExportFormat;
use crate::features::pages::{HomePage, YearPage};
use crate::features::receipts::models::AttachedFile;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::parse_date_input;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Yet Another Tax Tool for Small Businesses
#[derive(Parser, Debug)]
#[command(name = "yatt", version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session token.
    Login {
        username: String,
        /// Prompted for when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Create a new account.
    Register {
        username: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Log out and remove the stored session token.
    Logout,
    /// Show the logged in user.
    Whoami,
    /// Manage years.
    #[command(subcommand)]
    Years(YearsCommand),
    /// Show a year with its entries and total profit.
    Year { year_id: i64 },
    /// Manage entries of a year.
    #[command(subcommand)]
    Entries(EntriesCommand),
    /// List the categories available for entries.
    Categories,
    /// Download an attached receipt file.
    Download { file_id: i64 },
    /// Export a year as CSV or PDF.
    Export {
        #[arg(value_enum)]
        format: ExportFormatArg,
        year_id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum YearsCommand {
    List,
    Add { year: String },
    Delete { year_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum EntriesCommand {
    Add {
        year_id: i64,
        #[arg(long)]
        revenue: String,
        #[arg(long)]
        cost: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long, default_value_t = 1)]
        category: i64,
        /// Receipt to upload before the entry is created.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    Delete { year_id: i64, entry_id: i64 },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormatArg {
    Csv,
    Pdf,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(value: ExportFormatArg) -> Self {
        match value {
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Pdf => ExportFormat::Pdf,
        }
    }
}

fn read_password(provided: Option<String>) -> AppResult<String> {
    match provided {
        Some(password) => Ok(password),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}

/// コマンドを実行し、表示する文字列を返す
pub async fn execute(
    command: Command,
    api: &dyn BookkeepingApi,
    provider: &AuthProvider,
    cancel: &CancellationToken,
) -> AppResult<String> {
    match command {
        Command::Login { username, password } => {
            let password = read_password(password)?;
            api.login(&username, &password).await?;
            provider.context().set_authenticated(true);
            info!("ログインしました: username={username}");
            Ok(format!("Logged in as {username}."))
        }
        Command::Register { username, password } => {
            let password = read_password(password)?;
            api.register(&username, &password).await?;
            Ok(format!("Registered {username}. You can now log in."))
        }
        command => {
            provider
                .provide(async move {
                    let auth = use_auth()?;
                    auth.require_authenticated()?;
                    let output = execute_authenticated(command, api, cancel).await?;
                    if !auth.session().has_token()? {
                        auth.set_authenticated(false);
                    }
                    Ok::<String, AppError>(output)
                })
                .await
        }
    }
}

async fn execute_authenticated(
    command: Command,
    api: &dyn BookkeepingApi,
    cancel: &CancellationToken,
) -> AppResult<String> {
    match command {
        Command::Logout => {
            api.logout().await?;
            Ok("Logged out.".to_string())
        }
        Command::Whoami => Ok(api.current_user().await?.username),
        Command::Years(YearsCommand::List) => {
            let mut page = HomePage::new();
            page.load(api).await;
            Ok(page.render())
        }
        Command::Years(YearsCommand::Add { year }) => {
            let mut page = HomePage::new();
            page.add_year(api, &year).await?;
            Ok(page.render())
        }
        Command::Years(YearsCommand::Delete { year_id }) => {
            api.delete_year(year_id).await?;
            Ok(format!("Deleted year {year_id}."))
        }
        Command::Year { year_id } => {
            let mut page = YearPage::new(year_id);
            page.load(api, cancel).await?;
            Ok(page.render())
        }
        Command::Entries(EntriesCommand::Add {
            year_id,
            revenue,
            cost,
            date,
            category,
            file,
        }) => {
            let mut page = YearPage::new(year_id);
            page.load(api, cancel).await?;

            let form = &mut page.entry_form;
            form.set_revenue(&revenue)?;
            form.set_cost(&cost)?;
            form.set_date(parse_date_input(&date)?);
            form.set_category(category)?;
            if let Some(path) = file {
                form.set_file(Some(AttachedFile::from_path(&path)?));
            }

            page.submit_entry(api).await?;
            Ok(page.render())
        }
        Command::Entries(EntriesCommand::Delete { year_id, entry_id }) => {
            api.delete_entry(year_id, entry_id).await?;
            Ok(format!("Deleted entry {entry_id} of year {year_id}."))
        }
        Command::Categories => {
            let categories = api.get_categories().await?;
            Ok(categories
                .iter()
                .map(|c| format!("{}: {}", c.id, c.name))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Command::Download { file_id } => {
            let path = api.download_file(file_id).await?;
            Ok(format!("Saved {}", path.display()))
        }
        Command::Export { format, year_id } => {
            let path = api.export_year(year_id, format.into()).await?;
            Ok(format!("Saved {}", path.display()))
        }
        Command::Login { .. } | Command::Register { .. } => Err(AppError::Context(
            "login/registerは認証スコープ外で実行してください".to_string(),
        )),
    }
}
