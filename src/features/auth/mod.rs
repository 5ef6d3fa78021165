// 認証機能モジュール

pub mod api_commands;
pub mod context;
pub mod models;
pub mod session_store;

// 公開インターフェース
pub use context::{use_auth, AuthContext, AuthProvider};
pub use models::{CurrentUser, LoginResponse, RegisterDto};
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore, SessionStoreKeys};
