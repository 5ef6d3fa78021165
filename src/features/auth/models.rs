use serde::{Deserialize, Serialize};

/// ログインレスポンス
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// ユーザー登録用DTO
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegisterDto {
    pub username: String,
    pub password: String,
}

/// ログイン中のユーザー（`/users/me`）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentUser {
    pub username: String,
}
