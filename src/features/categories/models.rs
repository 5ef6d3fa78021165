use serde::{Deserialize, Serialize};

/// カテゴリーデータモデル（参照専用）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}
