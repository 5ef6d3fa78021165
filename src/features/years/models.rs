use serde::{Deserialize, Serialize};

/// 年作成フォームで入力できる最小の年
pub const MIN_YEAR: i32 = 2010;
/// 年作成フォームで入力できる最大の年
pub const MAX_YEAR: i32 = 2024;

/// 年度データモデル（エントリーの入れ物）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Year {
    pub id: i64,
    pub year: i32,
}

/// 年度作成用DTO
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CreateYearDto {
    pub year: i32,
}

/// 年度の利益レスポンス（サーバー側で集計済み）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProfitResponse {
    pub profit: f64,
}
