use crate::shared::utils::derive_profit;
use serde::{Deserialize, Deserializer, Serialize};

/// エントリー（収入・支出の明細）データモデル
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Entry {
    pub id: i64,
    /// Unix秒
    #[serde(deserialize_with = "deserialize_unix_seconds")]
    pub date: i64,
    pub revenue: f64,
    pub cost: f64,
    #[serde(default)]
    pub cat_id: Option<i64>,
    #[serde(default)]
    pub file_id: Option<i64>,
    pub year_id: i64,
}

impl Entry {
    /// 明細の利益（収入 − 支出）
    pub fn profit(&self) -> f64 {
        derive_profit(self.revenue, self.cost)
    }
}

/// エントリー作成・更新用DTO
///
/// `file_id` はファイル未添付の場合もnullとして送信する
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CreateEntryDto {
    pub revenue: f64,
    pub cost: f64,
    pub date: i64,
    pub year_id: i64,
    pub cat_id: i64,
    pub file_id: Option<i64>,
}

/// サーバーは日付を文字列カラムで保持しているため、整数と数値文字列の両方を受け付ける
fn deserialize_unix_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    match RawDate::deserialize(deserializer)? {
        RawDate::Integer(seconds) => Ok(seconds),
        // 小数部は切り捨て
        RawDate::Float(seconds) => Ok(seconds.trunc() as i64),
        RawDate::Text(text) => {
            let trimmed = text.trim();
            trimmed
                .parse::<i64>()
                .or_else(|_| trimmed.parse::<f64>().map(|seconds| seconds.trunc() as i64))
                .map_err(|_| serde::de::Error::custom(format!("不正な日付の値です: {text}")))
        }
    }
}
