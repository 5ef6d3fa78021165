use crate::shared::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};

/// 日付入力欄の形式
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// カレンダー日付をUnix秒（UTC 0時）に変換する
///
/// タイムゾーンはUTCに固定し、日付の往復変換でずれが出ないようにする
pub fn date_to_unix_seconds(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|datetime| datetime.and_utc().timestamp())
        .unwrap_or_default()
}

/// Unix秒をカレンダー日付（UTC）に変換する
///
/// # 戻り値
/// 表現できない値の場合はNone
pub fn unix_seconds_to_date(seconds: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(seconds, 0).map(|datetime| datetime.date_naive())
}

/// 日付入力値（YYYY-MM-DD）を解析する
///
/// 日付入力欄の制約に相当する。空文字は必須項目の未入力として扱う
pub fn parse_date_input(value: &str) -> AppResult<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("日付は必須項目です"));
    }

    NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT)
        .map_err(|_| AppError::validation("日付はYYYY-MM-DD形式で入力してください"))
}

/// Unix秒を日付入力欄の表示値に変換する（0は未入力）
pub fn date_input_value(seconds: i64) -> String {
    if seconds == 0 {
        return String::new();
    }
    format_date(seconds)
}

/// 一覧表示用の日付フォーマット
pub fn format_date(seconds: i64) -> String {
    unix_seconds_to_date(seconds)
        .map(|date| date.format(DATE_INPUT_FORMAT).to_string())
        .unwrap_or_else(|| format!("不正な日付({seconds})"))
}

/// 金額を小数点以下2桁の文字列にする
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// ユーロ表記の金額
pub fn format_euro(amount: f64) -> String {
    format!("{}€", format_amount(amount))
}

/// 利益（収入 − 支出）を算出する
///
/// 明細行の利益表示はすべてこの関数を通す
pub fn derive_profit(revenue: f64, cost: f64) -> f64 {
    revenue - cost
}

/// 数値入力値を解析する
///
/// 数値入力欄（step=0.01, required）の制約に相当する
pub fn parse_amount_input(value: &str, field_name: &str) -> AppResult<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field_name}は必須項目です")));
    }

    let amount: f64 = trimmed
        .parse()
        .map_err(|_| AppError::validation(format!("{field_name}は数値で入力してください")))?;

    if !amount.is_finite() {
        return Err(AppError::validation(format!("{field_name}が不正な値です")));
    }

    Ok(amount)
}
