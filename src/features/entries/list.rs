/// 取引記録一覧の表示
use crate::features::entries::models::Entry;
use crate::shared::utils::{format_date, format_euro};

/// 一覧の1行分の表示値
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    pub date: String,
    pub revenue: String,
    pub cost: String,
    pub profit: String,
    /// 添付ファイルがある場合のダウンロード操作
    pub download: Option<String>,
}

impl From<&Entry> for EntryRow {
    fn from(entry: &Entry) -> Self {
        Self {
            date: format_date(entry.date),
            revenue: format_euro(entry.revenue),
            cost: format_euro(entry.cost),
            profit: format_euro(entry.profit()),
            download: entry.file_id.map(|id| format!("yatt download {id}")),
        }
    }
}

pub struct EntryList<'a> {
    entries: &'a [Entry],
}

impl<'a> EntryList<'a> {
    pub fn new(entries: &'a [Entry]) -> Self {
        Self { entries }
    }

    pub fn rows(&self) -> Vec<EntryRow> {
        self.entries.iter().map(EntryRow::from).collect()
    }

    pub fn render(&self) -> String {
        self.rows()
            .iter()
            .map(|row| {
                let mut text = format!(
                    "Date: {}  Total Revenue: {}  Total Cost: {}  Total Profit: {}",
                    row.date, row.revenue, row.cost, row.profit
                );
                if let Some(download) = &row.download {
                    text.push_str(&format!("  [Download: {download}]"));
                }
                text
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::utils::date_to_unix_seconds;
    use chrono::NaiveDate;

    fn entry(revenue: f64, cost: f64, file_id: Option<i64>) -> Entry {
        Entry {
            id: 1,
            date: date_to_unix_seconds(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()),
            revenue,
            cost,
            cat_id: Some(1),
            file_id,
            year_id: 1,
        }
    }

    #[test]
    fn test_row_formats_amounts_with_two_decimals() {
        let entries = vec![entry(100.0, 40.5, None)];
        let rows = EntryList::new(&entries).rows();

        assert_eq!(
            rows[0],
            EntryRow {
                date: "2023-12-31".to_string(),
                revenue: "100.00€".to_string(),
                cost: "40.50€".to_string(),
                profit: "59.50€".to_string(),
                download: None,
            }
        );
    }

    #[test]
    fn test_negative_profit() {
        let entries = vec![entry(10.0, 25.25, None)];
        assert_eq!(EntryList::new(&entries).rows()[0].profit, "-15.25€");
    }

    #[test]
    fn test_download_action_only_with_file() {
        let entries = vec![entry(1.0, 0.0, Some(9)), entry(1.0, 0.0, None)];
        let list = EntryList::new(&entries);
        let rows = list.rows();

        assert_eq!(rows[0].download.as_deref(), Some("yatt download 9"));
        assert_eq!(rows[1].download, None);
        assert!(list.render().lines().next().unwrap().ends_with("[Download: yatt download 9]"));
    }
}
