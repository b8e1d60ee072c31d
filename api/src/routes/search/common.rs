use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductParams {
    pub q: Option<String>,
    pub category_id: Option<i64>,
    pub vendor_id: Option<i64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryParams {
    pub q: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VendorParams {
    pub q: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderParams {
    pub q: Option<String>,
    pub status: Option<String>,
    pub min_total: Option<f64>,
    pub max_total: Option<f64>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GlobalParams {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PopularParams {
    pub limit: Option<u64>,
    pub days: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SaveSearchRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub query: String,
    pub filters: Option<Value>,
}

/// Which end of a day a bare `YYYY-MM-DD` date stands for.
#[derive(Debug, Clone, Copy)]
pub enum DayEdge {
    Start,
    End,
}

/// Parses an RFC 3339 timestamp or a bare date. Bare dates cover the whole
/// day, so `dateTo=2025-03-01` includes orders placed that afternoon.
pub fn parse_date_bound(raw: &str, edge: DayEdge) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let time = match edge {
        DayEdge::Start => NaiveTime::MIN,
        DayEdge::End => NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?,
    };
    Some(date.and_time(time).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn bare_dates_cover_the_whole_day() {
        let from = parse_date_bound("2025-03-01", DayEdge::Start).unwrap();
        let to = parse_date_bound("2025-03-01", DayEdge::End).unwrap();
        assert_eq!(from, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(to.hour(), 23);
        assert!(to > from);
    }

    #[test]
    fn timestamps_are_normalised_to_utc() {
        let ts = parse_date_bound("2025-03-01T10:00:00+03:00", DayEdge::Start).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 3, 1, 7, 0, 0).unwrap());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_date_bound("last tuesday", DayEdge::End).is_none());
    }
}
