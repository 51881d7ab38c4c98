//! 时间工具函数 — 业务时区转换
//!
//! 所有日期→时间戳转换统一在 API handler / 领域层完成，
//! repository 层只接收 `i64` Unix millis。

use chrono::{NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 解析时刻字符串 (HH:MM)，失败返回 None
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// 解析 IANA 时区名，失败 fallback 到 UTC
pub fn parse_tz(name: &str) -> Tz {
    name.parse().unwrap_or_else(|_| {
        tracing::warn!("Unknown timezone '{}', falling back to UTC", name);
        chrono_tz::UTC
    })
}

/// 日期 + 时刻 → Unix millis (业务时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
pub fn date_time_to_millis(date: NaiveDate, time: NaiveTime, tz: Tz) -> i64 {
    let naive = date.and_time(time);
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期开始 (00:00:00) → Unix millis (业务时区)
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_time_to_millis(date, NaiveTime::MIN, tz)
}

/// 日期结束 → 次日 00:00:00 的 Unix millis (业务时区)
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    date_time_to_millis(next_day, NaiveTime::MIN, tz)
}

/// Unix millis → 业务时区的本地日期
pub fn millis_to_local_date(millis: i64, tz: Tz) -> NaiveDate {
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.date_naive())
        .unwrap_or_else(|| chrono::Utc::now().with_timezone(&tz).date_naive())
}

/// Unix millis → "YYYY-MM-DD HH:MM" (业务时区，CSV/邮件展示用)
pub fn format_local(millis: i64, tz: Tz) -> String {
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2026-05-01").is_ok());
        assert!(parse_date("05/01/2026").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn day_bounds_are_24h_apart_outside_dst() {
        let tz: Tz = "UTC".parse().unwrap();
        let d = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        assert_eq!(day_end_millis(d, tz) - day_start_millis(d, tz), 86_400_000);
    }

    #[test]
    fn local_date_round_trip() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let d = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();
        let noon = date_time_to_millis(d, NaiveTime::from_hms_opt(12, 0, 0).unwrap(), tz);
        assert_eq!(millis_to_local_date(noon, tz), d);
    }
}
