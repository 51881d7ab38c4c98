//! Dashboard 分析聚合
//!
//! 对已取出的预订行做纯同步 reduce：无流式、无增量更新。
//! 所有函数接收显式 `now`，保证可测试。

use chrono::{Datelike, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use shared::booking::{BookingStatus, PaymentStatus};
use shared::models::Booking;

/// 汇总卡片
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overview {
    pub total_bookings: i64,
    pub upcoming: i64,
    pub completed: i64,
    pub cancelled: i64,
    /// 已收款（定金 + 已结清的尾款）
    pub collected_cents: i64,
    /// 未收尾款（仅统计非终态预订）
    pub outstanding_cents: i64,
}

/// 按月收入数据点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRevenue {
    /// "YYYY-MM" (船长时区)
    pub month: String,
    pub revenue_cents: i64,
}

/// 天气待定恢复率
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherRecovery {
    /// 曾进入天气待定的预订数
    pub held: i64,
    /// 其中最终改期/恢复/完成的数量
    pub recovered: i64,
    /// recovered / held，held 为 0 时取 0
    pub rate: f64,
}

/// 完整分析报表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub overview: Overview,
    pub revenue_by_month: Vec<MonthRevenue>,
    pub weather_recovery: WeatherRecovery,
    /// 回头客占比（邮箱出现 ≥2 次 / 去重邮箱数）
    pub repeat_customer_rate: f64,
    pub insights: Vec<String>,
}

/// 实际已收金额（分）
fn collected_cents(b: &Booking) -> i64 {
    match b.payment_status {
        PaymentStatus::FullyPaid => b.total_price_cents,
        PaymentStatus::DepositPaid => b.deposit_paid_cents,
        PaymentStatus::Unpaid | PaymentStatus::PendingVerification => 0,
    }
}

/// 曾进入天气待定（当前待定，或留有历史原因）
fn ever_weather_held(b: &Booking) -> bool {
    b.status == BookingStatus::WeatherHold || b.weather_hold_reason.is_some()
}

pub fn overview(bookings: &[Booking], now: i64) -> Overview {
    let mut o = Overview {
        total_bookings: bookings.len() as i64,
        upcoming: 0,
        completed: 0,
        cancelled: 0,
        collected_cents: 0,
        outstanding_cents: 0,
    };
    for b in bookings {
        match b.status {
            BookingStatus::Completed => o.completed += 1,
            BookingStatus::Cancelled => o.cancelled += 1,
            s if !s.is_terminal() && b.scheduled_start >= now => o.upcoming += 1,
            _ => {}
        }
        o.collected_cents += collected_cents(b);
        if !b.status.is_terminal() && b.payment_status == PaymentStatus::DepositPaid {
            o.outstanding_cents += b.balance_due_cents;
        }
    }
    o
}

/// 近 12 个月收入（含空月，时间升序）
///
/// 只统计 completed / confirmed 的预订，
/// 按 scheduled_start 的船长时区月份分桶。
pub fn revenue_by_month(bookings: &[Booking], tz: Tz, now: i64) -> Vec<MonthRevenue> {
    let today = tz
        .timestamp_millis_opt(now)
        .single()
        .map(|dt| dt.date_naive())
        .unwrap_or_else(|| chrono::Utc::now().with_timezone(&tz).date_naive());

    // 12 buckets ending with the current month
    let mut months: Vec<(i32, u32)> = Vec::with_capacity(12);
    let (mut year, mut month) = (today.year(), today.month());
    for _ in 0..12 {
        months.push((year, month));
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }
    months.reverse();

    let mut buckets: Vec<MonthRevenue> = months
        .iter()
        .map(|(y, m)| MonthRevenue {
            month: format!("{y:04}-{m:02}"),
            revenue_cents: 0,
        })
        .collect();

    for b in bookings {
        if !matches!(
            b.status,
            BookingStatus::Completed | BookingStatus::Confirmed
        ) {
            continue;
        }
        let Some(dt) = tz.timestamp_millis_opt(b.scheduled_start).single() else {
            continue;
        };
        let key = format!("{:04}-{:02}", dt.year(), dt.month());
        if let Some(bucket) = buckets.iter_mut().find(|x| x.month == key) {
            bucket.revenue_cents += collected_cents(b);
        }
    }

    buckets
}

pub fn weather_recovery(bookings: &[Booking]) -> WeatherRecovery {
    let mut held = 0;
    let mut recovered = 0;
    for b in bookings {
        if !ever_weather_held(b) {
            continue;
        }
        held += 1;
        if matches!(
            b.status,
            BookingStatus::Confirmed | BookingStatus::Rescheduled | BookingStatus::Completed
        ) {
            recovered += 1;
        }
    }
    let rate = if held > 0 {
        recovered as f64 / held as f64
    } else {
        0.0
    };
    WeatherRecovery {
        held,
        recovered,
        rate,
    }
}

pub fn repeat_customer_rate(bookings: &[Booking]) -> f64 {
    use std::collections::HashMap;
    let mut counts: HashMap<String, u32> = HashMap::new();
    for b in bookings {
        *counts.entry(b.guest_email.to_lowercase()).or_insert(0) += 1;
    }
    if counts.is_empty() {
        return 0.0;
    }
    let repeats = counts.values().filter(|&&c| c >= 2).count();
    repeats as f64 / counts.len() as f64
}

/// 从聚合结果生成洞察文案；数据不足时返回空
pub fn insights(
    overview: &Overview,
    revenue: &[MonthRevenue],
    recovery: &WeatherRecovery,
    repeat_rate: f64,
) -> Vec<String> {
    let mut out = Vec::new();

    if overview.total_bookings < 3 {
        return out;
    }

    if let Some(best) = revenue.iter().max_by_key(|m| m.revenue_cents) {
        if best.revenue_cents > 0 {
            out.push(format!(
                "Your busiest month was {} with {} collected.",
                best.month,
                crate::bookings::payment::format_usd(best.revenue_cents)
            ));
        }
    }

    if recovery.held > 0 {
        let pct = (recovery.rate * 100.0).round() as i64;
        if recovery.rate >= 0.5 {
            out.push(format!(
                "You rebooked {pct}% of weather-held trips — offering reschedules is working."
            ));
        } else {
            out.push(format!(
                "Only {pct}% of weather-held trips were rebooked; consider following up with reschedule offers."
            ));
        }
    }

    if repeat_rate >= 0.2 {
        let pct = (repeat_rate * 100.0).round() as i64;
        out.push(format!(
            "{pct}% of your guests have booked more than once."
        ));
    }

    if overview.outstanding_cents > 0 {
        out.push(format!(
            "{} in balances is still outstanding across upcoming trips.",
            crate::bookings::payment::format_usd(overview.outstanding_cents)
        ));
    }

    out
}

/// 一次性构建完整报表
pub fn build_report(bookings: &[Booking], tz: Tz, now: i64) -> AnalyticsReport {
    let overview = overview(bookings, now);
    let revenue = revenue_by_month(bookings, tz, now);
    let recovery = weather_recovery(bookings);
    let repeat = repeat_customer_rate(bookings);
    let insights = insights(&overview, &revenue, &recovery, repeat);
    AnalyticsReport {
        overview,
        revenue_by_month: revenue,
        weather_recovery: recovery,
        repeat_customer_rate: repeat,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const TZ: Tz = chrono_tz::UTC;

    fn millis(y: i32, m: u32, d: u32) -> i64 {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    fn booking(
        email: &str,
        start: i64,
        status: BookingStatus,
        payment: PaymentStatus,
        total: i64,
        deposit_paid: i64,
    ) -> Booking {
        Booking {
            id: shared::util::snowflake_id(),
            captain_id: 1,
            trip_type_id: 1,
            vessel_id: None,
            guest_name: "Guest".into(),
            guest_email: email.into(),
            guest_phone: None,
            scheduled_start: start,
            scheduled_end: start + 4 * 3_600_000,
            party_size: 4,
            status,
            payment_status: payment,
            total_price_cents: total,
            deposit_paid_cents: deposit_paid,
            balance_due_cents: total - deposit_paid,
            payment_reminder_count: 0,
            last_reminder_at: None,
            weather_hold_reason: None,
            original_start: None,
            internal_notes: None,
            tags: String::new(),
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn revenue_buckets_by_local_month() {
        let now = millis(2026, 8, 20);
        let rows = vec![
            booking(
                "a@x.com",
                millis(2026, 8, 5),
                BookingStatus::Completed,
                PaymentStatus::FullyPaid,
                50_000,
                20_000,
            ),
            booking(
                "b@x.com",
                millis(2026, 7, 10),
                BookingStatus::Confirmed,
                PaymentStatus::DepositPaid,
                50_000,
                20_000,
            ),
            // cancelled revenue is excluded
            booking(
                "c@x.com",
                millis(2026, 8, 9),
                BookingStatus::Cancelled,
                PaymentStatus::FullyPaid,
                99_000,
                0,
            ),
            // deposits on rescheduled / weather-held trips are not yet earned
            booking(
                "d@x.com",
                millis(2026, 8, 12),
                BookingStatus::Rescheduled,
                PaymentStatus::DepositPaid,
                50_000,
                20_000,
            ),
            booking(
                "e@x.com",
                millis(2026, 7, 18),
                BookingStatus::WeatherHold,
                PaymentStatus::DepositPaid,
                50_000,
                20_000,
            ),
        ];
        let buckets = revenue_by_month(&rows, TZ, now);
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets.last().unwrap().month, "2026-08");
        assert_eq!(buckets.last().unwrap().revenue_cents, 50_000);
        let july = buckets.iter().find(|b| b.month == "2026-07").unwrap();
        assert_eq!(july.revenue_cents, 20_000);
        // empty months stay present
        assert!(buckets.iter().any(|b| b.revenue_cents == 0));
    }

    #[test]
    fn weather_recovery_counts_history() {
        let now = millis(2026, 8, 20);
        let mut held_recovered = booking(
            "a@x.com",
            now,
            BookingStatus::Rescheduled,
            PaymentStatus::DepositPaid,
            50_000,
            20_000,
        );
        held_recovered.weather_hold_reason = Some("small craft advisory".into());

        let mut held_lost = booking(
            "b@x.com",
            now,
            BookingStatus::Cancelled,
            PaymentStatus::Unpaid,
            50_000,
            0,
        );
        held_lost.weather_hold_reason = Some("gale warning".into());

        let still_held = {
            let mut b = booking(
                "c@x.com",
                now,
                BookingStatus::WeatherHold,
                PaymentStatus::DepositPaid,
                50_000,
                20_000,
            );
            b.weather_hold_reason = Some("fog".into());
            b
        };

        let untouched = booking(
            "d@x.com",
            now,
            BookingStatus::Confirmed,
            PaymentStatus::DepositPaid,
            50_000,
            20_000,
        );

        let r = weather_recovery(&[held_recovered, held_lost, still_held, untouched]);
        assert_eq!(r.held, 3);
        assert_eq!(r.recovered, 1);
        assert!((r.rate - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn repeat_rate_is_email_based_case_insensitive() {
        let now = millis(2026, 8, 1);
        let rows = vec![
            booking("ann@x.com", now, BookingStatus::Completed, PaymentStatus::FullyPaid, 1, 0),
            booking("ANN@x.com", now, BookingStatus::Completed, PaymentStatus::FullyPaid, 1, 0),
            booking("bob@x.com", now, BookingStatus::Completed, PaymentStatus::FullyPaid, 1, 0),
        ];
        // 2 distinct guests, 1 repeat
        assert!((repeat_customer_rate(&rows) - 0.5).abs() < 1e-9);
        assert_eq!(repeat_customer_rate(&[]), 0.0);
    }

    #[test]
    fn overview_sums_collected_and_outstanding() {
        let now = millis(2026, 8, 20);
        let rows = vec![
            booking(
                "a@x.com",
                millis(2026, 9, 1),
                BookingStatus::Confirmed,
                PaymentStatus::DepositPaid,
                50_000,
                20_000,
            ),
            booking(
                "b@x.com",
                millis(2026, 7, 1),
                BookingStatus::Completed,
                PaymentStatus::FullyPaid,
                80_000,
                20_000,
            ),
        ];
        let o = overview(&rows, now);
        assert_eq!(o.total_bookings, 2);
        assert_eq!(o.upcoming, 1);
        assert_eq!(o.completed, 1);
        assert_eq!(o.collected_cents, 20_000 + 80_000);
        assert_eq!(o.outstanding_cents, 30_000);
    }
}
