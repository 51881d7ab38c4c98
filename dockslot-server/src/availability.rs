//! 可用时段计算
//!
//! 给定船长、行程类型和日期，从营业窗口推导候选时段，
//! 再剔除与现有预订/停航日期冲突的部分。纯 filter/map，
//! 无区间树，成对重叠检查足够应付单船长的预订量。

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::repository::{blackout_date, booking};
use crate::utils::{AppError, AppResult, time};
use shared::models::{Profile, TripType};

/// 候选可预订时段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Unix millis
    pub start: i64,
    /// Unix millis (start + trip duration)
    pub end: i64,
}

/// 半开区间重叠: a.start < b.end && b.start < a.end
fn overlaps(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    a_start < b_end && b_start < a_end
}

/// 纯时段推导：营业窗口内按步长滑动，剔除忙碌区间和过去的时刻
///
/// `busy` 为该日已占用的 [start, end) 区间；`now` 之前的候选被丢弃。
pub fn compute_slots(
    date: NaiveDate,
    tz: Tz,
    day_start: &str,
    day_end: &str,
    step_min: i64,
    duration_min: i64,
    busy: &[(i64, i64)],
    now: i64,
) -> Vec<Slot> {
    let (Some(window_start), Some(window_end)) =
        (time::parse_hhmm(day_start), time::parse_hhmm(day_end))
    else {
        tracing::warn!(day_start, day_end, "Invalid operating window, no slots");
        return Vec::new();
    };

    let window_start_ms = time::date_time_to_millis(date, window_start, tz);
    let window_end_ms = time::date_time_to_millis(date, window_end, tz);
    let step_ms = step_min * 60_000;
    let duration_ms = duration_min * 60_000;

    if step_ms <= 0 || duration_ms <= 0 || window_end_ms <= window_start_ms {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut start = window_start_ms;
    while start + duration_ms <= window_end_ms {
        let end = start + duration_ms;
        let conflict = busy.iter().any(|&(bs, be)| overlaps(start, end, bs, be));
        if start >= now && !conflict {
            slots.push(Slot { start, end });
        }
        start += step_ms;
    }
    slots
}

/// 查询某船长/行程/日期的可用时段
///
/// 休眠、停航日、停用行程 → 空列表（而非错误：对公共页面来说
/// "没有可选时段" 就是答案）。
pub async fn available_slots(
    pool: &SqlitePool,
    profile: &Profile,
    trip: &TripType,
    date: &str,
) -> AppResult<Vec<Slot>> {
    let day = time::parse_date(date)?;
    let tz = time::parse_tz(&profile.timezone);

    if profile.hibernating || !trip.is_active {
        return Ok(Vec::new());
    }

    if !blackout_date::find_covering(pool, profile.id, date)
        .await
        .map_err(AppError::from)?
        .is_empty()
    {
        return Ok(Vec::new());
    }

    let day_start_ms = time::day_start_millis(day, tz);
    let day_end_ms = time::day_end_millis(day, tz);
    let busy: Vec<(i64, i64)> = booking::find_overlapping(pool, profile.id, day_start_ms, day_end_ms)
        .await
        .map_err(AppError::from)?
        .into_iter()
        .map(|b| (b.scheduled_start, b.scheduled_end))
        .collect();

    Ok(compute_slots(
        day,
        tz,
        &profile.day_start,
        &profile.day_end,
        profile.slot_step_min,
        trip.duration_min,
        &busy,
        shared::util::now_millis(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    const TZ: Tz = chrono_tz::UTC;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn at(hour: u32, min: u32) -> i64 {
        time::date_time_to_millis(date(), NaiveTime::from_hms_opt(hour, min, 0).unwrap(), TZ)
    }

    #[test]
    fn full_day_without_conflicts() {
        // 08:00-18:00, 4h trips on a 60min grid → starts 08..14 inclusive
        let slots = compute_slots(date(), TZ, "08:00", "18:00", 60, 240, &[], 0);
        assert_eq!(slots.len(), 7);
        assert_eq!(slots[0].start, at(8, 0));
        assert_eq!(slots[0].end, at(12, 0));
        assert_eq!(slots.last().unwrap().start, at(14, 0));
    }

    #[test]
    fn excludes_overlapping_bookings() {
        // Existing booking 10:00-14:00 removes every candidate that touches it
        let busy = vec![(at(10, 0), at(14, 0))];
        let slots = compute_slots(date(), TZ, "08:00", "18:00", 60, 240, &busy, 0);
        let starts: Vec<i64> = slots.iter().map(|s| s.start).collect();
        assert!(starts.contains(&at(14, 0)));
        assert!(!starts.contains(&at(8, 0))); // 08-12 overlaps 10-14
        assert!(!starts.contains(&at(9, 0)));
        assert!(!starts.contains(&at(13, 0)));
    }

    #[test]
    fn back_to_back_is_not_a_conflict() {
        // [08:00,12:00) then [12:00,16:00): half-open semantics
        let busy = vec![(at(8, 0), at(12, 0))];
        let slots = compute_slots(date(), TZ, "08:00", "18:00", 240, 240, &busy, 0);
        let starts: Vec<i64> = slots.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![at(12, 0)]);
    }

    #[test]
    fn trip_must_fit_inside_window() {
        // 10h trip in a 10h window: exactly one candidate
        let slots = compute_slots(date(), TZ, "08:00", "18:00", 30, 600, &[], 0);
        assert_eq!(slots.len(), 1);
        // 11h trip: none
        assert!(compute_slots(date(), TZ, "08:00", "18:00", 30, 660, &[], 0).is_empty());
    }

    #[test]
    fn past_candidates_are_dropped() {
        let now = at(12, 0);
        let slots = compute_slots(date(), TZ, "08:00", "18:00", 60, 120, &[], now);
        assert!(slots.iter().all(|s| s.start >= now));
        assert_eq!(slots[0].start, at(12, 0));
    }

    #[test]
    fn degenerate_inputs_yield_no_slots() {
        assert!(compute_slots(date(), TZ, "18:00", "08:00", 30, 60, &[], 0).is_empty());
        assert!(compute_slots(date(), TZ, "08:00", "18:00", 0, 60, &[], 0).is_empty());
        assert!(compute_slots(date(), TZ, "nope", "18:00", 30, 60, &[], 0).is_empty());
    }
}
