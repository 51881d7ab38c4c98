//! Dashboard CSV 导出
//!
//! 日期区间（含两端）由调用方换算成 millis 后查询；
//! 这里只负责把行格式化成 CSV 文本。

use chrono_tz::Tz;

use crate::bookings::payment::format_usd;
use crate::utils::{AppError, AppResult, time};
use shared::models::Booking;

const HEADERS: [&str; 12] = [
    "booking_id",
    "guest_name",
    "guest_email",
    "guest_phone",
    "scheduled_start",
    "scheduled_end",
    "party_size",
    "status",
    "payment_status",
    "total_price",
    "deposit_paid",
    "balance_due",
];

/// 预订列表 → CSV 文本（时间按船长时区展示）
pub fn bookings_to_csv(bookings: &[Booking], tz: Tz) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(HEADERS)
        .map_err(|e| AppError::internal(format!("CSV write failed: {e}")))?;

    for b in bookings {
        writer
            .write_record([
                b.id.to_string(),
                b.guest_name.clone(),
                b.guest_email.clone(),
                b.guest_phone.clone().unwrap_or_default(),
                time::format_local(b.scheduled_start, tz),
                time::format_local(b.scheduled_end, tz),
                b.party_size.to_string(),
                b.status.to_string(),
                b.payment_status.to_string(),
                format_usd(b.total_price_cents),
                format_usd(b.deposit_paid_cents),
                format_usd(b.balance_due_cents),
            ])
            .map_err(|e| AppError::internal(format!("CSV write failed: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::internal(format!("CSV encoding: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::booking::{BookingStatus, PaymentStatus};

    fn sample(id: i64, name: &str) -> Booking {
        Booking {
            id,
            captain_id: 1,
            trip_type_id: 1,
            vessel_id: None,
            guest_name: name.into(),
            guest_email: format!("{}@example.com", name.to_lowercase()),
            guest_phone: Some("555-0100".into()),
            scheduled_start: 1_780_000_000_000,
            scheduled_end: 1_780_014_400_000,
            party_size: 4,
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::DepositPaid,
            total_price_cents: 50_000,
            deposit_paid_cents: 20_000,
            balance_due_cents: 30_000,
            payment_reminder_count: 0,
            last_reminder_at: None,
            weather_hold_reason: None,
            original_start: None,
            internal_notes: None,
            tags: String::new(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_booking() {
        let csv = bookings_to_csv(&[sample(1, "Ann"), sample(2, "Bob")], chrono_tz::UTC).unwrap();
        let lines: Vec<&str> = csv.trim_end().lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("booking_id,guest_name"));
        assert!(lines[1].contains("Ann"));
        assert!(lines[1].contains("$500.00"));
        assert!(lines[2].contains("bob@example.com"));
    }

    #[test]
    fn empty_export_is_just_the_header() {
        let csv = bookings_to_csv(&[], chrono_tz::UTC).unwrap();
        assert_eq!(csv.trim_end().lines().count(), 1);
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let mut b = sample(1, "Ann");
        b.guest_name = "Doe, Ann".into();
        let csv = bookings_to_csv(&[b], chrono_tz::UTC).unwrap();
        assert!(csv.contains("\"Doe, Ann\""));
    }
}
