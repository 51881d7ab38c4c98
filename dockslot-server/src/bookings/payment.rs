//! 付款分账算术
//!
//! 全部以整数分计算；rust_decimal 只用于对外展示的金额格式化。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::booking::PaymentStatus;

/// 付款提醒上限：第三次 remind 直接拒绝
pub const MAX_PAYMENT_REMINDERS: i64 = 2;

/// 确认付款后的落库字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSplit {
    pub payment_status: PaymentStatus,
    pub deposit_paid_cents: i64,
    pub balance_due_cents: i64,
}

/// 确认收到款项时的分账
///
/// 收到的金额是行程定金；定金 ≥ 总价时按全额结清处理
/// （短途行程常把定金设为全价）。
pub fn split_payment(total_price_cents: i64, deposit_cents: i64) -> PaymentSplit {
    if deposit_cents >= total_price_cents {
        PaymentSplit {
            payment_status: PaymentStatus::FullyPaid,
            deposit_paid_cents: total_price_cents,
            balance_due_cents: 0,
        }
    } else {
        PaymentSplit {
            payment_status: PaymentStatus::DepositPaid,
            deposit_paid_cents: deposit_cents,
            balance_due_cents: total_price_cents - deposit_cents,
        }
    }
}

/// 分 → "$1,234.56"（邮件 / CSV / 洞察文案）
pub fn format_usd(cents: i64) -> String {
    let amount = Decimal::new(cents, 2);
    let raw = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if cents < 0 {
        format!("-${grouped}.{frac_part}")
    } else {
        format!("${grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_smaller_than_total_splits() {
        // $500 trip, $200 deposit
        let split = split_payment(50_000, 20_000);
        assert_eq!(split.payment_status, PaymentStatus::DepositPaid);
        assert_eq!(split.deposit_paid_cents, 20_000);
        assert_eq!(split.balance_due_cents, 30_000);
    }

    #[test]
    fn deposit_covering_total_is_fully_paid() {
        let split = split_payment(15_000, 15_000);
        assert_eq!(split.payment_status, PaymentStatus::FullyPaid);
        assert_eq!(split.deposit_paid_cents, 15_000);
        assert_eq!(split.balance_due_cents, 0);

        // deposit larger than total: paid amount caps at total
        let split = split_payment(15_000, 20_000);
        assert_eq!(split.payment_status, PaymentStatus::FullyPaid);
        assert_eq!(split.deposit_paid_cents, 15_000);
        assert_eq!(split.balance_due_cents, 0);
    }

    #[test]
    fn usd_formatting() {
        assert_eq!(format_usd(0), "$0.00");
        assert_eq!(format_usd(50_000), "$500.00");
        assert_eq!(format_usd(123_456_789), "$1,234,567.89");
        assert_eq!(format_usd(-2_050), "-$20.50");
        assert_eq!(format_usd(5), "$0.05");
    }
}
