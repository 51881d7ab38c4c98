//! Booking status state machine
//!
//! 状态转换表是唯一的守卫逻辑：`transition(status, action)` 返回
//! 下一个状态或拒绝原因。终态（completed/cancelled/no_show/expired）
//! 拒绝一切动作。

use serde::{Deserialize, Serialize};

/// 预订状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum BookingStatus {
    /// 等待定金
    PendingDeposit,
    /// 已确认
    Confirmed,
    /// 天气待定（等待改期）
    WeatherHold,
    /// 已改期
    Rescheduled,
    /// 已完成
    Completed,
    /// 已取消
    Cancelled,
    /// 未到场
    NoShow,
    /// 已过期（定金超时未付）
    Expired,
}

impl BookingStatus {
    /// 终态：不再接受任何动作
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Cancelled | Self::NoShow | Self::Expired
        )
    }

    /// 占用时段的状态（可用性计算会排除这些预订覆盖的时间）
    pub fn occupies_slot(self) -> bool {
        matches!(
            self,
            Self::PendingDeposit | Self::Confirmed | Self::Rescheduled | Self::WeatherHold
        )
    }

    /// Storage form (snake_case, matches the serde representation)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PendingDeposit => "pending_deposit",
            Self::Confirmed => "confirmed",
            Self::WeatherHold => "weather_hold",
            Self::Rescheduled => "rescheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
            Self::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "pending_deposit" => Self::PendingDeposit,
            "confirmed" => Self::Confirmed,
            "weather_hold" => Self::WeatherHold,
            "rescheduled" => Self::Rescheduled,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            "no_show" => Self::NoShow,
            "expired" => Self::Expired,
            _ => return None,
        })
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 支付状态（与预订状态正交）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PaymentStatus {
    /// 未支付
    Unpaid,
    /// 客人声称已线下支付，等待船长核实
    PendingVerification,
    /// 定金已付
    DepositPaid,
    /// 全额已付
    FullyPaid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::PendingVerification => "pending_verification",
            Self::DepositPaid => "deposit_paid",
            Self::FullyPaid => "fully_paid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "unpaid" => Self::Unpaid,
            "pending_verification" => Self::PendingVerification,
            "deposit_paid" => Self::DepositPaid,
            "fully_paid" => Self::FullyPaid,
            _ => return None,
        })
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 船长/系统触发的生命周期动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingAction {
    /// 定金确认 → confirmed
    ConfirmDeposit,
    /// 出行完成 → completed
    Complete,
    /// 取消 → cancelled
    Cancel,
    /// 未到场 → no_show
    MarkNoShow,
    /// 天气待定 → weather_hold
    SetWeatherHold,
    /// 解除天气待定 → confirmed
    ClearWeatherHold,
    /// 改期 → rescheduled
    Reschedule,
    /// 定金超时 → expired
    Expire,
}

impl std::fmt::Display for BookingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ConfirmDeposit => "confirm_deposit",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
            Self::MarkNoShow => "mark_no_show",
            Self::SetWeatherHold => "set_weather_hold",
            Self::ClearWeatherHold => "clear_weather_hold",
            Self::Reschedule => "reschedule",
            Self::Expire => "expire",
        };
        f.write_str(s)
    }
}

/// 状态转换被拒绝的原因
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// 预订已处于终态
    #[error("Booking is already {0} (terminal state)")]
    Terminal(BookingStatus),

    /// 当前状态不允许该动作
    #[error("Action {action} is not allowed from status {from}")]
    NotAllowed {
        from: BookingStatus,
        action: BookingAction,
    },
}

/// 状态转换表
///
/// | 动作 | 允许的来源状态 | 目标 |
/// |------|----------------|------|
/// | confirm_deposit | pending_deposit | confirmed |
/// | complete | confirmed, rescheduled | completed |
/// | cancel | 所有非终态 | cancelled |
/// | mark_no_show | confirmed, rescheduled | no_show |
/// | set_weather_hold | confirmed, rescheduled | weather_hold |
/// | clear_weather_hold | weather_hold | confirmed |
/// | reschedule | confirmed, weather_hold, rescheduled | rescheduled |
/// | expire | pending_deposit | expired |
pub fn transition(
    from: BookingStatus,
    action: BookingAction,
) -> Result<BookingStatus, TransitionError> {
    use BookingAction as A;
    use BookingStatus as S;

    if from.is_terminal() {
        return Err(TransitionError::Terminal(from));
    }

    let next = match (from, action) {
        (S::PendingDeposit, A::ConfirmDeposit) => S::Confirmed,
        (S::PendingDeposit, A::Expire) => S::Expired,

        (S::Confirmed | S::Rescheduled, A::Complete) => S::Completed,
        (S::Confirmed | S::Rescheduled, A::MarkNoShow) => S::NoShow,
        (S::Confirmed | S::Rescheduled, A::SetWeatherHold) => S::WeatherHold,

        (S::WeatherHold, A::ClearWeatherHold) => S::Confirmed,

        (S::Confirmed | S::WeatherHold | S::Rescheduled, A::Reschedule) => S::Rescheduled,

        (_, A::Cancel) => S::Cancelled,

        _ => return Err(TransitionError::NotAllowed { from, action }),
    };

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use BookingAction as A;
    use BookingStatus as S;

    const ALL_STATES: [S; 8] = [
        S::PendingDeposit,
        S::Confirmed,
        S::WeatherHold,
        S::Rescheduled,
        S::Completed,
        S::Cancelled,
        S::NoShow,
        S::Expired,
    ];

    const ALL_ACTIONS: [A; 8] = [
        A::ConfirmDeposit,
        A::Complete,
        A::Cancel,
        A::MarkNoShow,
        A::SetWeatherHold,
        A::ClearWeatherHold,
        A::Reschedule,
        A::Expire,
    ];

    #[test]
    fn terminal_states_reject_every_action() {
        for state in ALL_STATES.into_iter().filter(|s| s.is_terminal()) {
            for action in ALL_ACTIONS {
                assert_eq!(
                    transition(state, action),
                    Err(TransitionError::Terminal(state)),
                    "{state} should reject {action}"
                );
            }
        }
    }

    #[test]
    fn cancel_allowed_from_every_live_state() {
        for state in ALL_STATES.into_iter().filter(|s| !s.is_terminal()) {
            assert_eq!(transition(state, A::Cancel), Ok(S::Cancelled));
        }
    }

    #[test]
    fn happy_path_lifecycle() {
        let s = transition(S::PendingDeposit, A::ConfirmDeposit).unwrap();
        assert_eq!(s, S::Confirmed);
        let s = transition(s, A::SetWeatherHold).unwrap();
        assert_eq!(s, S::WeatherHold);
        let s = transition(s, A::Reschedule).unwrap();
        assert_eq!(s, S::Rescheduled);
        let s = transition(s, A::Complete).unwrap();
        assert_eq!(s, S::Completed);
    }

    #[test]
    fn complete_only_from_confirmed_or_rescheduled() {
        assert!(transition(S::Confirmed, A::Complete).is_ok());
        assert!(transition(S::Rescheduled, A::Complete).is_ok());
        assert_eq!(
            transition(S::PendingDeposit, A::Complete),
            Err(TransitionError::NotAllowed {
                from: S::PendingDeposit,
                action: A::Complete
            })
        );
        assert!(transition(S::WeatherHold, A::Complete).is_err());
    }

    #[test]
    fn weather_hold_round_trip() {
        assert_eq!(
            transition(S::Confirmed, A::SetWeatherHold),
            Ok(S::WeatherHold)
        );
        assert_eq!(
            transition(S::WeatherHold, A::ClearWeatherHold),
            Ok(S::Confirmed)
        );
        // 不能对未确认的预订设置天气待定
        assert!(transition(S::PendingDeposit, A::SetWeatherHold).is_err());
        // 解除只对 weather_hold 有效
        assert!(transition(S::Confirmed, A::ClearWeatherHold).is_err());
    }

    #[test]
    fn expire_only_from_pending_deposit() {
        assert_eq!(transition(S::PendingDeposit, A::Expire), Ok(S::Expired));
        for state in [S::Confirmed, S::WeatherHold, S::Rescheduled] {
            assert!(transition(state, A::Expire).is_err());
        }
    }

    #[test]
    fn reschedule_is_repeatable() {
        let s = transition(S::Confirmed, A::Reschedule).unwrap();
        assert_eq!(s, S::Rescheduled);
        assert_eq!(transition(s, A::Reschedule), Ok(S::Rescheduled));
    }

    #[test]
    fn status_string_round_trip() {
        for state in ALL_STATES {
            assert_eq!(BookingStatus::parse(state.as_str()), Some(state));
        }
        assert_eq!(BookingStatus::parse("bogus"), None);
    }
}
