use sea_orm::prelude::Decimal;

/// Fallback when a product carries a non-positive duration.
pub const DEFAULT_DURATION_DAYS: i32 = 7;
pub const SECONDS_PER_DAY: i64 = 86_400;

pub fn profit_amount(amount: Decimal, income_percentage: Decimal) -> Decimal {
    amount
        .checked_mul(income_percentage)
        .and_then(|gross| gross.checked_div(Decimal::from(100)))
        .unwrap_or(Decimal::ZERO)
}

pub fn net_profit(profit: Decimal, handling_fee: Decimal) -> Decimal {
    profit.checked_sub(handling_fee).unwrap_or(Decimal::ZERO)
}

pub fn total_return_amount(amount: Decimal, profit: Decimal, handling_fee: Decimal) -> Decimal {
    amount
        .checked_add(profit)
        .and_then(|gross| gross.checked_sub(handling_fee))
        .unwrap_or(amount)
}

pub fn normalize_duration_days(duration_days: i32) -> i32 {
    if duration_days <= 0 {
        DEFAULT_DURATION_DAYS
    } else {
        duration_days
    }
}

pub fn maturity_timestamp(now: i64, duration_days: i32) -> i64 {
    now + duration_days as i64 * SECONDS_PER_DAY
}

pub fn clamp_non_negative(value: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        Decimal::ZERO
    } else {
        value
    }
}

/// Whole days elapsed between the last accrual instant and the cap.
pub fn days_accruable(last_accrued: i64, cap: i64) -> i64 {
    if cap <= last_accrued {
        return 0;
    }
    (cap - last_accrued) / SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profit_100_at_5_percent_is_5() {
        assert_eq!(
            profit_amount(Decimal::from(100), Decimal::from(5)),
            Decimal::from(5)
        );
    }

    #[test]
    fn total_return_100_plus_5_minus_2_is_103() {
        assert_eq!(
            total_return_amount(Decimal::from(100), Decimal::from(5), Decimal::from(2)),
            Decimal::from(103)
        );
    }

    #[test]
    fn net_profit_5_minus_2_is_3() {
        assert_eq!(
            net_profit(Decimal::from(5), Decimal::from(2)),
            Decimal::from(3)
        );
    }

    #[test]
    fn profit_handles_fractional_percentage() {
        assert_eq!(
            profit_amount(Decimal::from(200), Decimal::new(25, 1)),
            Decimal::from(5)
        );
    }

    #[test]
    fn duration_zero_falls_back_to_seven() {
        assert_eq!(normalize_duration_days(0), 7);
    }

    #[test]
    fn duration_negative_falls_back_to_seven() {
        assert_eq!(normalize_duration_days(-3), 7);
    }

    #[test]
    fn duration_positive_is_kept() {
        assert_eq!(normalize_duration_days(30), 30);
    }

    #[test]
    fn maturity_is_duration_days_ahead() {
        assert_eq!(maturity_timestamp(1_000, 7), 1_000 + 7 * 86_400);
    }

    #[test]
    fn clamp_keeps_positive_values() {
        assert_eq!(clamp_non_negative(Decimal::from(42)), Decimal::from(42));
    }

    #[test]
    fn clamp_floors_negative_values() {
        assert_eq!(clamp_non_negative(Decimal::from(-1)), Decimal::ZERO);
    }

    #[test]
    fn no_days_accruable_within_a_day() {
        assert_eq!(days_accruable(1_000, 1_000 + 86_399), 0);
    }

    #[test]
    fn three_whole_days_accruable() {
        assert_eq!(days_accruable(0, 3 * 86_400 + 500), 3);
    }

    #[test]
    fn cap_before_last_accrual_accrues_nothing() {
        assert_eq!(days_accruable(5_000, 4_000), 0);
    }
}
