use rust_decimal::{Decimal, RoundingStrategy};

/// `0.2345` becomes `23.5%`. Halves round away from zero.
/// `None` when the percentage does not fit a decimal.
pub fn format_percent(progress: Decimal) -> Option<String> {
    let mut percent = progress
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    percent.rescale(1);
    Some(format!("{percent}%"))
}

/// Distances are printed like floats: trailing zeros go, but at least one decimal stays.
pub fn format_distance(distance: Decimal) -> String {
    let distance = distance.normalize();
    if distance.scale() == 0 {
        format!("{distance}.0")
    } else {
        distance.to_string()
    }
}

#[test]
fn percent_rounds_half_up() {
    assert_eq!(format_percent(Decimal::new(2345, 4)).as_deref(), Some("23.5%"));
    assert_eq!(format_percent(Decimal::new(2344, 4)).as_deref(), Some("23.4%"));
}

#[test]
fn percent_keeps_one_decimal() {
    assert_eq!(format_percent(Decimal::ONE).as_deref(), Some("100.0%"));
    assert_eq!(format_percent(Decimal::ZERO).as_deref(), Some("0.0%"));
}

#[test]
fn percent_overflow_is_none() {
    assert_eq!(format_percent(Decimal::MAX), None);
}

#[test]
fn distance_like_float() {
    assert_eq!(format_distance(Decimal::new(5, 0)), "5.0");
    assert_eq!(format_distance(Decimal::new(1230, 2)), "12.3");
    assert_eq!(format_distance(Decimal::new(205, 2)), "2.05");
}
