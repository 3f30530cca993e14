/// Numeric coercion: anything unparseable, missing or NaN counts as 0.
pub fn coerce_value(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0)
}

/// Integer year. Integral floats such as `"2010.0"` are accepted as long as
/// they fit in an `i64`.
pub fn parse_year(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if let Ok(y) = s.parse::<i64>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (in_range && f.fract() == 0.0).then_some(f as i64)
}

/// Start of the five-year period containing `year` (floor division).
/// `None` when the period or its last year falls outside `i64`.
pub fn year_group(year: i64) -> Option<i64> {
    let group = year.div_euclid(5).checked_mul(5)?;
    group.checked_add(4)?;
    Some(group)
}

/// `2010` → `"2010-2014"`. `group` comes from [`year_group`], so the end
/// year cannot overflow.
pub fn year_range_label(group: i64) -> String {
    format!("{}-{}", group, group + 4)
}

/// Half-to-even rounding to a whole number. `None` for infinite, NaN or
/// out-of-range sums.
pub fn round_count(v: f64) -> Option<i64> {
    let r = v.round_ties_even();
    (r.is_finite() && r >= i64::MIN as f64 && r < i64::MAX as f64).then_some(r as i64)
}

/// Half-to-even rounding to one decimal place.
pub fn round_one_decimal(v: f64) -> f64 {
    (v * 10.0).round_ties_even() / 10.0
}
