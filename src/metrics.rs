//! Unit conversions shared by per-state metrics and extrapolation.
//!
//! Ratios are computed in `f64` and rounded half away from zero.

const PER_MILLION: f64 = 1_000_000.0;
const PER_TEN_THOUSAND: f64 = 10_000.0;

/// `value` per million of `population`, or `None` for an empty population.
pub fn per_million(value: u64, population: u64) -> Option<u64> {
    if population == 0 {
        return None;
    }
    Some((value as f64 * PER_MILLION / population as f64).round() as u64)
}

/// `part` per ten thousand of `whole`, 0 when `whole` is 0.
pub fn per_ten_thousand(part: u64, whole: u64) -> u64 {
    if whole == 0 {
        return 0;
    }
    (part as f64 * PER_TEN_THOUSAND / whole as f64).round() as u64
}

/// Project a per-million rate onto `population`.
pub fn extrapolate(population: u64, per_million: u64) -> u64 {
    (population as f64 * per_million as f64 / PER_MILLION).round() as u64
}
