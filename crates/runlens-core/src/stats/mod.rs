//! Statistical preparation behind the charts. Pure functions over the row
//! tables; nothing in here draws.

pub mod counts;
pub mod hexbin;
pub mod kde;
pub mod quartiles;

pub use counts::{first_seen_counts, sorted_by_count, CountMatrix};
pub use hexbin::{HexCell, HexGrid};
pub use kde::GaussianKde;
pub use quartiles::Quartiles;

/// Smallest and largest finite value, or `None` for an empty input.
pub fn extent(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Widens `(lo, hi)` by `frac` of its span on both sides. A zero span is
/// widened by one unit so axes never collapse.
pub fn padded(lo: f64, hi: f64, frac: f64) -> (f64, f64) {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    (lo - span * frac, hi + span * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_skips_non_finite() {
        assert_eq!(extent(&[]), None);
        assert_eq!(extent(&[3.0, f64::NAN, -1.0, 2.0]), Some((-1.0, 3.0)));
    }

    #[test]
    fn test_padded_never_collapses() {
        assert_eq!(padded(5.0, 5.0, 0.05), (4.0, 6.0));
        assert_eq!(padded(0.0, 10.0, 0.1), (-1.0, 11.0));
    }
}
