//! Numeric helpers shared by binning, search and evaluation.

use std::cmp::Ordering;

/// Returns `num` values evenly spaced over `[start, stop]`, endpoints included.
///
/// The last value is exactly `stop` so range checks against the upper bound
/// are not disturbed by accumulated rounding. `num == 1` yields `[start]`.
pub(crate) fn linspace(start: f32, stop: f32, num: usize) -> Vec<f32> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let span = stop - start;
            let last = (num - 1) as f32;
            let mut values: Vec<f32> = (0..num)
                .map(|i| start + span * i as f32 / last)
                .collect();
            values[num - 1] = stop;
            values
        }
    }
}

/// Rounds to `decimals` decimal places; exact halves go to the even digit
/// (`0.125 -> 0.12`, `0.375 -> 0.38`).
pub(crate) fn round_to(value: f32, decimals: i32) -> f32 {
    let scale = 10f32.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Orders `(index, value)` pairs by ascending value, then ascending index.
pub(crate) fn asc_then_index(a: (usize, f32), b: (usize, f32)) -> Ordering {
    a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0))
}

/// Index of the smallest value; the first occurrence wins on ties.
pub(crate) fn argmin_first<I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = f32>,
{
    let mut best: Option<(usize, f32)> = None;
    for (idx, value) in values.into_iter().enumerate() {
        match best {
            Some((_, current)) if value >= current => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::{argmin_first, asc_then_index, linspace, round_to};
    use std::cmp::Ordering;

    #[test]
    fn linspace_includes_both_endpoints() {
        let values = linspace(0.0, 255.0, 5);
        assert_eq!(values, vec![0.0, 63.75, 127.5, 191.25, 255.0]);
        assert_eq!(linspace(2.0, 9.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn round_to_two_decimals() {
        assert!((round_to(0.12345, 2) - 0.12).abs() < 1e-7);
        assert!((round_to(0.125_1, 2) - 0.13).abs() < 1e-7);
        assert_eq!(round_to(1.0, 2), 1.0);
    }

    #[test]
    fn round_to_sends_exact_halves_to_even() {
        // 1/8 and 3/8 scale to exactly 12.5 and 37.5.
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
    }

    #[test]
    fn argmin_prefers_first_tie() {
        assert_eq!(argmin_first([3.0, 1.0, 1.0, 2.0]), Some(1));
        assert_eq!(argmin_first(std::iter::empty()), None);
    }

    #[test]
    fn asc_then_index_breaks_ties_by_index() {
        assert_eq!(asc_then_index((2, 1.0), (0, 1.0)), Ordering::Greater);
        assert_eq!(asc_then_index((5, 0.5), (0, 1.0)), Ordering::Less);
    }
}
