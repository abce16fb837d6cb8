//! Order-preserving fallible map over an index range.
//!
//! With the `rayon` feature and `parallel == true` items are computed on the
//! rayon pool; results keep input order either way, so both paths agree.

use crate::util::HistMatchResult;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "rayon")]
pub(crate) fn try_map_range<T, F>(parallel: bool, len: usize, f: F) -> HistMatchResult<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> HistMatchResult<T> + Sync + Send,
{
    if parallel {
        (0..len).into_par_iter().map(f).collect()
    } else {
        (0..len).map(f).collect()
    }
}

#[cfg(not(feature = "rayon"))]
pub(crate) fn try_map_range<T, F>(_parallel: bool, len: usize, f: F) -> HistMatchResult<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> HistMatchResult<T> + Sync + Send,
{
    (0..len).map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::try_map_range;
    use crate::util::HistMatchError;

    #[test]
    fn keeps_input_order() {
        for parallel in [false, true] {
            let out = try_map_range(parallel, 100, |i| Ok(i * 2)).unwrap();
            assert_eq!(out, (0..100).map(|i| i * 2).collect::<Vec<_>>());
        }
    }

    #[test]
    fn propagates_the_first_error() {
        let res = try_map_range(false, 10, |i| {
            if i == 3 {
                Err(HistMatchError::InvalidInput("boom"))
            } else {
                Ok(i)
            }
        });
        assert_eq!(res.unwrap_err(), HistMatchError::InvalidInput("boom"));
    }
}
