//! Partial-star rating algorithm.
//!
//! Pure and deterministic: maps a rating onto [`STAR_COUNT`] star states. The
//! terminal renderer lives in the binary crate; this module only decides how
//! much of each star is filled.

/// Number of stars in every rating bar.
pub const STAR_COUNT: usize = 5;

/// Fill state of one star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StarState {
    Full,
    /// Filled proportion of the star, strictly inside `(0, 1)`.
    Partial(f64),
    Empty,
}

/// Computes the star states for `rating`. Absent ratings count as zero.
///
/// Star `i` (1-based) is `Full` when `rating >= i`, `Partial(rating - (i - 1))`
/// when `i - 1 < rating < i`, and `Empty` otherwise. Out-of-range ratings
/// saturate: above 5 is all full, below 0 (or `NaN`) is all empty.
pub fn star_states(rating: Option<f64>) -> [StarState; STAR_COUNT] {
    let rating = rating.unwrap_or(0.0);
    std::array::from_fn(|idx| {
        let upper = (idx + 1) as f64;
        let lower = idx as f64;
        if rating >= upper {
            StarState::Full
        } else if rating > lower {
            StarState::Partial(rating - lower)
        } else {
            StarState::Empty
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_partial(state: StarState, expected: f64) {
        match state {
            StarState::Partial(f) => assert!((f - expected).abs() < 1e-9, "fraction {f}"),
            other => panic!("expected Partial({expected}), got {other:?}"),
        }
    }

    #[test]
    fn zero_and_absent_are_all_empty() {
        assert_eq!(star_states(Some(0.0)), [StarState::Empty; STAR_COUNT]);
        assert_eq!(star_states(None), [StarState::Empty; STAR_COUNT]);
    }

    #[test]
    fn five_is_all_full() {
        assert_eq!(star_states(Some(5.0)), [StarState::Full; STAR_COUNT]);
    }

    #[test]
    fn fractional_rating_has_one_partial_star() {
        let stars = star_states(Some(3.4));
        assert_eq!(&stars[..3], &[StarState::Full; 3]);
        assert_partial(stars[3], 0.4);
        assert_eq!(stars[4], StarState::Empty);
    }

    #[test]
    fn out_of_range_saturates() {
        assert_eq!(star_states(Some(7.5)), [StarState::Full; STAR_COUNT]);
        assert_eq!(star_states(Some(-2.0)), [StarState::Empty; STAR_COUNT]);
        assert_eq!(star_states(Some(f64::NAN)), [StarState::Empty; STAR_COUNT]);
    }

    #[test]
    fn every_position_follows_the_threshold_rule() {
        for step in -10..=60 {
            let r = step as f64 / 10.0;
            let stars = star_states(Some(r));
            assert_eq!(stars.len(), STAR_COUNT);
            for (idx, state) in stars.iter().enumerate() {
                let i = (idx + 1) as f64;
                match *state {
                    StarState::Full => assert!(r >= i),
                    StarState::Empty => assert!(r <= i - 1.0),
                    StarState::Partial(f) => {
                        assert!(r > i - 1.0 && r < i);
                        assert!(f > 0.0 && f < 1.0);
                        assert!((f - (r - (i - 1.0))).abs() < 1e-9);
                    }
                }
            }
        }
    }
}
