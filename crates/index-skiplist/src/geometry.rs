use oorandom::Rand32;


/// A simple PRNG trait, so the level-selection logic isn't hard-wired to [`Rand32`].
///
/// (See [`oorandom::Rand32::rand_float`]; this trait exposes that same interface.)
pub(crate) trait Prng {
    /// Produces a random `f32` in `[0, 1)`.
    #[must_use]
    fn rand_float(&mut self) -> f32;
}

impl Prng for Rand32 {
    #[inline]
    fn rand_float(&mut self) -> f32 {
        Self::rand_float(self)
    }
}

/// The precomputed level-selection geometry for a skip list of a given `capacity` and `ratio`.
///
/// `level_count` is `floor(log(capacity) / log(1/ratio)) + 1`, per the construction formula;
/// `cdf` holds `[ratio^1, ratio^2, .., ratio^(level_count - 1)]`, in strictly decreasing order
/// (for `0 < ratio < 1`).
#[derive(Debug, Clone)]
pub(crate) struct Geometry {
    level_count: usize,
    cdf:         Vec<f64>,
}

impl Geometry {
    /// Build the geometry table for the given `capacity` and `ratio`.
    ///
    /// `ratio` is expected to already be validated to lie in `[0, 1]`; `0` and `1` are accepted
    /// as degenerate configurations (see [`crate::error::ConfigError`] and this crate's
    /// `DESIGN.md` for why they're permitted despite being edge cases of the formula below).
    #[must_use]
    pub(crate) fn new(capacity: u32, ratio: f64) -> Self {
        let level_count = Self::level_count(capacity, ratio);

        let cdf = (1..level_count)
            .map(|level| ratio.powi(level as i32))
            .collect();

        Self { level_count, cdf }
    }

    fn level_count(capacity: u32, ratio: f64) -> usize {
        if capacity <= 1 || ratio <= 0.0 {
            return 1;
        }

        if ratio >= 1.0 {
            // `log(1/ratio)` is zero (or undefined) here, so the usual formula blows up.
            // Bound the height logarithmically in `capacity` instead, the same order of
            // magnitude a well-chosen ordinary ratio would produce.
            return capacity.ilog2() as usize + 2;
        }

        let unbounded = (f64::from(capacity)).ln() / (1.0 / ratio).ln();
        unbounded.floor() as usize + 1
    }

    /// The number of levels, `L`, in a skip list built with this geometry.
    #[must_use]
    pub(crate) const fn level_count_value(&self) -> usize {
        self.level_count
    }

    /// Draw a random insertion level in `[0, level_count - 1]`, in a geometric-like
    /// distribution realized by binary-searching a uniform draw against [`Self::cdf`].
    ///
    /// Higher levels are exponentially less likely; a draw lands on level `l` with probability
    /// approximately `ratio^l`.
    #[must_use]
    pub(crate) fn random_level<P: Prng>(&self, prng: &mut P) -> usize {
        let draw = f64::from(prng.rand_float());

        // `cdf` is sorted in strictly decreasing order, so the thresholds that exceed `draw`
        // form a prefix; `partition_point` finds how many of them do.
        self.cdf.partition_point(|&threshold| threshold > draw)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPrng(f32);

    impl Prng for FixedPrng {
        fn rand_float(&mut self) -> f32 {
            self.0
        }
    }

    #[test]
    fn level_count_matches_formula() {
        // ratio = 1/2: log(100)/log(2) ~= 6.64 -> floor is 6, plus one is 7.
        assert_eq!(Geometry::level_count(100, 0.5), 7);
    }

    #[test]
    fn zero_ratio_never_promotes() {
        let geometry = Geometry::new(1_000, 0.0);
        assert_eq!(geometry.level_count_value(), 1);
        let mut prng = FixedPrng(0.0);
        assert_eq!(geometry.random_level(&mut prng), 0);
    }

    #[test]
    fn one_ratio_always_promotes_to_top() {
        let geometry = Geometry::new(1_000, 1.0);
        let mut prng = FixedPrng(0.999);
        assert_eq!(geometry.random_level(&mut prng), geometry.level_count_value() - 1);
    }

    #[test]
    fn low_draw_promotes_higher() {
        let geometry = Geometry::new(1_000, 0.5);
        let mut low = FixedPrng(0.0001);
        let mut high = FixedPrng(0.9999);
        assert!(geometry.random_level(&mut low) >= geometry.random_level(&mut high));
    }
}
