use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal, Uniform};

enum Dist {
    Normal(Normal<f32>),
    Uniform(Uniform<f32>),
}

impl Dist {
    fn new(mean: f32, stdev: f32, use_gaussian: bool) -> Self {
        if use_gaussian {
            Self::Normal(Normal::new(mean, stdev).unwrap())
        } else {
            Self::Uniform(Uniform::new(mean - stdev, mean + stdev))
        }
    }

    fn sample(&self, rng: &mut StdRng) -> f32 {
        match self {
            Dist::Normal(x) => x.sample(rng),
            Dist::Uniform(x) => x.sample(rng),
        }
    }
}

/// Samples a buffer of values from a normal or uniform distribution.
pub fn vec_f32(rng: &mut StdRng, length: usize, mean: f32, stdev: f32, use_gaussian: bool) -> Vec<f32> {
    let dist = Dist::new(mean, stdev, use_gaussian);

    let mut res = Vec::with_capacity(length);

    for _ in 0..length {
        res.push(dist.sample(rng));
    }

    res
}

/// Multiplicative noise factors drawn uniformly from `[1 - deviation, 1 + deviation]`.
pub(crate) fn noise_factors(rng: &mut StdRng, length: usize, deviation: f32) -> Vec<f32> {
    vec_f32(rng, length, 1.0, deviation, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn noise_factors_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(17);
        let factors = noise_factors(&mut rng, 512, 0.1);

        assert_eq!(factors.len(), 512);
        for factor in factors {
            assert!((0.9..=1.1).contains(&factor));
        }
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);

        assert_eq!(vec_f32(&mut a, 64, 0.0, 1.0, true), vec_f32(&mut b, 64, 0.0, 1.0, true));
    }

    #[test]
    fn gaussian_samples_centre_on_the_mean() {
        let mut rng = StdRng::seed_from_u64(3);
        let samples = vec_f32(&mut rng, 10_000, 2.0, 0.5, true);

        let mean = samples.iter().sum::<f32>() / samples.len() as f32;
        assert!((mean - 2.0).abs() < 0.05);
    }
}
