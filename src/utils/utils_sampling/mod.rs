use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Normal, Distribution};

pub struct SimpleSamplers;
impl SimpleSamplers {
    pub fn uniform_samples<R: Rng>(bounds: &[(f64, f64)], rng: &mut R) -> Vec<f64> {
        let mut out_vec = vec![];
        for b in bounds {
            if b.0 == b.1 {
                out_vec.push(b.0);
            } else {
                out_vec.push(rng.gen_range(b.0..b.1));
            }
        }
        out_vec
    }
    /// Standard deviations that are zero (or otherwise invalid for a normal distribution) just
    /// return the mean.
    pub fn normal_samples<R: Rng>(means_and_standard_deviations: &[(f64, f64)], rng: &mut R) -> Vec<f64> {
        let mut out_vec = vec![];
        for (mean, standard_deviation) in means_and_standard_deviations {
            match Normal::new(*mean, *standard_deviation) {
                Ok(distribution) if *standard_deviation > 0.0 => { out_vec.push(distribution.sample(rng)); }
                _ => { out_vec.push(*mean); }
            }
        }
        out_vec
    }
    pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }
}
