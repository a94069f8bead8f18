use rand::distributions::{Distribution, Standard, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::Normal;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, warn};

lazy_static::lazy_static! {
    static ref RANDOMNESS: Mutex<RNGSeedGenerator> = Mutex::new(RNGSeedGenerator::new());
}

/// We use a different random number generator for the seeds of the
/// other random generators. The root seed is from the number of
/// micro-seconds in the current time, or given by the user.
pub struct RNGSeedGenerator {
    first_seed: u64,
    s_gen: StdRng,
    s_dist: Uniform<u64>,
    some_seeds_generated: bool,
}

impl RNGSeedGenerator {
    fn new() -> Self {
        let first_seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(1);
        Self {
            first_seed,
            s_gen: StdRng::seed_from_u64(first_seed),
            s_dist: Uniform::new(1, 1_000_000_000),
            some_seeds_generated: false,
        }
    }

    /// Get the first seed used to generate the other seeds.
    pub fn first_global_seed(&self) -> u64 {
        self.first_seed
    }

    pub fn set_global_seed(&mut self, seed: u64) {
        if seed > 0 {
            if self.some_seeds_generated {
                error!("Random number generation already started. Changing seed now will not lead to deterministic sampling.");
            } else {
                self.first_seed = seed;
            }
        } else {
            if self.some_seeds_generated {
                warn!("Random generator seed cannot be 0, and random number generation already started. Ignoring seed.");
                return;
            }
            warn!("Random generator seed cannot be 0. Using 1 instead.");
            self.first_seed = 1;
        }
        self.s_gen = StdRng::seed_from_u64(self.first_seed);
    }

    fn next_seed(&mut self) -> u64 {
        self.some_seeds_generated = true;
        self.s_dist.sample(&mut self.s_gen)
    }
}

/// Set the root seed of every generator created afterwards.
pub fn set_global_seed(seed: u64) {
    RANDOMNESS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .set_global_seed(seed);
}

pub fn first_global_seed() -> u64 {
    RANDOMNESS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .first_global_seed()
}

#[derive(Debug, Clone)]
pub struct RNG {
    rng: StdRng,
    normal: Normal,
    local_seed: u64,
}

impl Default for RNG {
    fn default() -> Self {
        Self::new()
    }
}

impl RNG {
    pub fn new() -> Self {
        let local_seed = RANDOMNESS
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .next_seed();
        Self::with_seed(local_seed)
    }

    pub fn get_local_seed(&self) -> u64 {
        self.local_seed
    }

    pub fn with_seed(local_seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(local_seed),
            normal: Normal::standard(),
            local_seed,
        }
    }

    pub fn uniform01(&mut self) -> f64 {
        self.rng.sample(Standard)
    }

    /// Uniform sample in `[lower_bound, upper_bound)`. A degenerate interval returns the
    /// lower bound.
    pub fn uniform_real(&mut self, lower_bound: f64, upper_bound: f64) -> f64 {
        if upper_bound <= lower_bound {
            return lower_bound;
        }
        self.rng.sample(Uniform::new(lower_bound, upper_bound))
    }

    pub fn uniform_int(&mut self, lower_bound: usize, upper_bound: usize) -> usize {
        if upper_bound <= lower_bound {
            return lower_bound;
        }
        self.rng.sample(Uniform::new(lower_bound, upper_bound))
    }

    pub fn gaussian01(&mut self) -> f64 {
        self.normal.sample(&mut self.rng)
    }

    pub fn gaussian(&mut self, mean: f64, stddev: f64) -> f64 {
        self.gaussian01() * stddev + mean
    }

    /// Sample a random unit vector.
    /// We draw a normal distribution for each element of the vector, and then normalize the vector.
    pub fn uniform_normal_vector(&mut self, v: &mut [f64]) {
        let mut norm = 0.0;
        v.iter_mut().for_each(|x| {
            *x = self.normal.sample(&mut self.rng);
            norm += (*x) * (*x);
        });
        if norm <= 0. {
            // unlikely, but we'll just sample it again.
            return self.uniform_normal_vector(v);
        }
        norm = norm.sqrt();
        v.iter_mut().for_each(|x| *x /= norm);
    }

    pub fn uniform_in_ball(&mut self, r: f64, v: &mut [f64]) {
        self.uniform_normal_vector(v);

        let radius = self.uniform01().powf(1.0 / v.len() as f64) * r;

        v.iter_mut().for_each(|x| *x *= radius);
    }
}
