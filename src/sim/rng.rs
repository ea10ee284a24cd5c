//! Uniform sample sources
//!
//! Every random decision in the simulation draws one sample in `[0, 1)`
//! from a `Sampler`. Any `rand` generator is a sampler; tests can replay an
//! exact sequence with `ScriptedSampler`.

use std::collections::VecDeque;

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform samples in `[0, 1)`
pub trait Sampler {
    fn sample(&mut self) -> f64;
}

impl<R: RngCore> Sampler for R {
    fn sample(&mut self) -> f64 {
        rand::Rng::random::<f64>(self)
    }
}

/// Seeded default generator for a session
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of samples, then repeats `fallback` forever
#[derive(Debug, Clone)]
pub struct ScriptedSampler {
    samples: VecDeque<f64>,
    fallback: f64,
    drawn: usize,
}

impl ScriptedSampler {
    pub fn new(samples: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            fallback,
            drawn: 0,
        }
    }

    /// A sampler that never triggers a `floor(sample * odds) == 0` draw
    pub fn never() -> Self {
        Self::new([], 0.999)
    }

    /// Number of samples drawn so far
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl Sampler for ScriptedSampler {
    fn sample(&mut self) -> f64 {
        self.drawn += 1;
        self.samples.pop_front().unwrap_or(self.fallback)
    }
}

/// True with probability `1 / odds`: `floor(sample * odds) == 0`
pub fn one_in(sampler: &mut dyn Sampler, odds: u32) -> bool {
    (sampler.sample() * odds as f64).floor() as i64 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_samplers_agree() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for _ in 0..32 {
            let x = a.sample();
            assert!((0.0..1.0).contains(&x));
            assert_eq!(x, b.sample());
        }
    }

    #[test]
    fn test_scripted_replays_then_falls_back() {
        let mut s = ScriptedSampler::new([0.1, 0.5], 0.9);
        assert_eq!(s.sample(), 0.1);
        assert_eq!(s.sample(), 0.5);
        assert_eq!(s.sample(), 0.9);
        assert_eq!(s.drawn(), 3);
    }

    #[test]
    fn test_one_in_threshold() {
        let mut s = ScriptedSampler::new([0.0, 0.045, 0.05], 0.5);
        assert!(one_in(&mut s, 22));
        assert!(one_in(&mut s, 22));
        assert!(!one_in(&mut s, 22));
        assert!(!one_in(&mut ScriptedSampler::never(), 60));
    }
}
