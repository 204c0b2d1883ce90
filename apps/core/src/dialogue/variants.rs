//! Selection among equivalent wording variants.
//!
//! The choice only changes wording, never state. Production uses a seeded
//! RNG; tests pin the index with [`FixedPicker`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks an index in `0..count`.
pub trait VariantPicker: Send {
    fn pick(&mut self, count: usize) -> usize;
}

/// Uniform random choice.
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl VariantPicker for RandomPicker {
    fn pick(&mut self, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        self.rng.gen_range(0..count)
    }
}

/// Always the same index (wrapped into range).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl VariantPicker for FixedPicker {
    fn pick(&mut self, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        self.0 % count
    }
}

/// Choose one variant.
pub fn choose<'a>(picker: &mut dyn VariantPicker, variants: &[&'a str]) -> &'a str {
    let index = picker.pick(variants.len());
    variants.get(index).copied().unwrap_or_default()
}
