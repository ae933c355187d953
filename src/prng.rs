//! Seeded pseudo-random number generation
//!
//! Everything random about an avatar is derived from its _seed_, a plain
//! string, through a [`SeededPrng`]. The [`Prng`] trait only needs a
//! [`RngCore`] underneath, which makes it easy to swap the generator for
//! a test double that replays recorded outputs.
use rand::RngCore;

/// the two operations a style needs on top of raw random numbers
///
/// > **Note**
/// >
/// > every [`RngCore`] is a [`Prng`], each call to [`Prng::integer`] consumes
/// > exactly one 32-bit output of the underlying generator.
pub trait Prng {
    /// draw an integer in `[min, max]`, both bounds included
    fn integer(&mut self, min: i64, max: i64) -> i64;

    /// pick one of the `candidates`
    ///
    /// an empty slice yields [`None`] without consuming anything.
    fn pick<'a, T>(&mut self, candidates: &'a [T]) -> Option<&'a T> {
        if candidates.is_empty() {
            return None;
        }
        let index = self.integer(0, candidates.len() as i64 - 1);
        candidates.get(index as usize)
    }

    /// draw a boolean that is `true` with a `likelihood` in percent
    ///
    /// `bool(0.0)` is never `true` and `bool(100.0)` always is.
    fn bool(&mut self, likelihood: f64) -> bool {
        self.integer(1, 100) as f64 <= likelihood
    }
}

impl<R: RngCore + ?Sized> Prng for R {
    fn integer(&mut self, min: i64, max: i64) -> i64 {
        let next = self.next_u32() as i32 as f64;
        let unit = (next - i32::MIN as f64) / (i32::MAX as f64 - i32::MIN as f64);
        let value = (unit * (max + 1 - min) as f64 + min as f64).floor() as i64;
        value.min(max)
    }
}

fn xorshift(mut value: i32) -> i32 {
    value ^= value.wrapping_shl(13);
    value ^= value >> 17;
    value ^= value.wrapping_shl(5);
    value
}

fn hash(seed: &str) -> i32 {
    seed.encode_utf16().fold(0, |hash: i32, unit| {
        xorshift(hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(unit as i32))
    })
}

/// a 32-bit _xorshift_ generator keyed by a string seed
///
/// two generators created from the same seed produce the exact same
/// sequence of numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededPrng {
    seed: String,
    state: i32,
}

impl SeededPrng {
    pub fn new(seed: &str) -> Self {
        let state = match hash(seed) {
            // a zero state would only ever produce zeros
            0 => 1,
            h => h,
        };
        Self {
            seed: seed.to_string(),
            state,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl RngCore for SeededPrng {
    fn next_u32(&mut self) -> u32 {
        self.state = xorshift(self.state);
        self.state as u32
    }

    fn next_u64(&mut self) -> u64 {
        let low = self.next_u32() as u64;
        let high = self.next_u32() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
