use rand::{Error, RngCore, SeedableRng};

// Draw interface used by the generators.
// Every method consumes exactly one `next_u32` from the underlying generator,
// so the number of draws per run depends only on grid size and settings.
pub trait RandomSource {
    fn rand32(&mut self) -> u32;

    // 0..=255
    #[inline]
    fn rand8(&mut self) -> u8 {
        (self.rand32() >> 24) as u8
    }

    // 0..bound; a zero bound still consumes a draw and yields 0
    #[inline]
    fn below(&mut self, bound: u32) -> u32 {
        let r = self.rand32();
        if bound == 0 { 0 } else { r % bound }
    }

    // Uniform in min..=max, bounds may come in either order
    #[inline]
    fn range32(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = (i64::from(hi) - i64::from(lo) + 1) as u64;
        let offset = u64::from(self.rand32()) % span;
        (i64::from(lo) + offset as i64) as i32
    }

    // True one time in `n`
    #[inline]
    fn one_in(&mut self, n: u32) -> bool {
        self.below(n) == 0
    }
}

impl<R: RngCore + ?Sized> RandomSource for R {
    #[inline]
    fn rand32(&mut self) -> u32 {
        self.next_u32()
    }
}

// Small Lehmer-style mixer: an additive counter run through two
// multiply/xor-fold rounds. Fast and good enough for terrain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lehmer32 {
    state: u32,
}

impl Lehmer32 {
    pub fn new(state: u32) -> Self {
        Self { state }
    }
}

impl RngCore for Lehmer32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0xe120_fc15);
        let tmp = u64::from(self.state).wrapping_mul(0x4a39_b70d);
        let m1 = ((tmp >> 32) ^ tmp) as u32;
        let tmp = u64::from(m1).wrapping_mul(0x12fa_d5c9);
        ((tmp >> 32) ^ tmp) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_u32());
        let lo = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lehmer32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

// Explicit seed, or OS entropy when none is configured
pub(crate) fn seeded<R: SeedableRng>(seed: Option<u64>) -> R {
    match seed {
        Some(seed) => R::seed_from_u64(seed),
        None => R::from_entropy(),
    }
}
