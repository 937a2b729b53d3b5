// src/core/hash.rs
// FNV-1a 64. Stable across builds and platforms, unlike `DefaultHasher`,
// so values derived from it may be persisted or compared between runs.

const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const PRIME: u64 = 0x0000_0100_0000_01b3;

#[derive(Clone, Copy, Debug)]
pub struct Fnv64(u64);

impl Default for Fnv64 {
    fn default() -> Self { Self(OFFSET) }
}

impl Fnv64 {
    pub fn new() -> Self { Self::default() }

    pub fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(PRIME);
        }
    }

    pub fn write_u32(&mut self, v: u32) { self.write(&v.to_le_bytes()); }

    pub fn finish(&self) -> u64 { self.0 }
}
