//! Deterministic xorshift32 RNG - seeded per unit so replays match

/// Advance the state and return the next value
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    if x == 0 {
        // Zero is a fixed point of xorshift
        x = 0x9E37_79B9;
    }
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Uniform float in [0, 1)
#[inline]
pub fn unit_f32(state: &mut u32) -> f32 {
    (xorshift32(state) >> 8) as f32 / (1u32 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_still_advances() {
        let mut s = 0;
        let a = xorshift32(&mut s);
        let b = xorshift32(&mut s);
        assert_ne!(a, 0);
        assert_ne!(a, b);
    }

    #[test]
    fn unit_range() {
        let mut s = 12345;
        for _ in 0..1000 {
            let v = unit_f32(&mut s);
            assert!((0.0..1.0).contains(&v));
        }
    }
}
