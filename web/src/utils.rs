/// Seed from JavaScript's Math.random, 32 bits at a time.
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;

    let word = || (random() * f64::from(u32::MAX)) as u64;
    (word() << 32) | word()
}
