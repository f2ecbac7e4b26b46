/// 32 byte RNG seed derived from an arbitrary string.
pub fn seed_from_str(input: &str) -> [u8; 32] {
    blake3::hash(input.as_bytes()).into()
}

/// Same as `seed_from_str` on the decimal text of `n`, so `"42"` and `42`
/// yield identical seeds.
pub fn seed_from_u64(n: u64) -> [u8; 32] {
    seed_from_str(&n.to_string())
}
