use ahash::RandomState;

/// Hash state for the solver's memo tables, fixed by the solve seed so map
/// layout never depends on process-level randomness.
pub fn seeded_hasher(seed: &[u8; 32]) -> RandomState {
    let mut words = [0u64; 4];
    for (word, chunk) in words.iter_mut().zip(seed.chunks_exact(8)) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        *word = u64::from_be_bytes(bytes);
    }
    RandomState::with_seeds(words[0], words[1], words[2], words[3])
}
pub(crate) type HashMap<K, V> = std::collections::HashMap<K, V, RandomState>;

pub mod cache;
pub use cache::{Link, SegueCache, SegueId};
pub mod candidates;
pub mod circular_greedy;
pub mod greedy;
pub mod hill_climbing;
pub mod narrative;
pub use narrative::NarrativeStrategy;
pub mod optimal;
pub mod params;
pub use params::{InitPolicy, Params, MAX_EXACT_TOUR_LIMIT};
pub mod random;
pub mod registry;
pub use registry::{algorithm_exists, algorithm_names, get_algorithm, Algorithm, ALGORITHM_NAMES};
