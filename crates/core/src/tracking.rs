//! Tracking code generation.

use rand::Rng;

const PREFIX: &str = "VEH-";
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 8;

/// Generate a human-readable tracking code: `VEH-` followed by eight random
/// characters from `A-Z0-9`. Uniqueness is probabilistic (36^8 space), not
/// checked against the store.
pub fn generate_tracking_code() -> String {
    let mut rng = rand::thread_rng();
    let mut code = String::with_capacity(PREFIX.len() + SUFFIX_LEN);
    code.push_str(PREFIX);
    for _ in 0..SUFFIX_LEN {
        let idx = rng.gen_range(0..ALPHABET.len());
        code.push(ALPHABET[idx] as char);
    }
    code
}
