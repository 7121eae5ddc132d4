//! Synthetic identifiers, public keys and fingerprints.
//!
//! None of this is cryptographically meaningful. Ids combine a random
//! component with a monotonic counter so they stay unique within a session
//! even if the random source repeats.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use sha2::{Digest, Sha256};

/// Key algorithm advertised in generated public keys.
pub const KEY_ALGORITHM: &str = "ssh-ed25519";

/// Number of fingerprint octets rendered.
const FINGERPRINT_OCTETS: usize = 16;

/// Source of synthetic identifiers and key material.
#[derive(Debug)]
pub struct IdGenerator {
    rng: StdRng,
    counter: u64,
}

impl IdGenerator {
    /// Generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            counter: 0,
        }
    }

    /// Generator with a fixed seed, for reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            counter: 0,
        }
    }

    /// Build from an optional seed (entropy when `None`).
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }

    /// A new instance id: `i-` followed by 17 lowercase hex digits.
    ///
    /// The first 12 digits are random, the last 5 are the session counter.
    pub fn new_instance_id(&mut self) -> String {
        self.counter += 1;
        let random = self.rng.next_u64() & 0xffff_ffff_ffff;
        format!("i-{random:012x}{:05x}", self.counter & 0xf_ffff)
    }

    /// A synthetic OpenSSH-style public key line.
    ///
    /// The base64 blob follows the wire layout of an ed25519 key (length
    /// prefixed algorithm name, then 32 key bytes) so it looks plausible.
    pub fn new_public_key(&mut self, comment: &str) -> String {
        let mut key = [0u8; 32];
        self.rng.fill_bytes(&mut key);

        let mut blob = Vec::with_capacity(4 + KEY_ALGORITHM.len() + 4 + key.len());
        blob.extend_from_slice(&(KEY_ALGORITHM.len() as u32).to_be_bytes());
        blob.extend_from_slice(KEY_ALGORITHM.as_bytes());
        blob.extend_from_slice(&(key.len() as u32).to_be_bytes());
        blob.extend_from_slice(&key);

        format!("{KEY_ALGORITHM} {} {comment}", STANDARD.encode(&blob))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive a colon-separated hex fingerprint from key material.
///
/// Deterministic: the same input always yields the same fingerprint.
pub fn fingerprint(material: &str) -> String {
    let digest = Sha256::digest(material.as_bytes());
    digest[..FINGERPRINT_OCTETS]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}
