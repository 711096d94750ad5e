//! Public vault state
//!
//! [`VaultState`] is the payload a caller persists after [`crate::generate_secret`]
//! and feeds back into [`crate::recover_secret`]. It serializes through serde
//! to exactly the named fields of spec §6: `setsize`, `corpus_size`,
//! `correctthreshold`, `prime`, `sketch`, `extractor`, `salt`, `hash`.
//! `errorthreshold` is derived, never stored (spec §6), so it lives behind
//! an accessor rather than a field.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::kdf::KdfError;
use crate::params::InputParams;
use crate::sketch::{self, SketchError};

/// The public state produced by [`crate::generate_secret`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VaultState {
    pub setsize: usize,
    pub corpus_size: u64,
    pub correctthreshold: usize,
    pub prime: u64,
    pub sketch: Vec<u64>,
    pub extractor: Vec<u64>,
    #[serde(with = "hex_upper")]
    pub salt: [u8; 32],
    #[serde(with = "hex_upper")]
    pub hash: [u8; 32],
}

impl VaultState {
    /// Build the public state for a freshly chosen word set (spec §4.7 step 2).
    pub fn create(params: &InputParams, words: &[u64]) -> Result<Self, VaultStateError> {
        let t = params.error_threshold();
        let sketch = sketch::build_sketch(words, params.prime, t)?;
        let hash = crate::kdf::words_hash(words, &params.salt)?;
        Ok(VaultState {
            setsize: params.setsize,
            corpus_size: params.corpus_size,
            correctthreshold: params.correctthreshold,
            prime: params.prime,
            sketch,
            extractor: params.extractor.clone(),
            salt: params.salt,
            hash,
        })
    }

    /// `t = 2*(setsize - correctthreshold)`, recomputed rather than stored
    /// (spec §6 "`errorthreshold` is not stored").
    pub fn error_threshold(&self) -> u64 {
        2 * (self.setsize - self.correctthreshold) as u64
    }

    /// Serialize to the canonical JSON form (spec §6).
    pub fn dump(&self) -> String {
        serde_json::to_string(self).expect("VaultState always serializes")
    }

    /// Parse the canonical JSON form. `errorthreshold` is recomputed, not
    /// read, matching [`VaultState::error_threshold`].
    pub fn load(repn: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(repn)
    }
}

/// Errors raised while constructing the public state.
#[derive(Debug, thiserror::Error)]
pub enum VaultStateError {
    #[error(transparent)]
    Sketch(#[from] SketchError),
    #[error(transparent)]
    Kdf(#[from] KdfError),
}

pub(crate) mod hex_upper {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&hex::encode_upper(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(de)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 32 bytes of hex"))
    }
}
