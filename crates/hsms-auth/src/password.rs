// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id password hashing for the credential table.
//!
//! Hashes are stored as PHC strings, so the parameters used at hashing time
//! travel with each hash and verification keeps working if the configured
//! parameters change later.

use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use hsms_config::model::AuthConfig;
use hsms_core::HsmsError;
use ring::rand::{SecureRandom, SystemRandom};

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl From<&AuthConfig> for KdfParams {
    fn from(config: &AuthConfig) -> Self {
        Self {
            memory_kib: config.kdf_memory_kib,
            iterations: config.kdf_iterations,
            parallelism: config.kdf_parallelism,
        }
    }
}

/// Hashes and verifies passwords with a fixed set of Argon2id parameters.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    rng: SystemRandom,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

impl PasswordHasher {
    pub fn new(params: KdfParams) -> Result<Self, HsmsError> {
        let params = Params::new(params.memory_kib, params.iterations, params.parallelism, None)
            .map_err(|e| HsmsError::Credential {
                message: format!("invalid Argon2id parameters: {e}"),
            })?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            rng: SystemRandom::new(),
        })
    }

    /// Hash `password` with a fresh random salt, returning a PHC string.
    pub fn hash(&self, password: &str) -> Result<String, HsmsError> {
        let mut salt = [0u8; 16];
        self.rng.fill(&mut salt).map_err(|_| HsmsError::Credential {
            message: "failed to generate random salt".to_string(),
        })?;
        let salt = SaltString::encode_b64(&salt).map_err(|e| HsmsError::Credential {
            message: format!("failed to encode salt: {e}"),
        })?;

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HsmsError::Credential {
                message: format!("password hashing failed: {e}"),
            })
    }

    /// Check `password` against a stored PHC string.
    ///
    /// An unparseable stored hash never verifies.
    pub fn verify(&self, password: &str, phc: &str) -> bool {
        match PasswordHash::new(phc) {
            Ok(parsed) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "stored credential hash is unparseable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordHasher {
        PasswordHasher::new(KdfParams {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn hash_then_verify() {
        let hasher = cheap();
        let phc = hasher.hash("nurse123").unwrap();
        assert!(phc.starts_with("$argon2id$"));
        assert!(hasher.verify("nurse123", &phc));
        assert!(!hasher.verify("nurse124", &phc));
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = cheap();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!cheap().verify("anything", "plaintext-password"));
    }

    #[test]
    fn invalid_params_are_rejected() {
        let err = PasswordHasher::new(KdfParams {
            memory_kib: 64,
            iterations: 0,
            parallelism: 1,
        })
        .unwrap_err();
        assert!(matches!(err, HsmsError::Credential { .. }));
    }

    #[test]
    fn default_params_match_argon2_recommendation() {
        let params = KdfParams::default();
        assert_eq!(params.memory_kib, 19456);
        assert_eq!(params.iterations, 2);
        assert_eq!(params.parallelism, 1);
    }
}
