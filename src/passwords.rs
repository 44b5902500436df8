use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Argon2id cost used for admin passwords.
const MEM_KIB: u32 = 65536;
const ITERATIONS: u32 = 2;
const LANES: u32 = 1;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),

    #[error("Failed to parse password hash: {0}")]
    InvalidHash(String),

    #[error("Password must be between {min} and {max} characters")]
    Length { min: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, PasswordError>;

#[derive(Clone)]
pub struct Passwords<'a> {
    a2: Argon2<'a>,
    min_len: usize,
    max_len: usize,
}

impl<'a> Passwords<'a> {
    pub fn new(mem_kib: u32, iters: u32, lanes: u32) -> Result<Self> {
        let params = Params::new(mem_kib, iters, lanes, None)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        let a2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        Ok(Self {
            a2,
            min_len: 8,
            max_len: 512,
        })
    }

    /// The cost parameters every stored admin hash should carry.
    pub fn standard() -> Result<Self> {
        Self::new(MEM_KIB, ITERATIONS, LANES)
    }

    pub fn hash(&self, password: &str) -> Result<String> {
        self.guard_length(password)?;
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .a2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        Ok(phc.to_string())
    }

    /// Returns `(matches, needs_rehash)`; a hash made with other parameters
    /// still verifies but should be replaced.
    pub fn verify(&self, password: &str, pw_hash: &str) -> Result<(bool, bool)> {
        let parsed =
            PasswordHash::new(pw_hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;
        let ok = self
            .a2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();
        let needs_rehash = ok
            && !(parsed.algorithm == Algorithm::Argon2id.ident()
                && parsed.version == Some(Version::V0x13.into())
                && parsed.params.get_decimal("m") == Some(self.a2.params().m_cost())
                && parsed.params.get_decimal("t") == Some(self.a2.params().t_cost())
                && parsed.params.get_decimal("p") == Some(self.a2.params().p_cost()));
        Ok((ok, needs_rehash))
    }

    fn guard_length(&self, s: &str) -> Result<()> {
        let len = s.chars().count();
        if len < self.min_len || len > self.max_len {
            return Err(PasswordError::Length {
                min: self.min_len,
                max: self.max_len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Passwords<'static> {
        Passwords::new(1024, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_and_verify_ok() {
        let passwords = cheap();
        let h = passwords.hash("correct horse").unwrap();
        assert_eq!(passwords.verify("correct horse", &h).unwrap(), (true, false));
        assert_eq!(passwords.verify("wrong horse", &h).unwrap(), (false, false));
    }

    #[test]
    fn test_rehash_when_params_change() {
        let h = cheap().hash("correct horse").unwrap();
        let stronger = Passwords::new(2048, 1, 1).unwrap();
        assert_eq!(stronger.verify("correct horse", &h).unwrap(), (true, true));
    }

    #[test]
    fn test_length_bounds() {
        assert!(matches!(
            cheap().hash("short"),
            Err(PasswordError::Length { min: 8, .. })
        ));
    }

    #[test]
    fn test_invalid_hash() {
        let result = cheap().verify("secret", "invalid_hash");
        assert!(matches!(result.unwrap_err(), PasswordError::InvalidHash(_)));
    }
}
