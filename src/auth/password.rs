use crate::error::AppError;

/// Bcrypt hashing with a configurable cost.
///
/// Each `hash` call draws a fresh random salt; the cost and salt are embedded in
/// the returned string, so `verify` needs nothing else.
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    decoy_hash: String,
}

impl PasswordHasher {
    /// Fails if `cost` is outside what bcrypt accepts (4..=31).
    pub fn new(cost: u32) -> Result<Self, AppError> {
        let decoy_hash = bcrypt::hash("decoy-password-for-unknown-accounts", cost)
            .map_err(|e| AppError::Internal(format!("invalid bcrypt cost {}: {}", cost, e)))?;
        Ok(Self { cost, decoy_hash })
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Fails closed: a malformed stored hash is treated as a mismatch.
    pub fn verify(&self, password: &str, hashed_password: &str) -> bool {
        match bcrypt::verify(password, hashed_password) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("stored password hash could not be parsed: {}", e);
                false
            }
        }
    }

    /// Burns the same work as a real verification. Used when the account does
    /// not exist so login timing does not reveal registered emails.
    pub fn verify_decoy(&self, password: &str) {
        let _ = bcrypt::verify(password, &self.decoy_hash);
    }
}
