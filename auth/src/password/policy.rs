use super::errors::PasswordPolicyError;

/// Minimum requirements a new password has to meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl PasswordPolicy {
    pub const DEFAULT_MIN_LENGTH: usize = 6;

    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Check a candidate password.
    ///
    /// Length is counted in characters, not bytes.
    pub fn check(&self, password: &str) -> Result<(), PasswordPolicyError> {
        let actual = password.chars().count();
        if actual < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min: self.min_length,
                actual,
            });
        }
        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_minimum_length() {
        assert!(PasswordPolicy::default().check("secret").is_ok());
    }

    #[test]
    fn test_rejects_short_password() {
        let result = PasswordPolicy::default().check("abc");
        assert_eq!(
            result,
            Err(PasswordPolicyError::TooShort { min: 6, actual: 3 })
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // six characters, twelve bytes
        assert!(PasswordPolicy::default().check("éééééé").is_ok());
        assert!(PasswordPolicy::default().check("ééééé").is_err());
    }

    #[test]
    fn test_error_message() {
        let err = PasswordPolicy::new(8).check("short").unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 8 characters");
    }
}
