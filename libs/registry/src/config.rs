use canonid_id::{DEFAULT_CODE_LENGTH, MAX_TRIMMED_CODE_LENGTH};

/// Default attempt limit for [`CollisionChecker::assign_with_retries`].
///
/// [`CollisionChecker::assign_with_retries`]: crate::CollisionChecker::assign_with_retries
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Registry and code assignment configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Length of generated codes.
    pub code_length: usize,

    /// Attempt limit for the opt-in regenerate loop.
    pub max_attempts: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RegistryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Unparsable values fall back to defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let code_length = var("CANONID_CODE_LENGTH")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_CODE_LENGTH);

        let max_attempts = var("CANONID_MAX_ATTEMPTS")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);

        Self {
            code_length,
            max_attempts,
        }
        .normalized()
    }

    /// Clamps values into their usable ranges.
    ///
    /// Codes are 1 to [`MAX_TRIMMED_CODE_LENGTH`] characters and at least
    /// one attempt is always made.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            code_length: self.code_length.clamp(1, MAX_TRIMMED_CODE_LENGTH),
            max_attempts: self.max_attempts.max(1),
        }
    }
}
