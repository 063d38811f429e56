//! Configuration builder trait
//!
//! Gives every configuration struct in the workspace the same shape:
//! defaults, loading from the environment, and validation before use.

use crate::Result;

/// Trait for configuration structures that are loaded once at startup
///
/// ```rust,ignore
/// use tooling::config::ConfigBuilder;
///
/// let config = ModelConfig::load("")?;
/// ```
pub trait ConfigBuilder: Default + Clone {
    /// Validate the configuration
    ///
    /// Should reject values that would make the process misbehave later,
    /// such as zero timeouts.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Load configuration from environment variables
    ///
    /// Variables are looked up as `{prefix}{NAME}`. Unset variables fall
    /// back to the `Default` value of the field.
    fn from_env(prefix: &str) -> Result<Self>;

    /// Create and validate the default configuration
    fn build() -> Result<Self> {
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Load from the environment and validate
    fn load(prefix: &str) -> Result<Self> {
        let config = Self::from_env(prefix)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::get_env_parse_or;
    use crate::ToolingError;

    #[derive(Debug, Clone, PartialEq)]
    struct TestConfig {
        retries: i32,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self { retries: 2 }
        }
    }

    impl ConfigBuilder for TestConfig {
        fn validate(&self) -> Result<()> {
            if self.retries < 0 {
                return Err(ToolingError::InvalidConfig(
                    "retries must be non-negative".into(),
                ));
            }
            Ok(())
        }

        fn from_env(prefix: &str) -> Result<Self> {
            let defaults = Self::default();
            Ok(Self {
                retries: get_env_parse_or(&format!("{}RETRIES", prefix), defaults.retries)?,
            })
        }
    }

    #[test]
    fn test_build_uses_defaults() {
        let config = TestConfig::build().unwrap();
        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn test_load_unset_env_falls_back() {
        let config = TestConfig::load("TOOLING_BUILDER_UNSET_").unwrap();
        assert_eq!(config.retries, 2);
    }

    #[test]
    fn test_load_reads_env() {
        std::env::set_var("TOOLING_BUILDER_READ_RETRIES", "5");
        let config = TestConfig::load("TOOLING_BUILDER_READ_").unwrap();
        assert_eq!(config.retries, 5);
        std::env::remove_var("TOOLING_BUILDER_READ_RETRIES");
    }

    #[test]
    fn test_load_rejects_invalid() {
        std::env::set_var("TOOLING_BUILDER_BAD_RETRIES", "-1");
        let result = TestConfig::load("TOOLING_BUILDER_BAD_");
        assert!(result.is_err());
        std::env::remove_var("TOOLING_BUILDER_BAD_RETRIES");
    }
}
