//! Deployment environment labels.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// The backend deployment a client talks to.
///
/// The environment is a label only: it shows up in the `User-Agent` header
/// and in logs. The base URL is configured separately.
///
/// # Example
///
/// ```rust
/// use mini_shop_api::Environment;
///
/// let env: Environment = "test".parse().unwrap();
/// assert_eq!(env, Environment::Test);
/// assert_eq!(env.to_string(), "test");
/// assert_eq!(Environment::default(), Environment::Prod);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Local or shared development backend.
    Dev,
    /// Pre-release test backend.
    Test,
    /// Production backend.
    #[default]
    Prod,
}

impl Environment {
    /// Returns a human-readable name for the environment.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Dev => "Development",
            Self::Test => "Testing",
            Self::Prod => "Production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dev => write!(f, "dev"),
            Self::Test => write!(f, "test"),
            Self::Prod => write!(f, "prod"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Dev),
            "test" | "testing" => Ok(Self::Test),
            "prod" | "production" => Ok(Self::Prod),
            _ => Err(ConfigError::InvalidEnvironment {
                value: s.to_string(),
            }),
        }
    }
}
