//! Runtime environment.
//!
//! The environment decides one thing in this crate: whether a routing miss
//! that nobody downstream could answer is shown to the client as a diagnostic
//! `404`, or whether the downstream error is passed on untouched. It is read
//! once, when the [`App`](crate::App) is built, and handed to every mounted
//! stage by value.

use std::env::VarError;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Name of the process environment variable read by [`Environment::detect`].
pub const ENV_VAR: &str = "ASTOR_ENV";

/// Where the process is running.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Environment {
    /// Local development. Routing diagnostics are rendered into responses.
    #[default]
    Development,
    Testing,
    Production,
}

impl Environment {
    /// Reads [`ENV_VAR`]. An unset variable means [`Environment::Development`].
    pub fn detect() -> Result<Self, Error> {
        Self::from_var(std::env::var(ENV_VAR))
    }

    fn from_var(value: Result<String, VarError>) -> Result<Self, Error> {
        match value {
            Ok(value) => value.parse(),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(raw)) => Err(Error::Environment {
                var: ENV_VAR,
                value: raw.to_string_lossy().into_owned(),
            }),
        }
    }

    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Testing     => "testing",
            Self::Production  => "production",
        }
    }
}

/// Accepts the full names and their short forms, case-insensitively.
impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "testing" | "test"    => Ok(Self::Testing),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(Error::Environment { var: ENV_VAR, value: s.to_owned() }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_means_development() {
        let env = Environment::from_var(Err(VarError::NotPresent)).unwrap();
        assert_eq!(env, Environment::Development);
        assert!(env.is_development());
    }

    #[test]
    fn short_and_mixed_case_names() {
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!(" test ".parse::<Environment>().unwrap(), Environment::Testing);
        assert_eq!("Dev".parse::<Environment>().unwrap(), Environment::Development);
    }

    #[test]
    fn only_development_renders_diagnostics() {
        assert!(!Environment::Production.is_development());
        assert!(!Environment::Testing.is_development());
    }

    #[test]
    fn unknown_value_is_rejected() {
        let err = Environment::from_var(Ok("staging".to_owned())).unwrap_err();
        assert!(matches!(err, Error::Environment { value, .. } if value == "staging"));
    }
}
