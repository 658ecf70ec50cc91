//! Where movie data comes from.

use std::fmt;

/// Selects the movie provider behind the search service.
///
/// Production always talks to OMDb and refuses to start without an API
/// key. Development uses OMDb when a key is present and the bundled demo
/// catalog otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RuntimeMode {
    #[value(alias = "prod")]
    Production,
    #[default]
    #[value(alias = "dev")]
    Development,
}

impl RuntimeMode {
    pub fn is_production(self) -> bool {
        self == RuntimeMode::Production
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RuntimeMode::Production => "production",
            RuntimeMode::Development => "development",
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::ValueEnum;

    use super::*;

    #[test]
    fn test_mode_names_and_aliases() {
        assert_eq!(
            RuntimeMode::from_str("prod", true),
            Ok(RuntimeMode::Production)
        );
        assert_eq!(
            RuntimeMode::from_str("Development", true),
            Ok(RuntimeMode::Development)
        );
        assert!(RuntimeMode::from_str("staging", true).is_err());
        assert_eq!(RuntimeMode::Production.to_string(), "production");
    }

    #[test]
    fn test_default_mode_serves_without_a_key() {
        assert!(!RuntimeMode::default().is_production());
    }
}
