use serde::Serialize;

use crate::{
    config::Config,
    error::{AppError, AppResult},
};

/// Interest used when the operator leaves the field blank
pub const DEFAULT_INTERESTS: &str = "popular family animation";

pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 18;

/// Everything a run knows about the child and where they watch
///
/// Built once at the start of a run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserContext {
    age: u8,
    interests: String,
    platforms: Vec<String>,
    country: String,
    locale: String,
}

impl UserContext {
    /// Creates a context, validating the age and normalizing the free-text fields
    pub fn new<I, S>(
        age: u32,
        interests: &str,
        platforms: I,
        country: impl Into<String>,
        locale: impl Into<String>,
    ) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let age = Self::validate_age(age)?;

        let interests = match interests.trim() {
            "" => DEFAULT_INTERESTS.to_string(),
            trimmed => trimmed.to_string(),
        };

        let platforms = platforms
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();

        Ok(Self {
            age,
            interests,
            platforms,
            country: country.into(),
            locale: locale.into(),
        })
    }

    /// Creates a context for the configured country and locale
    pub fn for_config<I, S>(age: u32, interests: &str, platforms: I, config: &Config) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            age,
            interests,
            platforms,
            config.target_country.clone(),
            config.target_locale.clone(),
        )
    }

    /// Checks an age against the supported 1-18 range
    pub fn validate_age(age: u32) -> AppResult<u8> {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(AppError::InvalidInput(format!(
                "Age must be between {} and {}, got {}",
                MIN_AGE, MAX_AGE, age
            )));
        }
        Ok(age as u8)
    }

    /// Splits a comma-separated platform list as typed by the operator
    pub fn parse_platforms(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect()
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn interests(&self) -> &str {
        &self.interests
    }

    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context() {
        let ctx = UserContext::new(8, "space adventure", ["Netflix", " Disney Plus "], "BR", "pt-BR")
            .unwrap();
        assert_eq!(ctx.age(), 8);
        assert_eq!(ctx.interests(), "space adventure");
        assert_eq!(ctx.platforms(), &["netflix".to_string(), "disney plus".to_string()]);
        assert_eq!(ctx.country(), "BR");
        assert_eq!(ctx.locale(), "pt-BR");
    }

    #[test]
    fn test_blank_interests_defaulted() {
        let ctx = UserContext::new(5, "   ", Vec::<String>::new(), "BR", "pt-BR").unwrap();
        assert_eq!(ctx.interests(), DEFAULT_INTERESTS);
    }

    #[test]
    fn test_age_out_of_range() {
        let too_young = UserContext::new(0, "dinosaurs", Vec::<String>::new(), "BR", "pt-BR");
        assert!(matches!(too_young, Err(AppError::InvalidInput(_))));

        let too_old = UserContext::new(19, "dinosaurs", Vec::<String>::new(), "BR", "pt-BR");
        assert!(too_old.unwrap_err().to_string().contains("between 1 and 18"));
    }

    #[test]
    fn test_parse_platforms() {
        let platforms = UserContext::parse_platforms("Netflix, ,Disney+,  GloboPlay ,");
        assert_eq!(platforms, vec!["netflix", "disney+", "globoplay"]);
        assert!(UserContext::parse_platforms("").is_empty());
    }
}
