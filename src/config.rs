use serde::Deserialize;

/// Upper bound on recommendations justified per run
pub const MAX_RECOMMENDATIONS_CAP: usize = 3;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDb API key; the catalog is unavailable without it
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDb API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Gemini API key; expansion and justifications degrade without it
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Gemini API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Gemini model name
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Country whose catalog and rating scheme apply to every run
    #[serde(default = "default_target_country")]
    pub target_country: String,

    /// Locale used for catalog text
    #[serde(default = "default_target_locale")]
    pub target_locale: String,

    /// Number of recommendations to justify and show
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            tmdb_api_url: default_tmdb_api_url(),
            gemini_api_key: None,
            gemini_api_url: default_gemini_api_url(),
            gemini_model: default_gemini_model(),
            target_country: default_target_country(),
            target_locale: default_target_locale(),
            max_recommendations: default_max_recommendations(),
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

fn default_target_country() -> String {
    "BR".to_string()
}

fn default_target_locale() -> String {
    "pt-BR".to_string()
}

fn default_max_recommendations() -> usize {
    2
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Recommendation count clamped to what the pipeline supports
    pub fn recommendation_limit(&self) -> usize {
        self.max_recommendations.clamp(1, MAX_RECOMMENDATIONS_CAP)
    }

    /// Returns the key only when it is set and non-blank
    pub fn tmdb_key(&self) -> Option<&str> {
        non_blank(self.tmdb_api_key.as_deref())
    }

    pub fn gemini_key(&self) -> Option<&str> {
        non_blank(self.gemini_api_key.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_environment() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.target_country, "BR");
        assert_eq!(config.target_locale, "pt-BR");
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.port, 3000);
        assert!(config.tmdb_key().is_none());
        assert!(config.gemini_key().is_none());
    }

    #[test]
    fn test_values_from_environment() {
        let vars = vec![
            ("TMDB_API_KEY".to_string(), "abc".to_string()),
            ("GEMINI_API_KEY".to_string(), "  ".to_string()),
            ("TARGET_COUNTRY".to_string(), "PT".to_string()),
            ("MAX_RECOMMENDATIONS".to_string(), "3".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.tmdb_key(), Some("abc"));
        assert_eq!(config.gemini_key(), None);
        assert_eq!(config.target_country, "PT");
        assert_eq!(config.recommendation_limit(), 3);
    }

    #[test]
    fn test_recommendation_limit_is_clamped() {
        let mut config = Config::default();
        config.max_recommendations = 0;
        assert_eq!(config.recommendation_limit(), 1);
        config.max_recommendations = 10;
        assert_eq!(config.recommendation_limit(), 3);
    }
}
