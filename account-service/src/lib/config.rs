use std::collections::HashMap;
use std::env;

use auth::HashAlgorithm;
use auth::JwtError;
use auth::PasswordHasher;
use auth::TokenConfig;
use auth::TokenKind;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Secrets shorter than this are accepted but reported at startup.
pub const RECOMMENDED_SECRET_LENGTH: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub environment: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub cors_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_days: i64,
    pub refresh_ttl_days: i64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PasswordAlgorithm {
    Bcrypt,
    Argon2id,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub algorithm: PasswordAlgorithm,
    pub cost: u32,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Flat deployment variables (JWT_ACCESS, JWT_REFRESH, PORT, DATABASE_URL, NODE_ENV)
    /// 2. Nested environment variables (DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::load_from(&run_mode, env::vars().collect())
    }

    /// Load configuration for `run_mode` with `vars` standing in for the process environment.
    ///
    /// `environment` falls back to `run_mode` unless a file, `ENVIRONMENT` or `NODE_ENV` sets it.
    pub fn load_from(run_mode: &str, vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let flat = |key: &str| vars.get(key).cloned();

        let configuration = ConfigBuilder::builder()
            .set_default("environment", run_mode)?
            .set_default("server.http_port", 5001_i64)?
            .set_default("server.cors_origin", "http://localhost:3000")?
            .set_default("database.max_connections", 5_i64)?
            .set_default("jwt.access_ttl_days", auth::jwt::config::ACCESS_TOKEN_TTL_DAYS)?
            .set_default("jwt.refresh_ttl_days", auth::jwt::config::REFRESH_TOKEN_TTL_DAYS)?
            .set_default("password.algorithm", "bcrypt")?
            .set_default("password.cost", 10_i64)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(
                Environment::default()
                    .separator("__")
                    .source(Some(vars.clone())),
            )
            .set_override_option("jwt.access_secret", flat("JWT_ACCESS"))?
            .set_override_option("jwt.refresh_secret", flat("JWT_REFRESH"))?
            .set_override_option("server.http_port", flat("PORT"))?
            .set_override_option("database.url", flat("DATABASE_URL"))?
            .set_override_option("environment", flat("NODE_ENV"))?
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Production turns on the `Secure` cookie attribute.
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

impl JwtConfig {
    /// Build the signing configuration for both token classes.
    ///
    /// # Errors
    /// * `EmptySecret` - Either secret is empty
    pub fn token_config(&self) -> Result<TokenConfig, JwtError> {
        Ok(
            TokenConfig::new(self.access_secret.as_bytes(), self.refresh_secret.as_bytes())?
                .with_ttl(TokenKind::Access, Duration::days(self.access_ttl_days))
                .with_ttl(TokenKind::Refresh, Duration::days(self.refresh_ttl_days)),
        )
    }

    /// Names of the token classes whose secret is shorter than recommended.
    pub fn weak_secrets(&self) -> Vec<&'static str> {
        [
            (TokenKind::Access, &self.access_secret),
            (TokenKind::Refresh, &self.refresh_secret),
        ]
        .into_iter()
        .filter(|(_, secret)| secret.len() < RECOMMENDED_SECRET_LENGTH)
        .map(|(kind, _)| kind.as_str())
        .collect()
    }
}

impl PasswordConfig {
    pub fn hasher(&self) -> PasswordHasher {
        match self.algorithm {
            PasswordAlgorithm::Bcrypt => PasswordHasher::bcrypt(self.cost),
            PasswordAlgorithm::Argon2id => PasswordHasher::with_algorithm(HashAlgorithm::Argon2id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(access: &str, refresh: &str) -> JwtConfig {
        JwtConfig {
            access_secret: access.to_string(),
            refresh_secret: refresh.to_string(),
            access_ttl_days: 10,
            refresh_ttl_days: 30,
        }
    }

    const ACCESS_SECRET: &str = "test-access-secret-for-jwt-signing-32-bytes";
    const REFRESH_SECRET: &str = "test-refresh-secret-for-jwt-signing-32-bytes";

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        [("JWT_ACCESS", ACCESS_SECRET), ("JWT_REFRESH", REFRESH_SECRET)]
            .iter()
            .chain(pairs)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_run_mode_production_enables_secure_cookies() {
        let config = Config::load_from("production", vars(&[])).unwrap();

        assert_eq!(config.environment, "production");
        assert!(config.is_production());
    }

    #[test]
    fn test_run_mode_development_by_default() {
        let config = Config::load_from("development", vars(&[])).unwrap();

        assert!(!config.is_production());
        assert_eq!(config.server.http_port, 5001);
        assert_eq!(config.jwt.access_ttl_days, 10);
        assert_eq!(config.password.algorithm, PasswordAlgorithm::Bcrypt);
    }

    #[test]
    fn test_node_env_overrides_run_mode() {
        let config =
            Config::load_from("development", vars(&[("NODE_ENV", "production")])).unwrap();
        assert!(config.is_production());

        let config =
            Config::load_from("production", vars(&[("NODE_ENV", "development")])).unwrap();
        assert!(!config.is_production());
    }

    #[test]
    fn test_flat_variables_outrank_nested() {
        let config = Config::load_from(
            "development",
            vars(&[("SERVER__HTTP_PORT", "8080"), ("PORT", "9090")]),
        )
        .unwrap();
        assert_eq!(config.server.http_port, 9090);

        let config =
            Config::load_from("development", vars(&[("SERVER__HTTP_PORT", "8080")])).unwrap();
        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.jwt.access_secret, ACCESS_SECRET);
    }

    #[test]
    fn test_missing_secret_fails() {
        assert!(Config::load_from("development", HashMap::new()).is_err());
    }

    #[test]
    fn test_token_config_uses_configured_ttl() {
        let config = jwt("a".repeat(32).as_str(), "r".repeat(32).as_str())
            .token_config()
            .unwrap();

        assert_eq!(config.ttl(TokenKind::Access), Duration::days(10));
        assert_eq!(config.ttl(TokenKind::Refresh), Duration::days(30));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            jwt("", "refresh").token_config(),
            Err(JwtError::EmptySecret(_))
        ));
    }

    #[test]
    fn test_weak_secrets_reported() {
        let weak = jwt("short", "r".repeat(32).as_str()).weak_secrets();
        assert_eq!(weak, vec![TokenKind::Access.as_str()]);
        assert!(jwt(&"a".repeat(32), &"r".repeat(40)).weak_secrets().is_empty());
    }

    #[test]
    fn test_password_config_selects_hasher() {
        let bcrypt = PasswordConfig {
            algorithm: PasswordAlgorithm::Bcrypt,
            cost: 12,
        };
        assert_eq!(bcrypt.hasher().algorithm(), HashAlgorithm::Bcrypt { cost: 12 });

        let argon = PasswordConfig {
            algorithm: PasswordAlgorithm::Argon2id,
            cost: 12,
        };
        assert_eq!(argon.hasher().algorithm(), HashAlgorithm::Argon2id);
    }
}
