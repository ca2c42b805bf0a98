use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use contact::{BrandingConfig, MailConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
    value::{Uncased, UncasedStr},
};
use nexa_auth::IdentityConfig;
use reviews::{DatabaseConfig, ReviewsConfig};
use serde::{Deserialize, Deserializer};

/// Names the optional YAML file layered over the defaults.
pub const CONFIG_PATH_VAR: &str = "NEXAFORGE_CONFIG";
pub const ENV_PREFIX: &str = "NEXAFORGE__";

const DEFAULT_FRONTEND_URL: &str = "https://nexa-forge-full-service-digital-age.vercel.app";

/// Flat variables kept from the original deployment, and the key each one
/// lands on.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("FRONTEND_URL", "server.allowed_origins"),
    ("EMAIL_HOST", "mail.host"),
    ("EMAIL_PORT", "mail.port"),
    ("EMAIL_USER", "mail.username"),
    ("EMAIL_PASS", "mail.password"),
    ("COMPANY_EMAIL", "mail.operator_mailbox"),
    ("DATABASE_URL", "database.url"),
    ("LOGO_URL", "branding.logo_url"),
    ("LINKEDIN_URL", "branding.linkedin_url"),
    ("INSTAGRAM_URL", "branding.instagram_url"),
    ("TWITTER_URL", "branding.twitter_url"),
    ("FIREBASE_PROJECT_ID", "identity.project_id"),
];

/// Older deployments name the store `MONGO_URI`; `DATABASE_URL` wins when
/// both are set.
const LEGACY_DATABASE_ALIAS: (&str, &str) = ("MONGO_URI", "database.url");

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub mail: MailConfig,
    pub branding: BrandingConfig,
    pub database: DatabaseConfig,
    pub identity: IdentityConfig,
    pub reviews: ReviewsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub port: u16,
    /// Browser origins allowed to call the API with credentials
    #[serde(deserialize_with = "one_or_many")]
    pub allowed_origins: Vec<String>,
    pub cors_max_age_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            allowed_origins: vec![DEFAULT_FRONTEND_URL.to_owned()],
            cors_max_age_seconds: 600,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load the configuration, taking the YAML path from `NEXAFORGE_CONFIG`.
    ///
    /// # Errors
    /// See [`AppConfig::load_from`].
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
        Self::load_from(path.as_deref())
    }

    /// Layered config:
    /// 1) defaults -> 2) YAML (if provided) -> 3) legacy flat env
    /// -> 4) env (`NEXAFORGE__*`)
    ///
    /// # Errors
    /// Fails when the YAML file is missing or any layer holds a value of the
    /// wrong shape.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment = merge_env_strings(
            figment,
            &Env::raw().only(&[LEGACY_DATABASE_ALIAS.0]).map(legacy_key),
        );
        figment = merge_env_strings(figment, &Env::raw().only(&legacy_names()).map(legacy_key));
        figment = merge_env_strings(figment, &Env::prefixed(ENV_PREFIX).split("__"));

        figment
            .extract_lossy()
            .context("invalid configuration")
    }

    pub fn apply_cli_overrides(&mut self, port: Option<u16>) {
        if let Some(port) = port {
            self.server.port = port;
        }
    }
}

/// Environment values are merged as the raw strings they are, so a numeric
/// password or project id survives untouched (leading zeros included).
/// `extract_lossy` converts them only where a field wants a number or bool.
fn merge_env_strings(figment: Figment, env: &Env) -> Figment {
    env.iter().fold(figment, |figment, (key, value)| {
        figment.merge(Serialized::default(key.as_str(), value))
    })
}

fn legacy_names() -> Vec<&'static str> {
    LEGACY_ENV.iter().map(|(name, _)| *name).collect()
}

fn legacy_key(key: &UncasedStr) -> Uncased<'_> {
    let mapped = LEGACY_ENV
        .iter()
        .chain(std::iter::once(&LEGACY_DATABASE_ALIAS))
        .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
        .map_or(key.as_str(), |(_, path)| *path);
    mapped.into()
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    // a single string may carry several comma-separated origins
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(origins) => origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_owned)
            .collect(),
        OneOrMany::Many(origins) => origins,
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    const TOUCHED_VARS: &[&str] = &[
        "PORT",
        "FRONTEND_URL",
        "EMAIL_HOST",
        "EMAIL_PORT",
        "EMAIL_USER",
        "EMAIL_PASS",
        "COMPANY_EMAIL",
        "DATABASE_URL",
        "MONGO_URI",
        "LOGO_URL",
        "LINKEDIN_URL",
        "INSTAGRAM_URL",
        "TWITTER_URL",
        "FIREBASE_PROJECT_ID",
        "NEXAFORGE__SERVER__PORT",
        "NEXAFORGE__SERVER__ALLOWED_ORIGINS",
        "NEXAFORGE__MAIL__PASSWORD",
        "NEXAFORGE__MAIL__OPERATOR_MAILBOX",
        "NEXAFORGE__REVIEWS__BIND_AUTHOR_TO_TOKEN",
    ];

    /// Run `f` with only `vars` set among the variables the loader reads.
    fn with_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
        let kvs: Vec<(&str, Option<&str>)> = TOUCHED_VARS
            .iter()
            .map(|name| {
                let value = vars.iter().find(|(k, _)| k == name).map(|(_, v)| *v);
                (*name, value)
            })
            .collect();
        temp_env::with_vars(kvs, f)
    }

    #[test]
    fn defaults_without_any_layer() {
        let cfg = with_env(&[], || AppConfig::load_from(None)).unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.server.allowed_origins, vec![DEFAULT_FRONTEND_URL]);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.mail.host, "smtp.gmail.com");
        assert_eq!(cfg.mail.port, 587);
        assert!(cfg.database.url.is_empty());
        assert!(!cfg.reviews.bind_author_to_token);
    }

    #[test]
    fn legacy_variables_are_mapped() {
        let cfg = with_env(
            &[
                ("PORT", "8080"),
                ("EMAIL_USER", "bot@nexaforge.com"),
                ("EMAIL_PASS", "app-password"),
                ("COMPANY_EMAIL", "hello@nexaforge.com"),
                ("FRONTEND_URL", "http://localhost:5173"),
                ("FIREBASE_PROJECT_ID", "nexa-forge"),
                ("LINKEDIN_URL", "https://linkedin.com/company/nexaforge"),
            ],
            || AppConfig::load_from(None),
        )
        .unwrap();

        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.allowed_origins, vec!["http://localhost:5173"]);
        assert_eq!(cfg.mail.username, "bot@nexaforge.com");
        assert_eq!(cfg.mail.password.expose_secret(), "app-password");
        assert_eq!(cfg.mail.operator_mailbox(), Some("hello@nexaforge.com"));
        assert_eq!(cfg.identity.project_id, "nexa-forge");
        assert_eq!(
            cfg.branding.linkedin_url,
            "https://linkedin.com/company/nexaforge"
        );
        assert_eq!(cfg.branding.twitter_url, "#");
    }

    #[test]
    fn numeric_looking_values_stay_strings() {
        let cfg = with_env(
            &[
                ("EMAIL_PASS", "12345678"),
                ("FIREBASE_PROJECT_ID", "123456"),
                ("EMAIL_USER", "0042"),
                ("EMAIL_PORT", "2525"),
            ],
            || AppConfig::load_from(None),
        )
        .unwrap();

        assert_eq!(cfg.mail.password.expose_secret(), "12345678");
        assert_eq!(cfg.identity.project_id, "123456");
        assert_eq!(cfg.mail.username, "0042");
        assert_eq!(cfg.mail.port, 2525);
    }

    #[test]
    fn structured_env_password_is_not_parsed() {
        let cfg = with_env(&[("NEXAFORGE__MAIL__PASSWORD", "007")], || {
            AppConfig::load_from(None)
        })
        .unwrap();
        assert_eq!(cfg.mail.password.expose_secret(), "007");
    }

    #[test]
    fn comma_separated_origins() {
        let cfg = with_env(
            &[(
                "NEXAFORGE__SERVER__ALLOWED_ORIGINS",
                "https://a.example, https://b.example",
            )],
            || AppConfig::load_from(None),
        )
        .unwrap();
        assert_eq!(
            cfg.server.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn database_url_has_no_default() {
        let cfg = with_env(&[], || AppConfig::load_from(None)).unwrap();
        assert_eq!(cfg.database.url, "");

        let cfg = with_env(&[("DATABASE_URL", "sqlite://nexaforge.db?mode=rwc")], || {
            AppConfig::load_from(None)
        })
        .unwrap();
        assert_eq!(cfg.database.url, "sqlite://nexaforge.db?mode=rwc");
    }

    #[test]
    fn database_url_wins_over_mongo_alias() {
        let alias_only = with_env(&[("MONGO_URI", "sqlite://alias.db")], || {
            AppConfig::load_from(None)
        })
        .unwrap();
        assert_eq!(alias_only.database.url, "sqlite://alias.db");

        let both = with_env(
            &[
                ("MONGO_URI", "sqlite://alias.db"),
                ("DATABASE_URL", "sqlite://primary.db"),
            ],
            || AppConfig::load_from(None),
        )
        .unwrap();
        assert_eq!(both.database.url, "sqlite://primary.db");
    }

    #[test]
    fn yaml_then_env_layering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nexaforge.yaml");
        std::fs::write(
            &path,
            "server:\n  port: 7000\n  allowed_origins:\n    - https://a.example\n    - https://b.example\nlogging:\n  format: json\nmail:\n  operator_mailbox: yaml@nexaforge.com\n",
        )
        .unwrap();

        let cfg = with_env(
            &[
                ("PORT", "7100"),
                ("NEXAFORGE__SERVER__PORT", "7200"),
                ("NEXAFORGE__REVIEWS__BIND_AUTHOR_TO_TOKEN", "true"),
            ],
            || AppConfig::load_from(Some(&path)),
        )
        .unwrap();

        assert_eq!(cfg.server.port, 7200);
        assert_eq!(cfg.server.allowed_origins.len(), 2);
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.mail.operator_mailbox(), Some("yaml@nexaforge.com"));
        assert!(cfg.reviews.bind_author_to_token);
    }

    #[test]
    fn missing_yaml_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = with_env(&[], || {
            AppConfig::load_from(Some(&dir.path().join("absent.yaml")))
        })
        .unwrap_err();
        assert!(err.to_string().contains("config file does not exist"));
    }

    #[test]
    fn unknown_yaml_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typo.yaml");
        std::fs::write(&path, "server:\n  prot: 7000\n").unwrap();
        assert!(with_env(&[], || AppConfig::load_from(Some(&path))).is_err());
    }

    #[test]
    fn cli_port_overrides_everything() {
        let mut cfg = with_env(&[("PORT", "8080")], || AppConfig::load_from(None)).unwrap();
        cfg.apply_cli_overrides(Some(9000));
        assert_eq!(cfg.server.port, 9000);

        cfg.apply_cli_overrides(None);
        assert_eq!(cfg.server.port, 9000);
    }
}
