use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Allowed CORS origins; empty means any origin
    pub frontend_urls: Vec<String>,
    /// `JWT_SECRET`; see [`Config::jwt_secret`]
    pub jwt_secret: Option<String>,
    pub jwt_expiry_hours: i64,
    pub seed_demo: bool,
}

/// Signing secret for debug builds run without `JWT_SECRET`
const DEV_JWT_SECRET: &str = "ilmquest-dev-secret";

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "sqlite://ilmquest.db?mode=rwc".to_string());

        let port = match lookup("PORT") {
            Some(p) => p.parse().unwrap_or_else(|e| {
                tracing::warn!("Invalid PORT value '{}': {}, using 5000", p, e);
                5000
            }),
            None => 5000,
        };

        Self {
            database_url,
            port,
            frontend_urls: lookup("FRONTEND_URL")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().trim_end_matches('/').to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            jwt_secret: lookup("JWT_SECRET").filter(|s| !s.trim().is_empty()),
            jwt_expiry_hours: lookup("JWT_EXPIRY_HOURS")
                .and_then(|h| h.parse().ok())
                .filter(|h| *h > 0)
                .unwrap_or(24),
            seed_demo: lookup("SEED_DEMO").is_some_and(|v| v != "false" && v != "0"),
        }
    }

    /// Secret used to sign and verify tokens. Only debug builds may run without one.
    pub fn jwt_secret(&self) -> Result<String, String> {
        resolve_jwt_secret(self.jwt_secret.as_deref(), cfg!(debug_assertions))
    }
}

fn resolve_jwt_secret(configured: Option<&str>, dev_fallback: bool) -> Result<String, String> {
    match configured {
        Some(secret) => Ok(secret.to_string()),
        None if dev_fallback => {
            tracing::warn!("JWT_SECRET is not set, using the development secret");
            Ok(DEV_JWT_SECRET.to_string())
        }
        None => Err("JWT_SECRET environment variable must be set in production".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let c = config(&[]);
        assert_eq!(c.port, 5000);
        assert_eq!(c.database_url, "sqlite://ilmquest.db?mode=rwc");
        assert!(c.frontend_urls.is_empty());
        assert_eq!(c.jwt_expiry_hours, 24);
        assert!(c.jwt_secret.is_none());
        assert!(!c.seed_demo);
    }

    #[test]
    fn jwt_secret_is_read_from_the_lookup() {
        let c = config(&[("JWT_SECRET", "s3cr3t")]);
        assert_eq!(c.jwt_secret(), Ok("s3cr3t".to_string()));

        let blank = config(&[("JWT_SECRET", "  ")]);
        assert!(blank.jwt_secret.is_none());
    }

    #[test]
    fn missing_jwt_secret_is_fatal_without_the_dev_fallback() {
        let c = config(&[]);
        assert!(resolve_jwt_secret(c.jwt_secret.as_deref(), false).is_err());
        assert_eq!(
            resolve_jwt_secret(c.jwt_secret.as_deref(), true),
            Ok(DEV_JWT_SECRET.to_string())
        );
        assert_eq!(
            resolve_jwt_secret(Some("from-env"), false),
            Ok("from-env".to_string())
        );
    }

    #[test]
    fn frontend_urls_are_split_and_trimmed() {
        let c = config(&[(
            "FRONTEND_URL",
            "http://localhost:5173/, https://ilmquest.app ,",
        )]);
        assert_eq!(
            c.frontend_urls,
            vec!["http://localhost:5173", "https://ilmquest.app"]
        );
    }

    #[test]
    fn bad_values_fall_back() {
        let c = config(&[("PORT", "eighty"), ("JWT_EXPIRY_HOURS", "-3"), ("SEED_DEMO", "0")]);
        assert_eq!(c.port, 5000);
        assert_eq!(c.jwt_expiry_hours, 24);
        assert!(!c.seed_demo);
    }
}
