use std::env;

use secrecy::SecretString;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub site_url: String,
    pub cms: CmsConfig,
    pub enable_analytics: bool,
    pub enable_auth: bool,
    pub jwt_secret: Option<SecretString>,
    /// Seconds between category count reconciliations; 0 disables the job.
    pub category_reconcile_secs: u64,
}

#[derive(Debug, Clone)]
pub struct CmsConfig {
    pub base_url: String,
    pub token: Option<SecretString>,
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let site_url = first_var(&["SITE_URL", "NEXT_PUBLIC_SITE_URL"])
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        let cms = CmsConfig {
            base_url: first_var(&["STRAPI_URL", "NEXT_PUBLIC_STRAPI_URL"])
                .unwrap_or_else(|| "http://localhost:1337".to_string()),
            token: env::var("STRAPI_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty())
                .map(SecretString::from),
            timeout_secs: env::var("CMS_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5),
        };

        let enable_analytics =
            flag(first_var(&["ENABLE_ANALYTICS", "NEXT_PUBLIC_ENABLE_ANALYTICS"]));
        let enable_auth = flag(first_var(&["ENABLE_AUTH", "NEXT_PUBLIC_ENABLE_AUTH"]));

        let jwt_secret = env::var("AUTH_JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .map(SecretString::from);
        if enable_auth && jwt_secret.is_none() {
            anyhow::bail!("AUTH_JWT_SECRET must be set when ENABLE_AUTH is on");
        }

        let category_reconcile_secs = env::var("CATEGORY_RECONCILE_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(300);

        Ok(Self {
            database_url,
            host,
            port,
            site_url,
            cms,
            enable_analytics,
            enable_auth,
            jwt_secret,
            category_reconcile_secs,
        })
    }
}

fn first_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| env::var(name).ok().filter(|v| !v.trim().is_empty()))
}

fn flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("true") | Some("1") | Some("yes")
    )
}
