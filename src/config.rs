use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

/// Process configuration, read once at startup from the environment
/// (`.env` is loaded beforehand by `main`). Carried in the axum state as an
/// `Arc<Config>`; nothing reads the environment after startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Supabase project base URL, e.g. `https://xyz.supabase.co`.
    pub supabase_url: String,
    /// Supabase service-role key, sent as both `apikey` and bearer token.
    pub supabase_service_key: String,
    /// Base URL of the email-proxy service.
    pub mailer_url: String,
    /// Shared admin token for the email-proxy `x-admin-token` header.
    pub mailer_admin_token: String,
    /// Operator PIN for the login form.
    pub pin: String,
    /// Secret used to sign the session cookie.
    pub cookie_secret: String,
    pub port: u16,
    pub loglevel: String,
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(Defaults::default()))
            .merge(Env::raw().only(&[
                "SUPABASE_URL",
                "SUPABASE_SERVICE_KEY",
                "MAILER_URL",
                "MAILER_ADMIN_TOKEN",
                "PIN",
                "COOKIE_SECRET",
                "PORT",
                "LOGLEVEL",
            ]))
            .extract()
    }
}

/// Optional settings and their fallback values.
#[derive(Serialize)]
struct Defaults {
    port: u16,
    loglevel: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            port: 3000,
            loglevel: "info".to_string(),
        }
    }
}
