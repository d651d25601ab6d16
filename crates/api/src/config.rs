use cravex_core::otp::{DEFAULT_OTP_MAX_ATTEMPTS, DEFAULT_OTP_TTL_MINS};

/// Default session lifetime in days.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 30;

/// Default interval between expired-session sweeps.
pub const DEFAULT_SESSION_SWEEP_INTERVAL_SECS: u64 = 3600;

/// Default support inbox.
pub const DEFAULT_SUPPORT_EMAIL: &str = "support@cravex.local";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Seconds between expired-session sweeps (default: `3600`).
    pub session_sweep_interval_secs: u64,
    /// Login code and session lifetimes.
    pub auth: AuthConfig,
    /// Recipients of support-form messages.
    pub support_recipients: Vec<String>,
    /// Store-listing links handed to the marketing site and mobile shell.
    pub app_links: AppLinks,
}

/// Login code and session settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Minutes a login code stays valid (default: `10`).
    pub otp_ttl_mins: i64,
    /// Wrong guesses allowed before a code is burned (default: `5`).
    pub otp_max_attempts: i32,
    /// Days a session stays valid (default: `30`).
    pub session_ttl_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            otp_ttl_mins: DEFAULT_OTP_TTL_MINS,
            otp_max_attempts: DEFAULT_OTP_MAX_ATTEMPTS,
            session_ttl_days: DEFAULT_SESSION_TTL_DAYS,
        }
    }
}

/// App store listing URLs. Either may be unset.
#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppLinks {
    pub app_store: Option<String>,
    pub play_store: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                    |
    /// |-------------------------------|----------------------------|
    /// | `HOST`                        | `0.0.0.0`                  |
    /// | `PORT`                        | `3000`                     |
    /// | `CORS_ORIGINS`                | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                       |
    /// | `SESSION_SWEEP_INTERVAL_SECS` | `3600`                     |
    /// | `OTP_TTL_MINS`                | `10`                       |
    /// | `OTP_MAX_ATTEMPTS`            | `5`                        |
    /// | `SESSION_TTL_DAYS`            | `30`                       |
    /// | `SUPPORT_TO_EMAIL`            | `support@cravex.local`     |
    /// | `STORE_APP_STORE_URL`         | unset                      |
    /// | `STORE_PLAY_STORE_URL`        | unset                      |
    ///
    /// # Panics
    ///
    /// Panics if a numeric variable does not parse or is out of range.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = parse_env("PORT", 3000);
        let cors_origins = list_env("CORS_ORIGINS", "http://localhost:3000");
        let request_timeout_secs: u64 = parse_env("REQUEST_TIMEOUT_SECS", 30);
        let session_sweep_interval_secs: u64 = parse_env(
            "SESSION_SWEEP_INTERVAL_SECS",
            DEFAULT_SESSION_SWEEP_INTERVAL_SECS,
        );

        let auth = AuthConfig {
            otp_ttl_mins: parse_env("OTP_TTL_MINS", DEFAULT_OTP_TTL_MINS),
            otp_max_attempts: parse_env("OTP_MAX_ATTEMPTS", DEFAULT_OTP_MAX_ATTEMPTS),
            session_ttl_days: parse_env("SESSION_TTL_DAYS", DEFAULT_SESSION_TTL_DAYS),
        };
        let app_links = AppLinks {
            app_store: std::env::var("STORE_APP_STORE_URL").ok(),
            play_store: std::env::var("STORE_PLAY_STORE_URL").ok(),
        };

        let config = Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session_sweep_interval_secs,
            auth,
            support_recipients: list_env("SUPPORT_TO_EMAIL", DEFAULT_SUPPORT_EMAIL),
            app_links,
        };
        config.assert_valid();
        config
    }

    /// Reject values that would only fail later, deep inside a running task.
    ///
    /// # Panics
    ///
    /// Panics naming the first offending variable.
    pub fn assert_valid(&self) {
        assert!(
            self.request_timeout_secs > 0,
            "REQUEST_TIMEOUT_SECS must be positive"
        );
        assert!(
            self.session_sweep_interval_secs > 0,
            "SESSION_SWEEP_INTERVAL_SECS must be positive"
        );
        assert!(self.auth.otp_ttl_mins > 0, "OTP_TTL_MINS must be positive");
        assert!(
            self.auth.otp_max_attempts > 0,
            "OTP_MAX_ATTEMPTS must be positive"
        );
        assert!(
            self.auth.session_ttl_days > 0,
            "SESSION_TTL_DAYS must be positive"
        );
    }
}

fn parse_env<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + ToString,
{
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or_else(|_| panic!("{name} must be a valid number"))
}

fn list_env(name: &str, default: &str) -> Vec<String> {
    std::env::var(name)
        .unwrap_or_else(|_| default.into())
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
