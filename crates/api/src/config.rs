/// Default Google endpoint publishing the signing keys of Firebase ID tokens.
pub const DEFAULT_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Project id used for shared-secret development tokens when none is configured.
const DEV_PROJECT_ID: &str = "yakbot-local";

/// Default cap on a pill photo upload (20 MiB).
pub const DEFAULT_RECOGNIZE_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Default lifetime of the cached provider key set.
const DEFAULT_JWKS_CACHE_TTL_SECS: u64 = 3600;

/// Server configuration loaded from environment variables.
///
/// All fields except the identity project have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Request body cap for `/drugs/recognize` uploads (default: 20 MiB).
    pub recognize_max_upload_bytes: usize,
    /// Identity-provider token verification settings.
    pub identity: IdentityConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                    |
    /// |------------------------------|----------------------------|
    /// | `HOST`                       | `0.0.0.0`                  |
    /// | `PORT`                       | `8000`                     |
    /// | `CORS_ORIGINS`               | `http://localhost:8081`    |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                       |
    /// | `RECOGNIZE_MAX_UPLOAD_BYTES` | `20971520` (20 MiB)        |
    ///
    /// # Panics
    ///
    /// Panics on unparsable numbers or a missing identity project.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:8081".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let recognize_max_upload_bytes: usize = std::env::var("RECOGNIZE_MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_RECOGNIZE_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("RECOGNIZE_MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            recognize_max_upload_bytes,
            identity: IdentityConfig::from_env(),
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// How identity tokens are verified.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Expected audience; issuer is derived from it.
    pub project_id: String,
    /// Where the provider publishes its signing keys.
    pub jwks_url: String,
    /// How long a fetched key set is trusted before refetching.
    pub jwks_cache_ttl_secs: u64,
    /// When set, tokens are HS256-signed with this secret instead (development only).
    pub shared_secret: Option<String>,
}

impl IdentityConfig {
    /// Load identity settings from environment variables.
    ///
    /// | Env Var                    | Required                          | Default            |
    /// |----------------------------|-----------------------------------|--------------------|
    /// | `FIREBASE_PROJECT_ID`      | yes, unless `AUTH_SHARED_SECRET`  | `yakbot-local`     |
    /// | `FIREBASE_JWKS_URL`        | no                                | Google securetoken |
    /// | `FIREBASE_JWKS_CACHE_SECS` | no                                | `3600`             |
    /// | `AUTH_SHARED_SECRET`       | no                                | --                 |
    ///
    /// # Panics
    ///
    /// Panics if neither `FIREBASE_PROJECT_ID` nor `AUTH_SHARED_SECRET` is set.
    pub fn from_env() -> Self {
        let shared_secret = std::env::var("AUTH_SHARED_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let project_id = match std::env::var("FIREBASE_PROJECT_ID").ok().filter(|s| !s.is_empty()) {
            Some(project_id) => project_id,
            None => {
                assert!(
                    shared_secret.is_some(),
                    "FIREBASE_PROJECT_ID must be set (or AUTH_SHARED_SECRET for development)"
                );
                DEV_PROJECT_ID.to_string()
            }
        };

        let jwks_url =
            std::env::var("FIREBASE_JWKS_URL").unwrap_or_else(|_| DEFAULT_JWKS_URL.to_string());

        let jwks_cache_ttl_secs: u64 = std::env::var("FIREBASE_JWKS_CACHE_SECS")
            .unwrap_or_else(|_| DEFAULT_JWKS_CACHE_TTL_SECS.to_string())
            .parse()
            .expect("FIREBASE_JWKS_CACHE_SECS must be a valid u64");

        Self {
            project_id,
            jwks_url,
            jwks_cache_ttl_secs,
            shared_secret,
        }
    }
}
