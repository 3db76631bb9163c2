use config::{Config, File};
use serde::{self, Deserialize};
use std::{ops::Deref, sync::Arc};
use tempo_error::TempoResult;

#[derive(Debug, Clone)]
pub struct Settings(Arc<Inner>);

impl Deref for Settings {
    type Target = Inner;
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl Settings {
    /// Load settings from an optional config file with `TEMPO__*` environment
    /// overrides on top (e.g. `TEMPO__WEB__PORT=9090`).
    pub fn new(config_path: String) -> TempoResult<Self> {
        let builder = Config::builder()
            .add_source(File::with_name(config_path.as_str()).required(false))
            .add_source(
                config::Environment::with_prefix("TEMPO")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("web.cors.whitelist.origins")
                    .with_list_parse_key("web.cors.whitelist.methods")
                    .with_list_parse_key("web.cors.whitelist.headers")
                    .with_list_parse_key("web.cors.whitelist.expose_headers"),
            );
        let inner: Inner = builder.build()?.try_deserialize()?;
        Ok(Self(Arc::new(inner)))
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Inner {
    #[serde(default)]
    pub web: Web,
    #[serde(default)]
    pub db: Db,
    #[serde(default)]
    pub log: Log,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Web {
    #[serde(default = "Web::router_prefix_default")]
    pub router_prefix: String,
    #[serde(default = "Web::host_default")]
    pub host: String,
    #[serde(default = "Web::port_default")]
    pub port: u16,
    #[serde(default)]
    pub cors: Cors,
    #[serde(default)]
    pub jwt: Jwt,
}

impl Default for Web {
    fn default() -> Self {
        Web {
            router_prefix: Web::router_prefix_default(),
            host: Web::host_default(),
            port: Web::port_default(),
            cors: Default::default(),
            jwt: Default::default(),
        }
    }
}

impl Web {
    fn router_prefix_default() -> String {
        "".into()
    }

    fn host_default() -> String {
        "0.0.0.0".into()
    }

    fn port_default() -> u16 {
        8080
    }
}

#[derive(Default, Debug, Clone, Deserialize)]
pub struct Cors {
    #[serde(default)]
    pub mode: CorsMode,
    #[serde(default)]
    pub whitelist: Whitelist,
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorsMode {
    #[default]
    AllowAll,
    Whitelist,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Whitelist {
    #[serde(default = "Whitelist::origins_default")]
    pub origins: Vec<String>,
    #[serde(default = "Whitelist::methods_default")]
    pub methods: Vec<String>,
    #[serde(default = "Whitelist::headers_default")]
    pub headers: Vec<String>,
    #[serde(default = "Whitelist::expose_headers_default")]
    pub expose_headers: Vec<String>,
    #[serde(default = "Whitelist::credentials_default")]
    pub credentials: bool,
}

impl Default for Whitelist {
    fn default() -> Self {
        Whitelist {
            origins: Whitelist::origins_default(),
            methods: Whitelist::methods_default(),
            headers: Whitelist::headers_default(),
            expose_headers: Whitelist::expose_headers_default(),
            credentials: Whitelist::credentials_default(),
        }
    }
}

impl Whitelist {
    fn origins_default() -> Vec<String> {
        vec!["*".into()]
    }

    fn methods_default() -> Vec<String> {
        vec!["GET".into(), "POST".into(), "PUT".into(), "DELETE".into()]
    }

    fn headers_default() -> Vec<String> {
        vec![
            "Content-Type".into(),
            "Accept".into(),
            "Authorization".into(),
        ]
    }

    fn expose_headers_default() -> Vec<String> {
        vec!["Content-Length".into(), "Content-Type".into()]
    }

    fn credentials_default() -> bool {
        true
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Jwt {
    #[serde(default = "Jwt::secret_default")]
    pub secret: String,
    /// Token lifetime in seconds.
    #[serde(default = "Jwt::expire_default")]
    pub expire: i64,
    #[serde(default = "Jwt::issuer_default")]
    pub issuer: String,
}

impl Default for Jwt {
    fn default() -> Self {
        Jwt {
            secret: Jwt::secret_default(),
            expire: Jwt::expire_default(),
            issuer: Jwt::issuer_default(),
        }
    }
}

impl Jwt {
    fn secret_default() -> String {
        "tempo".into()
    }

    fn expire_default() -> i64 {
        86400
    }

    fn issuer_default() -> String {
        "tempo".into()
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Db {
    #[serde(default)]
    pub sqlite: Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sqlite {
    #[serde(default = "Sqlite::path_default")]
    pub path: String,
    #[serde(default = "Sqlite::timeout_default")]
    pub timeout: u64,
    #[serde(default = "Sqlite::idle_timeout_default")]
    pub idle_timeout: u64,
    #[serde(default = "Sqlite::max_lifetime_default")]
    pub max_lifetime: u64,
    #[serde(default = "Sqlite::max_connections_default")]
    pub max_connections: u32,
    #[serde(default = "Sqlite::auto_create_default")]
    pub auto_create: bool,
}

impl Default for Sqlite {
    fn default() -> Self {
        Sqlite {
            path: Sqlite::path_default(),
            timeout: Sqlite::timeout_default(),
            idle_timeout: Sqlite::idle_timeout_default(),
            max_lifetime: Sqlite::max_lifetime_default(),
            max_connections: Sqlite::max_connections_default(),
            auto_create: Sqlite::auto_create_default(),
        }
    }
}

impl Sqlite {
    pub fn db_path(&self) -> String {
        self.path.clone()
    }

    pub fn to_url(&self) -> String {
        if self.auto_create {
            // mode=rwc creates the file if it doesn't exist
            format!("sqlite:{}?mode=rwc", self.path)
        } else {
            format!("sqlite:{}", self.path)
        }
    }
}

impl Sqlite {
    fn path_default() -> String {
        "data/tempo.db".into()
    }

    fn timeout_default() -> u64 {
        5000
    }

    fn idle_timeout_default() -> u64 {
        60000
    }

    fn max_lifetime_default() -> u64 {
        1_800_000
    }

    fn max_connections_default() -> u32 {
        10
    }

    fn auto_create_default() -> bool {
        true
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    #[serde(default = "Log::level_default")]
    pub level: String,
}

impl Default for Log {
    fn default() -> Self {
        Log {
            level: Log::level_default(),
        }
    }
}

impl Log {
    fn level_default() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_config_file() {
        let settings = Settings::new("does-not-exist".into()).unwrap();
        assert_eq!(settings.web.port, 8080);
        assert_eq!(settings.web.jwt.expire, 86400);
        assert!(settings.db.sqlite.auto_create);
    }

    #[test]
    fn sqlite_url_honors_auto_create() {
        let mut sqlite = Sqlite::default();
        assert_eq!(sqlite.to_url(), "sqlite:data/tempo.db?mode=rwc");
        sqlite.auto_create = false;
        assert_eq!(sqlite.to_url(), "sqlite:data/tempo.db");
    }
}
