/// Bearer token prefix in the `Authorization` header.
pub const BEARER_TOKEN: &str = "Bearer";

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "tempo.toml";

/// Email of the user seeded by the initial migration.
pub const SEED_USER_EMAIL: &str = "test@example.com";
