use clap::Parser;
use once_cell::sync::Lazy;

// Tokens have a fixed lifetime and no refresh flow.
pub const JWT_EXPRIED_TIME: i64 = 7 * 86400i64;

pub const PLACEHOLDER_PASSWORD_LENGTH: usize = 24;

pub const AVAILABILITY_DAY_START_HOUR: u32 = 9;
pub const AVAILABILITY_DAY_END_HOUR: u32 = 17;

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env)]
    pub jwt_secret: String,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value_t = true)]
    pub run_migrations: bool,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}
