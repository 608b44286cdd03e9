use clap::{Parser, ValueEnum};
use shrtn_core::Partition;
use shrtn_gateway::telemetry::LogFormat;
use shrtn_shortener::UrlPolicy;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "SHRTN_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "SHRTN_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "SHRTN_MYSQL_DSN";
pub const PARTITION_ENV: &str = "SHRTN_PARTITION";
pub const URL_POLICY_ENV: &str = "SHRTN_URL_POLICY";
pub const STORE_TIMEOUT_ENV: &str = "SHRTN_STORE_TIMEOUT_MS";
pub const LOG_FORMAT_ENV: &str = "SHRTN_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UrlPolicyArg {
    Strict,
    Lenient,
}

impl From<UrlPolicyArg> for UrlPolicy {
    fn from(value: UrlPolicyArg) -> Self {
        match value {
            UrlPolicyArg::Strict => UrlPolicy::Strict,
            UrlPolicyArg::Lenient => UrlPolicy::Lenient,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shrtn-gateway", about = "Minimal URL shortener")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    /// Partition key every mapping is stored and queried under.
    #[arg(long, env = PARTITION_ENV, default_value = Partition::DEFAULT)]
    pub partition: String,

    /// How submitted URLs are validated.
    #[arg(long, env = URL_POLICY_ENV, value_enum, default_value_t = UrlPolicyArg::Strict)]
    pub url_policy: UrlPolicyArg,

    /// Deadline for every storage call, in milliseconds.
    #[arg(long, env = STORE_TIMEOUT_ENV, default_value_t = DEFAULT_STORE_TIMEOUT_MS)]
    pub store_timeout_ms: u64,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,
}
