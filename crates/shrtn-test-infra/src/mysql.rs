use crate::Result;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::ImageExt;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const MYSQL_PORT: u16 = 3306;

/// The server default collation ignores case. Pinning it keeps the
/// binary-collated key columns honest against stock server settings.
pub const DEFAULT_SERVER_COLLATION: &str = "utf8mb4_0900_ai_ci";

#[derive(TypedBuilder)]
pub struct MysqlConfig {
    #[builder(default = "shrtn".to_string())]
    database: String,
    #[builder(default = "shrtn".to_string())]
    username: String,
    #[builder(default = "shrtn".to_string())]
    password: String,
    #[builder(default = "8.4".to_string())]
    tag: String,
    #[builder(default = DEFAULT_SERVER_COLLATION.to_string())]
    collation: String,
}

/// Test fixture for a disposable MySQL server. The container is removed on drop.
pub struct MySqlServer {
    container: ContainerAsync<GenericImage>,
    config: MysqlConfig,
}

impl MySqlServer {
    /// Starts a MySQL container suitable for integration tests.
    pub async fn new(config: MysqlConfig) -> Result<Self> {
        let container = GenericImage::new("mysql", config.tag.as_str())
            .with_exposed_port(MYSQL_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stderr("ready for connections"))
            .with_env_var("MYSQL_DATABASE", config.database.as_str())
            .with_env_var("MYSQL_USER", config.username.as_str())
            .with_env_var("MYSQL_PASSWORD", config.password.as_str())
            .with_env_var("MYSQL_ROOT_PASSWORD", "root")
            .with_cmd(vec![
                "--character-set-server=utf8mb4".to_string(),
                format!("--collation-server={}", config.collation),
            ])
            .start()
            .await?;

        Ok(Self { container, config })
    }

    pub async fn host(&self) -> Result<String> {
        Ok(self.container.get_host().await?.to_string())
    }

    pub async fn port(&self) -> Result<u16> {
        Ok(self.container.get_host_port_ipv4(MYSQL_PORT).await?)
    }

    /// Collation the server applies to columns that do not declare one.
    pub fn collation(&self) -> &str {
        &self.config.collation
    }

    /// Returns a DSN usable with `sqlx`.
    pub async fn database_url(&self) -> Result<String> {
        let host = self.host().await?;
        let port = self.port().await?;
        Ok(format!(
            "mysql://{}:{}@{}:{}/{}",
            self.config.username, self.config.password, host, port, self.config.database
        ))
    }
}
