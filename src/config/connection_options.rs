use derive_more::Display;

pub const DEFAULT_HOST: &str = "localhost";
/// WebHDFS port of a Hadoop 3 NameNode.
pub const DEFAULT_PORT: u16 = 9870;

/// Where a listing source connects to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{host}:{port}")]
pub struct ConnectionOptions {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
}

impl ConnectionOptions {
    pub fn new(host: impl Into<String>, port: u16, user: Option<String>) -> Self {
        Self {
            host: host.into(),
            port,
            user,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}/webhdfs/v1", self.host, self.port)
    }
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT, None)
    }
}
