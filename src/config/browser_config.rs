use compio::{fs::File, io::AsyncReadExt, io::BufReader};
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::{
    borrow::Cow,
    io::Cursor,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    config::ConnectionOptions,
    ext::{AsyncTryFrom, AsyncTryInto},
    listing::{FileStatus, FileType, InMemoryClient, normalize_path},
};

const CONFIG_FILE_NAME: &str = "hdfs-browser.yaml";

fn get_config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

fn key(name: &str) -> Yaml<'_> {
    Yaml::Value(Scalar::String(Cow::Borrowed(name)))
}

fn scalar_to_string(value: &Yaml) -> Option<String> {
    match value {
        Yaml::Value(Scalar::String(text)) => Some(text.to_string()),
        Yaml::Value(Scalar::Integer(number)) => Some(number.to_string()),
        _ => None,
    }
}

fn is_absent(value: Option<&Yaml>) -> bool {
    matches!(value, None | Some(Yaml::Value(Scalar::Null)))
}

/// Connection options plus the namespace the terminal host serves.
#[derive(Debug, Clone, Default)]
pub struct BrowserConfig {
    connection: ConnectionOptions,
    namespace: LinkedHashMap<String, Vec<FileStatus>>,
    failures: LinkedHashMap<String, String>,
}

impl BrowserConfig {
    pub async fn read(root: &Path) -> Result<Self, BrowserConfigCreationError> {
        get_config_file_path(root).as_path().async_try_into().await
    }

    pub fn connection(&self) -> &ConnectionOptions {
        &self.connection
    }

    pub fn namespace(&self) -> &LinkedHashMap<String, Vec<FileStatus>> {
        &self.namespace
    }

    pub fn failures(&self) -> &LinkedHashMap<String, String> {
        &self.failures
    }

    /// Client serving the configured namespace and failures.
    pub fn to_client(&self) -> InMemoryClient {
        let mut client = InMemoryClient::new();
        for (path, statuses) in &self.namespace {
            client.insert_listing(path, statuses.clone());
        }
        for (path, message) in &self.failures {
            client.insert_failure(path, message.clone());
        }
        client
    }

    fn parse_connection(
        section: Option<&Yaml>,
    ) -> Result<ConnectionOptions, BrowserConfigCreationError> {
        let mut options = ConnectionOptions::default();
        if is_absent(section) {
            return Ok(options);
        }
        let section = section
            .and_then(|value| value.as_mapping())
            .context(SectionNotMapSnafu {
                section: "connection",
            })?;

        if let Some(host) = section.get(&key("host")) {
            options.host = scalar_to_string(host).context(InvalidHostSnafu)?;
        }
        if let Some(port) = section.get(&key("port")) {
            options.port = match port {
                Yaml::Value(Scalar::Integer(number)) => u16::try_from(*number).ok(),
                _ => None,
            }
            .context(InvalidPortSnafu {
                value: format!("{port:?}"),
            })?;
        }
        if let Some(user) = section.get(&key("user")) {
            options.user = scalar_to_string(user);
        }

        Ok(options)
    }

    fn parse_namespace(
        section: Option<&Yaml>,
    ) -> Result<LinkedHashMap<String, Vec<FileStatus>>, BrowserConfigCreationError> {
        if is_absent(section) {
            return Ok(LinkedHashMap::new());
        }
        let section = section
            .and_then(|value| value.as_mapping())
            .context(SectionNotMapSnafu {
                section: "namespace",
            })?;

        section
            .iter()
            .map(|(path, listing)| -> Result<_, BrowserConfigCreationError> {
                let path = scalar_to_string(path).context(InvalidPathKeySnafu {
                    section: "namespace",
                })?;
                let statuses = Self::parse_listing(&path, listing)?;
                debug!("Namespace '{}' has {} entries", path, statuses.len());
                Ok((normalize_path(&path), statuses))
            })
            .collect()
    }

    fn parse_listing(
        path: &str,
        listing: &Yaml,
    ) -> Result<Vec<FileStatus>, BrowserConfigCreationError> {
        if is_absent(Some(listing)) {
            return Ok(Vec::new());
        }
        let listing = listing.as_sequence().context(ListingNotSequenceSnafu {
            path: path.to_string(),
        })?;

        listing
            .iter()
            .enumerate()
            .map(|(index, status)| {
                let status = status.as_mapping();
                let path_suffix = status
                    .and_then(|status| status.get(&key("pathSuffix")))
                    .and_then(scalar_to_string);
                let file_type = status
                    .and_then(|status| status.get(&key("type")))
                    .and_then(|value| value.as_str())
                    .map(FileType::from_wire);
                match (path_suffix, file_type) {
                    (Some(path_suffix), Some(file_type)) => {
                        Ok(FileStatus::new(path_suffix, file_type))
                    }
                    _ => InvalidStatusSnafu {
                        path: path.to_string(),
                        index,
                    }
                    .fail(),
                }
            })
            .collect()
    }

    fn parse_failures(
        section: Option<&Yaml>,
    ) -> Result<LinkedHashMap<String, String>, BrowserConfigCreationError> {
        if is_absent(section) {
            return Ok(LinkedHashMap::new());
        }
        let section = section
            .and_then(|value| value.as_mapping())
            .context(SectionNotMapSnafu {
                section: "failures",
            })?;

        section
            .iter()
            .map(|(path, message)| -> Result<_, BrowserConfigCreationError> {
                let path = scalar_to_string(path).context(InvalidPathKeySnafu {
                    section: "failures",
                })?;
                let message = scalar_to_string(message).context(InvalidFailureSnafu {
                    path: path.clone(),
                })?;
                Ok((normalize_path(&path), message))
            })
            .collect()
    }
}

impl<'a> AsyncTryFrom<&'a Path> for BrowserConfig {
    type Error = BrowserConfigCreationError;

    async fn async_try_from(path: &'a Path) -> Result<Self, Self::Error> {
        debug!("Opening config file: {}", path.display());
        let file = File::open(path).await.context(ReadSnafu {
            file_path: path.display().to_string(),
        })?;

        debug!("Reading config file");
        let cursor = Cursor::new(file);
        let mut reader = BufReader::new(cursor);
        let res = reader.read_to_string(String::new()).await;
        match res.0 {
            Ok(n) => debug!("Successfully read config file: {n} bytes"),
            _ => {
                res.0.context(ReadSnafu {
                    file_path: path.display().to_string(),
                })?;
            }
        }
        res.1.as_str().try_into()
    }
}

impl TryFrom<&str> for BrowserConfig {
    type Error = BrowserConfigCreationError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let contents_vec = Yaml::load_from_str(contents)
            .map_err(|e| BrowserConfigCreationError::ParseError { source: e })?;
        let contents = contents_vec
            .first()
            .ok_or(BrowserConfigCreationError::MalformedConfig)?;

        let top_level = contents
            .as_mapping()
            .ok_or(BrowserConfigCreationError::TopLevelNotMap)?;

        Ok(BrowserConfig {
            connection: Self::parse_connection(top_level.get(&key("connection")))?,
            namespace: Self::parse_namespace(top_level.get(&key("namespace")))?,
            failures: Self::parse_failures(top_level.get(&key("failures")))?,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum BrowserConfigCreationError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Section '{}' should be a map", section))]
    SectionNotMap { section: String },
    #[snafu(display("Connection host should be a string"))]
    InvalidHost,
    #[snafu(display("Connection port should be a number between 0 and 65535, got {}", value))]
    InvalidPort { value: String },
    #[snafu(display("Keys of section '{}' should be paths", section))]
    InvalidPathKey { section: String },
    #[snafu(display("Listing of '{}' should be a list of statuses", path))]
    ListingNotSequence { path: String },
    #[snafu(display(
        "Status #{} under '{}' needs a 'pathSuffix' and a 'type'",
        index,
        path
    ))]
    InvalidStatus { path: String, index: usize },
    #[snafu(display("Failure message for '{}' should be a string", path))]
    InvalidFailure { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[compio::test]
    async fn config_returns_error_on_nonexistent_file() {
        let result = BrowserConfig::read(Path::new("/this/path/does/not/exist")).await;
        assert!(matches!(
            result,
            Err(BrowserConfigCreationError::ReadError { .. })
        ));
    }

    #[compio::test]
    async fn config_is_read_from_root_directory() {
        let root = TempDir::new().expect("Failed to create temp directory");
        let mut file = std::fs::File::create(root.path().join(CONFIG_FILE_NAME))
            .expect("Failed to create config file");
        writeln!(
            file,
            "connection:\n  host: namenode\nnamespace:\n  /:\n    - {{ pathSuffix: user, type: DIRECTORY }}"
        )
        .expect("Failed to write config file");

        let config = BrowserConfig::read(root.path())
            .await
            .expect("Failed to read config");

        assert_eq!(config.connection().host, "namenode");
        assert_eq!(
            config.namespace().get("/"),
            Some(&vec![FileStatus::directory("user")])
        );
    }

    #[test]
    fn config_returns_error_on_invalid_yaml() {
        let result: Result<BrowserConfig, _> = "invalid: yaml: content: [unclosed".try_into();
        assert!(matches!(
            result,
            Err(BrowserConfigCreationError::ParseError { .. })
        ));
    }

    #[test]
    fn config_returns_error_on_empty_file() {
        let result: Result<BrowserConfig, _> = "".try_into();
        assert!(matches!(
            result,
            Err(BrowserConfigCreationError::MalformedConfig)
        ));
    }

    #[test]
    fn config_returns_error_when_top_level_is_not_map() {
        let result: Result<BrowserConfig, _> = "- item1\n- item2".try_into();
        assert!(matches!(
            result,
            Err(BrowserConfigCreationError::TopLevelNotMap)
        ));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: BrowserConfig = "other: value".try_into().unwrap();

        assert_eq!(config.connection(), &ConnectionOptions::default());
        assert!(config.namespace().is_empty());
        assert!(config.failures().is_empty());
    }

    #[test]
    fn connection_section_overrides_defaults() {
        let config: BrowserConfig = "connection:\n  host: namenode\n  port: 50070\n  user: hdfs"
            .try_into()
            .unwrap();

        assert_eq!(
            config.connection(),
            &ConnectionOptions::new("namenode", 50070, Some("hdfs".to_string()))
        );
    }

    #[test]
    fn out_of_range_port_is_rejected() {
        let result: Result<BrowserConfig, _> = "connection:\n  port: 70000".try_into();
        assert!(matches!(
            result,
            Err(BrowserConfigCreationError::InvalidPort { .. })
        ));
    }

    #[test]
    fn connection_must_be_a_map() {
        let result: Result<BrowserConfig, _> = "connection: [a, b]".try_into();
        assert!(matches!(
            result,
            Err(BrowserConfigCreationError::SectionNotMap { ref section }) if section == "connection"
        ));
    }

    #[test]
    fn namespace_keeps_listing_order_and_normalizes_paths() {
        let config: BrowserConfig = r#"
namespace:
  /base/:
    - { pathSuffix: d1, type: DIRECTORY }
    - { pathSuffix: f1, type: FILE }
    - { pathSuffix: 2024, type: DIRECTORY }
  /base/d1: []
  /base/2024:
"#
        .try_into()
        .unwrap();

        let keys: Vec<&String> = config.namespace().keys().collect();
        assert_eq!(keys, vec!["/base", "/base/d1", "/base/2024"]);
        assert_eq!(
            config.namespace().get("/base"),
            Some(&vec![
                FileStatus::directory("d1"),
                FileStatus::file("f1"),
                FileStatus::directory("2024"),
            ])
        );
        assert!(config.namespace().get("/base/2024").unwrap().is_empty());
    }

    #[test]
    fn status_without_type_is_rejected() {
        let result: Result<BrowserConfig, _> = r#"
namespace:
  /base:
    - { pathSuffix: d1 }
"#
        .try_into();
        assert!(matches!(
            result,
            Err(BrowserConfigCreationError::InvalidStatus { index: 0, .. })
        ));
    }

    #[test]
    fn listing_must_be_a_sequence() {
        let result: Result<BrowserConfig, _> = "namespace:\n  /base: oops".try_into();
        assert!(matches!(
            result,
            Err(BrowserConfigCreationError::ListingNotSequence { .. })
        ));
    }

    #[compio::test]
    async fn client_serves_namespace_and_failures() {
        use crate::listing::HdfsClient;

        let config: BrowserConfig = r#"
namespace:
  /base:
    - { pathSuffix: f1, type: FILE }
failures:
  /secret: "Permission denied"
"#
        .try_into()
        .unwrap();
        let client = config.to_client();

        assert_eq!(
            client.readdir("/base").await.unwrap(),
            vec![FileStatus::file("f1")]
        );
        assert_eq!(
            client.readdir("/secret").await.unwrap_err().to_string(),
            "Permission denied"
        );
    }
}
