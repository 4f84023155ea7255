//! CLI-owned configuration: a TOML file under the platform config dir,
//! overridden by `CAMPUS_*` environment variables, overridden by flags.
//!
//! Core never sees these types -- it receives a ready `ApiClient`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use campus_api::transport::TransportConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Contents of `config.toml`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL, e.g. `https://campus.example.edu`.
    pub server: Option<String>,

    /// Request timeout in seconds.
    pub timeout: Option<u64>,
}

/// Path of the config file (`~/.config/campus/config.toml` on Linux).
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "campus-tools", "campus").map_or_else(
        || PathBuf::from("campus-config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Load the config file merged with `CAMPUS_*` env vars. A missing file
/// is not an error; a malformed one is.
pub fn load_config() -> Result<Config, CliError> {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("CAMPUS_").only(&["server", "timeout"]))
        .extract()
        .map_err(|e| CliError::Validation {
            field: "config".into(),
            reason: e.to_string(),
        })
}

/// Resolve the API base URL from flags and config.
///
/// A bare server URL gets the conventional `/api` path appended; a URL
/// that already carries a path is used as-is.
pub fn api_base_url(global: &GlobalOpts, config: &Config) -> Result<Url, CliError> {
    let server = global
        .server
        .clone()
        .or_else(|| config.server.clone())
        .ok_or_else(|| CliError::NoServer {
            config_path: config_path().display().to_string(),
        })?;

    let url: Url = server.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {server}"),
    })?;

    if url.path() == "/" || url.path().is_empty() {
        let joined = format!("{}/api", server.trim_end_matches('/'));
        joined.parse().map_err(|_| CliError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {joined}"),
        })
    } else {
        Ok(url)
    }
}

/// Transport settings from flags and config.
pub fn transport_config(global: &GlobalOpts, config: &Config) -> TransportConfig {
    let timeout = if global.timeout != 30 {
        global.timeout
    } else {
        config.timeout.unwrap_or(global.timeout)
    };
    TransportConfig {
        timeout: Duration::from_secs(timeout),
        ..TransportConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn opts(args: &[&str]) -> GlobalOpts {
        #[derive(Debug, Parser)]
        struct Wrapper {
            #[command(flatten)]
            global: GlobalOpts,
        }
        Wrapper::try_parse_from(["campus"].iter().chain(args).copied())
            .expect("args should parse")
            .global
    }

    #[test]
    fn bare_server_gets_api_suffix() {
        let global = opts(&["--server", "https://campus.example.edu"]);
        let url = api_base_url(&global, &Config::default()).expect("url");
        assert_eq!(url.as_str(), "https://campus.example.edu/api");
    }

    #[test]
    fn explicit_path_is_kept() {
        let global = opts(&["--server", "https://campus.example.edu/backend"]);
        let url = api_base_url(&global, &Config::default()).expect("url");
        assert_eq!(url.as_str(), "https://campus.example.edu/backend");
    }

    #[test]
    fn flag_overrides_config() {
        let global = opts(&["--server", "http://flag.example:8080"]);
        let config = Config {
            server: Some("http://config.example".into()),
            timeout: None,
        };
        let url = api_base_url(&global, &config).expect("url");
        assert_eq!(url.as_str(), "http://flag.example:8080/api");
    }

    #[test]
    fn missing_server_is_an_error() {
        let global = opts(&[]);
        let err = api_base_url(&global, &Config::default()).expect_err("no server");
        assert!(matches!(err, CliError::NoServer { .. }));
    }

    #[test]
    fn timeout_prefers_explicit_flag() {
        let global = opts(&["--timeout", "5"]);
        let config = Config {
            server: None,
            timeout: Some(60),
        };
        assert_eq!(
            transport_config(&global, &config).timeout,
            Duration::from_secs(5)
        );

        let global = opts(&[]);
        assert_eq!(
            transport_config(&global, &config).timeout,
            Duration::from_secs(60)
        );
    }
}
