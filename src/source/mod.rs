//! Requirements sources
//!
//! This module provides:
//! - Location parsing (URIs, or plain paths as a convenience)
//! - Scheme dispatch to a closed set of transports
//! - File, HTTP(S) and SSH byte fetchers
//!
//! Every transport makes exactly one attempt.

mod file;
mod http;
mod ssh;

pub use file::FileSource;
pub use http::HttpSource;
pub use ssh::{HostKeyPolicy, SshSource, SshTarget};

use crate::error::{ConfigError, SourceError};
use std::path::Path;
use url::Url;

/// Transport options shared by every source of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceOptions {
    /// Host key handling for `ssh` locations
    pub host_key_policy: HostKeyPolicy,
}

impl SourceOptions {
    /// Sets the SSH host key policy (builder pattern)
    pub fn with_host_key_policy(mut self, policy: HostKeyPolicy) -> Self {
        self.host_key_policy = policy;
        self
    }
}

/// Parses a location into a URI
///
/// Locations without a scheme are treated as filesystem paths relative to
/// `base_dir`.
pub fn parse_location(location: &str, base_dir: &Path) -> Result<Url, ConfigError> {
    match Url::parse(location) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let path = base_dir.join(location);
            Url::from_file_path(&path).map_err(|()| {
                ConfigError::invalid_location(location, "not an absolute file path")
            })
        }
        Err(e) => Err(ConfigError::invalid_location(location, e.to_string())),
    }
}

/// A requirements source resolved by URI scheme
#[derive(Debug, Clone)]
pub enum Source {
    /// `file://` locations
    File(FileSource),
    /// `http://` and `https://` locations
    Http(HttpSource),
    /// `ssh://` locations
    Ssh(SshSource),
}

impl Source {
    /// Selects the transport for a URI; unsupported schemes are rejected
    pub fn resolve(uri: Url, options: &SourceOptions) -> Result<Self, ConfigError> {
        match uri.scheme() {
            "file" => Ok(Source::File(FileSource::new(uri))),
            "http" | "https" => Ok(Source::Http(HttpSource::new(uri))),
            "ssh" => Ok(Source::Ssh(SshSource::new(uri, options.host_key_policy))),
            scheme => Err(ConfigError::unsupported_scheme(scheme, uri.as_str())),
        }
    }

    /// Returns the URI this source reads from
    pub fn uri(&self) -> &Url {
        match self {
            Source::File(source) => source.uri(),
            Source::Http(source) => source.uri(),
            Source::Ssh(source) => source.uri(),
        }
    }

    /// Fetches the raw requirements bytes
    pub async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        match self {
            Source::File(source) => source.fetch().await,
            Source::Http(source) => source.fetch().await,
            Source::Ssh(source) => source.fetch().await,
        }
    }
}
