//! Application error types using thiserror
//!
//! Error hierarchy:
//! - SourceError: Transport failures while fetching a requirements source
//! - SpecError: Malformed requirements documents
//! - RuleError: Invalid version rules
//! - InventoryError: Failures resolving the module inventory
//! - ConfigError: Issues with locations and CLI configuration
//!
//! Policy violations are not errors. They are reported as findings.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Requirements source transport errors
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Requirements document errors
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Version rule errors
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Module inventory errors
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while fetching the bytes of a requirements source
#[derive(Error, Debug)]
pub enum SourceError {
    /// Local file does not exist
    #[error("file does not exist: {path}")]
    FileNotFound { path: PathBuf },

    /// Local file exists but could not be read
    #[error("problem reading file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request could not be sent or no response arrived
    #[error("unable to get {url}: {message}")]
    HttpRequest { url: String, message: String },

    /// HTTP response body could not be read
    #[error("unable to read response from {url}: {message}")]
    HttpBody { url: String, message: String },

    /// Home directory lookup failed
    #[error("unable to determine home directory for ssh identity")]
    HomeDirectory,

    /// SSH identity file could not be read
    #[error("unable to read identity file {path}: {message}")]
    IdentityFile { path: PathBuf, message: String },

    /// TCP connection to the SSH host failed
    #[error("unable to connect to host {host}: {message}")]
    Connect { host: String, message: String },

    /// SSH session setup failed
    #[error("ssh handshake with {host} failed: {message}")]
    Handshake { host: String, message: String },

    /// Server host key rejected by the configured policy
    #[error("host key verification failed for {host}: {message}")]
    HostKey { host: String, message: String },

    /// All authentication methods were rejected
    #[error("authentication failed for {user}@{host}: {message}")]
    Authentication {
        user: String,
        host: String,
        message: String,
    },

    /// Remote read command failed
    #[error("unable to get remote file contents {path}: {message}")]
    RemoteCommand { path: String, message: String },

    /// Blocking transport worker did not complete
    #[error("transport task for {location} failed: {message}")]
    Task { location: String, message: String },
}

/// Errors decoding a requirements document
#[derive(Error, Debug)]
pub enum SpecError {
    /// Malformed document
    #[error("unable to parse requirements file {location}: {message}")]
    Parse { location: String, message: String },
}

/// Errors in version rules
#[derive(Error, Debug)]
pub enum RuleError {
    /// Rule is neither `latest` nor a valid regular expression
    #[error("unable to compile regex '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Errors resolving the module inventory
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Inventory command could not be started
    #[error("unable to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Inventory command exited with a failure status
    #[error("'{command}' failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// Inventory file could not be read
    #[error("unable to read module inventory {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Inventory output is not valid module JSON
    #[error("unable to parse module inventory from {origin}: {message}")]
    Decode { origin: String, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Location is not a valid URI or path
    #[error("unable to parse location '{location}': {message}")]
    InvalidLocation { location: String, message: String },

    /// Location uses a scheme with no transport
    #[error("unsupported uri scheme '{scheme}' in {location}")]
    UnsupportedScheme { scheme: String, location: String },

    /// Current directory lookup failed
    #[error("unable to determine current directory: {source}")]
    CurrentDir {
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Creates a new FileNotFound error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        SourceError::FileNotFound { path: path.into() }
    }

    /// Creates a new FileRead error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SourceError::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new HttpRequest error
    pub fn http_request(url: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::HttpRequest {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new HttpBody error
    pub fn http_body(url: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::HttpBody {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new Connect error
    pub fn connect(host: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::Connect {
            host: host.into(),
            message: message.into(),
        }
    }

    /// Creates a new Handshake error
    pub fn handshake(host: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::Handshake {
            host: host.into(),
            message: message.into(),
        }
    }

    /// Creates a new HostKey error
    pub fn host_key(host: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::HostKey {
            host: host.into(),
            message: message.into(),
        }
    }

    /// Creates a new RemoteCommand error
    pub fn remote_command(path: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::RemoteCommand {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl SpecError {
    /// Creates a new Parse error
    pub fn parse(location: impl Into<String>, message: impl Into<String>) -> Self {
        SpecError::Parse {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl RuleError {
    /// Creates a new InvalidPattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        RuleError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

impl InventoryError {
    /// Creates a new Decode error
    pub fn decode(origin: impl Into<String>, message: impl Into<String>) -> Self {
        InventoryError::Decode {
            origin: origin.into(),
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new InvalidLocation error
    pub fn invalid_location(location: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidLocation {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Creates a new UnsupportedScheme error
    pub fn unsupported_scheme(scheme: impl Into<String>, location: impl Into<String>) -> Self {
        ConfigError::UnsupportedScheme {
            scheme: scheme.into(),
            location: location.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_file_not_found() {
        let err = SourceError::file_not_found("/path/to/.gomodreq.yml");
        let msg = format!("{}", err);
        assert!(msg.contains("file does not exist"));
        assert!(msg.contains(".gomodreq.yml"));
    }

    #[test]
    fn test_source_error_file_read() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SourceError::file_read("/etc/secret.yml", io);
        let msg = format!("{}", err);
        assert!(msg.contains("problem reading file"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_source_error_http_request() {
        let err = SourceError::http_request("https://example.com/req.yml", "connection refused");
        let msg = format!("{}", err);
        assert!(msg.contains("https://example.com/req.yml"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_source_error_authentication() {
        let err = SourceError::Authentication {
            user: "git".to_string(),
            host: "example.com:22".to_string(),
            message: "publickey rejected".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("git@example.com:22"));
    }

    #[test]
    fn test_source_error_remote_command() {
        let err = SourceError::remote_command("/srv/req.yml", "No such file or directory");
        let msg = format!("{}", err);
        assert!(msg.contains("remote file contents"));
        assert!(msg.contains("/srv/req.yml"));
    }

    #[test]
    fn test_spec_error_parse() {
        let err = SpecError::parse("file:///tmp/req.yml", "did not find expected key");
        let msg = format!("{}", err);
        assert!(msg.contains("unable to parse requirements file"));
        assert!(msg.contains("file:///tmp/req.yml"));
    }

    #[test]
    fn test_rule_error_invalid_pattern() {
        let err = RuleError::invalid_pattern("v1.(", "unclosed group");
        let msg = format!("{}", err);
        assert!(msg.contains("unable to compile regex"));
        assert!(msg.contains("v1.("));
    }

    #[test]
    fn test_inventory_error_command_failed() {
        let err = InventoryError::CommandFailed {
            command: "go list -m -u -json all".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "go: cannot find main module".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("go list"));
        assert!(msg.contains("cannot find main module"));
    }

    #[test]
    fn test_config_error_unsupported_scheme() {
        let err = ConfigError::unsupported_scheme("ftp", "ftp://example.com/req.yml");
        let msg = format!("{}", err);
        assert!(msg.contains("unsupported uri scheme 'ftp'"));
    }

    #[test]
    fn test_app_error_from_source_error() {
        let app_err: AppError = SourceError::file_not_found("/missing").into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("file does not exist"));
    }

    #[test]
    fn test_app_error_from_rule_error() {
        let app_err: AppError = RuleError::invalid_pattern("[", "unclosed class").into();
        assert!(matches!(app_err, AppError::Rule(_)));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::invalid_location("::", "relative URL").into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("unable to parse location"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = SourceError::file_not_found("/test");
        let debug = format!("{:?}", err);
        assert!(debug.contains("FileNotFound"));
    }
}
