//! SSH transport
//!
//! Authenticates with the private key at `~/.ssh/id_rsa`, falling back to a
//! password from the URI user-info, then runs `cat <path>` on the remote
//! host. The session is blocking and runs on a tokio blocking worker.
//!
//! Host keys are accepted without verification unless
//! [`HostKeyPolicy::KnownHosts`] is selected. Accepting any key trusts
//! whichever server answers at the address.

use crate::error::SourceError;
use ssh2::{CheckResult, ExtendedData, KnownHostFileKind, Session};
use std::io::Read;
use std::net::TcpStream;
use std::path::PathBuf;
use tracing::{debug, warn};
use url::Url;

/// Port used when the URI does not name one
const DEFAULT_SSH_PORT: u16 = 22;

/// How the server host key is checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HostKeyPolicy {
    /// Accept any host key
    #[default]
    AcceptAny,
    /// Require a matching entry in `~/.ssh/known_hosts`
    KnownHosts,
}

/// Connection facts extracted from an `ssh://` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTarget {
    /// Login user
    pub user: String,
    /// Optional password used after key authentication is rejected
    pub password: Option<String>,
    /// Remote host
    pub host: String,
    /// Remote port
    pub port: u16,
    /// Remote file path
    pub path: String,
}

impl SshTarget {
    /// Extracts the target from a URI, percent-decoding the user-info and path
    pub fn from_url(url: &Url) -> Result<Self, SourceError> {
        let location = url.as_str();
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| SourceError::connect(location, "missing host"))?
            .to_string();

        let user = match decode(url.username()) {
            user if user.is_empty() => local_user(),
            user => user,
        };
        let password = url.password().map(decode);

        Ok(Self {
            user,
            password,
            host,
            port: url.port().unwrap_or(DEFAULT_SSH_PORT),
            path: decode(url.path()),
        })
    }

    /// Returns `host:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the remote read command
    pub fn read_command(&self) -> String {
        format!("cat {}", shell_quote(&self.path))
    }

    /// Connects, authenticates and reads the remote file
    fn read_remote(&self, policy: HostKeyPolicy) -> Result<Vec<u8>, SourceError> {
        let ssh_dir = ssh_dir()?;
        let identity = ssh_dir.join("id_rsa");
        if let Err(e) = std::fs::metadata(&identity) {
            return Err(SourceError::IdentityFile {
                path: identity,
                message: e.to_string(),
            });
        }

        let address = self.address();
        debug!(address = %address, user = %self.user, "connecting to ssh host");
        let tcp =
            TcpStream::connect(&address).map_err(|e| SourceError::connect(&address, e.to_string()))?;

        let mut session =
            Session::new().map_err(|e| SourceError::handshake(&address, e.to_string()))?;
        session.set_tcp_stream(tcp);
        session
            .handshake()
            .map_err(|e| SourceError::handshake(&address, e.to_string()))?;

        self.verify_host_key(&session, policy, &ssh_dir)?;
        self.authenticate(&session, &identity)?;

        let command = self.read_command();
        debug!(command = %command, "running remote read");
        let remote_err = |e: ssh2::Error| SourceError::remote_command(&self.path, e.to_string());

        let mut channel = session.channel_session().map_err(remote_err)?;
        // stderr arrives interleaved on the main stream
        channel
            .handle_extended_data(ExtendedData::Merge)
            .map_err(remote_err)?;
        channel.exec(&command).map_err(remote_err)?;

        let mut output = Vec::new();
        channel
            .read_to_end(&mut output)
            .map_err(|e| SourceError::remote_command(&self.path, e.to_string()))?;

        channel.wait_close().map_err(remote_err)?;
        let status = channel.exit_status().map_err(remote_err)?;
        command_result(&self.path, status, output)
    }

    fn verify_host_key(
        &self,
        session: &Session,
        policy: HostKeyPolicy,
        ssh_dir: &std::path::Path,
    ) -> Result<(), SourceError> {
        let address = self.address();
        match policy {
            HostKeyPolicy::AcceptAny => {
                warn!(address = %address, "accepting ssh host key without verification");
                Ok(())
            }
            HostKeyPolicy::KnownHosts => {
                let (key, _) = session
                    .host_key()
                    .ok_or_else(|| SourceError::host_key(&address, "server sent no host key"))?;
                let mut known = session
                    .known_hosts()
                    .map_err(|e| SourceError::host_key(&address, e.to_string()))?;
                let known_hosts = ssh_dir.join("known_hosts");
                known
                    .read_file(&known_hosts, KnownHostFileKind::OpenSSH)
                    .map_err(|e| {
                        SourceError::host_key(
                            &address,
                            format!("unable to read {}: {}", known_hosts.display(), e),
                        )
                    })?;

                match known.check_port(&self.host, self.port, key) {
                    CheckResult::Match => Ok(()),
                    CheckResult::Mismatch => Err(SourceError::host_key(
                        &address,
                        "host key does not match known_hosts",
                    )),
                    CheckResult::NotFound => Err(SourceError::host_key(
                        &address,
                        "host not found in known_hosts",
                    )),
                    CheckResult::Failure => Err(SourceError::host_key(
                        &address,
                        "unable to check known_hosts",
                    )),
                }
            }
        }
    }

    fn authenticate(&self, session: &Session, identity: &std::path::Path) -> Result<(), SourceError> {
        let auth_err = |message: String| SourceError::Authentication {
            user: self.user.clone(),
            host: self.address(),
            message,
        };

        if let Err(key_err) = session.userauth_pubkey_file(&self.user, None, identity, None) {
            debug!(error = %key_err, "public key authentication rejected");
            match &self.password {
                Some(password) => session
                    .userauth_password(&self.user, password)
                    .map_err(|e| auth_err(e.to_string()))?,
                None => return Err(auth_err(key_err.to_string())),
            }
        }

        if !session.authenticated() {
            return Err(auth_err("no authentication method accepted".to_string()));
        }
        Ok(())
    }
}

/// Reads requirements from an `ssh://` URI
#[derive(Debug, Clone)]
pub struct SshSource {
    uri: Url,
    policy: HostKeyPolicy,
}

impl SshSource {
    /// Creates an SSH source
    pub fn new(uri: Url, policy: HostKeyPolicy) -> Self {
        Self { uri, policy }
    }

    /// Returns the source URI
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Returns the host key policy
    pub fn host_key_policy(&self) -> HostKeyPolicy {
        self.policy
    }

    /// Reads the remote file on a blocking worker
    pub async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        let target = SshTarget::from_url(&self.uri)?;
        let policy = self.host_key_policy();
        tokio::task::spawn_blocking(move || target.read_remote(policy))
            .await
            .map_err(|e| SourceError::Task {
                location: self.uri.to_string(),
                message: e.to_string(),
            })?
    }
}

/// Maps the combined output and exit status of the remote read
fn command_result(path: &str, status: i32, output: Vec<u8>) -> Result<Vec<u8>, SourceError> {
    if status != 0 {
        return Err(SourceError::remote_command(
            path,
            format!(
                "exit status {}: {}",
                status,
                String::from_utf8_lossy(&output).trim()
            ),
        ));
    }
    Ok(output)
}

/// Returns `~/.ssh`
fn ssh_dir() -> Result<PathBuf, SourceError> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".ssh"))
        .ok_or(SourceError::HomeDirectory)
}

fn local_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
}

fn decode(value: &str) -> String {
    urlencoding::decode(value)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

/// Quotes a path for a POSIX shell
fn shell_quote(path: &str) -> String {
    format!("'{}'", path.replace('\'', r"'\''"))
}
