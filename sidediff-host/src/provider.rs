//! Where the two documents come from.

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::config::HostConfig;
use crate::error::CompareError;

/// Body prefix a fetching proxy uses to report its own failure.
pub const PROXY_ERROR_PREFIX: &str = "Error fetching URL:";

/// Source of raw HTML for a comparison target.
pub trait DocumentProvider {
    fn fetch(&self, target: &str) -> Result<String, CompareError>;
}

/// Accept `input` (surrounding whitespace ignored) only when it is an
/// absolute URL starting with `http://` or `https://`.
pub fn validate_url(input: &str) -> Result<Url, CompareError> {
    let trimmed = input.trim();
    let invalid = || CompareError::InvalidUrl {
        input: input.to_owned(),
    };

    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(invalid());
    }
    Url::parse(trimmed).map_err(|_| invalid())
}

/// Reject proxy answers that carry an error message instead of a page.
pub fn check_proxy_body(target: &str, body: String) -> Result<String, CompareError> {
    match body.strip_prefix(PROXY_ERROR_PREFIX) {
        Some(message) => Err(CompareError::ProxyReported {
            target: target.to_owned(),
            message: message.trim().to_owned(),
        }),
        None => Ok(body),
    }
}

/// Fetches over HTTP(S), directly or through a proxy endpoint.
pub struct HttpProvider {
    client: reqwest::blocking::Client,
    proxy: Option<Url>,
    timeout: Duration,
}

impl HttpProvider {
    pub fn new(config: &HostConfig) -> Result<Self, CompareError> {
        let proxy = config
            .proxy_endpoint
            .as_deref()
            .map(validate_url)
            .transpose()?;

        let client = reqwest::blocking::Client::builder()
            .timeout(config.load_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| CompareError::Fetch {
                target: "(http client)".to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            proxy,
            timeout: config.load_timeout,
        })
    }

    /// The URL actually requested for `target`.
    pub fn request_url(&self, target: &Url) -> Url {
        match &self.proxy {
            Some(endpoint) => {
                let mut url = endpoint.clone();
                url.query_pairs_mut().append_pair("url", target.as_str());
                url
            }
            None => target.clone(),
        }
    }

    fn transport_error(&self, target: &str, err: reqwest::Error) -> CompareError {
        if err.is_timeout() {
            CompareError::Timeout {
                target: target.to_owned(),
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            CompareError::Fetch {
                target: target.to_owned(),
                reason: err.to_string(),
            }
        }
    }
}

impl DocumentProvider for HttpProvider {
    fn fetch(&self, target: &str) -> Result<String, CompareError> {
        let url = validate_url(target)?;
        let request_url = self.request_url(&url);
        debug!(%url, %request_url, "fetching");

        let response = self
            .client
            .get(request_url)
            .send()
            .map_err(|e| self.transport_error(target, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompareError::Status {
                target: target.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|e| self.transport_error(target, e))?;
        debug!(%url, bytes = body.len(), "fetched");

        if self.proxy.is_some() {
            check_proxy_body(target, body)
        } else {
            Ok(body)
        }
    }
}

/// Reads targets as local file paths, relative to `base` when set.
#[derive(Debug, Clone, Default)]
pub struct FileProvider {
    pub base: Option<PathBuf>,
}

impl DocumentProvider for FileProvider {
    fn fetch(&self, target: &str) -> Result<String, CompareError> {
        let path = match &self.base {
            Some(base) => base.join(target),
            None => PathBuf::from(target),
        };
        debug!(path = %path.display(), "reading");
        std::fs::read_to_string(&path).map_err(|e| CompareError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
