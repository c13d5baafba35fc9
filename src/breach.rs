//! Breach lookup module
//!
//! Checks a password against a k-anonymity range API: only the first five hex
//! characters of the SHA-1 digest are handed to the [`RangeSource`], the
//! suffix comparison happens locally.

use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};
use thiserror::Error;

use crate::types::{BreachFailure, BreachVerdict};

/// Length of the digest prefix sent to the range API.
pub const PREFIX_LEN: usize = 5;

#[derive(Error, Debug)]
pub enum BreachError {
    #[error("range API responded with status code {0}")]
    Service(u16),
    #[error("failed to reach range API: {0}")]
    Connectivity(#[from] reqwest::Error),
    #[error("malformed range API response: {0}")]
    MalformedResponse(String),
}

impl BreachError {
    /// Collapses the error into what the report tells the user.
    pub fn failure(&self) -> BreachFailure {
        match self {
            BreachError::Service(_) | BreachError::MalformedResponse(_) => BreachFailure::Service,
            BreachError::Connectivity(_) => BreachFailure::Connectivity,
        }
    }
}

/// Something that answers range queries: given a 5 character uppercase hex
/// prefix, returns the raw `SUFFIX:COUNT` body.
pub trait RangeSource {
    fn fetch_range(&self, prefix: &str) -> Result<String, BreachError>;
}

impl<S: RangeSource + ?Sized> RangeSource for &S {
    fn fetch_range(&self, prefix: &str) -> Result<String, BreachError> {
        (**self).fetch_range(prefix)
    }
}

/// SHA-1 hash a password and return uppercase hex string
pub fn hash_password(password: &str) -> String {
    hex::encode_upper(Sha1::digest(password.as_bytes()))
}

/// Split a SHA-1 hash into prefix (5 chars) and suffix (35 chars)
pub fn split_hash(hash: &str) -> (&str, &str) {
    hash.split_at(PREFIX_LEN)
}

/// Scans a range body for `suffix`.
///
/// Returns `Ok(None)` when the suffix is absent or only present as a padding
/// record (count 0). Lines that do not look like `SUFFIX:COUNT` are skipped
/// unless they carry the suffix we are looking for.
pub fn find_suffix(body: &str, suffix: &str) -> Result<Option<u64>, BreachError> {
    for line in body.lines() {
        let Some((candidate, count)) = line.trim().split_once(':') else {
            continue;
        };
        if !candidate.trim().eq_ignore_ascii_case(suffix) {
            continue;
        }
        let count = count
            .trim()
            .parse::<u64>()
            .map_err(|_| BreachError::MalformedResponse(format!("invalid count {:?}", count.trim())))?;
        return Ok((count > 0).then_some(count));
    }
    Ok(None)
}

/// Breach checker over any range source. Holds no state between checks.
#[derive(Debug, Clone)]
pub struct BreachChecker<S> {
    source: S,
}

impl<S: RangeSource> BreachChecker<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Looks the password up. One range query, no retries.
    pub fn check(&self, password: &SecretString) -> BreachVerdict {
        self.check_str(password.expose_secret())
    }

    /// Same as [`check`](Self::check) but returns the underlying error.
    pub fn lookup(&self, password: &SecretString) -> Result<Option<u64>, BreachError> {
        self.lookup_str(password.expose_secret())
    }

    pub(crate) fn check_str(&self, password: &str) -> BreachVerdict {
        match self.lookup_str(password) {
            Ok(Some(count)) => BreachVerdict::Found { count },
            Ok(None) => BreachVerdict::NotFound,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Breach lookup inconclusive: {}", e);
                BreachVerdict::Failed(e.failure())
            }
        }
    }

    fn lookup_str(&self, password: &str) -> Result<Option<u64>, BreachError> {
        let hash = hash_password(password);
        let (prefix, suffix) = split_hash(&hash);

        #[cfg(feature = "tracing")]
        tracing::debug!("Querying breach range for prefix {}", prefix);

        let body = self.source.fetch_range(prefix)?;
        find_suffix(&body, suffix)
    }
}
