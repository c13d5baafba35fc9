//! Password strength check library
//!
//! Scores a password with NIST SP 800-63B style composition rules and looks it
//! up in the Have I Been Pwned "Pwned Passwords" corpus. The lookup uses the
//! k-anonymity range API: only the first five hex characters of the SHA-1
//! digest leave the process.
//!
//! # Features
//!
//! - `async` (default): Dispatch evaluation onto a blocking worker with cancellation support
//! - `tracing`: Enables logging via tracing crate
//! - `cli`: Builds the `pwd-check` binary
//!
//! # Environment Variables
//!
//! - `PWD_HIBP_URL`: Range API base URL
//!   (default: `https://api.pwnedpasswords.com/range/`)
//! - `PWD_HIBP_TIMEOUT_SECS`: Request timeout in seconds (default: `5`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_nist_check::analyze;
//! use secrecy::SecretString;
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//!
//! // Blocks for the breach lookup (at most the configured timeout)
//! println!("{}", analyze(&password));
//! ```
//!
//! Use [`evaluate`] with your own [`RangeSource`] to check against something
//! other than the public API:
//!
//! ```rust
//! use pwd_nist_check::{evaluate, BreachChecker, BreachError, RangeSource, Strength};
//! use secrecy::SecretString;
//!
//! struct NothingBreached;
//!
//! impl RangeSource for NothingBreached {
//!     fn fetch_range(&self, _prefix: &str) -> Result<String, BreachError> {
//!         Ok(String::new())
//!     }
//! }
//!
//! let password = SecretString::new("Tr0ub4dor&3!!".to_string().into());
//! let report = evaluate(&password, &BreachChecker::new(NothingBreached));
//! assert_eq!(report.strength(), Some(Strength::Moderate));
//! ```

// Internal modules
mod breach;
mod evaluator;
mod hibp;
mod sections;
mod types;

// Public API
pub use breach::{BreachChecker, BreachError, PREFIX_LEN, RangeSource, find_suffix, hash_password, split_hash};
pub use evaluator::{analyze, analyze_report, evaluate, evaluate_with};
pub use hibp::{ConfigError, HibpClient, HibpConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use sections::classify;
pub use types::{
    BreachFailure, BreachVerdict, CharacterTally, LengthBand, PasswordEvaluation, PasswordReport,
    Strength, EMPTY_PASSWORD_MESSAGE, MAX_LENGTH, MIN_LENGTH,
};

#[cfg(feature = "async")]
pub use evaluator::{analyze_tx, evaluate_tx, DEBOUNCE};
