//! Report types produced by the analyzer.

use std::fmt;

/// Minimum length recommended by NIST SP 800-63B.
pub const MIN_LENGTH: usize = 8;

/// Maximum length the report still considers within the recommendation.
pub const MAX_LENGTH: usize = 64;

/// Where a password's length falls relative to the NIST bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthBand {
    TooShort,
    Meets,
    TooLong,
}

impl LengthBand {
    pub fn from_length(length: usize) -> Self {
        if length < MIN_LENGTH {
            LengthBand::TooShort
        } else if length <= MAX_LENGTH {
            LengthBand::Meets
        } else {
            LengthBand::TooLong
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            LengthBand::TooShort => "❌ The password needs to be at least 8 characters long",
            LengthBand::Meets => "✅ Your password meets the Length Requirements (NIST SP 800-63B)",
            LengthBand::TooLong => "⚠️ The recommended max password length is 64 characters",
        }
    }
}

/// Per-class character counts. Every character lands in exactly one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterTally {
    pub lowercase: usize,
    pub uppercase: usize,
    pub digits: usize,
    pub special: usize,
}

impl CharacterTally {
    pub fn has_lowercase(&self) -> bool {
        self.lowercase > 0
    }

    pub fn has_uppercase(&self) -> bool {
        self.uppercase > 0
    }

    pub fn has_digits(&self) -> bool {
        self.digits > 0
    }

    pub fn has_special(&self) -> bool {
        self.special > 0
    }

    /// Number of classes with at least one character (0..=4).
    pub fn classes_present(&self) -> usize {
        [
            self.has_lowercase(),
            self.has_uppercase(),
            self.has_digits(),
            self.has_special(),
        ]
        .iter()
        .filter(|&&b| b)
        .count()
    }

    pub fn total(&self) -> usize {
        self.lowercase + self.uppercase + self.digits + self.special
    }
}

/// Why a breach lookup could not produce an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreachFailure {
    /// The range API answered with a non-success status or an unusable body.
    Service,
    /// The request never completed (DNS, TLS, refused, timeout).
    Connectivity,
}

/// Outcome of the breach lookup for one password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreachVerdict {
    NotFound,
    Found { count: u64 },
    Failed(BreachFailure),
}

impl BreachVerdict {
    pub fn is_breached(&self) -> bool {
        matches!(self, BreachVerdict::Found { .. })
    }

    /// Line added to the report, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            BreachVerdict::NotFound => None,
            BreachVerdict::Found { count } => Some(format!(
                "❌ This password has appeared in data breaches ({} times).",
                count
            )),
            BreachVerdict::Failed(BreachFailure::Service) => {
                Some("⚠️ Error checking HIBP API".to_string())
            }
            BreachVerdict::Failed(BreachFailure::Connectivity) => {
                Some("⚠️ Error connecting to HIBP API".to_string())
            }
        }
    }
}

/// Final strength category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    /// Found in a breach corpus; never use it.
    Breached,
    Weak,
    Moderate,
    Strong,
    Excellent,
}

impl Strength {
    /// Maps a final score to a label. First matching threshold wins.
    pub fn from_score(score: u32, breached: bool) -> Self {
        if score >= 12 {
            Strength::Excellent
        } else if score >= 9 {
            Strength::Strong
        } else if score >= 7 {
            Strength::Moderate
        } else if score == 0 && breached {
            Strength::Breached
        } else {
            Strength::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strength::Excellent => "🔐 Strength: Excellent",
            Strength::Strong => "🟢 Strength: Strong",
            Strength::Moderate => "🟡 Strength: Moderate",
            Strength::Breached => "☢️ DO NOT USE THIS PASSWORD ☢️",
            Strength::Weak => "🔴 Strength: Weak – consider improving your password",
        }
    }
}

/// Full analysis of a non-empty password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordEvaluation {
    pub length: usize,
    pub band: LengthBand,
    pub tally: CharacterTally,
    pub breach: BreachVerdict,
    pub score: u32,
    pub strength: Strength,
}

/// What the analyzer hands back to its caller.
///
/// `Display` renders the text shown to the user, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordReport {
    /// Nothing left after trimming whitespace.
    Empty,
    Evaluated(PasswordEvaluation),
}

pub const EMPTY_PASSWORD_MESSAGE: &str = "❌ You must enter a password.";

impl PasswordReport {
    pub fn score(&self) -> Option<u32> {
        match self {
            PasswordReport::Empty => None,
            PasswordReport::Evaluated(e) => Some(e.score),
        }
    }

    pub fn strength(&self) -> Option<Strength> {
        match self {
            PasswordReport::Empty => None,
            PasswordReport::Evaluated(e) => Some(e.strength),
        }
    }

    pub fn evaluation(&self) -> Option<&PasswordEvaluation> {
        match self {
            PasswordReport::Empty => None,
            PasswordReport::Evaluated(e) => Some(e),
        }
    }
}

fn mark(present: bool) -> &'static str {
    if present { "✅" } else { "❌" }
}

impl fmt::Display for PasswordReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = match self {
            PasswordReport::Empty => return f.write_str(EMPTY_PASSWORD_MESSAGE),
            PasswordReport::Evaluated(e) => e,
        };
        let t = &e.tally;

        writeln!(f, "{}", e.band.message())?;
        writeln!(f)?;
        writeln!(f, "--Character Types Found--")?;
        writeln!(f, "{} Lowercase Letters: {}", mark(t.has_lowercase()), t.lowercase)?;
        writeln!(f, "{} Uppercase Letters: {}", mark(t.has_uppercase()), t.uppercase)?;
        writeln!(f, "{} Numbers: {}", mark(t.has_digits()), t.digits)?;
        writeln!(f, "{} Special Characters: {}", mark(t.has_special()), t.special)?;
        if let Some(note) = e.breach.message() {
            write!(f, "\n{}", note)?;
        }
        write!(f, "\n{}", e.strength.label())
    }
}
