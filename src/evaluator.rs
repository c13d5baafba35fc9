//! Password strength evaluator - main evaluation logic.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::breach::{BreachChecker, RangeSource};
use crate::hibp::{HibpClient, HibpConfig};
use crate::sections::{breach_section, character_variety_section, length_section};
use crate::types::{BreachVerdict, PasswordEvaluation, PasswordReport, Strength};

/// Evaluates a password, using `lookup` for the breach check.
///
/// The password is trimmed first; an empty result short-circuits to
/// [`PasswordReport::Empty`] without calling `lookup`.
pub fn evaluate_with<F>(password: &SecretString, lookup: F) -> PasswordReport
where
    F: FnOnce(&str) -> BreachVerdict,
{
    let pwd = password.expose_secret().trim();
    if pwd.is_empty() {
        return PasswordReport::Empty;
    }

    let length = pwd.chars().count();
    let band = length_section(length);
    let variety = character_variety_section(pwd);

    let breach = breach_section(pwd, variety.points + band.points, lookup);
    let score = breach.points;
    let strength = Strength::from_score(score, breach.value.is_breached());

    #[cfg(feature = "tracing")]
    tracing::debug!("Password evaluated: score {}, strength {:?}", score, strength);

    PasswordReport::Evaluated(PasswordEvaluation {
        length,
        band: band.value,
        tally: variety.value,
        breach: breach.value,
        score,
        strength,
    })
}

/// Evaluates a password against the given breach checker.
///
/// # Arguments
/// * `password` - The password to evaluate
/// * `checker` - Breach checker to query (one range lookup, skipped for empty input)
///
/// # Returns
/// A `PasswordReport`; its `Display` output is the text shown to the user.
pub fn evaluate<S: RangeSource>(password: &SecretString, checker: &BreachChecker<S>) -> PasswordReport {
    evaluate_with(password, |pwd| checker.check_str(pwd))
}

/// Evaluates a password against the public Have I Been Pwned API.
///
/// Configuration comes from [`HibpConfig::from_env`], falling back to the
/// defaults when the environment holds invalid values. Blocks for at most the
/// configured timeout.
pub fn analyze_report(password: &SecretString) -> PasswordReport {
    let config = HibpConfig::from_env().unwrap_or_else(|_e| {
        #[cfg(feature = "tracing")]
        tracing::warn!("Ignoring invalid breach lookup configuration: {}", _e);
        HibpConfig::default()
    });

    match HibpClient::new(config) {
        Ok(client) => evaluate(password, &BreachChecker::new(client)),
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to build breach lookup client: {}", e);
            let failure = e.failure();
            evaluate_with(password, |_| BreachVerdict::Failed(failure))
        }
    }
}

/// Checks a password and returns the report text.
///
/// This is the entry point for front ends that only display the result.
pub fn analyze(password: &SecretString) -> String {
    analyze_report(password).to_string()
}

/// Delay before a dispatched evaluation starts, so a front end evaluating on
/// every keystroke only hits the network once typing pauses.
#[cfg(feature = "async")]
pub const DEBOUNCE: std::time::Duration = std::time::Duration::from_millis(300);

#[cfg(feature = "async")]
async fn dispatch_tx<F>(token: CancellationToken, tx: mpsc::Sender<PasswordReport>, job: F)
where
    F: FnOnce() -> PasswordReport + Send + 'static,
{
    #[cfg(feature = "tracing")]
    tracing::info!("evaluation is about to start...");

    if token.run_until_cancelled(tokio::time::sleep(DEBOUNCE)).await.is_none() {
        #[cfg(feature = "tracing")]
        tracing::debug!("Evaluation cancelled before start");
        return;
    }

    // The blocking lookup itself is never aborted; cancellation only stops us
    // from waiting for it.
    let joined = match token.run_until_cancelled(tokio::task::spawn_blocking(job)).await {
        Some(joined) => joined,
        None => return,
    };

    let report = match joined {
        Ok(report) => report,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Password evaluation worker failed: {}", _e);
            return;
        }
    };

    if token.is_cancelled() {
        return;
    }

    if let Err(_e) = tx.send(report).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password evaluation result: {}", _e);
    }
}

/// Async version of [`evaluate`]: runs on a blocking worker and sends the
/// report via channel. Nothing is sent if `token` is cancelled first.
#[cfg(feature = "async")]
pub async fn evaluate_tx<S>(
    password: SecretString,
    checker: BreachChecker<S>,
    token: CancellationToken,
    tx: mpsc::Sender<PasswordReport>,
) where
    S: RangeSource + Send + 'static,
{
    dispatch_tx(token, tx, move || evaluate(&password, &checker)).await;
}

/// Async version of [`analyze_report`]. The HTTP client is built on the worker
/// thread, never on the runtime.
#[cfg(feature = "async")]
pub async fn analyze_tx(
    password: SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<PasswordReport>,
) {
    dispatch_tx(token, tx, move || analyze_report(&password)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breach::tests::FakeRanges;
    use crate::breach::BreachError;
    use crate::types::{BreachFailure, LengthBand, EMPTY_PASSWORD_MESSAGE};

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn breached_checker() -> BreachChecker<FakeRanges> {
        BreachChecker::new(FakeRanges::with_breached(&[
            ("password", 9545824),
            ("123456", 37359195),
        ]))
    }

    fn evaluated(report: &PasswordReport) -> &PasswordEvaluation {
        report.evaluation().expect("expected an evaluated report")
    }

    #[test]
    fn test_evaluate_empty_password() {
        let source = FakeRanges::default();
        let checker = BreachChecker::new(&source);

        for pwd in ["", "   ", "\t\n ", "\u{3000}"] {
            let report = evaluate(&secret(pwd), &checker);
            assert_eq!(report, PasswordReport::Empty);
            assert_eq!(report.to_string(), EMPTY_PASSWORD_MESSAGE);
        }
        assert!(source.requested.borrow().is_empty(), "no lookup for empty input");
    }

    #[test]
    fn test_evaluate_breached_password() {
        let report = evaluate(&secret("password"), &breached_checker());
        let e = evaluated(&report);

        assert_eq!(e.band, LengthBand::Meets);
        assert_eq!(e.tally.lowercase, 8);
        assert_eq!(e.breach, BreachVerdict::Found { count: 9545824 });
        assert_eq!(e.score, 0);
        assert_eq!(e.strength, Strength::Breached);

        let text = report.to_string();
        assert!(text.starts_with("✅ Your password meets the Length Requirements (NIST SP 800-63B)\n"));
        assert!(text.contains("✅ Lowercase Letters: 8\n"));
        assert!(text.contains("❌ Uppercase Letters: 0\n"));
        assert!(text.contains("\n❌ This password has appeared in data breaches (9545824 times)."));
        assert!(text.ends_with("☢️ DO NOT USE THIS PASSWORD ☢️"));
    }

    #[test]
    fn test_breach_overrides_rich_composition() {
        let strong = "Xq7!vR2#pL9$wZ4&mK8*";
        let checker = BreachChecker::new(FakeRanges::with_breached(&[(strong, 1)]));

        let report = evaluate(&secret(strong), &checker);
        assert_eq!(report.score(), Some(0));
        assert_eq!(report.strength(), Some(Strength::Breached));
    }

    #[test]
    fn test_evaluate_troubador_not_breached() {
        let report = evaluate(&secret("Tr0ub4dor&3!!"), &breached_checker());
        let e = evaluated(&report);

        assert_eq!(e.length, 13);
        assert!(e.tally.has_lowercase() && e.tally.has_uppercase());
        assert!(e.tally.has_digits() && e.tally.has_special());
        assert_eq!(e.breach, BreachVerdict::NotFound);
        // 4 classes + 2 (>=8) + 2 (>=12); 3 digits and 3 specials earn no count bonus
        assert_eq!(e.score, 8);
        assert_eq!(e.strength, Strength::Moderate);
    }

    #[test]
    fn test_evaluate_exact_text() {
        let report = evaluate(&secret("  Tr0ub4dor&3!!  "), &breached_checker());
        let expected = "✅ Your password meets the Length Requirements (NIST SP 800-63B)\n\
                        \n\
                        --Character Types Found--\n\
                        ✅ Lowercase Letters: 6\n\
                        ✅ Uppercase Letters: 1\n\
                        ✅ Numbers: 3\n\
                        ✅ Special Characters: 3\n\
                        \n\
                        🟡 Strength: Moderate";
        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn test_evaluate_excellent_password() {
        // 20 chars, all classes, 4 digits, 4 special: 4 + 6 + 1 + 1
        let report = evaluate(&secret("Abcdefghijk1234!@#$x"), &breached_checker());
        assert_eq!(report.score(), Some(12));
        assert_eq!(report.strength(), Some(Strength::Excellent));
        assert!(report.to_string().ends_with("🔐 Strength: Excellent"));
    }

    #[test]
    fn test_evaluate_strong_password() {
        // 16 chars, all classes: 4 + 5
        let report = evaluate(&secret("CorrectHorse7!xy"), &breached_checker());
        assert_eq!(report.score(), Some(9));
        assert_eq!(report.strength(), Some(Strength::Strong));
    }

    #[test]
    fn test_evaluate_weak_short_password() {
        let report = evaluate(&secret("abc"), &breached_checker());
        let e = evaluated(&report);
        assert_eq!(e.band, LengthBand::TooShort);
        assert_eq!(e.score, 1);
        assert_eq!(e.strength, Strength::Weak);
        assert!(report.to_string().starts_with("❌ The password needs to be at least 8 characters long\n"));
    }

    #[test]
    fn test_length_boundaries() {
        let checker = breached_checker();
        let cases = [(7, LengthBand::TooShort), (8, LengthBand::Meets), (64, LengthBand::Meets), (65, LengthBand::TooLong)];
        for (len, band) in cases {
            let pwd = "k".repeat(len);
            let report = evaluate(&secret(&pwd), &checker);
            assert_eq!(evaluated(&report).band, band, "length {}", len);
        }

        let report = evaluate(&secret(&"k".repeat(65)), &checker);
        assert!(report.to_string().starts_with("⚠️ The recommended max password length is 64 characters\n"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 4 characters, 8+ bytes
        let report = evaluate(&secret("éééé"), &breached_checker());
        let e = evaluated(&report);
        assert_eq!(e.length, 4);
        assert_eq!(e.band, LengthBand::TooShort);
        assert_eq!(e.tally.total(), 4);
    }

    #[test]
    fn test_service_error_is_inconclusive() {
        let checker = BreachChecker::new(FakeRanges::failing(|| BreachError::Service(503)));
        let report = evaluate(&secret("Tr0ub4dor&3!!"), &checker);
        let e = evaluated(&report);

        assert_eq!(e.breach, BreachVerdict::Failed(BreachFailure::Service));
        assert_eq!(e.score, 8);
        assert_eq!(e.strength, Strength::Moderate);
        assert!(report.to_string().contains("\n⚠️ Error checking HIBP API\n"));
    }

    #[test]
    fn test_connectivity_error_never_marks_breached() {
        let report = evaluate_with(&secret("zz"), |_| BreachVerdict::Failed(BreachFailure::Connectivity));
        let e = evaluated(&report);

        assert_eq!(e.score, 1);
        assert_eq!(e.strength, Strength::Weak);
        let text = report.to_string();
        assert!(text.contains("⚠️ Error connecting to HIBP API"));
        assert!(!text.contains("DO NOT USE"));
    }

    #[test]
    fn test_lookup_uses_trimmed_password() {
        let report = evaluate(&secret("  password \n"), &breached_checker());
        assert_eq!(report.strength(), Some(Strength::Breached));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let checker = breached_checker();
        for pwd in ["password", "Tr0ub4dor&3!!", "short", "   "] {
            let first = evaluate(&secret(pwd), &checker).to_string();
            let second = evaluate(&secret(pwd), &checker).to_string();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_all_classes_in_nist_range_score_at_least_six() {
        let checker = breached_checker();
        let passwords = vec![
            "aA1!aA1!".to_string(),
            "Zz9?Zz9?Zz9".to_string(),
            "q".repeat(60) + "W3$",
            "mY-p4ss-W0rd-is-long".to_string(),
        ];
        for pwd in passwords {
            let report = evaluate(&secret(&pwd), &checker);
            assert!(report.score().unwrap() >= 6, "score for {:?}", pwd);
        }
    }
}
