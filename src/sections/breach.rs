//! Breach section - looks the password up and applies the breach override.

use super::Scored;
use crate::types::BreachVerdict;

/// Runs the lookup and folds its verdict into the score accumulated so far.
///
/// # Returns
/// The verdict and the resulting score: 0 when the password was found in a
/// breach, `score` unchanged otherwise (including inconclusive lookups).
pub fn breach_section<F>(password: &str, score: u32, lookup: F) -> Scored<BreachVerdict>
where
    F: FnOnce(&str) -> BreachVerdict,
{
    let verdict = lookup(password);
    let points = if verdict.is_breached() { 0 } else { score };
    Scored { value: verdict, points }
}
