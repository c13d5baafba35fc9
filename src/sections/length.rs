//! Length section - places the password in a NIST length band and awards length points.

use super::Scored;
use crate::types::LengthBand;

/// Cumulative thresholds: each one reached adds its points.
const LENGTH_BONUSES: [(usize, u32); 4] = [(8, 2), (12, 2), (16, 1), (20, 1)];

/// Evaluates the length (in characters) of a trimmed password.
///
/// # Returns
/// The length band and up to 6 points.
pub fn length_section(length: usize) -> Scored<LengthBand> {
    let points = LENGTH_BONUSES
        .iter()
        .filter(|(min, _)| length >= *min)
        .map(|(_, bonus)| bonus)
        .sum();

    Scored {
        value: LengthBand::from_length(length),
        points,
    }
}
