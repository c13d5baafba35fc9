//! Character variety section - counts lowercase, uppercase, numbers, special chars.

use super::Scored;
use crate::types::CharacterTally;

/// Counts at or above this many earn an extra point.
const RICH_CLASS_COUNT: usize = 4;

/// Classifies every character into exactly one bucket.
///
/// Classification is ASCII only: anything that is not an ASCII letter or digit
/// (including non-ASCII letters) is special.
pub fn classify(password: &str) -> CharacterTally {
    password
        .chars()
        .fold(CharacterTally::default(), |mut tally, c| {
            if c.is_ascii_lowercase() {
                tally.lowercase += 1;
            } else if c.is_ascii_uppercase() {
                tally.uppercase += 1;
            } else if c.is_ascii_digit() {
                tally.digits += 1;
            } else {
                tally.special += 1;
            }
            tally
        })
}

/// Checks which character classes the password uses.
///
/// # Returns
/// The tally and its points: +1 per class present, +1 for 4+ special
/// characters, +1 for 4+ digits.
pub fn character_variety_section(password: &str) -> Scored<CharacterTally> {
    let tally = classify(password);

    let mut points = tally.classes_present() as u32;
    if tally.special >= RICH_CLASS_COUNT {
        points += 1;
    }
    if tally.digits >= RICH_CLASS_COUNT {
        points += 1;
    }

    Scored { value: tally, points }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variety_section_lowercase_only() {
        let result = character_variety_section("password");
        assert_eq!(result.value.lowercase, 8);
        assert!(!result.value.has_uppercase());
        assert!(!result.value.has_digits());
        assert!(!result.value.has_special());
        assert_eq!(result.points, 1);
    }

    #[test]
    fn test_variety_section_all_categories() {
        let result = character_variety_section("HasAll123!@#");
        assert_eq!(
            result.value,
            CharacterTally { lowercase: 4, uppercase: 2, digits: 3, special: 3 }
        );
        assert_eq!(result.points, 4);
    }

    #[test]
    fn test_variety_section_count_bonuses() {
        let result = character_variety_section("ab1234!@#$");
        assert_eq!(result.value.digits, 4);
        assert_eq!(result.value.special, 4);
        // lower + digit + special, plus both count bonuses
        assert_eq!(result.points, 5);
    }

    #[test]
    fn test_classify_whitespace_inside_is_special() {
        let tally = classify("a b");
        assert_eq!(tally.special, 1);
        assert_eq!(tally.lowercase, 2);
    }

    #[test]
    fn test_classify_non_ascii_is_special() {
        let tally = classify("Ünïcødé٣");
        assert_eq!(tally.uppercase, 0);
        assert_eq!(tally.digits, 0);
        assert_eq!(tally.lowercase, 3);
        assert_eq!(tally.special, 5);
    }

    #[test]
    fn test_classify_is_exhaustive() {
        for pwd in ["", "Tr0ub4dor&3!!", "пароль123", "🔐🔐 aA1", "\t\u{0}x"] {
            let tally = classify(pwd);
            assert_eq!(tally.total(), pwd.chars().count(), "bucket sum for {:?}", pwd);
        }
    }
}
