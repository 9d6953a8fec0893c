//! # Natural Ordering
//!
//! Numeric-aware collation used to break ties between duplicate
//! transitions. It follows the default Unicode collation with numeric
//! ordering switched on, so `"q2"` sorts before `"q10"` and `"é"` sorts
//! between `"e"` and `"f"`.
//!
//! ## Levels
//!
//! Strings are compared level by level; a later level only decides when
//! every earlier one is equal.
//!
//! 1. **Base.** Strings are split into runs of ASCII digits and single
//!    characters (after canonical decomposition). Digit runs compare by
//!    numeric value of any length, leading zeros ignored. Characters compare
//!    by their lowercase base letter. Across kinds: punctuation/whitespace <
//!    digit runs < letters. A string that is a prefix of another sorts first.
//! 2. **Accents.** Unaccented before accented.
//! 3. **Case.** Lowercase before uppercase.
//!
//! Strings equal on all three levels (such as `"01"` and `"1"`) compare
//! `Equal`. Callers that need a stable choice keep their own order for them.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Base-level weight of one token. Variant order is the cross-kind order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Base {
    Other(String),
    Number { digits: usize, value: String },
    Letter(String),
}

#[derive(Debug, Default, PartialEq, Eq)]
struct SortKey {
    base: Vec<Base>,
    accents: Vec<String>,
    upper: Vec<bool>,
}

fn sort_key(s: &str) -> SortKey {
    let mut key = SortKey::default();
    let mut chars = s.nfd().peekable();

    while let Some(c) = chars.next() {
        if is_combining_mark(c) {
            match key.accents.last_mut() {
                Some(marks) => marks.push(c),
                None => {
                    key.accents.push(c.to_string());
                    key.upper.push(false);
                }
            }
            continue;
        }

        if c.is_ascii_digit() {
            let mut run = String::from(c);
            while let Some(&d) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                run.push(d);
                chars.next();
            }
            let value = run.trim_start_matches('0');
            key.base.push(Base::Number {
                digits: value.len(),
                value: value.to_string(),
            });
        } else {
            let lower: String = c.to_lowercase().collect();
            key.base.push(if c.is_alphanumeric() {
                Base::Letter(lower)
            } else {
                Base::Other(lower)
            });
        }
        key.accents.push(String::new());
        key.upper.push(c.is_uppercase());
    }

    key
}

/// Compare two strings in natural (numeric-aware) collation order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (a, b) = (sort_key(a), sort_key(b));
    a.base
        .cmp(&b.base)
        .then_with(|| a.accents.cmp(&b.accents))
        .then_with(|| a.upper.cmp(&b.upper))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut items: Vec<&str>) -> Vec<&str> {
        items.sort_by(|a, b| natural_cmp(a, b));
        items
    }

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(natural_cmp("2", "10"), Ordering::Less);
        assert_eq!(natural_cmp("10", "2"), Ordering::Greater);
        assert_eq!(natural_cmp("q2", "q10"), Ordering::Less);
        assert_eq!(natural_cmp("s9", "s10"), Ordering::Less);
    }

    #[test]
    fn plain_strings_still_alphabetical() {
        assert_eq!(natural_cmp("alpha", "beta"), Ordering::Less);
        assert_eq!(natural_cmp("odd", "even"), Ordering::Greater);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(natural_cmp("s", "s1"), Ordering::Less);
        assert_eq!(natural_cmp("state", "states"), Ordering::Less);
    }

    #[test]
    fn letters_before_case() {
        assert_eq!(natural_cmp("a", "B"), Ordering::Less);
        assert_eq!(natural_cmp("B", "a"), Ordering::Greater);
        assert_eq!(natural_cmp("Ab", "aC"), Ordering::Less);
    }

    #[test]
    fn lowercase_before_uppercase() {
        assert_eq!(natural_cmp("a", "A"), Ordering::Less);
        assert_eq!(natural_cmp("A", "a"), Ordering::Greater);
        assert_eq!(natural_cmp("qA", "qa"), Ordering::Greater);
    }

    #[test]
    fn digits_before_letters_and_punctuation_before_digits() {
        assert_eq!(natural_cmp("1", "a"), Ordering::Less);
        assert_eq!(natural_cmp("_", "1"), Ordering::Less);
        assert_eq!(natural_cmp("q_1", "q1"), Ordering::Less);
    }

    #[test]
    fn leading_zeros_do_not_distinguish() {
        assert_eq!(natural_cmp("1", "01"), Ordering::Equal);
        assert_eq!(natural_cmp("q007", "q7"), Ordering::Equal);
        assert_eq!(natural_cmp("q007", "q8"), Ordering::Less);
        assert_eq!(natural_cmp("0", "000"), Ordering::Equal);
    }

    #[test]
    fn accents_ignored_at_base_level() {
        assert_eq!(natural_cmp("é", "f"), Ordering::Less);
        assert_eq!(natural_cmp("éz", "fa"), Ordering::Less);
        assert_eq!(natural_cmp("Ω10", "Ω9"), Ordering::Greater);
    }

    #[test]
    fn unaccented_before_accented() {
        assert_eq!(natural_cmp("e", "é"), Ordering::Less);
        // Accents outrank case.
        assert_eq!(natural_cmp("E", "é"), Ordering::Less);
        assert_eq!(natural_cmp("é", "É"), Ordering::Less);
    }

    #[test]
    fn composed_and_decomposed_forms_are_equal() {
        assert_eq!(natural_cmp("caf\u{e9}", "cafe\u{301}"), Ordering::Equal);
    }

    #[test]
    fn huge_digit_runs_do_not_overflow() {
        let big = "99999999999999999999999999999999";
        let bigger = "100000000000000000000000000000000";
        assert_eq!(natural_cmp(big, bigger), Ordering::Less);
    }

    #[test]
    fn identical_strings_compare_equal() {
        assert_eq!(natural_cmp("q10", "q10"), Ordering::Equal);
        assert_eq!(natural_cmp("", ""), Ordering::Equal);
    }

    #[test]
    fn sorts_state_names_naturally() {
        assert_eq!(
            sorted(vec!["s10", "s2", "s1", "s20", "s3"]),
            vec!["s1", "s2", "s3", "s10", "s20"]
        );
        assert_eq!(sorted(vec!["f", "E", "é", "e"]), vec!["e", "E", "é", "f"]);
    }
}
