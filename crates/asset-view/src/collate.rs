//! Collation-aware string ordering
//!
//! Orders strings the way a root-locale collator does rather than by raw
//! code points. Strings are compared in three passes over their NFD form:
//!
//! 1. base characters: letters compare case-insensitively with accents
//!    stripped, punctuation sorts before digits and digits before letters
//! 2. accents: an unaccented letter sorts before its accented forms
//! 3. case: lowercase first
//!
//! Raw order breaks any remaining tie.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
struct SortKey {
    primary: Vec<(u8, char)>,
    secondary: Vec<String>,
    tertiary: Vec<u8>,
}

fn class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

fn sort_key(s: &str) -> SortKey {
    let mut key = SortKey::default();
    for c in s.nfd() {
        if is_combining_mark(c) {
            if let Some(marks) = key.secondary.last_mut() {
                marks.push(c);
                continue;
            }
        }
        key.primary
            .push((class(c), c.to_lowercase().next().unwrap_or(c)));
        key.secondary.push(String::new());
        key.tertiary.push(u8::from(c.is_uppercase()));
    }
    key
}

/// Compare two strings with collation rules
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

/// Sort in place with [`compare`]
pub fn sort<S: AsRef<str>>(items: &mut [S]) {
    items.sort_by_cached_key(|item| {
        let s = item.as_ref();
        (sort_key(s), s.to_string())
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn case_is_secondary_to_letters() {
        // Byte order would put "Zeta" before "alpha".
        let mut keys = vec!["Zeta", "alpha", "IO_manager", "beta"];
        sort(&mut keys);
        assert_eq!(keys, vec!["alpha", "beta", "IO_manager", "Zeta"]);
    }

    #[test]
    fn lowercase_breaks_ties_first() {
        assert_eq!(compare("db", "DB"), Ordering::Less);
        assert_eq!(compare("DB", "db"), Ordering::Greater);
        assert_eq!(compare("db", "db"), Ordering::Equal);
    }

    #[test]
    fn punctuation_then_digits_then_letters() {
        let mut keys = vec!["a", "1", "_"];
        sort(&mut keys);
        assert_eq!(keys, vec!["_", "1", "a"]);
    }

    #[test]
    fn accents_sort_after_their_base_letter() {
        // Code point order would put "éclair" after "ezra".
        let mut keys = vec!["ezra", "éclair", "eclair"];
        sort(&mut keys);
        assert_eq!(keys, vec!["eclair", "éclair", "ezra"]);
    }

    #[test]
    fn accent_outranks_case() {
        assert_eq!(compare("Eclair", "éclair"), Ordering::Less);
        assert_eq!(compare("Résumé", "resume"), Ordering::Greater);
        assert_eq!(compare("été", "ete"), Ordering::Greater);
    }

    #[test]
    fn composed_and_decomposed_forms_share_a_position() {
        let mut keys = vec!["ezra", "e\u{301}clair", "eclair", "\u{e9}clair"];
        sort(&mut keys);
        assert_eq!(&keys[..1], &["eclair"]);
        assert_eq!(keys[3], "ezra");
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(compare("io", "io_manager"), Ordering::Less);
    }

    proptest! {
        #[test]
        fn prop_compare_is_antisymmetric(a in "[a-zA-Z0-9_]{0,8}", b in "[a-zA-Z0-9_]{0,8}") {
            prop_assert_eq!(compare(&a, &b), compare(&b, &a).reverse());
        }

        #[test]
        fn prop_equal_only_when_identical(a in "[a-zA-Z_]{0,8}", b in "[a-zA-Z_]{0,8}") {
            prop_assert_eq!(compare(&a, &b) == Ordering::Equal, a == b);
        }
    }
}
