//! Natural alphabetic ordering for roll numbers.
//!
//! Approximates the default locale collation used by browsers:
//! - primary: case-folded characters, with whitespace < punctuation/symbols <
//!   digits < letters;
//! - tertiary: lowercase sorts before uppercase at the first case difference;
//! - last resort: raw code point order, so distinct strings never compare equal.

use std::cmp::Ordering;

/// Compares two strings in natural alphabetic order.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    primary_keys(a)
        .cmp(primary_keys(b))
        .then_with(|| case_keys(a).cmp(case_keys(b)))
        .then_with(|| a.cmp(b))
}

fn primary_keys(value: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
}

fn case_keys(value: &str) -> impl Iterator<Item = bool> + '_ {
    value.chars().map(char::is_uppercase)
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}
