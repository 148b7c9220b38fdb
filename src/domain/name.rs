//! Vietnamese name normalization and comparison.
//!
//! Names typed by customers and names printed on identity documents differ in
//! case, diacritics, spacing and punctuation ("NGUYỄN VĂN A" vs "Nguyen Van A").
//! Comparison reduces both sides to a [`NormalizedName`] and checks equality.
//! There is no fuzzy matching: "Tran Thi C" and "Tran Thi D" never match.

use serde::Serialize;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// A name reduced to lowercase ASCII letters separated by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedName(String);

impl NormalizedName {
    /// Normalize a raw name.
    pub fn new(raw: &str) -> Self {
        Self(normalize_vn_name(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remove Vietnamese diacritics, keeping case and punctuation.
///
/// `đ`/`Đ` have no decomposition, so they are substituted explicitly before
/// NFD splits the remaining letters from their combining marks.
pub fn strip_diacritics(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    input
        .replace('đ', "d")
        .replace('Đ', "D")
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect()
}

/// Reduce a name to its comparison form.
///
/// ```
/// use vn_kyc_mcp_server::domain::normalize_vn_name;
///
/// assert_eq!(normalize_vn_name("  Nguyễn   Văn-A "), "nguyen van a");
/// ```
pub fn normalize_vn_name(input: &str) -> String {
    let lowered = strip_diacritics(input).to_lowercase();

    let replaced: String = lowered
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether two names are the same person's name once normalized.
pub fn names_match(a: &str, b: &str) -> bool {
    normalize_vn_name(a) == normalize_vn_name(b)
}

/// Split a full name into its first token and the rest.
///
/// Returns `None` for the first token when the name is blank, and `None` for
/// the rest when there is only one token.
pub fn split_full_name(full_name: &str) -> (Option<String>, Option<String>) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().map(str::to_string);
    let rest = parts.collect::<Vec<_>>().join(" ");
    let rest = if rest.is_empty() { None } else { Some(rest) };
    (first, rest)
}

// Combining Diacritical Marks block
fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_diacritics_keeps_case() {
        assert_eq!(strip_diacritics("Nguyễn Văn Á"), "Nguyen Van A");
        assert_eq!(strip_diacritics("Đặng Thị Bích"), "Dang Thi Bich");
        assert_eq!(strip_diacritics(""), "");
    }

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize_vn_name("Nguyễn Văn A"), "nguyen van a");
        assert_eq!(normalize_vn_name("NGUYỄN VĂN A"), "nguyen van a");
        assert_eq!(normalize_vn_name("đỗ   ĐỨC\tmạnh"), "do duc manh");
    }

    #[test]
    fn test_normalize_punctuation_and_digits_become_spaces() {
        assert_eq!(normalize_vn_name("Lê-Thị, Hồng."), "le thi hong");
        assert_eq!(normalize_vn_name("Tran2Van"), "tran van");
        assert_eq!(normalize_vn_name("!!!"), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        for raw in ["Nguyễn Văn A", "  Ông  Bà  ", "Đặng-Thị_B", "", "Ữ ự ừ"] {
            let once = normalize_vn_name(raw);
            assert_eq!(normalize_vn_name(&once), once);
        }
    }

    #[test]
    fn test_names_match() {
        assert!(names_match("Nguyễn Văn A", "nguyen van a"));
        assert!(names_match("Đặng Thị B", "dang thi b"));
        assert!(names_match("  TRẦN   thị c ", "Tran Thi C"));
        assert!(!names_match("Tran Thi C", "Tran Thi D"));
        assert!(!names_match("Nguyen Van", "Nguyen Van A"));
    }

    #[test]
    fn test_normalized_name_wrapper() {
        let name = NormalizedName::new("Phạm Minh Châu");
        assert_eq!(name.as_str(), "pham minh chau");
        assert_eq!(name, NormalizedName::new("PHAM MINH CHAU"));
        assert!(NormalizedName::new(" - ").is_empty());
    }

    #[test]
    fn test_split_full_name() {
        assert_eq!(
            split_full_name("  Nguyễn  Văn   A "),
            (Some("Nguyễn".to_string()), Some("Văn A".to_string()))
        );
        assert_eq!(split_full_name("Minh"), (Some("Minh".to_string()), None));
        assert_eq!(split_full_name("   "), (None, None));
    }
}
