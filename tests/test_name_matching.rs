//! Tests for Vietnamese name normalization and comparison.

use vn_kyc_mcp_server::domain::{split_full_name, strip_diacritics, NormalizedName};
use vn_kyc_mcp_server::{names_match, normalize_vn_name};

#[test]
fn test_document_and_typed_names_match() {
    let pairs = [
        ("Nguyễn Văn A", "nguyen van a"),
        ("Đặng Thị B", "dang thi b"),
        ("NGUYỄN VĂN A", "Nguyen Van A"),
        ("Lê  Thị-Hồng", "le thi hong"),
        ("Phạm Minh Châu", "PHAM MINH CHAU"),
        ("Trương Đình Lộc", "truong dinh loc"),
    ];

    for (document, typed) in pairs {
        assert!(names_match(document, typed), "{} vs {}", document, typed);
    }
}

#[test]
fn test_different_people_do_not_match() {
    assert!(!names_match("Tran Thi C", "Tran Thi D"));
    assert!(!names_match("Nguyen Van A", "Nguyen Van"));
    assert!(!names_match("Nguyen Van A", "Van A Nguyen"));
}

#[test]
fn test_normalize_is_idempotent() {
    let inputs = [
        "Nguyễn Văn A",
        "  ĐỖ   Thị\tNgọc  ",
        "O'Brien-Smith",
        "Hồ Chí Minh 123",
        "",
        "ǅ Ĳ ß",
    ];

    for input in inputs {
        let once = normalize_vn_name(input);
        assert_eq!(normalize_vn_name(&once), once, "input {:?}", input);
    }
}

#[test]
fn test_normalized_form_shape() {
    for input in ["Nguyễn Văn A", "  Bùi--Xuân  Huấn ", "Đoàn.Thị.Điểm"] {
        let normalized = normalize_vn_name(input);
        assert!(!normalized.starts_with(' ') && !normalized.ends_with(' '));
        assert!(!normalized.contains("  "));
        assert!(normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == ' '));
    }
}

#[test]
fn test_strip_diacritics_keeps_punctuation() {
    assert_eq!(strip_diacritics("Đoàn.Thị.Điểm"), "Doan.Thi.Diem");
}

#[test]
fn test_blank_names_normalize_to_empty() {
    assert!(NormalizedName::new("  ").is_empty());
    assert!(NormalizedName::new("123 - 456").is_empty());
    assert!(names_match("", "   "));
}

#[test]
fn test_split_full_name_keeps_diacritics() {
    let (first, rest) = split_full_name("Nguyễn Thị Minh Khai");
    assert_eq!(first.as_deref(), Some("Nguyễn"));
    assert_eq!(rest.as_deref(), Some("Thị Minh Khai"));
}
