use super::*;

#[test]
fn normalize_trims_whitespace() {
    assert_eq!(normalize_name("  Rust "), Some("Rust".to_owned()));
}

#[test]
fn normalize_keeps_inner_spaces() {
    assert_eq!(normalize_name("Spring Boot"), Some("Spring Boot".to_owned()));
}

#[test]
fn normalize_rejects_empty() {
    assert_eq!(normalize_name(""), None);
    assert_eq!(normalize_name("   "), None);
}

#[test]
fn technology_row_serializes() {
    let row = TechnologyRow { id: 7, name: "PostgreSQL".into() };
    let json = serde_json::to_value(&row).unwrap();
    assert_eq!(json.get("id").and_then(serde_json::Value::as_i64), Some(7));
    assert_eq!(json.get("name").and_then(serde_json::Value::as_str), Some("PostgreSQL"));
}
