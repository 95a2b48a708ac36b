use super::*;

// =============================================================================
// bytes_to_hex
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_pads_low_bytes() {
    assert_eq!(bytes_to_hex(&[0x0a, 0x00]), "0a00");
}

#[test]
fn bytes_to_hex_multi_byte() {
    assert_eq!(bytes_to_hex(&[0xca, 0xfe, 0xba, 0xbe]), "cafebabe");
}

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// SessionUser
// =============================================================================

#[test]
fn session_user_serializes_all_fields() {
    let user = SessionUser {
        id: Uuid::nil(),
        email: "dev@example.com".into(),
        name: "Dev".into(),
        avatar_url: None,
    };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json.get("email").and_then(|v| v.as_str()), Some("dev@example.com"));
    assert_eq!(json.get("name").and_then(|v| v.as_str()), Some("Dev"));
    assert!(json.get("avatar_url").unwrap().is_null());
}
