use super::*;

// =============================================================================
// env_bool — keys are unique per test so parallel runs don't race.
// Env mutation requires unsafe in edition 2024.
// =============================================================================

#[test]
fn env_bool_unset_is_none() {
    assert_eq!(env_bool("CVMAKER_TEST_BOOL_UNSET"), None);
}

#[test]
fn env_bool_truthy_values() {
    for (i, raw) in ["1", "true", "YES", " on "].iter().enumerate() {
        let key = format!("CVMAKER_TEST_BOOL_TRUE_{i}");
        unsafe { std::env::set_var(&key, raw) };
        assert_eq!(env_bool(&key), Some(true), "{raw}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_falsy_values() {
    for (i, raw) in ["0", "false", "No", "off"].iter().enumerate() {
        let key = format!("CVMAKER_TEST_BOOL_FALSE_{i}");
        unsafe { std::env::set_var(&key, raw) };
        assert_eq!(env_bool(&key), Some(false), "{raw}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_garbage_is_none() {
    unsafe { std::env::set_var("CVMAKER_TEST_BOOL_GARBAGE", "maybe") };
    assert_eq!(env_bool("CVMAKER_TEST_BOOL_GARBAGE"), None);
    unsafe { std::env::remove_var("CVMAKER_TEST_BOOL_GARBAGE") };
}
