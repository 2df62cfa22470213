use crate::{UserProfile, display_name, needs_username, validate_username};

fn user(username: Option<&str>, name: &str) -> UserProfile {
    UserProfile {
        username: username.map(String::from),
        display_name: name.to_string(),
        ..UserProfile::default()
    }
}

#[test]
fn test_needs_username_only_for_generated_wallet_names() {
    assert!(needs_username(Some(&user(Some("wallet_0xabc"), ""))));
    assert!(needs_username(Some(&user(None, "wallet_0xabc"))));
    assert!(needs_username(Some(&user(Some(""), "wallet_0xabc"))));
    assert!(!needs_username(Some(&user(Some("ada"), "wallet_0xabc"))));
    assert!(!needs_username(Some(&user(None, "Ada"))));
    assert!(!needs_username(Some(&user(None, ""))));
    assert!(!needs_username(None));
}

#[test]
fn test_display_name_prefers_username() {
    assert_eq!(display_name(Some(&user(Some("ada"), "Ada Lovelace"))), "ada");
    assert_eq!(display_name(Some(&user(None, "Ada Lovelace"))), "Ada Lovelace");
    assert_eq!(display_name(Some(&user(None, ""))), "User");
    assert_eq!(display_name(None), "User");
}

#[test]
fn test_display_name_shortens_wallet_username() {
    let profile = user(Some("wallet_0xabc123def4567890"), "");
    assert_eq!(display_name(Some(&profile)), "0xabc123...7890");
}

#[test]
fn test_validate_username_trims_and_accepts() {
    assert_eq!(validate_username("  ada_99 ").unwrap(), "ada_99");
    assert_eq!(validate_username("abc").unwrap(), "abc");
    assert!(validate_username(&"a".repeat(30)).is_ok());
}

#[test]
fn test_validate_username_rejects_bad_input() {
    assert!(validate_username("ab").is_err());
    assert!(validate_username(&"a".repeat(31)).is_err());
    assert!(validate_username("ada lovelace").is_err());
    assert!(validate_username("ada-l").is_err());
    assert!(validate_username("àda").is_err());
}
