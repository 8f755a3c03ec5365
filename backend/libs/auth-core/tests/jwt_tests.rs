/// Token round-trip tests for auth-core
///
/// Covers generation and validation of access and refresh tokens, token
/// type enforcement, and tamper rejection.
use auth_core::jwt::{
    generate_access_token, generate_refresh_token, generate_token_pair, initialize_keys,
    validate_access_token, validate_refresh_token,
};
use auth_core::AuthError;
use std::sync::Once;
use uuid::Uuid;

fn init_test_keys() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        initialize_keys("test-access-secret", "test-refresh-secret")
            .expect("failed to initialize test keys");
    });
}

#[test]
fn access_token_round_trip() {
    init_test_keys();

    let user_id = Uuid::new_v4();
    let token = generate_access_token(user_id, "test@example.com", "testuser")
        .expect("should generate access token");
    assert_eq!(token.matches('.').count(), 2, "should be a three-part JWT");

    let claims = validate_access_token(&token).expect("should validate");
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "test@example.com");
    assert_eq!(claims.username, "testuser");
    assert_eq!(claims.token_type, "access");
    assert!(claims.exp > claims.iat);
}

#[test]
fn refresh_token_round_trip() {
    init_test_keys();

    let user_id = Uuid::new_v4();
    let token = generate_refresh_token(user_id).expect("should generate refresh token");

    let claims = validate_refresh_token(&token).expect("should validate");
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.token_type, "refresh");
    assert!(claims.email.is_empty());
}

#[test]
fn refresh_token_rejected_as_access_token() {
    init_test_keys();

    let token = generate_refresh_token(Uuid::new_v4()).expect("should generate refresh token");
    let result = validate_access_token(&token);

    // Signed with a different secret, so it fails signature validation
    // before the token_type check is even reached.
    assert!(result.is_err());
}

#[test]
fn access_token_rejected_as_refresh_token() {
    init_test_keys();

    let token = generate_access_token(Uuid::new_v4(), "a@b.c", "user")
        .expect("should generate access token");
    assert!(validate_refresh_token(&token).is_err());
}

#[test]
fn tampered_token_rejected() {
    init_test_keys();

    let token = generate_access_token(Uuid::new_v4(), "a@b.c", "user")
        .expect("should generate access token");
    let mut tampered = token.clone();
    tampered.pop();
    tampered.push(if token.ends_with('A') { 'B' } else { 'A' });

    assert!(matches!(
        validate_access_token(&tampered),
        Err(AuthError::InvalidToken(_))
    ));
}

#[test]
fn garbage_token_rejected() {
    init_test_keys();
    assert!(validate_access_token("not-a-jwt").is_err());
}

#[test]
fn token_pair_contains_both_kinds() {
    init_test_keys();

    let user_id = Uuid::new_v4();
    let pair =
        generate_token_pair(user_id, "test@example.com", "testuser").expect("should generate pair");

    assert!(validate_access_token(&pair.access_token).is_ok());
    assert!(validate_refresh_token(&pair.refresh_token).is_ok());
}
