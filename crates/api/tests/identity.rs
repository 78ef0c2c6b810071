//! Tests for RS256 verification against a mocked JWK endpoint.

use std::time::Duration;

use assert_matches::assert_matches;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yakbot_api::auth::token::{
    ExpectedClaims, FirebaseVerifier, IdentityClaims, TokenError, TokenVerifier,
};

const PROJECT: &str = "yakbot-identity-test";
const PRIVATE_KEY: &[u8] = include_bytes!("fixtures/test_rsa.pem");
const JWKS: &str = include_str!("fixtures/test_jwks.json");

fn sign(kid: &str, sub: &str, lifetime: chrono::Duration) -> String {
    let expected = ExpectedClaims::for_project(PROJECT);
    let now = chrono::Utc::now();
    let claims = IdentityClaims {
        sub: sub.to_string(),
        aud: expected.audience,
        iss: expected.issuer,
        exp: (now + lifetime).timestamp(),
        iat: now.timestamp(),
    };
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    encode(
        &header,
        &claims,
        &EncodingKey::from_rsa_pem(PRIVATE_KEY).unwrap(),
    )
    .unwrap()
}

async fn jwks_server(expected_fetches: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jwks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(JWKS.as_bytes(), "application/json"),
        )
        .expect(expected_fetches)
        .mount(&server)
        .await;
    server
}

fn verifier(server: &MockServer) -> FirebaseVerifier {
    FirebaseVerifier::new(
        reqwest::Client::new(),
        format!("{}/jwks", server.uri()),
        ExpectedClaims::for_project(PROJECT),
        Duration::from_secs(3600),
    )
}

#[tokio::test]
async fn valid_token_yields_subject_and_keys_are_cached() {
    let server = jwks_server(1).await;
    let verifier = verifier(&server);

    for _ in 0..3 {
        let token = sign("test-key-1", "firebase-uid", chrono::Duration::minutes(5));
        let identity = verifier.verify(&token).await.unwrap();
        assert_eq!(identity.subject, "firebase-uid");
    }
}

#[tokio::test]
async fn unknown_key_id_is_rejected() {
    let server = jwks_server(1).await;
    let verifier = verifier(&server);

    let token = sign("rotated-away", "firebase-uid", chrono::Duration::minutes(5));

    assert_matches!(
        verifier.verify(&token).await,
        Err(TokenError::UnknownKey(kid)) if kid == "rotated-away"
    );
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let server = jwks_server(1).await;
    let verifier = verifier(&server);

    let token = sign("test-key-1", "firebase-uid", chrono::Duration::minutes(-10));

    assert_matches!(verifier.verify(&token).await, Err(TokenError::Invalid(_)));
}

#[tokio::test]
async fn unreachable_key_endpoint_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jwks"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let verifier = verifier(&server);

    let token = sign("test-key-1", "firebase-uid", chrono::Duration::minutes(5));

    assert_matches!(verifier.verify(&token).await, Err(TokenError::KeyFetch(_)));
}
