use std::cell::Cell;
use std::future::{Future, ready};

use futures::executor::block_on;

use super::*;
use crate::config::ClientConfig;
use crate::storage::{MemoryStorage, TOKEN_KEY};
use crate::transport::{ApiRequest, ApiResponse};

const ADA_QUERY: &str = "?login=success&token=abc123&userData=%7B%22name%22%3A%22Ada%22%7D";

fn ada() -> Session {
    Session {
        user: UserProfile { name: Some("Ada".into()), ..UserProfile::default() },
        token: Token::new("abc123").unwrap(),
    }
}

struct OneShot {
    reply: Cell<Option<Result<ApiResponse, ClientError>>>,
}

impl Transport for OneShot {
    fn send(&self, _request: ApiRequest) -> impl Future<Output = Result<ApiResponse, ClientError>> {
        ready(
            self.reply
                .take()
                .unwrap_or_else(|| Err(ClientError::NetworkFailure("exhausted".into()))),
        )
    }
}

fn api(reply: Result<ApiResponse, ClientError>) -> ApiClient<OneShot> {
    ApiClient::new(OneShot { reply: Cell::new(Some(reply)) }, ClientConfig::from_values(Some("/api"), None))
}

// =============================================================
// CallbackParams
// =============================================================

#[test]
fn parses_and_decodes_callback_query() {
    let params = CallbackParams::from_query(ADA_QUERY);
    assert_eq!(params.login.as_deref(), Some("success"));
    assert_eq!(params.token.as_deref(), Some("abc123"));
    assert_eq!(params.user_data.as_deref(), Some(r#"{"name":"Ada"}"#));
}

#[test]
fn accepts_full_callback_url_and_ignores_fragment() {
    let params = CallbackParams::from_query("https://app.test/auth/callback?login=failed&extra=1#top");
    assert_eq!(params.login.as_deref(), Some("failed"));
    assert_eq!(params.token, None);
}

#[test]
fn first_occurrence_wins() {
    let params = CallbackParams::from_query("login=success&login=failed");
    assert_eq!(params.login.as_deref(), Some("success"));
}

#[test]
fn plus_decodes_to_space() {
    let params = CallbackParams::from_query("userData=%7B%22name%22%3A%22Ada+L%22%7D");
    assert_eq!(params.user_data.as_deref(), Some(r#"{"name":"Ada L"}"#));
}

// =============================================================
// decode_callback
// =============================================================

#[test]
fn decodes_success_payload() {
    let session = decode_callback(&CallbackParams::from_query(ADA_QUERY)).unwrap();
    assert_eq!(session, ada());
}

#[test]
fn decodes_double_encoded_user_data() {
    let params = CallbackParams {
        login: Some("success".into()),
        token: Some("abc123".into()),
        user_data: Some("%7B%22name%22%3A%22Ada%22%7D".into()),
    };
    assert_eq!(decode_callback(&params).unwrap(), ada());
}

#[test]
fn missing_success_indicator_fails() {
    let params = CallbackParams { login: None, ..CallbackParams::from_query(ADA_QUERY) };
    assert!(matches!(decode_callback(&params), Err(ClientError::CallbackDecodeFailure(_))));
}

#[test]
fn missing_token_fails() {
    let params = CallbackParams::from_query("login=success&userData=%7B%7D");
    assert_eq!(
        decode_callback(&params),
        Err(ClientError::CallbackDecodeFailure("missing token".into()))
    );
}

#[test]
fn malformed_identity_fails_without_panicking() {
    for user_data in ["{not json", "\"Ada\"", "[1,2]", "%ZZ"] {
        let params = CallbackParams {
            login: Some("success".into()),
            token: Some("abc123".into()),
            user_data: Some(user_data.into()),
        };
        assert!(
            matches!(decode_callback(&params), Err(ClientError::CallbackDecodeFailure(_))),
            "{user_data} should fail"
        );
    }
}

// =============================================================
// handle_callback
// =============================================================

#[test]
fn success_sets_store_and_survives_reload() {
    let storage = MemoryStorage::new();
    let mut store = SessionStore::rehydrate(storage.clone());
    let mut flow = OAuthFlow::awaiting_callback();

    let outcome = flow.handle_callback(&mut store, &CallbackParams::from_query(ADA_QUERY));

    assert_eq!(outcome, CallbackOutcome::Success(ada()));
    assert_eq!(store.get(), Some(&ada()));
    assert_eq!(SessionStore::rehydrate(storage).get(), Some(&ada()));
    assert!(matches!(flow.phase(), OAuthPhase::Resolved(CallbackOutcome::Success(_))));
}

#[test]
fn success_redirects_to_dashboard_after_short_pause() {
    let mut store = SessionStore::rehydrate(MemoryStorage::new());
    let outcome = OAuthFlow::awaiting_callback().handle_callback(&mut store, &CallbackParams::from_query(ADA_QUERY));
    assert_eq!(
        outcome.redirect(),
        PendingRedirect { path: "/dashboard", delay: Duration::from_millis(1500) }
    );
}

#[test]
fn failed_login_leaves_store_untouched() {
    let storage = MemoryStorage::new();
    let mut store = SessionStore::rehydrate(storage.clone());
    let mut flow = OAuthFlow::awaiting_callback();

    let outcome = flow.handle_callback(&mut store, &CallbackParams::from_query("?login=failed"));

    assert!(!outcome.is_success());
    assert_eq!(
        outcome.redirect(),
        PendingRedirect { path: "/login", delay: Duration::from_millis(2000) }
    );
    assert!(store.get().is_none());
    assert!(storage.is_empty());
}

#[test]
fn failure_does_not_clobber_existing_session() {
    let storage = MemoryStorage::new();
    let mut store = SessionStore::rehydrate(storage.clone());
    store.set(ada()).unwrap();

    OAuthFlow::awaiting_callback().handle_callback(&mut store, &CallbackParams::from_query("login=failed"));

    assert_eq!(store.get(), Some(&ada()));
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("abc123"));
}

#[test]
fn resolved_flow_ignores_repeat_callbacks() {
    let mut store = SessionStore::rehydrate(MemoryStorage::new());
    let mut flow = OAuthFlow::awaiting_callback();
    let first = flow.handle_callback(&mut store, &CallbackParams::from_query("login=failed"));

    let second = flow.handle_callback(&mut store, &CallbackParams::from_query(ADA_QUERY));

    assert_eq!(first, second);
    assert!(store.get().is_none());
}

// =============================================================
// begin_login
// =============================================================

#[test]
fn begin_login_returns_backend_target_and_awaits_callback() {
    let api = api(Ok(ApiResponse { status: 200, body: r#"{"redirectUrl":"https://github.com/login"}"#.into() }));
    let mut flow = OAuthFlow::new();

    let target = block_on(flow.begin_login(&api));

    assert_eq!(target.as_deref(), Some("https://github.com/login"));
    assert_eq!(flow.phase(), &OAuthPhase::AwaitingCallback);
}

#[test]
fn begin_login_network_failure_is_silent_and_resets() {
    let api = api(Err(ClientError::NetworkFailure("offline".into())));
    let mut flow = OAuthFlow::new();

    assert_eq!(block_on(flow.begin_login(&api)), None);
    assert_eq!(flow.phase(), &OAuthPhase::Idle);
}
