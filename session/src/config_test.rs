use super::*;

#[test]
fn defaults_to_same_origin_api_and_thirty_seconds() {
    let cfg = ClientConfig::from_values(None, None);
    assert_eq!(cfg.backend_base, "/api");
    assert_eq!(cfg.request_timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
}

#[test]
fn trims_trailing_slashes_from_backend() {
    let cfg = ClientConfig::from_values(Some("https://api.deployhub.test/"), None);
    assert_eq!(cfg.backend_base, "https://api.deployhub.test");
}

#[test]
fn blank_backend_falls_back_to_default() {
    let cfg = ClientConfig::from_values(Some("   "), None);
    assert_eq!(cfg.backend_base, DEFAULT_BACKEND_BASE);
}

#[test]
fn parses_timeout_override() {
    let cfg = ClientConfig::from_values(None, Some(" 12 "));
    assert_eq!(cfg.request_timeout, Duration::from_secs(12));
}

#[test]
fn rejects_zero_and_garbage_timeouts() {
    assert_eq!(ClientConfig::from_values(None, Some("0")).request_timeout, Duration::from_secs(30));
    assert_eq!(ClientConfig::from_values(None, Some("soon")).request_timeout, Duration::from_secs(30));
}

#[test]
fn endpoint_joins_with_single_slash() {
    let cfg = ClientConfig::from_values(Some("http://localhost:5000/api/"), None);
    assert_eq!(cfg.endpoint("/projects"), "http://localhost:5000/api/projects");
    assert_eq!(cfg.endpoint("auth/github"), "http://localhost:5000/api/auth/github");
}

#[test]
fn redirect_delays_match_confirmation_screens() {
    assert_eq!(SUCCESS_REDIRECT_DELAY, Duration::from_millis(1500));
    assert_eq!(FAILURE_REDIRECT_DELAY, Duration::from_millis(2000));
}
