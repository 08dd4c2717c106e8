use clap::CommandFactory;

use super::*;

const ADA_CALLBACK: &str =
    "http://localhost:5173/auth/callback?login=success&token=abc123&userData=%7B%22name%22%3A%22Ada%22%2C%22login%22%3A%22ada%22%7D";

fn context_in(dir: &tempfile::TempDir) -> CliContext {
    CliContext {
        api: ApiClient::new(
            ReqwestTransport::new().unwrap(),
            ClientConfig::from_values(Some("http://127.0.0.1:9/api"), Some("1")),
        ),
        store: SessionStore::rehydrate(FileStorage::new(dir.path().join("session.json"))),
    }
}

fn shop() -> ProjectSummary {
    serde_json::from_value(serde_json::json!({
        "id": "p1",
        "title": "My Shop",
        "description": "Storefront",
        "has_frontend": true,
        "deployment_status": "deployed",
    }))
    .unwrap()
}

// =============================================================
// Argument parsing
// =============================================================

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn upload_parses_kind() {
    let cli = Cli::try_parse_from(["deployhub", "upload", "p1", "site.zip", "--kind", "backend"]).unwrap();
    let Command::Upload { project_id, bundle, kind } = cli.command else {
        panic!("expected upload");
    };
    assert_eq!(project_id, "p1");
    assert_eq!(bundle, PathBuf::from("site.zip"));
    assert_eq!(kind, UploadTarget::Backend);
}

#[test]
fn upload_rejects_unknown_kind() {
    assert!(Cli::try_parse_from(["deployhub", "upload", "p1", "site.zip", "--kind", "database"]).is_err());
}

#[test]
fn verbose_flag_is_short() {
    let cli = Cli::try_parse_from(["deployhub", "-v", "whoami"]).unwrap();
    assert!(cli.verbose);
}

// =============================================================
// Session location
// =============================================================

#[test]
fn explicit_session_path_wins() {
    let path = session_path(Some(PathBuf::from("/tmp/a.json")), Some(PathBuf::from("/home/x/.deployhub/session.json")));
    assert_eq!(path.unwrap(), PathBuf::from("/tmp/a.json"));
}

#[test]
fn blank_session_path_falls_back() {
    let path = session_path(Some(PathBuf::new()), Some(PathBuf::from("/home/x/s.json"))).unwrap();
    assert_eq!(path, PathBuf::from("/home/x/s.json"));
}

#[test]
fn no_session_path_is_an_error() {
    assert!(matches!(session_path(None, None), Err(CliError::NoSessionPath)));
}

// =============================================================
// Sign-in
// =============================================================

#[test]
fn callback_persists_session_for_next_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = context_in(&dir);

    run_callback(&mut ctx, ADA_CALLBACK).unwrap();

    let next = context_in(&dir);
    let session = next.session().unwrap();
    assert_eq!(session.user.display_name(), "Ada");
    assert_eq!(session.token.as_str(), "abc123");
    assert!(run_whoami(&next).is_ok());
}

#[test]
fn failed_callback_stores_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = context_in(&dir);

    let err = run_callback(&mut ctx, "?login=failed").unwrap_err();

    assert!(matches!(err, CliError::Client(ClientError::CallbackDecodeFailure(_))));
    assert!(context_in(&dir).session().is_none());
}

#[test]
fn whoami_without_session_is_unauthenticated() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_whoami(&context_in(&dir)).unwrap_err();
    assert!(matches!(err, CliError::Client(ClientError::Unauthenticated)));
    assert_eq!(err.to_string(), "Please sign in to continue.");
}

#[test]
fn rejected_credential_signs_out() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = context_in(&dir);
    run_callback(&mut ctx, ADA_CALLBACK).unwrap();

    let err = ctx.absorb(ClientError::RemoteRejection { status: 401, message: "Unauthorized".to_owned() });

    assert_eq!(err.to_string(), "Unauthorized");
    assert!(ctx.session().is_none());
    assert!(context_in(&dir).session().is_none());
}

#[test]
fn other_failures_keep_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = context_in(&dir);
    run_callback(&mut ctx, ADA_CALLBACK).unwrap();

    ctx.absorb(ClientError::RemoteRejection { status: 500, message: String::new() });
    ctx.absorb(ClientError::NetworkFailure("offline".to_owned()));

    assert!(ctx.session().is_some());
}

#[tokio::test]
async fn unauthenticated_upload_never_reaches_backend() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("site.zip");
    std::fs::write(&bundle, [0x50, 0x4b, 0x03, 0x04]).unwrap();
    let mut ctx = context_in(&dir);

    let err = run_upload(&mut ctx, "p1", &bundle, UploadTarget::Frontend).await.unwrap_err();

    assert!(matches!(err, CliError::Client(ClientError::Unauthenticated)));
}

#[tokio::test]
async fn upload_rejects_non_zip_before_sending() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("site.tar");
    std::fs::write(&bundle, b"tar").unwrap();
    let mut ctx = context_in(&dir);
    run_callback(&mut ctx, ADA_CALLBACK).unwrap();

    let err = run_upload(&mut ctx, "p1", &bundle, UploadTarget::Frontend).await.unwrap_err();

    assert_eq!(err.to_string(), "site.tar is not a .zip archive");
    assert!(ctx.session().is_some());
}

#[tokio::test]
async fn missing_bundle_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("absent.zip");
    let err = read_bundle(&bundle).await.unwrap_err();
    assert!(err.to_string().contains("absent.zip"));
}

#[tokio::test]
async fn logout_when_signed_out_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = context_in(&dir);
    assert!(run_logout(&mut ctx).await.is_ok());
}

// =============================================================
// Requests and rendering
// =============================================================

#[test]
fn new_project_requires_title() {
    assert!(new_project("   ", "x").is_err());
    let project = new_project("  Shop ", " Storefront ").unwrap();
    assert_eq!(project, NewProject { title: "Shop".to_owned(), description: "Storefront".to_owned() });
}

#[test]
fn repository_request_defaults_to_project_name() {
    let request = repository_request(&shop(), None, false);
    assert_eq!(request.repo_name, "my-shop");
    assert_eq!(request.project_id, "p1");
    assert!(!request.is_private);
}

#[test]
fn repository_request_honours_overrides() {
    let request = repository_request(&shop(), Some(" storefront ".to_owned()), true);
    assert_eq!(request.repo_name, "storefront");
    assert!(request.is_private);

    let request = repository_request(&shop(), Some("  ".to_owned()), false);
    assert_eq!(request.repo_name, "my-shop");
}

#[test]
fn project_line_is_tab_separated() {
    assert_eq!(project_line(&shop()), "p1\tdeployed\tfrontend\tMy Shop");
}

#[test]
fn project_report_lists_files_and_deployments() {
    let detail: ProjectDetail = serde_json::from_value(serde_json::json!({
        "project": {"id": "p1", "title": "My Shop", "has_frontend": true, "has_backend": true},
        "files": [{"id": "f1", "name": "site.zip"}],
        "deployments": [{"id": "d1", "status": "failed"}],
    }))
    .unwrap();

    let report = project_report(&detail);

    assert!(report.starts_with("My Shop (p1)\n"));
    assert!(report.contains("parts:      frontend+backend\n"));
    assert!(report.contains("repository: none\n"));
    assert!(report.contains("file:       site.zip (?)\n"));
    assert!(report.contains("deployment: failed -\n"));
}
