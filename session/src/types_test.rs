use super::*;

// =============================================================
// UserProfile
// =============================================================

#[test]
fn user_profile_keeps_unknown_fields() {
    let raw = serde_json::json!({"name": "Ada", "id": 42, "html_url": "https://github.com/ada"});
    let profile: UserProfile = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(profile.name.as_deref(), Some("Ada"));
    assert_eq!(profile.extra.get("id"), Some(&serde_json::json!(42)));
    assert_eq!(serde_json::to_value(&profile).unwrap(), raw);
}

#[test]
fn user_profile_rejects_non_objects() {
    assert!(serde_json::from_str::<UserProfile>("\"Ada\"").is_err());
    assert!(serde_json::from_str::<UserProfile>("[1, 2]").is_err());
}

#[test]
fn display_name_prefers_name_then_login() {
    let mut profile = UserProfile { login: Some("ada".into()), ..UserProfile::default() };
    assert_eq!(profile.display_name(), "ada");
    profile.name = Some("Ada Lovelace".into());
    assert_eq!(profile.display_name(), "Ada Lovelace");
    assert_eq!(UserProfile::default().display_name(), "Unknown user");
}

// =============================================================
// Token
// =============================================================

#[test]
fn token_rejects_blank_credentials() {
    assert!(Token::new("").is_none());
    assert!(Token::new("   ").is_none());
    assert!(Token::new("abc123").is_some());
}

#[test]
fn token_formats_bearer_header() {
    let token = Token::new("abc123").unwrap();
    assert_eq!(token.bearer(), "Bearer abc123");
}

#[test]
fn token_debug_is_redacted() {
    let token = Token::new("super-secret").unwrap();
    assert_eq!(format!("{token:?}"), "Token(***)");
}

// =============================================================
// Projects
// =============================================================

#[test]
fn project_summary_tolerates_sparse_rows() {
    let raw = serde_json::json!({"id": "p1", "title": "Shop"});
    let project: ProjectSummary = serde_json::from_value(raw).unwrap();
    assert!(!project.has_frontend);
    assert_eq!(project.deployment_status, DeploymentStatus::Pending);
}

#[test]
fn unknown_deployment_status_maps_to_unknown() {
    let status: DeploymentStatus = serde_json::from_str("\"archived\"").unwrap();
    assert_eq!(status, DeploymentStatus::Unknown);
    let status: DeploymentStatus = serde_json::from_str("\"deployed\"").unwrap();
    assert_eq!(status.as_str(), "deployed");
}

#[test]
fn project_detail_parses_files_and_deployments() {
    let raw = serde_json::json!({
        "project": {"id": "p1", "title": "Shop", "deployment_status": "deploying"},
        "files": [{"id": "f1", "file_name": "site.zip", "file_size": 2048, "is_frontend": true}],
        "deployments": [{"id": "d1", "provider": "vercel", "status": "failed"}]
    });
    let detail: ProjectDetail = serde_json::from_value(raw).unwrap();
    assert_eq!(detail.files[0].name, "site.zip");
    assert!(detail.files[0].is_frontend);
    assert_eq!(detail.deployments[0].status, DeploymentStatus::Failed);
}

#[test]
fn repository_name_replaces_disallowed_characters() {
    assert_eq!(repository_name("My Shop v2!"), "my-shop-v2-");
    assert_eq!(repository_name("already-fine-1"), "already-fine-1");
}

#[test]
fn create_repository_serializes_camel_case() {
    let project = ProjectSummary {
        id: "p1".into(),
        title: "My Shop".into(),
        description: Some("storefront".into()),
        has_frontend: true,
        has_backend: false,
        github_repo_url: None,
        github_repo_name: None,
        deployment_status: DeploymentStatus::Pending,
        created_at: None,
    };
    let body = serde_json::to_value(CreateRepository::for_project(&project)).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "projectId": "p1",
            "repoName": "my-shop",
            "description": "storefront",
            "isPrivate": false
        })
    );
}
