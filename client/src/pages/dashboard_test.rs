use super::*;

fn project(id: &str, status: DeploymentStatus, repo: Option<&str>) -> ProjectSummary {
    ProjectSummary {
        id: id.to_owned(),
        title: format!("Project {id}"),
        description: None,
        has_frontend: false,
        has_backend: false,
        github_repo_url: repo.map(str::to_owned),
        github_repo_name: None,
        deployment_status: status,
        created_at: None,
    }
}

#[test]
fn stats_for_empty_list_are_zero() {
    assert_eq!(DashboardStats::from_projects(&[]), DashboardStats::default());
}

#[test]
fn stats_count_deployed_and_linked_projects() {
    let projects = [
        project("a", DeploymentStatus::Deployed, Some("https://github.com/ada/a")),
        project("b", DeploymentStatus::Pending, None),
        project("c", DeploymentStatus::Deployed, None),
        project("d", DeploymentStatus::Failed, Some("https://github.com/ada/d")),
    ];
    assert_eq!(
        DashboardStats::from_projects(&projects),
        DashboardStats { total: 4, deployed: 2, with_repository: 2 }
    );
}
