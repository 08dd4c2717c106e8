//! `deployhub`: terminal client for the DeployHub backend.
//!
//! Signs in through the same GitHub OAuth callback the dashboard uses (paste
//! the address the browser lands on), keeps the session in a JSON file, and
//! drives the project, upload and repository endpoints with it.

mod file_storage;
mod transport;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use session::types::{CreateRepository, NewProject, ProjectDetail, ProjectSummary};
use session::upload::format_file_size;
use session::{
    ApiClient, CallbackOutcome, CallbackParams, ClientConfig, ClientError, OAuthFlow, SelectedFile, Session,
    SessionStore, UploadSelection, UploadTarget,
};
use tracing::{info, warn};

use crate::file_storage::FileStorage;
use crate::transport::ReqwestTransport;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}", .0.user_message())]
    Client(#[from] ClientError),
    #[error("no session file location; pass --session-file or set DEPLOYHUB_SESSION_FILE")]
    NoSessionPath,
    #[error("could not obtain a sign-in address from the backend")]
    LoginUnavailable,
    #[error("failed to read {path}: {source}")]
    ReadBundle { path: String, source: std::io::Error },
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "deployhub", about = "DeployHub projects, uploads and repositories from the terminal")]
struct Cli {
    #[arg(long, env = "DEPLOYHUB_BACKEND_URL", default_value = "http://127.0.0.1:3000/api")]
    base_url: String,

    #[arg(long, env = "DEPLOYHUB_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[arg(long, env = "DEPLOYHUB_REQUEST_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Log requests and session changes.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the address that starts GitHub sign-in.
    Login,
    /// Finish sign-in with the callback address (or just its query string).
    Callback { url: String },
    /// Show the signed-in user.
    Whoami,
    /// Sign out and forget the stored session.
    Logout,
    Projects(ProjectsCommand),
    /// Upload a zipped bundle into a project.
    Upload {
        project_id: String,
        bundle: PathBuf,
        #[arg(long, default_value = "frontend")]
        kind: UploadTarget,
    },
    Repo(RepoCommand),
}

#[derive(Args, Debug)]
struct ProjectsCommand {
    #[command(subcommand)]
    command: ProjectsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProjectsSubcommand {
    List {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    Show {
        project_id: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Args, Debug)]
struct RepoCommand {
    #[command(subcommand)]
    command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
enum RepoSubcommand {
    /// Create the GitHub repository for a project.
    Create {
        project_id: String,
        /// Defaults to the project title, lowercased and dashed.
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value_t = false)]
        private: bool,
    },
}

struct CliContext {
    api: ApiClient<ReqwestTransport>,
    store: SessionStore<FileStorage>,
}

impl CliContext {
    fn session(&self) -> Option<&Session> {
        self.store.get()
    }

    /// Convert a backend failure, dropping the stored session when the
    /// credential was refused.
    fn absorb(&mut self, err: ClientError) -> CliError {
        if err.is_credential_rejected() {
            warn!("stored credential was rejected; signing out");
            self.store.clear();
        }
        CliError::Client(err)
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let session_path = session_path(cli.session_file.clone(), FileStorage::default_path())?;
    let timeout = cli.timeout_secs.map(|secs| secs.to_string());
    let config = ClientConfig::from_values(Some(&cli.base_url), timeout.as_deref());
    info!(backend = %config.backend_base, session = %session_path.display(), "starting");

    let mut ctx = CliContext {
        api: ApiClient::new(ReqwestTransport::new()?, config),
        store: SessionStore::rehydrate(FileStorage::new(session_path)),
    };

    match cli.command {
        Command::Login => run_login(&ctx).await,
        Command::Callback { url } => run_callback(&mut ctx, &url),
        Command::Whoami => run_whoami(&ctx),
        Command::Logout => run_logout(&mut ctx).await,
        Command::Projects(projects) => run_projects(&mut ctx, projects).await,
        Command::Upload { project_id, bundle, kind } => run_upload(&mut ctx, &project_id, &bundle, kind).await,
        Command::Repo(repo) => run_repo(&mut ctx, repo).await,
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn session_path(explicit: Option<PathBuf>, fallback: Option<PathBuf>) -> Result<PathBuf, CliError> {
    explicit
        .filter(|path| !path.as_os_str().is_empty())
        .or(fallback)
        .ok_or(CliError::NoSessionPath)
}

async fn run_login(ctx: &CliContext) -> Result<(), CliError> {
    if let Some(session) = ctx.session() {
        println!("Already signed in as {}; continuing will replace that session.", session.user.display_name());
    }
    let target = OAuthFlow::new()
        .begin_login(&ctx.api)
        .await
        .ok_or(CliError::LoginUnavailable)?;
    println!("Open this address in a browser to sign in with GitHub:\n\n    {target}\n");
    println!("When the browser lands on the DeployHub callback page, run:\n\n    deployhub callback '<that address>'");
    Ok(())
}

fn run_callback(ctx: &mut CliContext, raw: &str) -> Result<(), CliError> {
    let params = CallbackParams::from_query(raw);
    match OAuthFlow::awaiting_callback().handle_callback(&mut ctx.store, &params) {
        CallbackOutcome::Success(session) => {
            println!("Signed in as {}.", session.user.display_name());
            Ok(())
        }
        CallbackOutcome::Failure(err) => Err(err.into()),
    }
}

fn run_whoami(ctx: &CliContext) -> Result<(), CliError> {
    let session = ctx.session().ok_or(ClientError::Unauthenticated)?;
    println!("{}", session.user.display_name());
    if let Some(login) = &session.user.login {
        println!("login: {login}");
    }
    if let Some(avatar) = &session.user.avatar_url {
        println!("avatar: {avatar}");
    }
    Ok(())
}

async fn run_logout(ctx: &mut CliContext) -> Result<(), CliError> {
    if ctx.session().is_none() {
        println!("Not signed in.");
        return Ok(());
    }
    if let Err(err) = ctx.api.logout(ctx.session()).await {
        warn!(error = %err, "backend sign-out failed; forgetting the local session anyway");
    }
    ctx.store.clear();
    println!("Signed out.");
    Ok(())
}

async fn run_projects(ctx: &mut CliContext, projects: ProjectsCommand) -> Result<(), CliError> {
    match projects.command {
        ProjectsSubcommand::List { json } => {
            let listed = match ctx.api.list_projects(ctx.session()).await {
                Ok(listed) => listed,
                Err(err) => return Err(ctx.absorb(err)),
            };
            if json {
                print_json(&serde_json::to_value(&listed)?)?;
            } else if listed.is_empty() {
                println!("No projects yet. Create one with `deployhub projects create --title <title>`.");
            } else {
                for project in &listed {
                    println!("{}", project_line(project));
                }
            }
            Ok(())
        }
        ProjectsSubcommand::Show { project_id, json } => {
            let detail = match ctx.api.get_project(ctx.session(), &project_id).await {
                Ok(detail) => detail,
                Err(err) => return Err(ctx.absorb(err)),
            };
            if json {
                print_json(&serde_json::to_value(&detail)?)?;
            } else {
                print!("{}", project_report(&detail));
            }
            Ok(())
        }
        ProjectsSubcommand::Create { title, description } => {
            let project = new_project(&title, &description)?;
            let created = match ctx.api.create_project(ctx.session(), &project).await {
                Ok(created) => created,
                Err(err) => return Err(ctx.absorb(err)),
            };
            println!("Created {} ({}).", created.title, created.id);
            Ok(())
        }
    }
}

async fn run_upload(ctx: &mut CliContext, project_id: &str, bundle: &Path, kind: UploadTarget) -> Result<(), CliError> {
    let file = read_bundle(bundle).await?;
    let selection = UploadSelection::new(vec![file], kind, project_id)?;
    let summary = format!("{} ({}) as {kind}", selection.file_name(), bundle_size(&selection));
    if let Err(err) = ctx.api.upload_bundle(ctx.session(), selection).await {
        return Err(ctx.absorb(err));
    }
    println!("Uploaded {summary}.");
    Ok(())
}

async fn run_repo(ctx: &mut CliContext, repo: RepoCommand) -> Result<(), CliError> {
    match repo.command {
        RepoSubcommand::Create { project_id, name, private } => {
            let detail = match ctx.api.get_project(ctx.session(), &project_id).await {
                Ok(detail) => detail,
                Err(err) => return Err(ctx.absorb(err)),
            };
            let request = repository_request(&detail.project, name, private);
            if let Err(err) = ctx.api.create_repository(ctx.session(), &request).await {
                return Err(ctx.absorb(err));
            }
            println!("Requested repository {} for {}.", request.repo_name, detail.project.title);
            Ok(())
        }
    }
}

async fn read_bundle(path: &Path) -> Result<SelectedFile, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CliError::ReadBundle { path: path.display().to_string(), source })?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(SelectedFile { name, bytes })
}

fn bundle_size(selection: &UploadSelection) -> String {
    format_file_size(u64::try_from(selection.size()).unwrap_or(u64::MAX))
}

fn new_project(title: &str, description: &str) -> Result<NewProject, ClientError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ClientError::InvalidSelection("Project title is required".to_owned()));
    }
    Ok(NewProject { title: title.to_owned(), description: description.trim().to_owned() })
}

fn repository_request(project: &ProjectSummary, name: Option<String>, private: bool) -> CreateRepository {
    let mut request = CreateRepository::for_project(project);
    if let Some(name) = name.filter(|name| !name.trim().is_empty()) {
        request.repo_name = name.trim().to_owned();
    }
    request.is_private = private;
    request
}

fn parts_label(project: &ProjectSummary) -> String {
    match (project.has_frontend, project.has_backend) {
        (true, true) => "frontend+backend".to_owned(),
        (true, false) => "frontend".to_owned(),
        (false, true) => "backend".to_owned(),
        (false, false) => "empty".to_owned(),
    }
}

fn project_line(project: &ProjectSummary) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        project.id,
        project.deployment_status.as_str(),
        parts_label(project),
        project.title
    )
}

fn project_report(detail: &ProjectDetail) -> String {
    let project = &detail.project;
    let mut report = format!("{} ({})\n", project.title, project.id);
    if let Some(description) = project.description.as_deref().filter(|text| !text.trim().is_empty()) {
        report.push_str(&format!("  {description}\n"));
    }
    report.push_str(&format!("  status:     {}\n", project.deployment_status.as_str()));
    report.push_str(&format!("  parts:      {}\n", parts_label(project)));
    let repository = project
        .github_repo_url
        .as_deref()
        .or(project.github_repo_name.as_deref())
        .unwrap_or("none");
    report.push_str(&format!("  repository: {repository}\n"));
    for file in &detail.files {
        let size = file.file_size.map_or_else(|| "?".to_owned(), format_file_size);
        report.push_str(&format!("  file:       {} ({size})\n", file.name));
    }
    for deployment in &detail.deployments {
        let url = deployment.url.as_deref().unwrap_or("-");
        report.push_str(&format!("  deployment: {} {url}\n", deployment.status.as_str()));
    }
    report
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
