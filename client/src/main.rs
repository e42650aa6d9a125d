//! Client entry point: wires settings, adapter, session service, and loop.

use std::process::ExitCode;
use std::sync::Arc;

use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use todo_client::config::ClientSettings;
use todo_client::domain::Navigation;
use todo_client::domain::SessionService;
use todo_client::domain::ports::TodoApi;
use todo_client::inbound::term::Repl;
use todo_client::outbound::http::HttpTodoApi;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = match ClientSettings::load_from_iter(std::env::args_os()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("configuration error: {error}");
            return ExitCode::FAILURE;
        }
    };

    let base = match settings.api_base_url() {
        Ok(base) => base,
        Err(error) => {
            eprintln!("invalid API base URL: {error}");
            return ExitCode::FAILURE;
        }
    };
    let targets = match settings.navigation_targets() {
        Ok(targets) => targets,
        Err(error) => {
            eprintln!("invalid navigation URL: {error}");
            return ExitCode::FAILURE;
        }
    };
    let api: Arc<dyn TodoApi> = match HttpTodoApi::new(base, settings.xsrf_policy()) {
        Ok(api) => Arc::new(api),
        Err(error) => {
            eprintln!("failed to build HTTP client: {error}");
            return ExitCode::FAILURE;
        }
    };

    let mut service = SessionService::new(Arc::clone(&api), targets);
    // On-load bootstrap: resolve the current user before the first render.
    service.refresh().await;

    let repl = Repl::new(service, api, settings.refresh_interval());
    match repl.run().await {
        Some(Navigation::InteractiveLogin(url)) => {
            println!("Open {url} in your browser to log in, then restart todo-client.");
        }
        Some(Navigation::GlobalLogout(url)) => {
            println!("Open {url} in your browser to terminate your session.");
        }
        Some(Navigation::Home(url)) => {
            println!("Session ended for this app. Home page: {url}");
        }
        None => {}
    }
    ExitCode::SUCCESS
}
