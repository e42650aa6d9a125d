//! Interactive command loop.
//!
//! One task multiplexes stdin commands and the periodic session refresh via
//! `tokio::select!`. The refresh tick only runs while the session is not
//! invalid, mirroring a refresh timer that exists only while the user panel
//! is mounted. Returning a [`Navigation`] ends the loop: the caller performs
//! the navigation and this instance of the state machine is done.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use super::render;
use super::view_select::ActiveView;
use crate::domain::ports::TodoApi;
use crate::domain::{Navigation, SessionService, TodoContent, Username};

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Refresh,
    LogIn,
    LogOut,
    LogOutThisApp,
    ClearError,
    Add(String),
    Query(String),
    Reset,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    if let Some(content) = trimmed.strip_prefix("add ") {
        return Command::Add(content.trim().to_owned());
    }
    if let Some(username) = trimmed.strip_prefix("query ") {
        return Command::Query(username.trim().to_owned());
    }
    match trimmed {
        "refresh" => Command::Refresh,
        "login" => Command::LogIn,
        "logout" => Command::LogOut,
        "logout-app" => Command::LogOutThisApp,
        "clear" => Command::ClearError,
        "reset" => Command::Reset,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_owned()),
    }
}

enum Flow {
    Continue,
    Quit,
    Navigate(Navigation),
}

/// The interactive loop over a session service and the API port.
pub struct Repl {
    service: SessionService,
    api: Arc<dyn TodoApi>,
    view: ActiveView,
    refresh_every: Duration,
}

impl Repl {
    /// Build a loop over an already-bootstrapped session service.
    pub fn new(service: SessionService, api: Arc<dyn TodoApi>, refresh_every: Duration) -> Self {
        Self {
            service,
            api,
            view: ActiveView::Pending,
            refresh_every,
        }
    }

    /// Run until the operator quits (`None`) or a navigation is required.
    pub async fn run(mut self) -> Option<Navigation> {
        let mut ticker = interval_at(Instant::now() + self.refresh_every, self.refresh_every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            self.reconcile_and_load().await;
            println!("{}", render::screen(self.service.session(), &self.view));

            tokio::select! {
                _ = ticker.tick() => {
                    if !self.service.session().is_invalid() {
                        self.service.refresh().await;
                    }
                }
                line = lines.next_line() => {
                    let Ok(Some(line)) = line else {
                        // stdin closed: nothing left to drive the loop.
                        return None;
                    };
                    match self.dispatch(parse_command(&line)).await {
                        Flow::Continue => {}
                        Flow::Quit => return None,
                        Flow::Navigate(navigation) => return Some(navigation),
                    }
                }
            }
        }
    }

    /// Re-derive the active view from current claims and load it if fresh.
    async fn reconcile_and_load(&mut self) {
        let role = if self.service.session().is_invalid() {
            None
        } else {
            self.service.session().user().role()
        };
        let view = std::mem::take(&mut self.view);
        self.view = view.reconcile(role);

        if let ActiveView::User(user_view) = &mut self.view {
            if !user_view.load_attempted() {
                if let Err(error) = user_view.load(self.api.as_ref()).await {
                    self.service.report_failure(error);
                }
            }
        }
    }

    async fn dispatch(&mut self, command: Command) -> Flow {
        match command {
            Command::Refresh => {
                self.service.refresh().await;
                Flow::Continue
            }
            Command::LogIn => match self.service.log_in().await {
                None => Flow::Continue,
                Some(navigation) => Flow::Navigate(navigation),
            },
            Command::LogOut => Flow::Navigate(self.service.log_out()),
            Command::LogOutThisApp => Flow::Navigate(self.service.log_out_this_app().await),
            Command::ClearError => {
                self.service.dismiss_error();
                Flow::Continue
            }
            Command::Add(raw) => {
                self.add_todo(raw).await;
                Flow::Continue
            }
            Command::Query(raw) => {
                self.query_todos(raw).await;
                Flow::Continue
            }
            Command::Reset => {
                if let ActiveView::Admin(admin_view) = &mut self.view {
                    admin_view.clear();
                }
                Flow::Continue
            }
            Command::Help | Command::Empty => Flow::Continue,
            Command::Quit => Flow::Quit,
            Command::Unknown(line) => {
                println!("Unknown command: {line} (try: help)");
                Flow::Continue
            }
        }
    }

    /// Create a todo from raw input; validation failures print inline, the
    /// request itself records its outcome on the view.
    async fn add_todo(&mut self, raw: String) {
        let ActiveView::User(user_view) = &mut self.view else {
            println!("No create capability in this view.");
            return;
        };
        match TodoContent::new(raw) {
            Ok(content) => user_view.create(self.api.as_ref(), content).await,
            Err(error) => println!("{error}"),
        }
    }

    /// Query another user's todos; API failures land on the session error.
    async fn query_todos(&mut self, raw: String) {
        let ActiveView::Admin(admin_view) = &mut self.view else {
            println!("Cross-user queries need the administrative view.");
            return;
        };
        match Username::new(raw) {
            Ok(username) => {
                if let Err(error) = admin_view.query(self.api.as_ref(), username).await {
                    self.service.report_failure(error);
                }
            }
            Err(error) => println!("{error}"),
        }
    }
}
