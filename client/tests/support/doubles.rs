//! Recording test double for the todo API port.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use todo_client::domain::ports::TodoApi;
use todo_client::domain::{ApiError, CreateTodoError, Todo, UserDetails, Username};

/// Scripted double: each call pops the next queued response for its
/// operation (falling back to an empty success) and appends to a call log.
#[derive(Default)]
pub(crate) struct RecordingTodoApi {
    calls: Mutex<Vec<String>>,
    user_responses: Mutex<VecDeque<Result<UserDetails, ApiError>>>,
    own_todo_responses: Mutex<VecDeque<Result<Vec<Todo>, ApiError>>>,
    todos_for_responses: Mutex<VecDeque<Result<Vec<Todo>, ApiError>>>,
    create_responses: Mutex<VecDeque<Result<(), CreateTodoError>>>,
    probe_responses: Mutex<VecDeque<Result<(), ApiError>>>,
}

impl RecordingTodoApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub(crate) fn queue_user(&self, response: Result<UserDetails, ApiError>) {
        self.user_responses
            .lock()
            .expect("user queue lock")
            .push_back(response);
    }

    pub(crate) fn queue_own_todos(&self, response: Result<Vec<Todo>, ApiError>) {
        self.own_todo_responses
            .lock()
            .expect("own todos queue lock")
            .push_back(response);
    }

    pub(crate) fn queue_todos_for(&self, response: Result<Vec<Todo>, ApiError>) {
        self.todos_for_responses
            .lock()
            .expect("todos-for queue lock")
            .push_back(response);
    }

    pub(crate) fn queue_create(&self, response: Result<(), CreateTodoError>) {
        self.create_responses
            .lock()
            .expect("create queue lock")
            .push_back(response);
    }

    pub(crate) fn queue_probe(&self, response: Result<(), ApiError>) {
        self.probe_responses
            .lock()
            .expect("probe queue lock")
            .push_back(response);
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().expect("calls lock").push(call.into());
    }
}

#[async_trait]
impl TodoApi for RecordingTodoApi {
    async fn fetch_user(&self) -> Result<UserDetails, ApiError> {
        self.record("GET user");
        self.user_responses
            .lock()
            .expect("user queue lock")
            .pop_front()
            .unwrap_or_else(|| Ok(UserDetails::empty()))
    }

    async fn fetch_own_todos(&self) -> Result<Vec<Todo>, ApiError> {
        self.record("GET todos");
        self.own_todo_responses
            .lock()
            .expect("own todos queue lock")
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_todos_for(&self, username: &Username) -> Result<Vec<Todo>, ApiError> {
        self.record(format!("GET todos/{username}"));
        self.todos_for_responses
            .lock()
            .expect("todos-for queue lock")
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create_todo(&self, todo: &Todo) -> Result<(), CreateTodoError> {
        self.record(format!("POST todos {}", todo.id));
        self.create_responses
            .lock()
            .expect("create queue lock")
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn probe_non_interactive_login(&self) -> Result<(), ApiError> {
        self.record("GET login/non-interactive");
        self.probe_responses
            .lock()
            .expect("probe queue lock")
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn end_app_session(&self) -> Result<(), ApiError> {
        self.record("GET pa/oidc/logout");
        Ok(())
    }
}
