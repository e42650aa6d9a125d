//! End-to-end behaviour of the session machine and todo views over a
//! scripted API double, covering the protocol scenarios: silent login,
//! redirect fallback, role-based view selection, and 401 propagation.

use std::sync::Arc;

use rstest::{fixture, rstest};
use url::Url;
use uuid::Uuid;

use todo_client::domain::{
    ApiError, CreateTodoError, Navigation, NavigationTargets, Role, SessionPhase, SessionService,
    Todo, TodoContent, UserDetails, Username,
};
use todo_client::domain::ports::TodoApi;
use todo_client::inbound::term::{ActiveView, UserTodosView};

#[path = "support/doubles.rs"]
mod doubles;

use doubles::RecordingTodoApi;

#[fixture]
fn targets() -> NavigationTargets {
    NavigationTargets {
        interactive_login: Url::parse("https://localhost:3000/login").expect("login url"),
        global_logout: Url::parse("https://localhost:3000/logout").expect("logout url"),
        home: Url::parse("https://localhost:9001/").expect("home url"),
    }
}

fn user(username: &str, groups: &[&str]) -> UserDetails {
    UserDetails {
        username: Username::new(username).ok(),
        groups: Some(groups.iter().map(|group| (*group).to_owned()).collect()),
    }
}

fn todo(content: &str) -> Todo {
    Todo {
        id: Uuid::new_v4(),
        content: TodoContent::new(content).expect("valid content"),
    }
}

#[rstest]
#[tokio::test]
async fn rejected_bootstrap_then_silent_login_recovers_without_navigation(
    targets: NavigationTargets,
) {
    let api = Arc::new(RecordingTodoApi::new());
    api.queue_user(Err(ApiError::SessionInvalid));
    api.queue_probe(Ok(()));
    api.queue_user(Ok(user("bob", &["dev"])));

    let mut service = SessionService::new(Arc::clone(&api) as Arc<dyn TodoApi>, targets);
    service.refresh().await;
    assert_eq!(service.session().phase(), SessionPhase::Unauthenticated);

    let navigation = service.log_in().await;
    assert_eq!(navigation, None, "silent login must not surrender control");
    assert_eq!(service.session().phase(), SessionPhase::Authenticated);
    assert_eq!(
        api.calls(),
        vec!["GET user", "GET login/non-interactive", "GET user"]
    );
}

#[rstest]
#[tokio::test]
async fn network_failed_probe_redirects_to_interactive_login(targets: NavigationTargets) {
    let login_url = targets.interactive_login.clone();
    let api = Arc::new(RecordingTodoApi::new());
    api.queue_user(Err(ApiError::SessionInvalid));
    api.queue_probe(Err(ApiError::transport("connection refused")));

    let mut service = SessionService::new(Arc::clone(&api) as Arc<dyn TodoApi>, targets);
    service.refresh().await;
    let navigation = service.log_in().await;

    assert_eq!(navigation, Some(Navigation::InteractiveLogin(login_url)));
    assert_eq!(api.calls(), vec!["GET user", "GET login/non-interactive"]);
}

#[rstest]
#[tokio::test]
async fn operator_query_hits_the_per_user_endpoint_and_401_goes_to_the_session(
    targets: NavigationTargets,
) {
    let api = Arc::new(RecordingTodoApi::new());
    api.queue_user(Ok(user("admin", &["sre"])));
    api.queue_todos_for(Ok(vec![todo("rotate keys")]));
    api.queue_todos_for(Err(ApiError::SessionInvalid));

    let mut service = SessionService::new(Arc::clone(&api) as Arc<dyn TodoApi>, targets);
    service.refresh().await;
    assert_eq!(service.session().user().role(), Some(Role::Operator));

    let mut view = ActiveView::Pending.reconcile(service.session().user().role());
    let ActiveView::Admin(admin_view) = &mut view else {
        panic!("operator group must select the administrative view");
    };

    admin_view
        .query(api.as_ref(), Username::new("alice").expect("valid username"))
        .await
        .expect("first query succeeds");
    assert!(api.calls().contains(&"GET todos/alice".to_owned()));

    let error = admin_view
        .query(api.as_ref(), Username::new("alice").expect("valid username"))
        .await
        .expect_err("second query is rejected");
    service.report_failure(error);

    assert_eq!(
        service.session().phase(),
        SessionPhase::Unauthenticated,
        "a 401 on the admin query is a session-level error, not admin-local"
    );
    assert!(
        admin_view.selection().is_some(),
        "the admin view keeps no error state of its own"
    );
}

#[rstest]
#[tokio::test]
async fn member_create_round_trip_appends_exactly_once(targets: NavigationTargets) {
    let api = Arc::new(RecordingTodoApi::new());
    api.queue_user(Ok(user("bob", &["dev"])));
    api.queue_own_todos(Ok(vec![todo("water plants")]));

    let mut service = SessionService::new(Arc::clone(&api) as Arc<dyn TodoApi>, targets);
    service.refresh().await;
    assert_eq!(service.session().user().role(), Some(Role::Member));

    let mut view = UserTodosView::default();
    view.load(api.as_ref()).await.expect("load succeeds");

    let content = TodoContent::new("buy milk").expect("valid content");
    view.create(api.as_ref(), content.clone()).await;

    assert_eq!(view.todos().len(), 2);
    let appended = view.todos().last().expect("appended todo");
    assert_eq!(appended.content, content);
    assert_eq!(
        view.todos()
            .iter()
            .filter(|item| item.content == content)
            .count(),
        1,
        "exactly one copy is appended"
    );
}

#[rstest]
#[tokio::test]
async fn rejected_create_is_inline_only_and_preserves_the_session(targets: NavigationTargets) {
    let api = Arc::new(RecordingTodoApi::new());
    api.queue_user(Ok(user("bob", &["dev"])));
    api.queue_own_todos(Ok(vec![todo("water plants")]));
    api.queue_create(Err(CreateTodoError::rejected(500, "Internal Server Error")));

    let mut service = SessionService::new(Arc::clone(&api) as Arc<dyn TodoApi>, targets);
    service.refresh().await;

    let mut view = UserTodosView::default();
    view.load(api.as_ref()).await.expect("load succeeds");
    view.create(
        api.as_ref(),
        TodoContent::new("buy milk").expect("valid content"),
    )
    .await;

    assert_eq!(view.todos().len(), 1, "prior collection preserved");
    let inline = view.create_error().expect("inline failure recorded");
    assert!(inline.to_string().contains("500"));
    assert!(inline.to_string().contains("Internal Server Error"));
    assert_eq!(
        service.session().phase(),
        SessionPhase::Authenticated,
        "create failures never invalidate the session"
    );
}

#[rstest]
#[tokio::test]
async fn failed_todo_load_runs_once_and_stays_dismissed(targets: NavigationTargets) {
    let api = Arc::new(RecordingTodoApi::new());
    api.queue_user(Ok(user("bob", &["dev"])));
    api.queue_own_todos(Err(ApiError::transport("connection refused")));

    let mut service = SessionService::new(Arc::clone(&api) as Arc<dyn TodoApi>, targets);
    service.refresh().await;

    let mut view = UserTodosView::default();
    // Two loop passes over the activation guard: the fetch must not rerun.
    for _ in 0..2 {
        if !view.load_attempted() {
            if let Err(error) = view.load(api.as_ref()).await {
                service.report_failure(error);
            }
        }
    }
    assert_eq!(
        api.calls().iter().filter(|c| *c == "GET todos").count(),
        1,
        "a failed load is not retried"
    );
    assert_eq!(service.session().phase(), SessionPhase::Failed);

    service.dismiss_error();
    if !view.load_attempted() {
        if let Err(error) = view.load(api.as_ref()).await {
            service.report_failure(error);
        }
    }
    assert_eq!(
        service.session().phase(),
        SessionPhase::Authenticated,
        "a dismissed error must not resurface on the next pass"
    );
}

#[rstest]
#[tokio::test]
async fn identical_identity_across_refreshes_keeps_the_view_instance(
    targets: NavigationTargets,
) {
    let api = Arc::new(RecordingTodoApi::new());
    api.queue_user(Ok(user("bob", &["dev"])));
    api.queue_own_todos(Ok(vec![todo("water plants")]));
    api.queue_user(Ok(user("bob", &["dev"])));

    let mut service = SessionService::new(Arc::clone(&api) as Arc<dyn TodoApi>, targets);
    service.refresh().await;

    let mut view = ActiveView::Pending.reconcile(service.session().user().role());
    if let ActiveView::User(user_view) = &mut view {
        user_view.load(api.as_ref()).await.expect("load succeeds");
    }

    // Periodic refresh returns the same identity; the view must not remount.
    service.refresh().await;
    let view = view.reconcile(service.session().user().role());

    let ActiveView::User(user_view) = view else {
        panic!("member role must keep the user view");
    };
    assert!(user_view.is_loaded(), "no spurious remount");
    assert_eq!(api.calls().iter().filter(|c| *c == "GET todos").count(), 1);
}

#[rstest]
#[tokio::test]
async fn scoped_logout_invalidates_locally_and_navigates_home(targets: NavigationTargets) {
    let home_url = targets.home.clone();
    let api = Arc::new(RecordingTodoApi::new());
    api.queue_user(Ok(user("bob", &["dev"])));

    let mut service = SessionService::new(Arc::clone(&api) as Arc<dyn TodoApi>, targets);
    service.refresh().await;

    let navigation = service.log_out_this_app().await;
    assert_eq!(navigation, Navigation::Home(home_url));
    assert!(service.session().is_invalid());
    assert!(api.calls().contains(&"GET pa/oidc/logout".to_owned()));
}
