//! End-to-end menu sessions over a real credential file and a stubbed room
//! service.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::io::Cursor;
use std::sync::Arc;

use globaldorm_client::domain::ports::RequestMethod;
use globaldorm_client::domain::{AccountService, Orchestrator, RoomServiceClient};
use globaldorm_client::inbound::cli::{Console, run_menu};
use globaldorm_client::outbound::persistence::JsonFileCredentialStore;
use globaldorm_client::test_support::cap_fs::{read_file_to_string, write_file};
use globaldorm_client::test_support::{StubRoomTransport, UsersWorkspace};
use rstest::{fixture, rstest};

#[fixture]
fn workspace() -> UsersWorkspace {
    UsersWorkspace::new().expect("create users workspace")
}

async fn run_script(
    workspace: &UsersWorkspace,
    transport: Arc<StubRoomTransport>,
    script: &str,
) -> String {
    let store = JsonFileCredentialStore::open(workspace.path()).expect("open users file");
    let mut orchestrator = Orchestrator::new(
        AccountService::new(Arc::new(store)),
        RoomServiceClient::new(transport),
    );
    let mut console = Console::new(Cursor::new(script.to_owned()), Vec::new());

    run_menu(&mut orchestrator, &mut console)
        .await
        .expect("menu loop completes");

    String::from_utf8(console.into_output()).expect("UTF-8 output")
}

#[rstest]
#[tokio::test]
async fn resident_registers_logs_in_and_applies(workspace: UsersWorkspace) {
    let transport = Arc::new(
        StubRoomTransport::default()
            .with_response(200, r#"[{"id":12}]"#)
            .with_response(200, "Application submitted"),
    );
    let script = "2\nalice\npw1\nn\n1\nalice\npw1\n1\n2\n7\n12\n7\n3\n";

    let output = run_script(&workspace, Arc::clone(&transport), script).await;

    assert!(output.contains("User 'alice' created. Please log in."));
    assert!(output.contains("Logged in as alice (resident)."));
    assert!(output.contains("== Resident Menu =="));
    assert!(output.contains(r#"[{"id":12}]"#));
    assert!(output.contains("Application submitted"));
    assert!(output.contains("Logged out."));
    assert!(output.trim_end().ends_with("Goodbye."));

    let requests = transport.requests();
    let paths: Vec<String> = requests.iter().map(|request| request.path()).collect();
    assert_eq!(paths, ["/rooms", "/rooms/apply"]);
    let apply = requests.get(1).expect("apply request");
    assert_eq!(apply.method(), RequestMethod::Post);
    let body = apply.body().expect("apply carries a body");
    assert_eq!(body.user_id().as_ref(), "alice");
    assert_eq!(body.application_id().get(), 7);
    assert_eq!(body.room_id().get(), 12);

    let stored = read_file_to_string(workspace.path()).expect("read users file");
    assert!(stored.contains(r#""username": "alice""#));
    assert!(stored.contains(r#""isAdmin": false"#));
    assert!(!stored.contains("pw1"));
}

#[rstest]
#[tokio::test]
async fn admin_lists_pending_then_accepts(workspace: UsersWorkspace) {
    let transport = Arc::new(
        StubRoomTransport::default()
            .with_response(200, r#"[{"applicationId":5}]"#)
            .with_response(200, "Offer accepted"),
    );
    let script = "2\nbob\npw2\ny\n1\nbob\npw2\n1\n5\n";

    let output = run_script(&workspace, Arc::clone(&transport), script).await;

    assert!(output.contains("Logged in as bob (administrator)."));
    assert!(output.contains("== Admin Menu =="));
    assert!(output.contains("1. Accept Room Offer"));
    assert!(!output.contains("Apply for a Room"));
    assert!(output.contains(r#"[{"applicationId":5}]"#));
    assert!(output.contains("Offer accepted"));

    let requests = transport.requests();
    let calls: Vec<(RequestMethod, String)> = requests
        .iter()
        .map(|request| (request.method(), request.path()))
        .collect();
    assert_eq!(
        calls,
        [
            (RequestMethod::Get, "/rooms/applications/pending".to_owned()),
            (RequestMethod::Put, "/rooms/accept/5".to_owned()),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn invalid_choices_reprompt_and_eof_exits(workspace: UsersWorkspace) {
    let transport = Arc::new(StubRoomTransport::default());

    let output = run_script(&workspace, Arc::clone(&transport), "9\nabc\n0\n").await;

    assert_eq!(output.matches("Invalid option. Please try again.").count(), 3);
    assert_eq!(output.matches("== GlobalDorm ==").count(), 4);
    assert!(transport.requests().is_empty());
}

#[rstest]
#[tokio::test]
async fn failed_login_stays_unauthenticated(workspace: UsersWorkspace) {
    write_file(workspace.path(), "[]\n").expect("seed users file");
    let transport = Arc::new(StubRoomTransport::default());

    let output = run_script(&workspace, transport, "1\nnobody\npw\n3\n").await;

    assert!(output.contains("Invalid username or password."));
    assert!(!output.contains("Resident Menu"));
    assert!(output.trim_end().ends_with("Goodbye."));
}

#[rstest]
#[tokio::test]
async fn duplicate_registration_is_reported(workspace: UsersWorkspace) {
    let transport = Arc::new(StubRoomTransport::default());
    let script = "2\nalice\npw1\nn\n2\nalice\nother\ny\n3\n";

    let output = run_script(&workspace, transport, script).await;

    assert!(output.contains("Username 'alice' is already taken."));
    let stored = read_file_to_string(workspace.path()).expect("read users file");
    assert_eq!(stored.matches(r#""username": "alice""#).count(), 1);
    assert!(stored.contains(r#""isAdmin": false"#));
}

#[rstest]
#[tokio::test]
async fn non_numeric_ids_are_rejected_before_any_request(workspace: UsersWorkspace) {
    let transport = Arc::new(StubRoomTransport::default());
    let script = "2\nalice\npw1\n\n1\nalice\npw1\n2\nseven\n3\n-4\n";

    let output = run_script(&workspace, Arc::clone(&transport), script).await;

    assert!(output.contains("Application ID must be a whole number."));
    assert!(output.contains("must be positive"));
    assert!(transport.requests().is_empty());
}

#[rstest]
#[case(r#"{"routes":[{"distance":12345.6}]}"#, "Distance to room: 12.35 km")]
#[case(r#"{"routes":[]}"#, "Distance information is unavailable.")]
#[tokio::test]
async fn distance_is_rendered_in_kilometres(
    workspace: UsersWorkspace,
    #[case] body: &str,
    #[case] expected: &str,
) {
    let transport = Arc::new(StubRoomTransport::default().with_response(200, body));
    let script = "2\ncarol\npw\n\n1\ncarol\npw\n5\nEH1 1AA\n12\n";

    let output = run_script(&workspace, Arc::clone(&transport), script).await;

    assert!(output.contains(expected), "missing {expected:?} in {output}");
    let requests = transport.requests();
    let request = requests.first().expect("proximity request");
    assert_eq!(request.path(), "/rooms/proximity");
    assert_eq!(
        request.query(),
        [
            ("userPostcode", "EH1 1AA".to_owned()),
            ("roomId", "12".to_owned()),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn weather_lookup_by_postcode(workspace: UsersWorkspace) {
    let transport = Arc::new(StubRoomTransport::default().with_response(200, "Sunny"));
    let script = "2\ndan\npw\n\n1\ndan\npw\n6\n2\nG1 1XQ\n";

    let output = run_script(&workspace, Arc::clone(&transport), script).await;

    assert!(output.contains("Sunny"));
    let requests = transport.requests();
    let request = requests.first().expect("weather request");
    assert_eq!(request.path(), "/rooms/weather");
    assert_eq!(request.query(), [("postcode", "G1 1XQ".to_owned())]);
}
