mod common;

use common::{project, Doubles};
use folio_admin::controllers::{Editor, FormInput, SubmitError};
use folio_admin::framework::mock::{server_error, Call, MockApi};
use folio_admin::framework::{ApiError, Notice};
use folio_admin::model::{Project, ProjectCreate, ProjectUpdate};

fn valid_create() -> ProjectCreate {
    ProjectCreate {
        title: "Project 1".into(),
        description: "A thing I built".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn invalid_form_never_reaches_the_server() {
    let mock = MockApi::<Project>::new();
    let doubles = Doubles::new();
    let editor = Editor::new(mock.clone(), doubles.context());

    let form = ProjectCreate {
        title: "   ".into(),
        ..valid_create()
    };
    let result = editor.submit(FormInput::Create(form)).await;

    assert!(matches!(result, Err(SubmitError::Invalid(ref e)) if e.field == "title"));
    assert!(mock.calls().is_empty());
    assert!(matches!(
        doubles.notifier.notices().as_slice(),
        [Notice::InvalidForm { .. }]
    ));
}

#[tokio::test]
async fn demo_mode_makes_submit_a_no_op() {
    let mock = MockApi::<Project>::new();
    let doubles = Doubles::new();
    doubles.demo.set(true);
    let editor = Editor::new(mock.clone(), doubles.context());

    let result = editor.submit(FormInput::Create(valid_create())).await;

    assert!(matches!(result, Err(SubmitError::DemoMode)));
    assert!(mock.calls().is_empty());
    assert_eq!(doubles.notifier.notices(), vec![Notice::DemoModeRestricted]);
}

#[tokio::test]
async fn create_and_update_report_success() {
    let mock = MockApi::<Project>::new();
    mock.expect_create().return_ok(project(1, None));
    mock.expect_update(1).return_ok(project(1, Some(0)));
    let doubles = Doubles::new();
    let editor = Editor::new(mock.clone(), doubles.context());

    let created = editor.submit(FormInput::Create(valid_create())).await.unwrap();
    assert_eq!(created.id, 1);

    let update = ProjectUpdate {
        featured: Some(true),
        ..Default::default()
    };
    editor.submit(FormInput::Update(1, update)).await.unwrap();

    assert_eq!(mock.calls(), vec![Call::Create, Call::Update(1)]);
    assert_eq!(
        doubles.notifier.notices(),
        vec![
            Notice::Saved { name: "Project 1".into() },
            Notice::Saved { name: "Project 1".into() },
        ]
    );
    mock.verify();
}

#[tokio::test]
async fn failed_save_toasts_and_returns_the_api_error() {
    let mock = MockApi::<Project>::new();
    mock.expect_update(4).return_err(server_error("update"));
    let doubles = Doubles::new();
    let editor = Editor::new(mock, doubles.context());

    let result = editor
        .submit(FormInput::Update(4, ProjectUpdate::default()))
        .await;

    assert!(matches!(
        result,
        Err(SubmitError::Api(ApiError::Status { status: 500, .. }))
    ));
    assert!(doubles.notifier.contains(&Notice::SaveFailed));
}

#[tokio::test]
async fn loading_a_missing_record_is_not_found() {
    let mock = MockApi::<Project>::new();
    mock.expect_get(99).return_err(ApiError::NotFound("/api/projects/99".into()));
    let editor = Editor::new(mock, Doubles::new().context());

    match editor.load(99).await {
        Err(SubmitError::Api(e)) => assert!(e.is_not_found()),
        other => panic!("expected not found, got {other:?}"),
    }
}
