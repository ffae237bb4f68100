
use alumninet_backend::{
    career::{CareerDraft, FieldEdit},
    entities::career::{CareerEntry, YearMonth},
    errors::AppError,
    use_cases::career::CareerHandler,
};
use mockall::predicate::eq;
use mocks::{stored_entry, MockCareerRepo};
use uuid::Uuid;

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

fn past_role() -> CareerEntry {
    CareerEntry {
        position: "Analyst".into(),
        company: "Initech".into(),
        location: Some("Austin".into()),
        start_date: ym(2015, 6),
        end_date: Some(ym(2018, 2)),
        is_current: false,
        description: None,
    }
}

fn current_role() -> CareerEntry {
    CareerEntry {
        position: "Engineer".into(),
        company: "Acme".into(),
        location: None,
        start_date: ym(2020, 1),
        end_date: None,
        is_current: true,
        description: None,
    }
}

fn error_fields(err: AppError) -> Vec<String> {
    match err {
        AppError::ValidationError(details) => details.into_iter().map(|d| d.field).collect(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[actix_rt::test]
async fn incomplete_draft_is_never_persisted() {
    let mut repo = MockCareerRepo::new();
    repo.expect_create_entry().never();

    let handler = CareerHandler::new(repo);
    let draft = CareerDraft {
        company: "Acme".into(),
        ..CareerDraft::default()
    };

    let err = handler.add_entry(Uuid::new_v4(), draft).await.unwrap_err();
    assert_eq!(error_fields(err), vec!["position", "start_date"]);
}

#[actix_rt::test]
async fn current_role_is_stored_without_end_date() {
    let user_id = Uuid::new_v4();
    let mut repo = MockCareerRepo::new();
    repo.expect_create_entry()
        .withf(move |uid, entry| {
            *uid == user_id && entry.is_current && entry.end_date.is_none() && entry.position == "Engineer"
        })
        .times(1)
        .returning(|uid, entry| Ok(stored_entry(uid, entry.clone())));

    let handler = CareerHandler::new(repo);
    let draft = CareerDraft {
        position: " Engineer ".into(),
        company: "Acme".into(),
        start_date: "2020-01".into(),
        end_date: Some("2021-05".into()),
        is_current: true,
        ..CareerDraft::default()
    };

    let stored = handler.add_entry(user_id, draft).await.unwrap();
    assert_eq!(stored.entry, current_role());
}

#[actix_rt::test]
async fn empty_edit_list_is_rejected_without_lookup() {
    let mut repo = MockCareerRepo::new();
    repo.expect_get_entry().never();

    let handler = CareerHandler::new(repo);
    let err = handler.edit_entry(Uuid::new_v4(), Uuid::new_v4(), vec![]).await.unwrap_err();

    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[actix_rt::test]
async fn editing_someone_elses_entry_is_not_found() {
    let mut repo = MockCareerRepo::new();
    repo.expect_get_entry().returning(|_, _| Ok(None));
    repo.expect_update_entry().never();

    let handler = CareerHandler::new(repo);
    let err = handler
        .edit_entry(Uuid::new_v4(), Uuid::new_v4(), vec![FieldEdit::Company("Globex".into())])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn unticking_current_requires_a_new_end_date() {
    let user_id = Uuid::new_v4();
    let entry_id = Uuid::new_v4();
    let mut repo = MockCareerRepo::new();
    repo.expect_get_entry()
        .with(eq(entry_id), eq(user_id))
        .returning(move |_, uid| Ok(Some(stored_entry(uid, current_role()))));
    repo.expect_update_entry().never();

    let handler = CareerHandler::new(repo);
    let err = handler
        .edit_entry(user_id, entry_id, vec![FieldEdit::IsCurrent(false)])
        .await
        .unwrap_err();

    assert_eq!(error_fields(err), vec!["end_date"]);
}

#[actix_rt::test]
async fn edits_apply_in_order_before_revalidation() {
    let user_id = Uuid::new_v4();
    let entry_id = Uuid::new_v4();
    let mut repo = MockCareerRepo::new();
    repo.expect_get_entry()
        .returning(move |_, uid| Ok(Some(stored_entry(uid, current_role()))));
    repo.expect_update_entry()
        .withf(|_, _, entry| {
            !entry.is_current && entry.end_date == Some(YearMonth::new(2023, 9).unwrap())
        })
        .times(1)
        .returning(|_, uid, entry| Ok(stored_entry(uid, entry.clone())));

    let handler = CareerHandler::new(repo);
    let edits = vec![
        FieldEdit::EndDate(Some("2019-01".into())),
        FieldEdit::IsCurrent(false),
        FieldEdit::EndDate(Some("2023-09".into())),
    ];

    let updated = handler.edit_entry(user_id, entry_id, edits).await.unwrap();
    assert_eq!(updated.entry.end_date, Some(ym(2023, 9)));
}

#[actix_rt::test]
async fn listing_reports_total() {
    let user_id = Uuid::new_v4();
    let mut repo = MockCareerRepo::new();
    repo.expect_list_entries()
        .with(eq(user_id))
        .returning(|uid| Ok(vec![stored_entry(uid, current_role()), stored_entry(uid, past_role())]));

    let handler = CareerHandler::new(repo);
    let list = handler.list_entries(user_id).await.unwrap();

    assert_eq!(list.total, 2);
    assert!(list.entries[0].entry.is_current);
}

#[actix_rt::test]
async fn deleting_missing_entry_propagates_not_found() {
    let mut repo = MockCareerRepo::new();
    repo.expect_delete_entry()
        .returning(|_, _| Err(AppError::NotFound("Career entry not found".into())));

    let handler = CareerHandler::new(repo);
    let err = handler.delete_entry(Uuid::new_v4(), Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn preview_does_not_touch_the_repository() {
    let handler = CareerHandler::new(MockCareerRepo::new());
    let draft = CareerDraft {
        position: "Analyst".into(),
        company: "Initech".into(),
        location: " Austin ".into(),
        start_date: "2015-06".into(),
        end_date: Some("2018-02".into()),
        ..CareerDraft::default()
    };

    assert_eq!(handler.preview(&draft).unwrap(), past_role());
}
