
use alumninet_backend::{
    entities::mentorship::{
        MentorshipRole, MentorshipStats, MentorshipStatus, NewMentorshipRequest, UpdateMentorshipStatus,
    },
    errors::AppError,
    repositories::mentorship::{RequestOutcome, REQUEST_LIST_LIMIT},
    use_cases::mentorship::MentorshipHandler,
};
use mockall::predicate::eq;
use mocks::{mentorship_request, MockMentorshipRepo};
use uuid::Uuid;

fn new_request(mentor_id: Uuid) -> NewMentorshipRequest {
    NewMentorshipRequest {
        mentor_id,
        topic: "  Moving into data science ".into(),
        message: "Could we talk about your path from finance?".into(),
    }
}

fn status(status: MentorshipStatus) -> UpdateMentorshipStatus {
    UpdateMentorshipStatus { status }
}

#[actix_rt::test]
async fn sending_stores_a_trimmed_pending_request() {
    let (mentee, mentor) = (Uuid::new_v4(), Uuid::new_v4());
    let mut repo = MockMentorshipRepo::new();
    repo.expect_create_request()
        .withf(move |insert| {
            insert.mentee_id == mentee
                && insert.mentor_id == mentor
                && insert.topic == "Moving into data science"
        })
        .times(1)
        .returning(move |_| {
            Ok(RequestOutcome::Created(mentorship_request(mentee, mentor, MentorshipStatus::Pending)))
        });

    let handler = MentorshipHandler::new(repo);
    let created = handler.send_request(mentee, new_request(mentor)).await.unwrap();

    assert_eq!(created.status, MentorshipStatus::Pending);
    assert_eq!(created.mentee_id, mentee);
}

#[actix_rt::test]
async fn requesting_yourself_is_rejected() {
    let me = Uuid::new_v4();
    let mut repo = MockMentorshipRepo::new();
    repo.expect_create_request().never();

    let handler = MentorshipHandler::new(repo);
    let err = handler.send_request(me, new_request(me)).await.unwrap_err();

    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[actix_rt::test]
async fn blank_topic_never_reaches_the_repository() {
    let mut repo = MockMentorshipRepo::new();
    repo.expect_create_request().never();

    let mut request = new_request(Uuid::new_v4());
    request.topic = "   ".into();

    let handler = MentorshipHandler::new(repo);
    let err = handler.send_request(Uuid::new_v4(), request).await.unwrap_err();

    match err {
        AppError::ValidationError(details) => assert_eq!(details[0].field, "topic"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[actix_rt::test]
async fn unknown_mentor_and_open_pair_are_reported() {
    let mut repo = MockMentorshipRepo::new();
    let mut outcomes = vec![RequestOutcome::AlreadyOpen, RequestOutcome::MentorNotFound];
    repo.expect_create_request()
        .times(2)
        .returning(move |_| Ok(outcomes.pop().expect("two outcomes")));

    let handler = MentorshipHandler::new(repo);

    let err = handler.send_request(Uuid::new_v4(), new_request(Uuid::new_v4())).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = handler.send_request(Uuid::new_v4(), new_request(Uuid::new_v4())).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[actix_rt::test]
async fn mentor_lists_received_requests() {
    let mentor = Uuid::new_v4();
    let mut repo = MockMentorshipRepo::new();
    repo.expect_list_requests()
        .with(eq(mentor), eq(MentorshipRole::Mentor), eq(REQUEST_LIST_LIMIT))
        .times(1)
        .returning(move |_, _, _| {
            Ok(vec![
                mentorship_request(Uuid::new_v4(), mentor, MentorshipStatus::Pending),
                mentorship_request(Uuid::new_v4(), mentor, MentorshipStatus::Accepted),
            ])
        });

    let handler = MentorshipHandler::new(repo);
    let list = handler.list_requests(mentor, MentorshipRole::Mentor).await.unwrap();

    assert_eq!(list.total, 2);
}

#[actix_rt::test]
async fn outsiders_cannot_see_a_request() {
    let stored = mentorship_request(Uuid::new_v4(), Uuid::new_v4(), MentorshipStatus::Pending);
    let id = stored.id;
    let mut repo = MockMentorshipRepo::new();
    repo.expect_get_request().returning(move |_| Ok(Some(stored.clone())));

    let handler = MentorshipHandler::new(repo);
    let err = handler.get_request(id, Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn mentor_accepts_pending_request() {
    let (mentee, mentor) = (Uuid::new_v4(), Uuid::new_v4());
    let stored = mentorship_request(mentee, mentor, MentorshipStatus::Pending);
    let id = stored.id;

    let mut repo = MockMentorshipRepo::new();
    repo.expect_get_request().returning(move |_| Ok(Some(stored.clone())));
    repo.expect_update_status()
        .with(eq(id), eq(MentorshipStatus::Pending), eq(MentorshipStatus::Accepted))
        .times(1)
        .returning(move |_, _, to| Ok(Some(mentorship_request(mentee, mentor, to))));

    let handler = MentorshipHandler::new(repo);
    let updated = handler
        .update_status(id, mentor, status(MentorshipStatus::Accepted))
        .await
        .unwrap();

    assert_eq!(updated.status, MentorshipStatus::Accepted);
}

#[actix_rt::test]
async fn mentee_cannot_accept_their_own_request() {
    let mentee = Uuid::new_v4();
    let stored = mentorship_request(mentee, Uuid::new_v4(), MentorshipStatus::Pending);
    let id = stored.id;

    let mut repo = MockMentorshipRepo::new();
    repo.expect_get_request().returning(move |_| Ok(Some(stored.clone())));
    repo.expect_update_status().never();

    let handler = MentorshipHandler::new(repo);
    let err = handler
        .update_status(id, mentee, status(MentorshipStatus::Accepted))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ForbiddenAccess));
}

#[actix_rt::test]
async fn mentee_completes_accepted_mentorship() {
    let (mentee, mentor) = (Uuid::new_v4(), Uuid::new_v4());
    let stored = mentorship_request(mentee, mentor, MentorshipStatus::Accepted);
    let id = stored.id;

    let mut repo = MockMentorshipRepo::new();
    repo.expect_get_request().returning(move |_| Ok(Some(stored.clone())));
    repo.expect_update_status()
        .with(eq(id), eq(MentorshipStatus::Accepted), eq(MentorshipStatus::Completed))
        .times(1)
        .returning(move |_, _, to| Ok(Some(mentorship_request(mentee, mentor, to))));

    let handler = MentorshipHandler::new(repo);
    let updated = handler
        .update_status(id, mentee, status(MentorshipStatus::Completed))
        .await
        .unwrap();

    assert_eq!(updated.status, MentorshipStatus::Completed);
}

#[actix_rt::test]
async fn declined_request_cannot_be_reopened() {
    let (mentee, mentor) = (Uuid::new_v4(), Uuid::new_v4());
    let stored = mentorship_request(mentee, mentor, MentorshipStatus::Declined);
    let id = stored.id;

    let mut repo = MockMentorshipRepo::new();
    repo.expect_get_request().returning(move |_| Ok(Some(stored.clone())));
    repo.expect_update_status().never();

    let handler = MentorshipHandler::new(repo);
    let err = handler
        .update_status(id, mentor, status(MentorshipStatus::Accepted))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[actix_rt::test]
async fn concurrent_status_change_is_a_conflict() {
    let (mentee, mentor) = (Uuid::new_v4(), Uuid::new_v4());
    let stored = mentorship_request(mentee, mentor, MentorshipStatus::Pending);
    let id = stored.id;

    let mut repo = MockMentorshipRepo::new();
    repo.expect_get_request().returning(move |_| Ok(Some(stored.clone())));
    repo.expect_update_status().returning(|_, _, _| Ok(None));

    let handler = MentorshipHandler::new(repo);
    let err = handler
        .update_status(id, mentee, status(MentorshipStatus::Declined))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[actix_rt::test]
async fn stats_are_scoped_to_the_caller() {
    let me = Uuid::new_v4();
    let mut repo = MockMentorshipRepo::new();
    repo.expect_stats()
        .with(eq(me))
        .returning(|_| {
            Ok(MentorshipStats {
                available_mentors: 12,
                active_mentorships: 4,
                user_requests: 1,
            })
        });

    let handler = MentorshipHandler::new(repo);
    let stats = handler.stats(me).await.unwrap();

    assert_eq!(stats.user_requests, 1);
    assert_eq!(stats.available_mentors, 12);
}
