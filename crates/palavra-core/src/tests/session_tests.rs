use std::sync::atomic::Ordering;

use palavra_store::{StoreError, VocabStore};
use palavra_translator::Resolver;
use palavra_types::{Action, Phase, Status};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::support::scripted_resolver;
use crate::{Session, SessionState, Transition, WordList};

fn session(words: &[&str], resolver: Resolver) -> Session {
    Session::new(
        VocabStore::open_in_memory().unwrap(),
        WordList::from_words(words).unwrap(),
        resolver,
        StdRng::seed_from_u64(1),
    )
}

async fn step(session: &mut Session, state: SessionState, action: Action) -> SessionState {
    match session.handle(state, action).await.unwrap() {
        Transition::Continue(next) => next,
        Transition::Exit => panic!("unexpected exit"),
    }
}

#[tokio::test]
async fn test_review_cycle_with_manual_fallback() {
    let (resolver, _) = scripted_resolver(&[("casa", "house")]);
    let mut session = session(&["casa", "rio"], resolver);

    // casa resolves and is stored as new
    let state = session.start().await.unwrap();
    assert_eq!(state.current_word.as_deref(), Some("casa"));
    assert_eq!(state.phase(), Some(Phase::Hidden));
    let casa = session.store().get("casa").unwrap().unwrap();
    assert_eq!(casa.translation.as_deref(), Some("house"));
    assert_eq!(casa.status, Status::New);

    let state = step(&mut session, state, Action::Reveal).await;
    assert_eq!(state.phase(), Some(Phase::Revealed));

    // rating 3 -> comfortable, then rio fails to resolve
    let state = step(&mut session, state, Action::Rate(Status::Comfortable)).await;
    assert_eq!(
        session.store().get("casa").unwrap().unwrap().status,
        Status::Comfortable
    );
    assert_eq!(state.current_word.as_deref(), Some("rio"));
    assert_eq!(state.phase(), Some(Phase::ManualEntry));
    assert!(!state.revealed);
    assert_eq!(session.store().get("rio").unwrap(), None);

    let _state = step(
        &mut session,
        state,
        Action::CommitManualEntry("river".into()),
    )
    .await;
    let rio = session.store().get("rio").unwrap().unwrap();
    assert_eq!(rio.translation.as_deref(), Some("river"));
    assert_eq!(rio.status, Status::New);
    assert_eq!(session.store().progress_summary().unwrap().total, 2);
}

#[tokio::test]
async fn test_blank_manual_entry_stays_in_manual_entry() {
    let mut session = session(&["rio"], Resolver::offline("pt".into(), "en".into()));

    let state = session.start().await.unwrap();
    assert_eq!(state.phase(), Some(Phase::ManualEntry));

    let next = step(&mut session, state.clone(), Action::CommitManualEntry("  \t".into())).await;
    assert_eq!(next, state);
    assert_eq!(session.store().get("rio").unwrap(), None);
}

#[tokio::test]
async fn test_manual_entry_is_trimmed() {
    let mut session = session(&["rio"], Resolver::offline("pt".into(), "en".into()));

    let state = session.start().await.unwrap();
    let next = step(&mut session, state, Action::CommitManualEntry(" river \n".into())).await;

    assert_eq!(
        session.store().get("rio").unwrap().unwrap().translation.as_deref(),
        Some("river")
    );
    // single-word list, now fully resolved: the same word comes back for review
    assert_eq!(next.current_word.as_deref(), Some("rio"));
    assert_eq!(next.phase(), Some(Phase::Hidden));
}

#[tokio::test]
async fn test_out_of_phase_actions_are_ignored() {
    let (resolver, _) = scripted_resolver(&[("casa", "house")]);
    let mut session = session(&["casa"], resolver);
    let hidden = session.start().await.unwrap();

    // rating before reveal
    let same = step(&mut session, hidden.clone(), Action::Rate(Status::Learned)).await;
    assert_eq!(same, hidden);
    assert_eq!(
        session.store().get("casa").unwrap().unwrap().status,
        Status::New
    );

    // commit outside manual entry
    let same = step(&mut session, hidden.clone(), Action::CommitManualEntry("x".into())).await;
    assert_eq!(same, hidden);

    // double reveal
    let revealed = step(&mut session, hidden, Action::Reveal).await;
    let same = step(&mut session, revealed.clone(), Action::Reveal).await;
    assert_eq!(same, revealed);
}

#[tokio::test]
async fn test_rating_is_ignored_during_manual_entry() {
    let mut session = session(&["rio"], Resolver::offline("pt".into(), "en".into()));
    let state = session.start().await.unwrap();

    let same = step(&mut session, state.clone(), Action::Rate(Status::Learned)).await;
    assert_eq!(same, state);
    assert_eq!(session.store().progress_summary().unwrap().total, 0);
}

#[tokio::test]
async fn test_exit_from_every_phase() {
    let (resolver, _) = scripted_resolver(&[("casa", "house")]);
    let mut session = session(&["casa", "rio"], resolver);

    let hidden = session.start().await.unwrap();
    let revealed = step(&mut session, hidden.clone(), Action::Reveal).await;
    let manual = step(&mut session, revealed.clone(), Action::Rate(Status::New)).await;
    assert_eq!(manual.phase(), Some(Phase::ManualEntry));

    for state in [SessionState::default(), hidden, revealed, manual] {
        assert_eq!(
            session.handle(state, Action::Exit).await.unwrap(),
            Transition::Exit
        );
    }
}

#[tokio::test]
async fn test_known_words_are_not_looked_up_again() {
    let (resolver, calls) = scripted_resolver(&[("casa", "house")]);
    let mut session = session(&["casa"], resolver);
    session.store().upsert("casa", "home", Some(Status::Learned)).unwrap();

    let state = session.start().await.unwrap();

    assert_eq!(state.phase(), Some(Phase::Hidden));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    let casa = session.store().get("casa").unwrap().unwrap();
    assert_eq!(casa.translation.as_deref(), Some("home"));
    assert_eq!(casa.status, Status::Learned);
}

#[tokio::test]
async fn test_view_hides_translation_until_revealed() {
    let (resolver, _) = scripted_resolver(&[("casa", "house")]);
    let mut session = session(&["casa"], resolver);
    let hidden = session.start().await.unwrap();

    let view = session.view(&hidden).unwrap().unwrap();
    assert_eq!(view.word, "casa");
    assert_eq!(view.phase, Phase::Hidden);
    assert_eq!(view.translation, None);
    assert!(view.rating_prompt.is_empty());
    assert_eq!(view.current_status, Some(Status::New));
    assert_eq!(view.progress.total, 1);
    assert_eq!(view.progress.new, 1);

    let revealed = step(&mut session, hidden, Action::Reveal).await;
    let view = session.view(&revealed).unwrap().unwrap();
    assert_eq!(view.translation.as_deref(), Some("house"));
    assert_eq!(
        view.rating_prompt,
        vec![
            (1, Status::New),
            (2, Status::Recognizable),
            (3, Status::Comfortable),
            (4, Status::Learned),
        ]
    );

    // viewing never writes
    assert_eq!(session.store().get("casa").unwrap().unwrap().status, Status::New);
}

#[tokio::test]
async fn test_view_during_manual_entry_has_no_record() {
    let mut session = session(&["rio"], Resolver::offline("pt".into(), "en".into()));
    let state = session.start().await.unwrap();

    let view = session.view(&state).unwrap().unwrap();
    assert_eq!(view.phase, Phase::ManualEntry);
    assert_eq!(view.current_status, None);
    assert_eq!(view.progress.total, 0);

    assert_eq!(session.view(&SessionState::default()).unwrap(), None);
}

#[tokio::test]
async fn test_store_failure_during_rating_is_returned() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocab.db");
    VocabStore::open(&path)
        .unwrap()
        .upsert("casa", "house", None)
        .unwrap();

    let mut session = Session::new(
        VocabStore::open(&path).unwrap(),
        WordList::from_words(&["casa"]).unwrap(),
        Resolver::offline("pt".into(), "en".into()),
        StdRng::seed_from_u64(1),
    );
    let state = session.start().await.unwrap();
    let state = step(&mut session, state, Action::Reveal).await;

    rusqlite::Connection::open(&path)
        .unwrap()
        .execute_batch("DROP TABLE words")
        .unwrap();

    let result = session.handle(state, Action::Rate(Status::Learned)).await;
    assert!(matches!(result, Err(StoreError::Sqlite(_))));
}
