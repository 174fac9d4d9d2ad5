//! Vote engine behaviour against the in-memory store

mod common;

use std::sync::Arc;
use std::time::Duration;

use forum_core::entities::{VoteAction, VoteCounts, VoteStatus};
use forum_core::{DomainError, Polarity, SubjectId, SubjectKind, UserId};
use forum_service::{ServiceError, VoteEngine};

use common::{harness_at, harness_with, short_timeout};

#[tokio::test]
async fn test_thread_scenario_like_switch_toggle() {
    let h = harness_at(1200);
    let a = h.user("alice");
    let b = h.user("bob");
    let thread = h.store.add_thread(a.id);
    let engine = VoteEngine::new(&h.ctx);

    let out = engine
        .apply_vote(b.id, SubjectKind::Thread, thread, Polarity::Like)
        .await
        .unwrap();
    assert_eq!(out.action, VoteAction::Added);
    assert_eq!(out.counts, VoteCounts::new(1, 0));
    assert_eq!(out.status, VoteStatus::new(true, false));

    let out = engine
        .apply_vote(b.id, SubjectKind::Thread, thread, Polarity::Dislike)
        .await
        .unwrap();
    assert_eq!(out.action, VoteAction::Switched);
    assert_eq!(out.counts, VoteCounts::new(0, 1));
    assert_eq!(out.status, VoteStatus::new(false, true));

    let out = engine
        .apply_vote(b.id, SubjectKind::Thread, thread, Polarity::Dislike)
        .await
        .unwrap();
    assert_eq!(out.action, VoteAction::Removed);
    assert_eq!(out.counts, VoteCounts::new(0, 0));
    assert_eq!(out.status, VoteStatus::default());
}

#[tokio::test]
async fn test_like_twice_returns_to_no_reaction() {
    let h = harness_at(900);
    let owner = h.user("owner");
    let voter = h.user("voter");
    let post = h.store.add_post(owner.id);
    let engine = VoteEngine::new(&h.ctx);

    engine
        .apply_vote(voter.id, SubjectKind::Post, post, Polarity::Like)
        .await
        .unwrap();
    assert!(engine
        .has_reaction(voter.id, SubjectKind::Post, post, Polarity::Like)
        .await
        .unwrap());

    engine
        .apply_vote(voter.id, SubjectKind::Post, post, Polarity::Like)
        .await
        .unwrap();
    assert!(!engine
        .has_reaction(voter.id, SubjectKind::Post, post, Polarity::Like)
        .await
        .unwrap());
    assert!(h.store.reactions_on(SubjectKind::Post, post).is_empty());
}

#[tokio::test]
async fn test_switch_leaves_exactly_one_dislike() {
    let h = harness_at(900);
    let owner = h.user("owner");
    let voter = h.user("voter");
    let post = h.store.add_post(owner.id);
    let engine = VoteEngine::new(&h.ctx);

    engine
        .apply_vote(voter.id, SubjectKind::Post, post, Polarity::Like)
        .await
        .unwrap();
    engine
        .apply_vote(voter.id, SubjectKind::Post, post, Polarity::Dislike)
        .await
        .unwrap();

    let rows = h.store.reactions_on(SubjectKind::Post, post);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].polarity, Polarity::Dislike);
}

#[tokio::test]
async fn test_counts_match_stored_rows() {
    let h = harness_at(900);
    let owner = h.user("owner");
    let thread = h.store.add_thread(owner.id);
    let engine = VoteEngine::new(&h.ctx);

    let voters: Vec<_> = (0..5).map(|i| h.user(&format!("voter{i}"))).collect();
    for (i, voter) in voters.iter().enumerate() {
        let polarity = if i % 2 == 0 { Polarity::Like } else { Polarity::Dislike };
        engine
            .apply_vote(voter.id, SubjectKind::Thread, thread, polarity)
            .await
            .unwrap();
    }

    let counts = engine.get_counts(SubjectKind::Thread, thread).await.unwrap();
    let rows = h.store.reactions_on(SubjectKind::Thread, thread);
    let likes = rows.iter().filter(|r| r.polarity == Polarity::Like).count() as u64;
    assert_eq!(counts, VoteCounts::new(likes, rows.len() as u64 - likes));
    assert_eq!(counts, VoteCounts::new(3, 2));
}

#[tokio::test]
async fn test_posts_and_threads_are_separate_subjects() {
    let h = harness_at(900);
    let owner = h.user("owner");
    let voter = h.user("voter");
    let thread = h.store.add_thread(owner.id);
    let engine = VoteEngine::new(&h.ctx);

    engine
        .apply_vote(voter.id, SubjectKind::Thread, thread, Polarity::Like)
        .await
        .unwrap();

    let post_counts = engine.get_counts(SubjectKind::Post, thread).await.unwrap();
    assert_eq!(post_counts, VoteCounts::default());
}

#[tokio::test]
async fn test_unknown_subject_is_not_found() {
    let h = harness_at(900);
    let voter = h.user("voter");
    let engine = VoteEngine::new(&h.ctx);

    let err = engine
        .apply_vote(voter.id, SubjectKind::Thread, SubjectId::new(404), Polarity::Like)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::SubjectNotFound { kind: SubjectKind::Thread, .. })
    ));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_unknown_user_is_invalid_and_nothing_is_written() {
    let h = harness_at(900);
    let owner = h.user("owner");
    let thread = h.store.add_thread(owner.id);
    let engine = VoteEngine::new(&h.ctx);

    let err = engine
        .apply_vote(UserId::new(777), SubjectKind::Thread, thread, Polarity::Like)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::InvalidUser(_))));
    assert!(h.store.reactions_on(SubjectKind::Thread, thread).is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_votes_never_hold_both_polarities() {
    let h = harness_at(900);
    let owner = h.user("owner");
    let voter = h.user("voter");
    let thread = h.store.add_thread(owner.id);
    // Every store call yields, so unserialized read-then-write steps interleave
    h.store.set_latency(Some(Duration::from_millis(1)));
    let ctx = Arc::new(h.ctx.clone());
    let voter_id = voter.id;

    let mut handles = Vec::new();
    for i in 0..32 {
        let ctx = Arc::clone(&ctx);
        let polarity = if i % 2 == 0 { Polarity::Like } else { Polarity::Dislike };
        handles.push(tokio::spawn(async move {
            VoteEngine::new(&ctx)
                .apply_vote(voter_id, SubjectKind::Thread, thread, polarity)
                .await
        }));
    }
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        assert!(!outcome.status.is_inconsistent());
        assert!(outcome.counts.likes + outcome.counts.dislikes <= 1);
    }

    let engine = VoteEngine::new(&h.ctx);
    let status = engine
        .get_user_vote_status(voter.id, SubjectKind::Thread, thread)
        .await
        .unwrap();
    assert!(!status.is_inconsistent());
    assert!(h.store.reactions_on(SubjectKind::Thread, thread).len() <= 1);
}

#[tokio::test]
async fn test_failed_switch_keeps_previous_reaction() {
    let h = harness_at(900);
    let owner = h.user("owner");
    let voter = h.user("voter");
    let post = h.store.add_post(owner.id);
    let engine = VoteEngine::new(&h.ctx);

    engine
        .apply_vote(voter.id, SubjectKind::Post, post, Polarity::Dislike)
        .await
        .unwrap();

    h.store.fail_reaction_writes(true);
    let err = engine
        .apply_vote(voter.id, SubjectKind::Post, post, Polarity::Like)
        .await
        .unwrap_err();
    assert!(err.is_retryable());

    let rows = h.store.reactions_on(SubjectKind::Post, post);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].polarity, Polarity::Dislike);

    // The retry switches as if the failure never happened
    h.store.fail_reaction_writes(false);
    let out = engine
        .apply_vote(voter.id, SubjectKind::Post, post, Polarity::Like)
        .await
        .unwrap();
    assert_eq!(out.action, VoteAction::Switched);
    assert_eq!(out.counts, VoteCounts::new(1, 0));
}

#[tokio::test]
async fn test_self_vote_detection() {
    let h = harness_at(900);
    let owner = h.user("owner");
    let other = h.user("other");
    let thread = h.store.add_thread(owner.id);
    let engine = VoteEngine::new(&h.ctx);

    assert!(engine
        .is_own_subject(owner.id, SubjectKind::Thread, thread)
        .await
        .unwrap());
    assert!(!engine
        .is_own_subject(other.id, SubjectKind::Thread, thread)
        .await
        .unwrap());

    engine
        .record_creator(other.id, SubjectKind::Thread, thread)
        .await
        .unwrap();
    assert!(engine
        .is_creator(other.id, SubjectKind::Thread, thread)
        .await
        .unwrap());
    // Creator markers never show up as votes
    assert_eq!(
        engine.get_counts(SubjectKind::Thread, thread).await.unwrap(),
        VoteCounts::default()
    );
}

#[tokio::test]
async fn test_slow_store_is_unavailable() {
    let h = harness_with(900, short_timeout());
    let owner = h.user("owner");
    let voter = h.user("voter");
    let thread = h.store.add_thread(owner.id);
    h.store.set_latency(Some(Duration::from_millis(200)));

    let err = VoteEngine::new(&h.ctx)
        .apply_vote(voter.id, SubjectKind::Thread, thread, Polarity::Like)
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.status_code(), 503);
}
