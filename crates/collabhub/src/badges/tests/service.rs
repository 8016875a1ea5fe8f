use std::sync::{Arc, Barrier};
use std::thread;

use super::common::*;
use crate::badges::{
    ActivitySnapshot, BadgeId, BadgeRarity, BadgeRepository, BadgeService, BadgeServiceError,
    RepositoryError, TriggerAction,
};
use crate::domain::UserId;

#[test]
fn awards_qualifying_badges_and_returns_only_new_ones() {
    let (service, repository, _) = build_service(small_catalog());
    let user = member();

    let awarded = service
        .check_and_award_badges(&user, TriggerAction::ProjectCreated, &newcomer_snapshot())
        .expect("badge check succeeds");

    let mut awarded_ids: Vec<&str> = awarded
        .iter()
        .map(|badge| badge.badge_id.as_str())
        .collect();
    awarded_ids.sort_unstable();
    assert_eq!(awarded_ids, vec!["first_comment", "first_project"]);
    assert_eq!(repository.count_for(&user), 2);

    let mut grown = newcomer_snapshot();
    grown.projects_created = 10;
    let awarded = service
        .check_and_award_badges(&user, TriggerAction::ProjectCreated, &grown)
        .expect("badge check succeeds");

    assert_eq!(awarded.len(), 1);
    assert_eq!(awarded[0].badge_id.as_str(), "ten_projects");
    assert_eq!(awarded[0].points_awarded, 50);
    assert_eq!(repository.count_for(&user), 3);
}

#[test]
fn repeated_checks_with_unchanged_snapshot_award_nothing() {
    let (service, repository, notifier) = build_service(small_catalog());
    let user = member();
    let snapshot = newcomer_snapshot();

    let first = service
        .check_and_award_badges(&user, TriggerAction::CommentPosted, &snapshot)
        .expect("first check succeeds");
    let second = service
        .check_and_award_badges(&user, TriggerAction::CommentPosted, &snapshot)
        .expect("second check succeeds");

    assert_eq!(first.len(), 2);
    assert!(second.is_empty());
    assert_eq!(repository.count_for(&user), 2);
    assert_eq!(notifier.events().len(), 2);
}

#[test]
fn trigger_action_does_not_limit_evaluation() {
    let (service, _, _) = build_service(small_catalog());

    let awarded = service
        .check_and_award_badges(&member(), TriggerAction::DailyLogin, &newcomer_snapshot())
        .expect("badge check succeeds");

    assert_eq!(awarded.len(), 2);
}

#[test]
fn concurrent_checks_never_double_award() {
    let (service, repository, notifier) = build_service(small_catalog());
    let service = Arc::new(service);
    let user = member();
    let snapshot = newcomer_snapshot();
    let workers = 8;
    let barrier = Barrier::new(workers);

    let total_awarded: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    service
                        .check_and_award_badges(&user, TriggerAction::ProjectCreated, &snapshot)
                        .expect("concurrent check succeeds")
                        .len()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker completes"))
            .sum()
    });

    assert_eq!(total_awarded, 2);
    assert_eq!(repository.count_for(&user), 2);
    assert_eq!(notifier.events().len(), 2);
}

#[test]
fn uniqueness_conflicts_are_reported_as_already_awarded() {
    let repository = Arc::new(StaleReadRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = BadgeService::new(
        repository.clone(),
        notifier.clone(),
        Arc::new(small_catalog()),
    );
    let user = member();

    let first = service
        .check_and_award_badges(&user, TriggerAction::ProjectCreated, &newcomer_snapshot())
        .expect("first check succeeds");
    let second = service
        .check_and_award_badges(&user, TriggerAction::ProjectCreated, &newcomer_snapshot())
        .expect("conflicts are not errors");

    assert_eq!(first.len(), 2);
    assert!(second.is_empty());
    assert_eq!(repository.inner.count_for(&user), 2);
    assert_eq!(notifier.events().len(), 2);
}

#[test]
fn notifier_failures_do_not_block_awards() {
    let repository = Arc::new(MemoryRepository::default());
    let service = BadgeService::new(
        repository.clone(),
        Arc::new(OfflineNotifier),
        Arc::new(small_catalog()),
    );

    let awarded = service
        .check_and_award_badges(
            &member(),
            TriggerAction::ProjectCreated,
            &newcomer_snapshot(),
        )
        .expect("award survives notifier outage");

    assert_eq!(awarded.len(), 2);
    assert_eq!(repository.count_for(&member()), 2);
}

#[test]
fn notifications_describe_the_badge() {
    let (service, _, notifier) = build_service(small_catalog());
    let snapshot = ActivitySnapshot {
        projects_created: 1,
        ..ActivitySnapshot::default()
    };

    service
        .check_and_award_badges(&member(), TriggerAction::ProjectCreated, &snapshot)
        .expect("badge check succeeds");

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].template, "badge_earned");
    assert_eq!(events[0].badge_id.as_str(), "first_project");
    assert_eq!(events[0].details.get("points"), Some(&"10".to_string()));
    assert_eq!(events[0].details.get("rarity"), Some(&"common".to_string()));
}

#[test]
fn repository_outages_surface_as_errors() {
    let service = BadgeService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryNotifier::default()),
        Arc::new(small_catalog()),
    );

    match service.check_and_award_badges(
        &member(),
        TriggerAction::ProjectCreated,
        &newcomer_snapshot(),
    ) {
        Err(BadgeServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected unavailable error, got {other:?}"),
    }
}

#[test]
fn failed_insert_skips_only_that_badge() {
    let repository = Arc::new(FlakyInsertRepository::failing_on(2));
    let notifier = Arc::new(MemoryNotifier::default());
    let service = BadgeService::new(
        repository.clone(),
        notifier.clone(),
        Arc::new(small_catalog()),
    );
    let user = member();

    let awarded = service
        .check_and_award_badges(&user, TriggerAction::ProjectCreated, &seasoned_snapshot())
        .expect("insert failures do not fail the check");

    let mut awarded_ids: Vec<&str> = awarded
        .iter()
        .map(|badge| badge.badge_id.as_str())
        .collect();
    awarded_ids.sort_unstable();
    let mut stored_ids: Vec<String> = repository
        .earned(&user)
        .expect("earned badges load")
        .into_iter()
        .map(|badge| badge.badge_id.as_str().to_string())
        .collect();
    stored_ids.sort_unstable();

    assert_eq!(awarded_ids, vec!["first_project", "ten_projects"]);
    assert_eq!(awarded_ids, stored_ids);
    assert_eq!(notifier.events().len(), 2);

    let retried = service
        .check_and_award_badges(&user, TriggerAction::CommentPosted, &seasoned_snapshot())
        .expect("retry succeeds");
    assert_eq!(retried.len(), 1);
    assert_eq!(retried[0].badge_id.as_str(), "first_comment");
    assert_eq!(repository.inner.count_for(&user), 3);
}

#[test]
fn inactive_badges_are_listed_but_never_awarded() {
    let retired_ids = [BadgeId::new("first_comment")];
    let (service, _, _) = build_service(small_catalog().with_inactive(&retired_ids));

    let listed = service.get_all_badges();
    assert_eq!(listed.len(), 3);
    let retired = listed
        .iter()
        .find(|badge| badge.id == retired_ids[0])
        .expect("retired badge still listed");
    assert!(!retired.is_active);

    let awarded = service
        .check_and_award_badges(
            &member(),
            TriggerAction::CommentPosted,
            &newcomer_snapshot(),
        )
        .expect("badge check succeeds");
    assert_eq!(awarded.len(), 1);
    assert_eq!(awarded[0].badge_id.as_str(), "first_project");
}

#[test]
fn user_badges_are_joined_with_definitions_oldest_first() {
    let (service, repository, _) = build_service(small_catalog());
    let user = member();
    repository.seed(earned_badge(&user, "ten_projects", 50, 9));
    repository.seed(earned_badge(&user, "first_project", 10, 2));
    let outsider = UserId::new("someone-else");
    repository.seed(earned_badge(&outsider, "first_comment", 5, 1));

    let views = service.get_user_badges(&user).expect("badges load");

    let order: Vec<&str> = views
        .iter()
        .map(|view| view.badge.badge_id.as_str())
        .collect();
    assert_eq!(order, vec!["first_project", "ten_projects"]);
    assert_eq!(views[1].definition.rarity, BadgeRarity::Rare);
}

#[test]
fn set_badge_display_toggles_visibility() {
    let (service, repository, _) = build_service(small_catalog());
    let user = member();
    repository.seed(earned_badge(&user, "first_project", 10, 2));
    let badge_id = BadgeId::new("first_project");

    let hidden = service
        .set_badge_display(&user, &badge_id, false)
        .expect("earned badge can be hidden");
    assert!(!hidden.is_displayed);

    let stored = repository
        .fetch(&user, &badge_id)
        .expect("fetch succeeds")
        .expect("badge still stored");
    assert!(!stored.is_displayed);
    assert_eq!(stored.points_awarded, 10);
}

#[test]
fn set_badge_display_rejects_unearned_badges() {
    let (service, _, _) = build_service(small_catalog());

    match service.set_badge_display(&member(), &BadgeId::new("ten_projects"), true) {
        Err(BadgeServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}
