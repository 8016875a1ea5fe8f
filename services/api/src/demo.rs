use crate::infra::{
    configured_catalog, parse_list, InMemoryBadgeNotifier, InMemoryBadgeRepository,
};
use clap::Args;
use collabhub::badges::{
    ActivitySnapshot, BadgeCatalog, BadgeService, BadgeStats, TriggerAction, UserBadge,
};
use collabhub::compatibility::{
    CandidateProfile, CompatibilityEngine, CompatibilityFactor, CompatibilityResult, Profile,
    RelationshipContext,
};
use collabhub::config::AppConfig;
use collabhub::error::AppError;
use collabhub::UserId;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Comma-separated skills of the first member
    #[arg(long)]
    pub(crate) a_skills: String,
    /// Comma-separated interests of the first member
    #[arg(long)]
    pub(crate) a_interests: Option<String>,
    /// Comma-separated skills of the second member
    #[arg(long)]
    pub(crate) b_skills: String,
    /// Comma-separated interests of the second member
    #[arg(long)]
    pub(crate) b_interests: Option<String>,
    /// The members have collaborated before
    #[arg(long)]
    pub(crate) past_collaboration: bool,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct BadgeCatalogArgs {
    /// Hide retired badges
    #[arg(long)]
    pub(crate) active_only: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BadgeEvaluateArgs {
    /// JSON file containing an activity snapshot
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Member the snapshot belongs to
    #[arg(long, default_value = "cli-user")]
    pub(crate) user: String,
    /// Action that triggered the check (e.g. project_created)
    #[arg(long, default_value = "daily_login")]
    pub(crate) trigger: TriggerAction,
    /// Print the awards and statistics as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct EvaluationReport<'a> {
    user_id: &'a UserId,
    trigger: TriggerAction,
    awarded: &'a [UserBadge],
    stats: &'a BadgeStats,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the collaborator matching portion of the demo.
    #[arg(long)]
    pub(crate) skip_matching: bool,
    /// Skip the badge awarding portion of the demo.
    #[arg(long)]
    pub(crate) skip_badges: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = CompatibilityEngine::new(config.scoring.weights);

    let a = profile_from_args(&args.a_skills, args.a_interests.as_deref());
    let b = profile_from_args(&args.b_skills, args.b_interests.as_deref());
    let context = RelationshipContext {
        past_collaboration: args.past_collaboration,
    };

    let result = engine.score(&a, &b, Some(&context));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render_compatibility(&result);
    }
    Ok(())
}

pub(crate) fn run_badge_catalog(args: BadgeCatalogArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = configured_catalog(&config.badges);
    render_catalog(&catalog, args.active_only);
    Ok(())
}

pub(crate) fn run_badge_evaluation(args: BadgeEvaluateArgs) -> Result<(), AppError> {
    let BadgeEvaluateArgs {
        snapshot,
        user,
        trigger,
        json,
    } = args;

    let config = AppConfig::load()?;
    let raw = std::fs::read_to_string(&snapshot)?;
    let snapshot: ActivitySnapshot = serde_json::from_str(&raw)?;

    let service = badge_service(&config);
    let user = UserId::new(user);
    let awarded = service.check_and_award_badges(&user, trigger, &snapshot)?;
    let stats = service.get_badge_stats(&user)?;

    if json {
        let report = EvaluationReport {
            user_id: &user,
            trigger,
            awarded: &awarded,
            stats: &stats,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Badge evaluation for {user} (trigger {trigger})");
    render_awards(&service, &awarded);
    render_stats(&stats);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    println!("Collaboration scoring core demo");

    if !args.skip_matching {
        let engine = CompatibilityEngine::new(config.scoring.weights);
        let requester = Profile::new(["React", "Node"], ["Web", "AI"]);
        let candidates = demo_candidates();

        println!("\nCollaborator matches for a React/Node developer interested in Web and AI");
        let ranked = engine.rank_candidates(&requester, &candidates);
        for (rank, candidate) in ranked.iter().enumerate() {
            println!(
                "{}. {} -> {}% match (skills {:.0} pts, interests {:.0} pts, history {:.0} pts)",
                rank + 1,
                candidate.user_id,
                candidate.match_percentage,
                candidate.result.weighted(CompatibilityFactor::SkillOverlap),
                candidate.result.weighted(CompatibilityFactor::InterestOverlap),
                candidate.result.weighted(CompatibilityFactor::PastCollaboration),
            );
        }
    }

    if args.skip_badges {
        return Ok(());
    }

    println!("\nBadge journey");
    let repository = Arc::new(InMemoryBadgeRepository::default());
    let notifier = Arc::new(InMemoryBadgeNotifier::default());
    let service = BadgeService::new(
        repository,
        notifier.clone(),
        configured_catalog(&config.badges),
    );
    let user = UserId::new("demo-member");

    for (trigger, snapshot) in demo_journey() {
        let awarded = service.check_and_award_badges(&user, trigger, &snapshot)?;
        println!("- {trigger}: {} new badge(s)", awarded.len());
        render_awards(&service, &awarded);
    }

    // A repeated trigger with the same snapshot must not award anything new.
    if let Some((trigger, snapshot)) = demo_journey().pop() {
        let repeat = service.check_and_award_badges(&user, trigger, &snapshot)?;
        println!("- {trigger} (repeated): {} new badge(s)", repeat.len());
    }

    render_stats(&service.get_badge_stats(&user)?);
    println!("Notifications queued: {}", notifier.events().len());
    Ok(())
}

fn badge_service(
    config: &AppConfig,
) -> BadgeService<InMemoryBadgeRepository, InMemoryBadgeNotifier> {
    BadgeService::new(
        Arc::new(InMemoryBadgeRepository::default()),
        Arc::new(InMemoryBadgeNotifier::default()),
        configured_catalog(&config.badges),
    )
}

fn profile_from_args(skills: &str, interests: Option<&str>) -> Profile {
    Profile::new(parse_list(skills), parse_list(interests.unwrap_or_default()))
}

fn demo_candidates() -> Vec<CandidateProfile> {
    vec![
        CandidateProfile {
            user_id: UserId::new("maya"),
            profile: Profile::new(["React", "Node", "MongoDB"], ["Web", "ML"]),
            context: Some(RelationshipContext {
                past_collaboration: true,
            }),
        },
        CandidateProfile {
            user_id: UserId::new("omar"),
            profile: Profile::new(["Go"], ["Systems"]),
            context: None,
        },
        CandidateProfile {
            user_id: UserId::new("li"),
            profile: Profile::new(["React", "TypeScript"], ["AI", "Design"]),
            context: None,
        },
    ]
}

fn demo_journey() -> Vec<(TriggerAction, ActivitySnapshot)> {
    let signup = ActivitySnapshot {
        account_age_days: 1,
        profile_completed: true,
        ..ActivitySnapshot::default()
    };
    let first_project = ActivitySnapshot {
        projects_created: 1,
        ideas_shared: 1,
        ..signup.clone()
    };
    let collaborating = ActivitySnapshot {
        comments_posted: 12,
        collaboration_requests_sent: 5,
        collaborations_accepted: 2,
        account_age_days: 45,
        ..first_project.clone()
    };

    vec![
        (TriggerAction::ProfileUpdated, signup),
        (TriggerAction::ProjectCreated, first_project),
        (TriggerAction::CollaborationAccepted, collaborating),
    ]
}

fn render_compatibility(result: &CompatibilityResult) {
    println!("Compatibility score: {}/100", result.score);
    for (factor, contribution) in &result.breakdown {
        println!(
            "- {}: raw {:.2}, contributes {:.1} pts",
            factor.label(),
            contribution.raw,
            contribution.weighted
        );
    }
}

fn render_catalog(catalog: &BadgeCatalog, active_only: bool) {
    println!("Badge catalog ({} active)", catalog.total_active());
    for badge in catalog.all() {
        if active_only && !badge.is_active {
            continue;
        }
        let retired = if badge.is_active { "" } else { " [retired]" };
        println!(
            "- {} ({}) | {} | {} | {} pts | {}{}",
            badge.name,
            badge.id,
            badge.category.label(),
            badge.rarity.label(),
            badge.points_awarded,
            badge.criteria.describe(),
            retired
        );
    }
}

fn render_awards(
    service: &BadgeService<InMemoryBadgeRepository, InMemoryBadgeNotifier>,
    awarded: &[UserBadge],
) {
    let catalog = service.engine().catalog();
    for badge in awarded {
        let name = catalog
            .get(&badge.badge_id)
            .map(|definition| definition.name.as_str())
            .unwrap_or("unknown badge");
        println!(
            "  * {} (+{} pts, earned {})",
            name,
            badge.points_awarded,
            badge.earned_at.format("%Y-%m-%d %H:%M UTC")
        );
    }
}

fn render_stats(stats: &BadgeStats) {
    println!(
        "Badges: {}/{} earned ({}% complete), {} points",
        stats.earned_badges,
        stats.total_badges,
        stats.completion_percentage,
        stats.total_points
    );
    for (category, count) in &stats.badges_by_category {
        println!("  - {}: {}", category.label(), count);
    }
    for (rarity, count) in &stats.badges_by_rarity {
        println!("  - {}: {}", rarity.label(), count);
    }
}
