use crate::infra::bootstrap;
use clap::Args;
use serde::Serialize;
use skill_finder::error::AppError;
use skill_finder::matching::input::{profile_from_path, requirements_from_path};
use skill_finder::matching::workstreams::plan_from_reader;
use skill_finder::matching::{
    run_workstreams, EmployeeMatch, RankOptions, TeamOptions, TeamRun, WorkstreamOutcome,
    WorkstreamReport,
};
use std::fs::File;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct OutputArgs {
    /// Print machine-readable JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Skill requirements document (JSON)
    #[arg(long)]
    pub(crate) requirements: PathBuf,
    /// Complexity profile document (JSON)
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Roster directory of CSV exports or a SQLite database file (defaults to ROSTER_PATH)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Number of candidates to return (defaults to MATCH_TOP_N)
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
    /// Only return candidates meeting every required target
    #[arg(long)]
    pub(crate) strict: bool,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Args, Debug)]
pub(crate) struct TeamArgs {
    /// Skill requirements document (JSON)
    #[arg(long)]
    pub(crate) requirements: PathBuf,
    /// Complexity profile document (JSON)
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Roster directory of CSV exports or a SQLite database file (defaults to ROSTER_PATH)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Ranked candidates offered to the team assembler (defaults to MATCH_POOL_SIZE)
    #[arg(long)]
    pub(crate) pool_size: Option<usize>,
    /// Upper bound on team members (defaults to MATCH_MAX_TEAM_SIZE)
    #[arg(long)]
    pub(crate) max_team_size: Option<usize>,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Args, Debug)]
pub(crate) struct WorkstreamArgs {
    /// Workstream plan document (JSON)
    #[arg(long)]
    pub(crate) plan: PathBuf,
    /// Roster directory of CSV exports or a SQLite database file (defaults to ROSTER_PATH)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Workstreams staffed at the same time (defaults to MATCH_WORKSTREAM_CONCURRENCY)
    #[arg(long)]
    pub(crate) concurrency: Option<usize>,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        requirements,
        profile,
        roster,
        top_n,
        strict,
        output,
    } = args;

    let (config, service) = bootstrap(roster)?;
    let requirements = requirements_from_path(requirements)?;
    let profile = profile_from_path(profile)?;

    let options = RankOptions {
        top_n: top_n.unwrap_or(config.engine.top_n),
        strict_required: strict,
    };
    let ranked = service.rank_candidates(&requirements, &profile, options)?;

    if output.json {
        return print_json(&ranked);
    }

    println!("Candidate ranking");
    if !requirements.outcome_reasoning.is_empty() {
        println!("Outcome: {}", requirements.outcome_reasoning);
    }
    println!(
        "Complexity: {} ({:.2}) | top {} | strict {}",
        profile.complexity_label.label(),
        profile.complexity_score,
        options.top_n,
        if strict { "on" } else { "off" }
    );
    if ranked.is_empty() {
        println!("No qualifying candidates.");
        return Ok(());
    }
    for (position, candidate) in ranked.iter().enumerate() {
        render_candidate(position + 1, candidate, true);
    }

    Ok(())
}

pub(crate) fn run_team(args: TeamArgs) -> Result<(), AppError> {
    let TeamArgs {
        requirements,
        profile,
        roster,
        pool_size,
        max_team_size,
        output,
    } = args;

    let (config, service) = bootstrap(roster)?;
    let requirements = requirements_from_path(requirements)?;
    let profile = profile_from_path(profile)?;

    let defaults = config.engine.team_options();
    let options = TeamOptions {
        pool_size: pool_size.unwrap_or(defaults.pool_size),
        max_team_size: max_team_size.unwrap_or(defaults.max_team_size),
    };
    let run = service.recommend_team(&requirements, &profile, options)?;

    if output.json {
        return print_json(&run);
    }

    println!("Team recommendation");
    render_team_run(&run);
    Ok(())
}

pub(crate) async fn run_workstream_plan(args: WorkstreamArgs) -> Result<(), AppError> {
    let WorkstreamArgs {
        plan,
        roster,
        concurrency,
        output,
    } = args;

    let (config, service) = bootstrap(roster)?;
    let requests = plan_from_reader(File::open(plan)?)?;
    let concurrency = concurrency.unwrap_or(config.engine.concurrency);

    let reports = run_workstreams(
        service,
        requests,
        config.engine.team_options(),
        concurrency,
    )
    .await;

    if output.json {
        return print_json(&reports);
    }

    println!("Workstream staffing ({} workstreams)", reports.len());
    for report in &reports {
        render_workstream(report);
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_candidate(position: usize, candidate: &EmployeeMatch, with_skills: bool) {
    println!(
        "{position}. {} <{}> | {} | team {} | score {:.3} | required {:.0}% | preferred {:.0}%",
        candidate.formal_name,
        candidate.email_address,
        candidate.position_title,
        candidate.team.as_deref().unwrap_or("-"),
        candidate.total_score,
        candidate.coverage_required * 100.0,
        candidate.coverage_preferred * 100.0
    );
    if !with_skills {
        return;
    }
    for detail in &candidate.matched_skills {
        let level = detail
            .employee_level
            .map(|level| level.label())
            .unwrap_or("none");
        println!(
            "   - {} [{}]: {} vs target {}{} | match {:.2}{}",
            detail.skill,
            detail.kind.label(),
            level,
            detail.target_level.label(),
            if detail.default_target { " (default)" } else { "" },
            detail.match_ratio,
            if detail.verified { " | verified" } else { "" }
        );
    }
}

fn render_team_run(run: &TeamRun) {
    println!(
        "Complexity: {} ({:.2}) - {}",
        run.complexity.label.label(),
        run.complexity.score,
        run.complexity.reasoning
    );
    println!("Required skills:");
    for line in &run.requirements.required {
        println!(
            "  - {} (target {}, weight {:.2})",
            line.skill,
            line.target_level.label(),
            line.weight
        );
    }
    if !run.requirements.preferred.is_empty() {
        println!("Preferred skills:");
        for line in &run.requirements.preferred {
            println!("  - {} (target {})", line.skill, line.target_level.label());
        }
    }

    if !run.candidate_pool.is_empty() {
        println!("\nCandidate pool (top {}):", run.candidate_pool.len());
        for (position, candidate) in run.candidate_pool.iter().enumerate() {
            render_candidate(position + 1, candidate, false);
        }
    }

    println!("\nRecommended team:");
    if run.team.is_empty() {
        println!("  (no one adds required coverage)");
    }
    for member in &run.team {
        let covers: Vec<String> = member
            .required_coverage_set()
            .into_iter()
            .map(|key| key.to_string())
            .collect();
        println!(
            "  - {} ({}) covers {}",
            member.formal_name,
            member.position_title,
            if covers.is_empty() {
                "-".to_string()
            } else {
                covers.join(", ")
            }
        );
    }
    println!(
        "Coverage {:.0}% | team score {:.3}",
        run.team_coverage_required * 100.0,
        run.team_score
    );
    if !run.missing_required.is_empty() {
        let missing: Vec<&str> = run.missing_required.iter().map(|key| key.as_str()).collect();
        println!("Missing: {}", missing.join(", "));
    }
}

fn render_workstream(report: &WorkstreamReport) {
    println!("\n== {} ==", report.workstream.name);
    if !report.workstream.goal.is_empty() {
        println!("Goal: {}", report.workstream.goal);
    }
    match &report.outcome {
        WorkstreamOutcome::Completed { run } => render_team_run(run),
        WorkstreamOutcome::Failed { reason } => println!("Failed: {reason}"),
    }
}
