use crate::report::{run_rank, run_team, run_workstream_plan, RankArgs, TeamArgs, WorkstreamArgs};
use clap::{Parser, Subcommand};
use skill_finder::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "skill-finder",
    about = "Rank employees against inferred skill requirements and recommend covering teams",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank individual candidates for one set of requirements
    Rank(RankArgs),
    /// Recommend a small team that jointly covers the required skills
    Team(TeamArgs),
    /// Staff every workstream of a plan file concurrently
    Workstreams(WorkstreamArgs),
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Rank(args) => run_rank(args),
        Command::Team(args) => run_team(args),
        Command::Workstreams(args) => run_workstream_plan(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_team_overrides() {
        let cli = Cli::try_parse_from([
            "skill-finder",
            "team",
            "--requirements",
            "reqs.json",
            "--profile",
            "profile.json",
            "--max-team-size",
            "2",
            "--json",
        ])
        .expect("arguments parse");

        match cli.command {
            Command::Team(args) => {
                assert_eq!(args.max_team_size, Some(2));
                assert_eq!(args.pool_size, None);
                assert!(args.output.json);
            }
            other => panic!("expected team command, got {other:?}"),
        }
    }
}
