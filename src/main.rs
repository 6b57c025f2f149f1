use anyhow::Context;
use colored::*;
use org_repo_ranker::cli::{self, Cli, EXIT_OK};
use org_repo_ranker::config::Settings;
use org_repo_ranker::github::GitHubClient;
use org_repo_ranker::{RankerError, Ranker};
use tracing::debug;
use tracing_subscriber::EnvFilter;

// Requests are issued one at a time, so a single-threaded runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(exit) => {
            if exit.code == EXIT_OK {
                print!("{}", exit.message);
            } else {
                eprint!("{}", exit.message);
            }
            std::process::exit(exit.code);
        }
    };

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "❌".red(), e);
        eprintln!();
        eprint!("{}", cli::usage());

        let code = e
            .downcast_ref::<RankerError>()
            .map(RankerError::exit_code)
            .unwrap_or(cli::EXIT_INVALID_ARGUMENTS);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;
    let client = GitHubClient::new(settings, cli.token.clone())?;
    let ranker = Ranker::new(client);

    let kind = cli.mode.kind();
    debug!(org = %cli.org, %kind, count = cli.count, "Ranking repositories");

    let ranking = ranker
        .rank(&cli.org, cli.count, kind)
        .await
        .with_context(|| format!("Unable to rank repositories of {}", cli.org))?;

    for skipped in &ranking.skipped {
        eprintln!(
            "{} Skipped {}: {}",
            "⚠️".yellow(),
            skipped.name.bold(),
            skipped.reason.dimmed()
        );
    }

    print!("{}", cli::format_results(&ranking.results));
    Ok(())
}
