mod error;
mod extract;
mod fetch;
mod record;
mod sources;

use clap::{Parser, Subcommand};
use scraper::Html;

use crate::error::ExtractError;
use crate::extract::resultset;
use crate::fetch::Fetcher;
use crate::sources::{bio, career, games, player, schedule};

#[derive(Parser)]
#[command(name = "nba_scraper", about = "Player stats extraction from NBA web sources")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile facts from the basketball-reference player page
    Bio {
        #[arg(long, default_value = bio::PLAYER_URL)]
        url: String,
    },
    /// Career + current-season stat lines from the nbcsports stats table
    Career {
        #[arg(long, default_value = career::STATS_URL)]
        url: String,
    },
    /// Most recent game lines from the basketball-reference game log
    Recent {
        #[arg(long, default_value = games::GAMELOG_URL)]
        url: String,
        /// Max games to return
        #[arg(short = 'n', long, default_value_t = games::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Cleaned profile card from the stats API (commonplayerinfo)
    Info {
        #[arg(long, default_value_t = player::DEFAULT_PLAYER_ID)]
        player_id: u32,
    },
    /// Career totals and per-season aggregation (playercareerstats)
    Totals {
        #[arg(long, default_value_t = player::DEFAULT_PLAYER_ID)]
        player_id: u32,
    },
    /// Upcoming games for a team from the league schedule
    Schedule {
        /// Team name, e.g. "Lakers"
        #[arg(short, long)]
        team: String,
        /// Max games to return
        #[arg(short = 'n', long, default_value_t = schedule::DEFAULT_LIMIT)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) => {
            // One structured error for the whole run, never a partial record.
            eprintln!("{}", e.report());
            std::process::exit(1);
        }
    }
}

async fn run(command: Commands) -> Result<serde_json::Value, ExtractError> {
    let fetcher = Fetcher::new()?;

    let value = match command {
        Commands::Bio { url } => {
            let body = fetcher.get_text(&url).await?;
            let doc = Html::parse_document(&body);
            serde_json::to_value(bio::extract(&doc)?)?
        }
        Commands::Career { url } => {
            let body = fetcher.get_text(&url).await?;
            let doc = Html::parse_document(&body);
            serde_json::to_value(career::extract(&doc)?)?
        }
        Commands::Recent { url, limit } => {
            let body = fetcher.get_text(&url).await?;
            let doc = Html::parse_document(&body);
            serde_json::to_value(games::extract(&doc, limit)?)?
        }
        Commands::Info { player_id } => {
            let body = fetcher.get_text(&player::info_url(player_id)).await?;
            let payload = resultset::parse_payload(&body)?;
            serde_json::to_value(player::extract_info(&payload)?)?
        }
        Commands::Totals { player_id } => {
            let body = fetcher.get_text(&player::career_url(player_id)).await?;
            let payload = resultset::parse_payload(&body)?;
            serde_json::to_value(player::extract_totals(&payload)?)?
        }
        Commands::Schedule { team, limit } => {
            let body = fetcher.get_text(schedule::SCHEDULE_URL).await?;
            let payload = schedule::parse_payload(&body)?;
            let games = schedule::upcoming(&payload, &team, chrono::Utc::now(), limit);
            serde_json::json!({ "team": team, "games": games })
        }
    };

    Ok(value)
}
