use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use venue_scout::models::Location;
use venue_scout::search::{self, catalog, ExtractOptions, PageButton, Paginator};
use venue_scout::services::PrayerTimesClient;
use venue_scout::Config;

#[derive(Parser)]
#[command(name = "venue-scout", version, about = "Wedding venue search toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Turn a free-text request into search filters
    Parse { phrase: String },
    /// Decode a query string into search filters
    Decode { query: String },
    /// Filter and paginate a JSON file of venues
    Search {
        /// Query string with the active filters
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        venues: PathBuf,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Write the selected page as JSON
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Fetch prayer times for a date (YYYY-MM-DD)
    Prayer {
        date: NaiveDate,
        #[arg(long, default_value_t = 36.8065)]
        lat: f64,
        #[arg(long, default_value_t = 10.1815)]
        lon: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let cli = Cli::parse();

    match cli.command {
        Command::Parse { phrase } => {
            let options = ExtractOptions {
                dedupe_features: config.dedupe_features,
            };
            let filters = search::parse_phrase(&phrase, options);
            info!("Extracted {} active filters", filters.active_count());
            println!("{}", serde_json::to_string_pretty(&filters)?);
            println!("?{}", search::serialize(&filters));
        }
        Command::Decode { query } => {
            let filters = search::deserialize(&query);
            println!("{}", serde_json::to_string_pretty(&filters)?);
            println!("canonical: ?{}", search::serialize(&filters));
        }
        Command::Search {
            query,
            venues,
            page,
            out,
        } => {
            let raw = tokio::fs::read_to_string(&venues)
                .await
                .with_context(|| format!("Failed to read {}", venues.display()))?;
            let locations: Vec<Location> =
                serde_json::from_str(&raw).context("Failed to parse venues JSON")?;

            let filters = search::deserialize(&query);
            let results = catalog::apply(&locations, &filters);
            let paginator = Paginator::new(config.page_size);
            let current = paginator.page(&results, page);

            info!(
                "🔎 {} of {} venues match, page {}/{}",
                results.len(),
                locations.len(),
                current.current_page,
                current.total_pages
            );

            for (i, location) in current.items.iter().enumerate() {
                let position = (page.saturating_sub(1)) * paginator.page_size() + i + 1;
                println!("{}. {} ({} DT)", position, location.title, location.price);
                println!("   {} · up to {} guests · ★ {:.1}", location.city, location.max_guests, location.rating);
                if !location.features.is_empty() {
                    println!("   Features: {}", location.features.join(", "));
                }
                println!();
            }

            if !current.buttons.is_empty() {
                let bar: Vec<String> = current
                    .buttons
                    .iter()
                    .map(|button| match button {
                        PageButton::Page(n) if *n == page => format!("[{}]", n),
                        PageButton::Page(n) => n.to_string(),
                        PageButton::Ellipsis => "…".to_string(),
                    })
                    .collect();
                println!("{}", bar.join(" "));
            }

            if let Some(path) = out {
                let json = serde_json::to_string_pretty(&current)?;
                tokio::fs::write(&path, json).await?;
                info!("💾 Saved page to {}", path.display());
            }
        }
        Command::Prayer { date, lat, lon } => {
            let client = PrayerTimesClient::new(&config)?;
            let timings = client.fetch_timings(date, lat, lon).await?;
            println!("{}", serde_json::to_string_pretty(&timings)?);
        }
    }

    Ok(())
}
