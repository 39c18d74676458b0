use anyhow::{Context, Result};
use catalog::{Catalog, ContentId, ContentItem, RatingMap, loader};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::Recommender;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// StreamRecs - Content Recommendation Engine
#[derive(Parser)]
#[command(name = "stream-recs")]
#[command(about = "Content recommendations from catalog and watch-history snapshots", long_about = None)]
struct Cli {
    /// Path to the catalog snapshot (JSON array of content items)
    #[arg(short, long, default_value = "data/catalog.json")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get personalized recommendations for a viewer
    Recommend {
        /// Path to the viewer's watch-history snapshot
        #[arg(long)]
        history: PathBuf,

        /// Optional path to the viewer's rating snapshot
        #[arg(long)]
        ratings: Option<PathBuf>,

        /// Content ids to exclude (e.g. an existing watchlist)
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<ContentId>,

        /// Number of recommendations to return
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Seed for the cold-start shuffle (reproducible output)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List entries similar to one catalog entry
    Similar {
        /// Target content id
        #[arg(long)]
        id: ContentId,

        /// Number of entries to return
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Rank entries by view count over a history pool
    Trending {
        /// Path to the pooled watch-history snapshot (may span viewers)
        #[arg(long)]
        history: PathBuf,

        /// Number of entries to return
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading catalog from {}...", cli.catalog.display());
    let start = Instant::now();
    let catalog = loader::load_catalog(&cli.catalog).context("Failed to load catalog snapshot")?;
    println!(
        "{} Loaded {} entries in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Recommend {
            history,
            ratings,
            exclude,
            limit,
            seed,
        } => handle_recommend(&catalog, &history, ratings.as_deref(), &exclude, limit, seed)?,
        Commands::Similar { id, limit } => handle_similar(&catalog, id, limit)?,
        Commands::Trending { history, limit } => handle_trending(&catalog, &history, limit)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    catalog: &Catalog,
    history_path: &std::path::Path,
    ratings_path: Option<&std::path::Path>,
    exclude: &[ContentId],
    limit: usize,
    seed: Option<u64>,
) -> Result<()> {
    let history = loader::load_watch_history(history_path)
        .context("Failed to load watch-history snapshot")?;
    let ratings = match ratings_path {
        Some(path) => loader::load_ratings(path).context("Failed to load rating snapshot")?,
        None => RatingMap::new(),
    };
    let exclusions: HashSet<ContentId> = exclude.iter().copied().collect();

    let now = unix_now()?;
    let mut rng: StdRng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::rng().next_u64()),
    };

    let start = Instant::now();
    let recommender = Recommender::new();
    let recs = recommender.recommend(
        catalog,
        &history,
        &ratings,
        if exclusions.is_empty() {
            None
        } else {
            Some(&exclusions)
        },
        limit,
        now,
        &mut rng,
    )?;

    println!(
        "{} ({} watched, {} rated, {:?})",
        "Recommendations:".bold().blue(),
        history.len(),
        ratings.len(),
        start.elapsed()
    );
    print_items(&recs);
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(catalog: &Catalog, id: ContentId, limit: usize) -> Result<()> {
    let recommender = Recommender::new();
    let similar = recommender.similar_to(id, catalog, limit)?;

    let target = catalog.get(id).map(|i| i.title.as_str()).unwrap_or("?");
    println!("{}", format!("Similar to '{}':", target).bold().blue());
    print_items(&similar);
    Ok(())
}

/// Handle the 'trending' command
fn handle_trending(catalog: &Catalog, history_path: &std::path::Path, limit: usize) -> Result<()> {
    let pool = loader::load_watch_history(history_path)
        .context("Failed to load pooled watch-history snapshot")?;

    let recommender = Recommender::new();
    let trending = recommender.trending(catalog, &pool, limit);

    println!(
        "{} (pool of {} viewings)",
        "Trending:".bold().blue(),
        pool.len()
    );
    print_items(&trending);
    Ok(())
}

/// Helper to format and print a ranked list of entries
fn print_items(items: &[ContentItem]) {
    for (rank, item) in items.iter().enumerate() {
        let genre = item.genre.as_deref().unwrap_or("-");
        println!(
            "{}. {} ({}) [{}]{}",
            (rank + 1).to_string().green(),
            item.title,
            item.release_year,
            genre,
            if item.premium { " premium".yellow() } else { "".normal() }
        );
    }
}

/// Current unix time in seconds; the engine itself never reads the clock
fn unix_now() -> Result<i64> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the unix epoch")?;
    Ok(now.as_secs() as i64)
}
