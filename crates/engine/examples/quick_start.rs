//! Minimal in-memory walkthrough of the three ranking modes.
//!
//! Run with: cargo run --package engine --example quick_start

use catalog::{Catalog, ContentItem, ContentType, RatingMap, WatchHistoryEntry};
use engine::Recommender;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> anyhow::Result<()> {
    let catalog = Catalog::from_items(vec![
        entry(1, "Harbor Lights", "drama", 1, 6300),
        entry(2, "Quiet Streets", "drama", 1, 5700),
        entry(3, "Laugh Track", "comedy", 2, 1500),
        entry(4, "Night Shift", "thriller", 3, 6900),
        entry(5, "Open Mic", "comedy", 2, 1320),
    ])?;

    let now = 1_700_000_000;
    let history = vec![WatchHistoryEntry {
        content_id: 1,
        watched_at: now - 2 * 86_400,
        watch_time_pct: 100.0,
        completed: true,
    }];

    let recommender = Recommender::new();
    let mut rng = StdRng::seed_from_u64(42);

    let recs = recommender.recommend(
        &catalog,
        &history,
        &RatingMap::new(),
        None,
        3,
        now,
        &mut rng,
    )?;
    println!("Personalized:");
    for (rank, item) in recs.iter().enumerate() {
        println!("  {}. {}", rank + 1, item.title);
    }

    let similar = recommender.similar_to(3, &catalog, 2)?;
    println!("Similar to {:?}:", catalog.get(3).map(|i| &i.title));
    for item in &similar {
        println!("  - {}", item.title);
    }

    let trending = recommender.trending(&catalog, &history, 3);
    println!("Trending:");
    for item in &trending {
        println!("  - {}", item.title);
    }

    Ok(())
}

fn entry(id: u32, title: &str, genre: &str, category_id: u32, duration_secs: u32) -> ContentItem {
    ContentItem {
        id,
        title: title.to_string(),
        description: String::new(),
        category_id,
        genre: Some(genre.to_string()),
        tags: None,
        content_type: Some(ContentType::Movie),
        release_year: 2021,
        duration_secs: Some(duration_secs),
        premium: false,
        popularity: Some(60.0),
        content_rating: Some("PG".to_string()),
    }
}
