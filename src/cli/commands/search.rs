use std::sync::Arc;

use crate::config::Config;
use crate::services::{RecordingNavigator, SearchController, SearchVariant, SubmitOutcome};
use crate::state::SharedState;

pub async fn cmd_search(config: &Config, query: &str, pick: Option<usize>) -> anyhow::Result<()> {
    let shared = SharedState::new(config.clone())?;
    let navigator = Arc::new(RecordingNavigator::new());
    let controller = SearchController::new(SearchVariant::Navbar, shared.lookup.clone(), navigator);

    if controller.submit(query).await == SubmitOutcome::Ignored {
        println!("Nothing to search for.");
        return Ok(());
    }

    let session = controller.snapshot().await;
    if session.is_failed() {
        anyhow::bail!("Search failed for '{}'", query.trim());
    }

    if session.results.is_empty() {
        println!("No movies found for \"{}\"", query.trim());
        println!("Try a different search term");
        return Ok(());
    }

    println!();
    println!("Search Results for \"{}\":", session.query);
    println!("{:-<60}", "");

    for (index, result) in session.results.iter().enumerate() {
        let year = result
            .year()
            .map_or_else(|| "N/A".to_string(), |y| y.to_string());
        println!("{:>3}. {} ({})", index + 1, result.title, year);
        println!(
            "     ID: {} | Rating: {}",
            result.imdb_id,
            result.rating_label()
        );
    }
    println!();

    match pick {
        Some(n) => {
            let Some(result) = n.checked_sub(1).and_then(|i| session.results.get(i)) else {
                anyhow::bail!("--pick must be between 1 and {}", session.results.len());
            };
            let destination = controller.select_result(result).await;
            println!("→ {destination}");
        }
        None => println!("Pick one with: marquee search \"{}\" --pick <N>", query.trim()),
    }

    Ok(())
}
