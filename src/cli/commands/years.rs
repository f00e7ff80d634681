use crate::config::Config;
use crate::models::MenuSource;
use crate::state::SharedState;

pub async fn cmd_years(config: &Config) -> anyhow::Result<()> {
    let shared = SharedState::new(config.clone())?;
    let menu = shared.menu.ensure_loaded().await;

    if menu.source == MenuSource::Fallback {
        println!("Years endpoint unavailable, showing the static menu.");
    }

    if menu.decades.is_empty() {
        let years: Vec<String> = menu.years.iter().map(ToString::to_string).collect();
        println!("{}", years.join(" "));
    } else {
        for group in &menu.decades {
            let years: Vec<String> = group.years.iter().map(ToString::to_string).collect();
            println!("{:<6} {}", group.decade, years.join(" "));
        }
    }

    let progress = &menu.progress;
    println!();
    println!(
        "Scanned {}/{} movies, {} with a release year",
        progress.processed_movies, progress.total_movies, progress.found_movies
    );

    Ok(())
}
