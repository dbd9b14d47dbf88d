use colored::Colorize;
use serde::Serialize;
use wg_core::{PathBounds, PathError};
use wg_engine::{EndingView, EngineError, StoryLibrary};

#[derive(Serialize)]
struct InfoReport<'a> {
    key: &'a str,
    title: &'a str,
    nodes: usize,
    unlocked: usize,
    total: usize,
    paths: Option<PathBounds>,
    endings: Vec<EndingView>,
}

pub fn run(library: &StoryLibrary, key: &str, json: bool) -> Result<(), String> {
    let story = super::load(library, key)?;

    let broken = wg_core::validate(&story);
    if !broken.is_empty() {
        super::print_broken(&story, &broken);
        return Err(super::broken_summary(&broken));
    }

    let progress = library.progress(key, &story);
    let paths = match library.path_bounds(&story) {
        Ok(bounds) => Some(bounds),
        Err(EngineError::Path(PathError::VisitLimitExceeded { limit, .. })) => {
            tracing::warn!(story = key, limit, "path analysis gave up");
            None
        }
        Err(e) => return Err(e.to_string()),
    };

    if json {
        let report = InfoReport {
            key,
            title: &story.title,
            nodes: story.node_count(),
            unlocked: progress.unlocked_count(),
            total: progress.total(),
            paths,
            endings: progress.endings,
        };
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    println!("  {}", story.title.bold());
    println!(
        "  {} of {} endings unlocked in this story",
        progress.unlocked_count(),
        progress.total()
    );
    match paths {
        Some(bounds) if bounds.any_reachable() => {
            println!("  shortest path: {} choices", bounds.min);
            println!("  longest path:  {} choices", bounds.max);
        }
        Some(_) => println!("  {}", "no ending is reachable from the start".yellow()),
        None => println!("  {}", "path lengths unknown (story too large)".dimmed()),
    }
    println!();

    for ending in &progress.endings {
        let line = format!("#{}. {}", ending.ordinal, ending.name);
        if ending.unlocked {
            println!("  {}", line.green());
        } else {
            println!("  {}", line.dimmed());
        }
    }

    Ok(())
}
