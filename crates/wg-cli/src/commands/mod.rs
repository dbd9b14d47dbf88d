pub mod check;
pub mod info;
pub mod list;
pub mod play;
pub mod reset;

use std::io::{self, BufRead, Write};

use colored::Colorize;
use wg_core::{BrokenEdge, Story};
use wg_engine::StoryLibrary;

/// Load a story, turning load failures into CLI messages.
fn load(library: &StoryLibrary, key: &str) -> Result<Story, String> {
    library.load(key).map_err(|e| e.to_string())
}

/// Print the broken edges of a story to stderr.
fn print_broken(story: &Story, broken: &[BrokenEdge]) {
    eprintln!(
        "  {} '{}' has an error in its story graph.",
        "Story".red().bold(),
        story.title
    );
    eprintln!("  Broken paths:");
    for edge in broken {
        eprintln!("    {edge}");
    }
}

fn broken_summary(broken: &[BrokenEdge]) -> String {
    format!(
        "{} broken path{}",
        broken.len(),
        if broken.len() == 1 { "" } else { "s" }
    )
}

/// Print a prompt and read one line from stdin. `None` at end of input.
fn prompt(message: &str) -> Result<Option<String>, String> {
    print!("{message}");
    io::stdout()
        .flush()
        .map_err(|e| format!("cannot write to stdout: {e}"))?;
    read_line(&mut io::stdin().lock())
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>, String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(line.trim().to_string())),
        Err(e) => Err(format!("cannot read input: {e}")),
    }
}
