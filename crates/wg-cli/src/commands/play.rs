//! Line-oriented play: numbered choices in, story text out.

use colored::Colorize;
use wg_core::Node;
use wg_engine::{EndingView, EngineError, StoryLibrary, Visit};

pub fn run(library: &StoryLibrary, key: &str) -> Result<(), String> {
    let mut session = library.open(key).map_err(|e| match e {
        EngineError::Validation(v) => {
            for edge in &v.broken {
                eprintln!("    {edge}");
            }
            super::broken_summary(&v.broken)
        }
        other => other.to_string(),
    })?;

    println!("  {}", session.story().title.bold());
    println!();

    loop {
        if let Some(ending) = session.current_ending() {
            print_ending(&ending);
            match super::prompt("  [r] play again, anything else quits > ")? {
                Some(answer) if answer.eq_ignore_ascii_case("r") => {
                    session.reset_to_start();
                    println!();
                    continue;
                }
                _ => break,
            }
        }

        let Some(node) = session.current_node() else {
            break;
        };
        print_node(node);
        if node.choices.is_empty() {
            println!("  {}", "(the story stops here)".dimmed());
            break;
        }

        let Some(answer) = super::prompt("  > ")? else {
            break;
        };
        if answer.eq_ignore_ascii_case("q") {
            break;
        }
        let index = match answer.parse::<usize>() {
            Ok(n) if n >= 1 => n - 1,
            _ => {
                println!("  Enter a choice number, or q to quit.");
                continue;
            }
        };

        match session.choose_index(index) {
            Ok(Visit::Ending {
                newly_unlocked: true,
                ..
            }) => println!("  {}", "New ending unlocked!".green().bold()),
            Ok(_) => {}
            Err(EngineError::Storage(e)) => {
                eprintln!("warning: progress was not saved: {e}");
            }
            Err(EngineError::ChoiceOutOfRange { .. }) => {
                println!("  There is no choice {answer}.");
            }
            Err(e) => return Err(e.to_string()),
        }
        println!();
    }

    let progress = session.endings();
    println!();
    println!(
        "  {} of {} endings unlocked",
        progress.unlocked_count(),
        progress.total()
    );
    Ok(())
}

fn print_node(node: &Node) {
    for line in node.text.lines() {
        println!("  {}", line.trim_end());
    }
    println!();
    for (i, choice) in node.choices.iter().enumerate() {
        println!("  [{}] {}", i + 1, choice.label);
    }
}

fn print_ending(ending: &EndingView) {
    println!(
        "  {}",
        format!("THE END #{}. {}", ending.ordinal, ending.name).bold()
    );
    println!();
    for line in ending.text.lines() {
        println!("  {}", line.trim_end());
    }
    println!();
}
