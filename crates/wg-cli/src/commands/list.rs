use comfy_table::{ContentArrangement, Table};
use wg_engine::StoryLibrary;

pub fn run(library: &StoryLibrary) -> Result<(), String> {
    let entries = library.list().map_err(|e| e.to_string())?;

    if entries.is_empty() {
        println!(
            "  No stories found in {}.",
            library.config().stories_dir.display()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Title", "Endings"]);

    for entry in &entries {
        let endings = match entry.progress {
            Some((unlocked, total)) => format!("{unlocked}/{total}"),
            None => "broken".to_string(),
        };
        table.add_row(vec![&entry.key, &entry.title, &endings]);
    }

    println!("{table}");
    println!();
    println!("  {} stories", entries.len());

    Ok(())
}
