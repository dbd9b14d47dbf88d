use wg_engine::StoryLibrary;

pub fn run(library: &StoryLibrary, keys: &[String], yes: bool) -> Result<(), String> {
    let mut titles = Vec::with_capacity(keys.len());
    for key in keys {
        if !library.story_path(key).is_file() {
            return Err(format!("story not found: {key}"));
        }
        let title = library
            .load(key)
            .map(|story| story.title)
            .unwrap_or_else(|_| key.clone());
        titles.push(title);
    }

    if !yes {
        let question = format!("  Erase player data for: {}? [y/N] ", titles.join(", "));
        let confirmed = super::prompt(&question)?
            .is_some_and(|a| a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes"));
        if !confirmed {
            println!("  Nothing erased.");
            return Ok(());
        }
    }

    library.clear(keys).map_err(|e| e.to_string())?;
    println!(
        "  Player data erased for {} stor{}.",
        keys.len(),
        if keys.len() == 1 { "y" } else { "ies" }
    );
    Ok(())
}
