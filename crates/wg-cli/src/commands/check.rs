use wg_engine::StoryLibrary;

pub fn run(library: &StoryLibrary, key: &str) -> Result<(), String> {
    let story = super::load(library, key)?;

    let broken = wg_core::validate(&story);
    if !broken.is_empty() {
        super::print_broken(&story, &broken);
        return Err(super::broken_summary(&broken));
    }

    println!("  All checks passed for '{}'.", story.title);
    println!(
        "  {} nodes, {} choices, {} endings",
        story.node_count(),
        story.choice_count(),
        story.ending_count()
    );

    Ok(())
}
