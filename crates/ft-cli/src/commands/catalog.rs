use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(catalog: Option<&Path>, json: bool) -> Result<(), String> {
    let rules = super::load_rules(catalog)?;
    let catalog = rules.catalog();

    if json {
        let out = catalog.to_json_pretty().map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    println!("  {} [school skill: {}]", catalog.name.bold(), catalog.school_skill);
    println!();

    let mut classes = Table::new();
    classes.set_content_arrangement(ContentArrangement::Dynamic);
    classes.set_header(vec!["Class", "Name", "Fixed skills", "Free slots", "Tracks"]);
    for class in &catalog.classes {
        let tracks: Vec<&str> = catalog
            .tracks_for_class(&class.id)
            .map(|t| t.id.as_str())
            .collect();
        classes.add_row(vec![
            class.id.clone(),
            class.name.clone(),
            class.fixed_skills.join(", "),
            class.free_skill_slots.to_string(),
            tracks.join(", "),
        ]);
    }
    println!("{classes}");

    let mut origins = Table::new();
    origins.set_content_arrangement(ContentArrangement::Dynamic);
    origins.set_header(vec!["Origin", "Name", "Fixed skills", "Choice"]);
    for origin in &catalog.origins {
        let choice = origin.skill_choice.as_ref().map_or_else(
            || "—".to_string(),
            |g| format!("{} of {}", g.choose, g.options.join(", ")),
        );
        origins.add_row(vec![
            origin.id.clone(),
            origin.name.clone(),
            origin.fixed_skills.join(", "),
            choice,
        ]);
    }
    println!("{origins}");

    let mut clans = Table::new();
    clans.set_content_arrangement(ContentArrangement::Dynamic);
    clans.set_header(vec!["Clan", "Name", "Privileged"]);
    for clan in &catalog.clans {
        clans.add_row(vec![
            clan.id.clone(),
            clan.name.clone(),
            (if clan.privileged { "yes" } else { "no" }).to_string(),
        ]);
    }
    println!("{clans}");
    println!();

    println!(
        "  {} classes, {} origins, {} tracks, {} clans, {} powers, {} skills",
        catalog.classes.len(),
        catalog.origins.len(),
        catalog.tracks.len(),
        catalog.clans.len(),
        catalog.powers.len(),
        catalog.skills.len()
    );

    Ok(())
}
