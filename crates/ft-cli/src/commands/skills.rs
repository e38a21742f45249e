use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(catalog: Option<&Path>, build_path: &Path) -> Result<(), String> {
    let (rules, build) = super::load(catalog, build_path)?;
    let sheet = rules.snapshot(&build).map_err(|e| e.to_string())?;

    if sheet.skills.is_empty() {
        println!("  No trained skills.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Skill", "Grade", "Sources", "Bonus"]);

    for line in &sheet.skills {
        let sources: Vec<String> = line.sources.iter().map(ToString::to_string).collect();
        let name = if line.is_locked() {
            line.name.clone()
        } else {
            format!("{} *", line.name)
        };
        table.add_row(vec![
            name,
            line.grade.to_string(),
            sources.join(", "),
            format!("{:+}", line.total()),
        ]);
    }

    println!("{table}");
    println!();

    let free = sheet
        .skills
        .iter()
        .filter(|line| line.uses_free_slot())
        .count();
    println!(
        "  {} skills, {} of {} free slots used (* = removable)",
        sheet.skills.len(),
        free,
        sheet.free_slots
    );

    Ok(())
}
