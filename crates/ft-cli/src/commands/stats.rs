use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(catalog: Option<&Path>, build_path: &Path) -> Result<(), String> {
    let (rules, build) = super::load(catalog, build_path)?;
    let sheet = rules.snapshot(&build).map_err(|e| e.to_string())?;

    println!(
        "  {} [{} {}, {}]",
        sheet.name.bold(),
        sheet.class,
        sheet.level,
        sheet.origin.dimmed()
    );
    let attributes: Vec<String> = sheet
        .attributes
        .iter()
        .map(|(attr, score)| format!("{attr} {score}"))
        .collect();
    println!("  {}", attributes.join("  "));
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Value"]);

    let stats = &sheet.stats;
    for (label, pool) in stats.pools() {
        table.add_row(vec![label.to_string(), pool.to_string()]);
    }
    table.add_row(vec!["Defense".to_string(), stats.defense.to_string()]);
    table.add_row(vec!["RD".to_string(), stats.damage_reduction.to_string()]);
    table.add_row(vec!["Speed".to_string(), format!("{}m", stats.speed)]);

    println!("{table}");

    let conditional: Vec<String> = sheet
        .powers
        .iter()
        .filter(|p| !p.conditions.is_empty())
        .map(|p| format!("{} ({})", p.name, p.conditions.join(", ")))
        .collect();
    if !conditional.is_empty() {
        println!();
        println!("  {} {}", "situational:".dimmed(), conditional.join("; "));
    }

    Ok(())
}
