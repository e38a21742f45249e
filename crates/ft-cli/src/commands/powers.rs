use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use ft_mechanics::powers::power_allowance;

pub fn run(catalog: Option<&Path>, build_path: &Path, eligible_only: bool) -> Result<(), String> {
    let (rules, build) = super::load(catalog, build_path)?;
    let state = rules.build_state(&build).map_err(|e| e.to_string())?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Kind", "Status", "Missing"]);

    let mut shown = 0;
    for power in &rules.catalog().powers {
        let selected = build.powers.contains(&power.id);
        let eligibility = rules
            .evaluate_power(&power.id, &state, &build.powers)
            .map_err(|e| e.to_string())?;
        if eligible_only && !eligibility.eligible {
            continue;
        }

        let status = match (selected, eligibility.eligible) {
            (true, true) => "selected".green().to_string(),
            (true, false) => "selected (invalid)".red().to_string(),
            (false, true) => "eligible".to_string(),
            (false, false) => "locked".dimmed().to_string(),
        };
        table.add_row(vec![
            power.id.clone(),
            power.name.clone(),
            power.kind.to_string(),
            status,
            eligibility.reasons.join("; "),
        ]);
        shown += 1;
    }

    if shown == 0 {
        println!("  No powers found.");
        return Ok(());
    }

    println!("{table}");
    println!();
    println!(
        "  {} of {} powers selected at level {}",
        build.powers.len(),
        power_allowance(build.level),
        build.level
    );

    Ok(())
}
