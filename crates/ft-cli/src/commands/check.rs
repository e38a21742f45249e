use std::path::Path;

use colored::Colorize;
use ft_mechanics::validate::has_errors;

pub fn run(catalog: Option<&Path>, build_path: &Path) -> Result<(), String> {
    let (rules, build) = super::load(catalog, build_path)?;
    let issues = rules.validate(&build);

    for issue in &issues {
        let level = if issue.is_error {
            "error".red().bold()
        } else {
            "warning".yellow().bold()
        };
        println!("  {level}: {}: {}", issue.section.bold(), issue.message);
    }

    let errors = issues.iter().filter(|i| i.is_error).count();
    let warnings = issues.len() - errors;

    if has_errors(&issues) {
        println!();
        return Err(format!(
            "'{}' has {} error{}, {} warning{}",
            build.name,
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        ));
    }

    if warnings > 0 {
        println!();
        println!(
            "  '{}' is legal but unfinished: {} warning{}",
            build.name,
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    } else {
        println!("  All checks passed for '{}'.", build.name);
    }

    Ok(())
}
