//! CLI frontend for the Feitiço character-build rules engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use ft_core::{Attribute, ResourceAttribute, TechniqueCategory, TrainingGrade};

#[derive(Parser)]
#[command(
    name = "ft",
    about = "Feitiço: check and inspect character builds",
    version,
    propagate_version = true
)]
struct Cli {
    /// Reference catalog JSON file (default: the built-in standard catalog)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// Log rule decisions to stderr (overrides FT_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a build and report every error and warning
    Check {
        /// Build JSON file
        build: PathBuf,
    },

    /// Show derived pools and combat stats
    Stats {
        /// Build JSON file
        build: PathBuf,
    },

    /// List trained skills with their sources and bonuses
    Skills {
        /// Build JSON file
        build: PathBuf,
    },

    /// List every power and whether the build may take it
    Powers {
        /// Build JSON file
        build: PathBuf,

        /// Only show powers the build is eligible for
        #[arg(short, long)]
        eligible: bool,
    },

    /// List the contents of the reference catalog
    Catalog {
        /// Print the catalog as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Write a template build file for a new character
    New {
        /// Character name
        name: String,

        /// Class id
        #[arg(long, default_value = "combatente")]
        class: String,

        /// Origin id
        #[arg(long, default_value = "lutador")]
        origin: String,

        /// Output path (default: `<name>.json`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Attribute score, e.g. `for=3` (repeatable)
        #[arg(long = "set", value_name = "ATTR=N", value_parser = commands::new::parse_score)]
        attributes: Vec<(Attribute, u8)>,

        /// Attribute that feeds cursed energy (intelecto or presenca)
        #[arg(long, value_parser = commands::new::parse_resource)]
        resource: Option<ResourceAttribute>,

        /// Skill grade, e.g. `Luta=graduado` (repeatable)
        #[arg(
            long = "grade",
            value_name = "SKILL=GRADE",
            value_parser = commands::new::parse_grade
        )]
        grades: Vec<(String, TrainingGrade)>,

        /// Technique grade, e.g. `base=1` (repeatable)
        #[arg(
            long = "technique",
            value_name = "CATEGORY=N",
            value_parser = commands::new::parse_technique
        )]
        techniques: Vec<(TechniqueCategory, u8)>,
    },
}

fn main() {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    let catalog = cli.catalog.as_deref();
    let result = match cli.command {
        Commands::Check { build } => commands::check::run(catalog, &build),
        Commands::Stats { build } => commands::stats::run(catalog, &build),
        Commands::Skills { build } => commands::skills::run(catalog, &build),
        Commands::Powers { build, eligible } => commands::powers::run(catalog, &build, eligible),
        Commands::Catalog { json } => commands::catalog::run(catalog, json),
        Commands::New {
            name,
            class,
            origin,
            output,
            attributes,
            resource,
            grades,
            techniques,
        } => {
            let seed = commands::new::Seed {
                attributes,
                resource,
                grades,
                techniques,
            };
            commands::new::run(catalog, &name, &class, &origin, output.as_deref(), seed)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
