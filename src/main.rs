use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};

mod analysis;
mod catalog;
mod config;
mod error;
mod import;
mod models;
mod recommend;
mod risk;
mod schedule;
mod seed;
mod session;
mod store;

use models::RiskLevel;
use schedule::RandomBudget;
use session::FamilyFilter;
use store::SnapshotStore;

#[derive(Parser)]
#[command(name = "simulador-comunitario")]
#[command(about = "Community health diagnosis simulator for MAIS coursework", long_about = None)]
struct Cli {
    /// Directory holding saved sessions (defaults to $SIMULADOR_DATA_DIR or ./datos_usuarios)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new user session and print its id
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        course: String,
    },
    /// List every saved user session
    Users,
    /// Load the classroom demonstration data
    Seed {
        #[arg(long)]
        user: String,
    },
    /// Register families from a CSV file
    Import {
        #[arg(long)]
        user: String,
        #[arg(long)]
        csv: PathBuf,
    },
    /// List families by combined risk score
    Families {
        #[arg(long)]
        user: String,
        #[arg(long)]
        sector: Option<String>,
        #[arg(long, value_enum)]
        level: Option<RiskLevel>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show registered families against each sector's declared count
    Sectors {
        #[arg(long)]
        user: String,
    },
    /// Run the community diagnostic
    Analyze {
        #[arg(long)]
        user: String,
        /// Print the diagnostic as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest interventions and build a schedule
    Recommend {
        #[arg(long)]
        user: String,
        /// Seed the budget estimator for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Append the schedule to the session's intervention plan
        #[arg(long)]
        adopt: bool,
        /// Print the full bundle as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove every record from a session
    Reset {
        #[arg(long)]
        user: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = SnapshotStore::new(config::data_dir(cli.data_dir));

    match cli.command {
        Commands::Register {
            name,
            email,
            course,
        } => {
            let snapshot = store.create_user(&name, &email, &course)?;
            println!(
                "Registered {} with id {} (saved under {}).",
                snapshot.profile.name,
                snapshot.profile.user_id,
                store.dir().display()
            );
        }
        Commands::Users => {
            let users = store.list_users()?;
            if users.is_empty() {
                println!("No saved sessions in {}.", store.dir().display());
                return Ok(());
            }

            for user in users {
                println!(
                    "- {} {} <{}> {} (registered {})",
                    user.user_id,
                    user.name,
                    user.email,
                    user.course,
                    user.registered_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        Commands::Seed { user } => {
            let mut snapshot = store
                .load(&user)
                .with_context(|| format!("failed to load session {user}"))?;
            seed::seed(&mut snapshot.data)?;
            store.save(&snapshot)?;
            println!("Seed data inserted.");
        }
        Commands::Import { user, csv } => {
            let mut snapshot = store
                .load(&user)
                .with_context(|| format!("failed to load session {user}"))?;
            let inserted = import::import_csv(&mut snapshot.data, &csv)?;
            store.save(&snapshot)?;
            println!("Registered {inserted} families from {}.", csv.display());
        }
        Commands::Families {
            user,
            sector,
            level,
            limit,
        } => {
            let snapshot = store
                .load(&user)
                .with_context(|| format!("failed to load session {user}"))?;
            let families = snapshot
                .data
                .families_by_risk(&FamilyFilter { sector, level });

            if families.is_empty() {
                println!("No families match.");
                return Ok(());
            }

            println!("Families by risk score:");
            for family in families.iter().take(limit) {
                println!(
                    "- {} ({}, {}) social {} [{}], sanitary {} [{}]",
                    family.surname,
                    family.sector,
                    family.head.name,
                    family.risks.social.score,
                    family.risks.social.level.as_str(),
                    family.risks.sanitary.score,
                    family.risks.sanitary.level.as_str()
                );
            }
        }
        Commands::Sectors { user } => {
            let snapshot = store
                .load(&user)
                .with_context(|| format!("failed to load session {user}"))?;
            let coverage = snapshot.data.sector_coverage();

            if coverage.is_empty() {
                println!("No sectors registered.");
                return Ok(());
            }

            for row in coverage {
                println!(
                    "- {}: {} of {} families registered ({:.1}%), team lead {}",
                    row.sector,
                    row.registered,
                    row.declared,
                    row.coverage,
                    row.team_leader.as_deref().unwrap_or("unassigned")
                );
            }
        }
        Commands::Analyze { user, json } => {
            let snapshot = store
                .load(&user)
                .with_context(|| format!("failed to load session {user}"))?;
            let diagnostic = snapshot.data.diagnose();

            if json {
                println!("{}", serde_json::to_string_pretty(&diagnostic)?);
                return Ok(());
            }

            println!(
                "Community diagnostic across {} families:",
                snapshot.data.families.len()
            );
            if diagnostic.priorities.is_empty() {
                println!("No condition reaches the priority threshold.");
            }
            for priority in &diagnostic.priorities {
                println!(
                    "- {}: {} families ({:.1}%)",
                    priority.condition.as_str(),
                    priority.count,
                    priority.percentage
                );
            }
            if diagnostic.skipped_families > 0 {
                println!(
                    "Skipped {} incomplete family records.",
                    diagnostic.skipped_families
                );
            }
            if !diagnostic.vulnerable_sectors.is_empty() {
                println!(
                    "Vulnerable sectors: {}",
                    diagnostic.vulnerable_sectors.join(", ")
                );
            }
            if !diagnostic.strengths.is_empty() {
                println!("Community strengths: {}", diagnostic.strengths.join(", "));
            }
            if !diagnostic.resources.is_empty() {
                println!("Available resources: {}", diagnostic.resources.join(", "));
            }
        }
        Commands::Recommend {
            user,
            seed,
            adopt,
            json,
        } => {
            let mut snapshot = store
                .load(&user)
                .with_context(|| format!("failed to load session {user}"))?;
            let mut budget = match seed {
                Some(value) => RandomBudget::seeded(value),
                None => RandomBudget::new(),
            };
            let today = Utc::now().date_naive();
            let bundle = recommend::personalized_recommendations(&snapshot.data, today, &mut budget);

            if json {
                println!("{}", serde_json::to_string_pretty(&bundle)?);
            } else if bundle.schedule.is_empty() {
                println!("No interventions suggested for this community.");
            } else {
                println!("Suggested schedule:");
                for item in &bundle.schedule {
                    println!(
                        "- {} ({}, priority {}) {} to {}, {}, budget ${}",
                        item.name,
                        item.kind.as_str(),
                        item.priority.as_str(),
                        item.start,
                        item.end,
                        item.frequency,
                        item.budget
                    );
                }
            }

            if adopt && !bundle.schedule.is_empty() {
                let adopted = recommend::adopt_schedule(&mut snapshot.data, &bundle.schedule);
                store.save(&snapshot)?;
                println!("Added {adopted} activities to the intervention plan.");
            }
        }
        Commands::Reset { user } => {
            let mut snapshot = store
                .load(&user)
                .with_context(|| format!("failed to load session {user}"))?;
            if snapshot.data.is_empty() {
                println!("Session {user} is already empty.");
                return Ok(());
            }
            snapshot.data.reset();
            store.save(&snapshot)?;
            println!("Session {user} cleared.");
        }
    }

    Ok(())
}
