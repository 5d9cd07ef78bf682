//! Battleline - Entry Point
//!
//! Command-line report over a saved tournament plan: loads the snapshot,
//! rebuilds each round's board, and prints coherency status, violating
//! models with their nearest-neighbor distances, and base overlaps.

use std::path::PathBuf;

use clap::Parser;

use battleline::board::store::BoardState;
use battleline::core::error::Result;
use battleline::persist::PlannerSnapshot;
use battleline::rules::auras::AuraCatalog;

#[derive(Parser, Debug)]
#[command(name = "battleline", about = "Coherency report for saved tournament plans")]
struct Args {
    /// Saved planner snapshot (JSON)
    snapshot: PathBuf,

    /// Report only this round (default: every round in the snapshot)
    #[arg(long)]
    round: Option<String>,

    /// Aura range catalog (TOML)
    #[arg(long)]
    auras: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("battleline=info")
        .init();

    let args = Args::parse();

    let snapshot = PlannerSnapshot::load(&args.snapshot)?;
    let catalog = match &args.auras {
        Some(path) => AuraCatalog::load_from_toml(path)?,
        None => AuraCatalog::new(),
    };

    for (round, groups) in &snapshot.rounds {
        if let Some(only) = &args.round {
            if round != only {
                continue;
            }
        }
        let state = BoardState::from_groups(groups.clone());
        report_round(round, &state, &catalog);
    }

    Ok(())
}

fn report_round(round: &str, state: &BoardState, catalog: &AuraCatalog) {
    println!("\n=== Round: {} ===", round);

    if state.is_empty() {
        println!("  (no groups deployed)");
        return;
    }

    let mut incoherent = 0;
    for (unit_name, result) in state.all_unit_coherency() {
        if result.is_in_coherency {
            println!("  OK   {}", unit_name);
        } else {
            incoherent += 1;
            let mut violators: Vec<&str> = result
                .out_of_coherency_models
                .iter()
                .map(|s| s.as_str())
                .collect();
            violators.sort_unstable();
            println!("  FAIL {} - out of coherency: {}", unit_name, violators.join(", "));
        }
    }

    // Measured gaps for every model of a failed unit
    for group in state.iter() {
        let Some(result) = state.unit_coherency(&group.id) else {
            continue;
        };
        if result.is_in_coherency {
            continue;
        }
        for model in &group.models {
            let flagged = result.out_of_coherency_models.contains(model.id.as_str())
                || result
                    .out_of_coherency_models
                    .contains(&group.composite_id(&model.id));
            if !flagged {
                continue;
            }
            if let Some(nearest) = state.nearest_to(&group.id, &model.id) {
                for n in nearest {
                    println!(
                        "       {} {} -> {} {}: {:.1} mm ({}\")",
                        group.name, model.id, n.group.name, n.model.id, n.distance_mm, n.distance_inches
                    );
                }
            }
        }
    }

    let overlaps = state.overlapping_models();
    if !overlaps.is_empty() {
        let mut ids: Vec<&str> = overlaps.iter().map(|s| s.as_str()).collect();
        ids.sort_unstable();
        println!("  Overlapping bases: {}", ids.join(", "));
    }

    if !catalog.is_empty() {
        println!("  Aura zones: {}", state.aura_zones(catalog).len());
    }

    if incoherent == 0 && overlaps.is_empty() {
        println!("  Board is legal.");
    }
}
