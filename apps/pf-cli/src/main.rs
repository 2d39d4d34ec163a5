use clap::{Parser, Subcommand};
use pf_app::{AppError, AppResult, RunRequest, project_service, run_service, runtime_compile};
use pf_network::{ComponentSnapshot, Snapshot};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "PipeFlow CLI - hand-wired liquid piping networks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// List systems in a project
    Systems {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Show the settled state of a system before any action
    Show {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// System ID to compile
        system_id: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Report SI units (JSON only)
        #[arg(long)]
        si: bool,
    },
    /// Apply a scenario and/or commands, then print the final state
    Run {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// System ID to run
        system_id: String,
        /// Scenario to apply first
        #[arg(long)]
        scenario: Option<String>,
        /// Command line to apply after the scenario (repeatable)
        #[arg(short, long = "command")]
        commands: Vec<String>,
        /// File with one command per line
        #[arg(long)]
        script: Option<PathBuf>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Report SI units (JSON only)
        #[arg(long)]
        si: bool,
        /// Store the final snapshot in this directory
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// List stored snapshots for a system
    Records {
        /// Snapshot store directory
        store_dir: PathBuf,
        /// System ID to list records for
        system_id: String,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Systems { project_path } => cmd_systems(&project_path),
        Commands::Show {
            project_path,
            system_id,
            json,
            si,
        } => cmd_show(&project_path, &system_id, Output { json, si }),
        Commands::Run {
            project_path,
            system_id,
            scenario,
            commands,
            script,
            json,
            si,
            save,
        } => {
            let mut lines = Vec::new();
            if let Some(path) = script {
                lines.extend(std::fs::read_to_string(path)?.lines().map(str::to_string));
            }
            lines.extend(commands);
            let request = RunRequest {
                project_path: &project_path,
                system_id: &system_id,
                scenario_id: scenario.as_deref(),
                commands: &lines,
                store_dir: save,
            };
            cmd_run(&request, Output { json, si })
        }
        Commands::Records {
            store_dir,
            system_id,
        } => cmd_records(&store_dir, &system_id),
    }
}

#[derive(Clone, Copy)]
struct Output {
    json: bool,
    si: bool,
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_systems(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let systems = project_service::list_systems(&project);

    if systems.is_empty() {
        println!("No systems found in project");
    } else {
        println!("Systems in project:");
        for sys in systems {
            println!(
                "  {} - {} ({} components, {} connections)",
                sys.id, sys.name, sys.component_count, sys.connection_count
            );
            if !sys.scenario_ids.is_empty() {
                println!("    scenarios: {}", sys.scenario_ids.join(", "));
            }
        }
    }
    Ok(())
}

fn cmd_show(project_path: &Path, system_id: &str, output: Output) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let system = project_service::get_system(&project, system_id)?;
    let runtime = runtime_compile::compile_system(system)?;
    print_snapshot(&runtime.network.snapshot(), output)
}

fn cmd_run(request: &RunRequest, output: Output) -> AppResult<()> {
    let response = run_service::run_system(request)?;

    if !output.json {
        for step in &response.steps {
            println!(
                "{} {} -> {} downstream",
                step.action,
                step.component,
                step.updated.len()
            );
        }
    }
    print_snapshot(&response.record.snapshot, output)?;

    if let Some(path) = &response.saved_to {
        eprintln!("✓ Saved {} to {}", response.record.record_id, path.display());
    }
    Ok(())
}

fn cmd_records(store_dir: &Path, system_id: &str) -> AppResult<()> {
    let records = run_service::list_records(store_dir, system_id)?;

    if records.is_empty() {
        println!("No stored snapshots for system: {}", system_id);
    } else {
        println!("Stored snapshots for system '{}':", system_id);
        for record in records {
            let origin = record.scenario.as_deref().unwrap_or("-");
            println!(
                "  {} ({}) scenario {}, {} commands",
                record.record_id,
                record.timestamp,
                origin,
                record.commands.len()
            );
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Results(format!("Failed to serialize snapshot: {}", e)))?;
    println!("{}", text);
    Ok(())
}

fn print_snapshot(snapshot: &Snapshot, output: Output) -> AppResult<()> {
    match (output.json, output.si) {
        (true, true) => return print_json(&snapshot.to_si()),
        (true, false) => return print_json(snapshot),
        (false, true) => eprintln!("--si applies to JSON output only"),
        (false, false) => {}
    }

    for (name, component) in &snapshot.components {
        match component {
            ComponentSnapshot::Tank {
                level_ft,
                pressure_psi,
                outlet_flow_gpm,
            } => println!(
                "{:<12} Tank      level {:.2} ft, {:.2} psi, {:.2} gpm",
                name, level_ft, pressure_psi, outlet_flow_gpm
            ),
            ComponentSnapshot::Valve {
                valve_type,
                position,
                inlet_pressure_psi,
                outlet_pressure_psi,
                outlet_flow_gpm,
                ..
            } => println!(
                "{:<12} {:<9} {:>3}%, {:.2} -> {:.2} psi, {:.2} gpm",
                name,
                valve_type,
                position,
                inlet_pressure_psi,
                outlet_pressure_psi,
                outlet_flow_gpm
            ),
            ComponentSnapshot::Pump {
                pump_type,
                speed_rpm,
                outlet_pressure_psi,
                flow_gpm,
                power_kw,
                ..
            } => println!(
                "{:<12} {:<9} {} rpm, {:.2} psi, {:.2} gpm, {:.2} kW",
                name, pump_type, speed_rpm, outlet_pressure_psi, flow_gpm, power_kw
            ),
        }
    }
    Ok(())
}
