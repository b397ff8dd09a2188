//! Command-line entry point for the APEX pipeline simulator.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use apex_sim::config::{OutputFormat, SimConfig};
use apex_sim::core::Cpu;
use apex_sim::isa::loader;

/// Which of the two top-level run modes the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Print every cycle's stage trace, then the final dump.
    Display,
    /// Run silently and print only the final dump.
    Simulate,
}

/// Output rendering, mirroring [`OutputFormat`] so it can be a CLI flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Plain text.
    Text,
    /// A single JSON object.
    Json,
}

/// A cycle-accurate functional simulator for the APEX teaching pipeline.
#[derive(Debug, Parser)]
#[command(name = "apex", version, about)]
struct Cli {
    /// Path to the APEX assembly program to load.
    input_file: PathBuf,

    /// Run mode: `display` traces every cycle, `simulate` runs silently.
    mode: Mode,

    /// Maximum number of cycles to run.
    cycle_budget: u64,

    /// Optional TOML configuration file overriding dump widths and
    /// output format.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured output format for the final dump.
    #[arg(long)]
    format: Option<Format>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("apex: {}", err);
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::new(),
    };
    if let Some(format) = cli.format {
        config.output_format = match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        };
    }

    let program = match loader::load_program(&cli.input_file) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("apex: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let trace = cli.mode == Mode::Display;
    let mut cpu = Cpu::new(program, cli.cycle_budget, trace);
    cpu.run();

    print_dump(&cpu, &config);

    ExitCode::SUCCESS
}

fn print_dump(cpu: &Cpu, config: &SimConfig) {
    let registers = cpu.register_snapshot(config.register_dump_width);
    let memory = cpu.memory_snapshot(config.memory_dump_width);

    match config.output_format {
        OutputFormat::Text => {
            println!();
            println!("(apex) >> Simulation Complete");
            println!("cycles executed : {}", cpu.cycle);
            println!("instructions retired : {}", cpu.retired);
            println!();
            println!("Architectural Register File");
            for (index, (value, valid)) in registers.iter().enumerate() {
                println!(
                    "R{:<2} | Value = {:<8} | Status = {}",
                    index,
                    value,
                    if *valid { "Valid" } else { "Invalid" }
                );
            }
            println!();
            println!("State of Data Memory");
            for (index, value) in memory.iter().enumerate() {
                println!("MEM[{}] | Value = {}", index * 4, value);
            }
        }
        OutputFormat::Json => {
            let registers_json: Vec<serde_json::Value> = registers
                .iter()
                .map(|(value, valid)| {
                    serde_json::json!({ "value": value, "valid": valid })
                })
                .collect();
            let dump = serde_json::json!({
                "cycles": cpu.cycle,
                "retired": cpu.retired,
                "registers": registers_json,
                "memory": memory,
            });
            match serde_json::to_string_pretty(&dump) {
                Ok(text) => println!("{}", text),
                Err(err) => eprintln!("apex: could not render JSON output: {}", err),
            }
        }
    }
}
