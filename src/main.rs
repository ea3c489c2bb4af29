use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use qcdl::harness::{self, HarnessConfig, Summary};
use qcdl::{SimulationConfig, Simulator, compile};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Compile and simulate QCDL programs.
#[derive(Parser)]
#[command(name = "qcdl", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Exact mode: print the final state and the full outcome distribution.
    Run {
        file: PathBuf,
        /// Also print the circuit diagram.
        #[arg(long)]
        diagram: bool,
    },
    /// Stochastic mode: aggregate independent single-sample runs.
    Sample {
        file: PathBuf,
        #[arg(short = 'n', long, default_value_t = 1024)]
        shots: usize,
        #[arg(short, long)]
        seed: Option<u64>,
        /// Run trials on the current thread only.
        #[arg(long)]
        serial: bool,
    },
    /// Check annotated programs against their `?` expectations.
    Check {
        /// Files or directories of `.qcdl` programs.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[arg(short, long, default_value_t = 0.05)]
        tolerance: f64,
    },
}

fn read_circuit(path: &Path) -> Result<qcdl::Circuit> {
    let source = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    compile(&source).with_context(|| format!("[QCDL] compilation failed in {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { file, diagram } => {
            let circuit = read_circuit(&file)?;
            if diagram {
                println!("{}\n", circuit);
            }
            let result = Simulator::new().run_exact(&circuit).context("[QCDL] simulation failed")?;
            println!("{}", result);
        }
        Commands::Sample { file, shots, seed, serial } => {
            let circuit = read_circuit(&file)?;
            let mut config = SimulationConfig::new().with_shots(shots).with_parallel(!serial);
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            let result = Simulator::with_config(config).sample(&circuit).context("[QCDL] simulation failed")?;
            println!("{}", result);
        }
        Commands::Check { paths, tolerance } => {
            let config = HarnessConfig::default().with_relative_tolerance(tolerance);
            let mut summary = Summary::default();
            for program in harness::collect_programs(&paths)? {
                let name = program.display();
                match harness::check_file(&program, &config) {
                    Ok(report) if report.passed() => {
                        println!("[TEST] Test '{}' passed.", name);
                        summary.record(true);
                    }
                    Ok(report) => {
                        println!("[TEST] Test '{}' failed.", name);
                        println!("{}", report);
                        summary.record(false);
                    }
                    Err(err) => {
                        println!("[TEST] Test '{}' failed: {}", name, err);
                        summary.record(false);
                    }
                }
            }
            println!("\n{}", summary);
            if summary.failed() > 0 {
                bail!("{} of {} programs failed", summary.failed(), summary.total);
            }
        }
    }
    Ok(())
}
