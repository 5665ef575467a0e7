use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgMatches, Command};
use env_logger::Builder;
use log::LevelFilter;
use tsp_trace_core::{Algorithm, City, SolverConfig};
use tsp_trace_validation::{run, sweep, SweepOptions};

fn cli() -> Command {
    Command::new("trace-tool")
        .about("Generates and cross-checks TSP solver traces")
        .arg_required_else_help(true)
        .arg(arg!(-v --verbose "Log debug output to stderr").global(true))
        .subcommand(
            Command::new("trace")
                .about("Prints the step trace for a city list as JSON")
                .arg(
                    arg!(--cities <CITIES> "Path to a JSON array of {id, name, x, y}")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--algorithm [ALGORITHM] "held-karp or nearest-neighbor")
                        .default_value("held-karp"),
                )
                .arg(
                    arg!(--config [CONFIG] "Path to a solver config JSON file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(arg!(--pretty "Pretty-print the JSON")),
        )
        .subcommand(
            Command::new("sweep")
                .about("Compares Held-Karp, nearest neighbor and brute force on random instances")
                .arg(
                    arg!(--"min-cities" [N] "Smallest instance size")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("2"),
                )
                .arg(
                    arg!(--"max-cities" [N] "Largest instance size")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("8"),
                )
                .arg(
                    arg!(--instances [COUNT] "Instances per size")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("5"),
                )
                .arg(
                    arg!(--seed [SEED] "Base seed")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("0"),
                )
                .arg(
                    arg!(--"brute-force-max" [N] "Skip brute force above this size")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("9"),
                ),
        )
        .subcommand(
            Command::new("sample")
                .about("Prints a built-in sample city set")
                .arg(
                    arg!(--cities [COUNT] "4 or 5")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("4"),
                ),
        )
}

fn init_logger(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    let mut builder = Builder::new();
    builder.filter_level(level).parse_default_env();
    if let Err(e) = builder.try_init() {
        eprintln!("logger init failed: {e}");
    }
}

fn main() {
    let matches = cli().get_matches();
    init_logger(matches.get_flag("verbose"));

    let result = match matches.subcommand() {
        Some(("trace", sub_m)) => trace(sub_m),
        Some(("sweep", sub_m)) => sweep_rows(sub_m),
        Some(("sample", sub_m)) => sample(sub_m),
        _ => Err(anyhow!("Invalid subcommand")),
    };
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn required<T: Clone + Send + Sync + 'static>(m: &ArgMatches, name: &str) -> Result<T> {
    m.get_one::<T>(name).cloned().ok_or_else(|| anyhow!("missing --{name}"))
}

fn trace(m: &ArgMatches) -> Result<()> {
    let cities_path: PathBuf = required(m, "cities")?;
    let algorithm: Algorithm = required::<String>(m, "algorithm")?.parse()?;
    let config = match m.get_one::<PathBuf>("config") {
        Some(path) => SolverConfig::load(path).with_context(|| format!("reading {}", path.display()))?,
        None => SolverConfig::default(),
    };

    let raw = std::fs::read_to_string(&cities_path)
        .with_context(|| format!("reading {}", cities_path.display()))?;
    let cities = City::list_from_json(&raw)?;
    log::info!("trace: {} cities with {}", cities.len(), algorithm.slug());

    let trace = run(algorithm, &cities, &config);
    let json = if m.get_flag("pretty") {
        serde_json::to_string_pretty(&trace)?
    } else {
        serde_json::to_string(&trace)?
    };
    println!("{json}");
    Ok(())
}

fn sweep_rows(m: &ArgMatches) -> Result<()> {
    let options = SweepOptions {
        min_cities: required(m, "min-cities")?,
        max_cities: required(m, "max-cities")?,
        instances_per_size: required(m, "instances")?,
        seed: required(m, "seed")?,
        brute_force_max: required(m, "brute-force-max")?,
        config: SolverConfig::default(),
    };
    if options.min_cities > options.max_cities {
        return Err(anyhow!("--min-cities must not exceed --max-cities"));
    }

    let rows = sweep(&options);
    let inconsistent = rows.iter().filter(|r| !r.is_consistent(1e-6)).count();
    for row in &rows {
        println!("{}", serde_json::to_string(row)?);
    }
    if inconsistent > 0 {
        return Err(anyhow!("{inconsistent} inconsistent instance(s)"));
    }
    Ok(())
}

fn sample(m: &ArgMatches) -> Result<()> {
    let cities = match required::<usize>(m, "cities")? {
        4 => City::sample_four(),
        5 => City::sample_five(),
        other => return Err(anyhow!("no sample with {other} cities (use 4 or 5)")),
    };
    println!("{}", serde_json::to_string_pretty(&cities)?);
    Ok(())
}
