use clap::Parser;

use probinfer::space::split_event_list;
use probinfer::{Solver, SolverConfig};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Simple events, separated by commas or spaces.
    #[arg(long, value_name = "LIST", default_value = "A,B,C,D")]
    events: String,

    /// Expressions; exactly one must omit the `= p` annotation.
    /// Without any, the built-in example is solved.
    #[arg(value_name = "EXPR")]
    exprs: Vec<String>,

    /// Entries at or below this magnitude count as zero during elimination.
    #[clap(long, value_name = "FLOAT", default_value_t = SolverConfig::DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// More logging (`-v` for debug, `-vv` for trace).
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let level = match args.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    log::debug!("args = {:?}", args);

    let events = split_event_list(&args.events);
    let exprs = if args.exprs.is_empty() {
        vec![
            "(A and C) or B and D".to_string(),
            "B and D = 0.6".to_string(),
            "A and C and D = 0.2".to_string(),
            "A and B and C and D = 0.1".to_string(),
        ]
    } else {
        args.exprs
    };

    log::info!("events: {:?}", events);
    for expr in &exprs {
        log::info!("  {}", expr);
    }

    let solver = Solver::new(SolverConfig::default().with_tolerance(args.tolerance)?);
    let p = solver.solve(&events, &exprs)?;
    println!("{}", p);

    Ok(())
}
