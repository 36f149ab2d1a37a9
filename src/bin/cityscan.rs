use clap::Parser;
use cityscan::{BoundingBox, CityLoader, Config, QueryEngine, StrategyKind};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Find the cities inside a latitude/longitude window", long_about = None)]
struct Args {
    /// City file (`name,latitude,longitude` lines, or a `.json` array)
    cities: PathBuf,

    #[arg(long, allow_negative_numbers = true)]
    lat_min: f64,

    #[arg(long, allow_negative_numbers = true)]
    lat_max: f64,

    #[arg(long, allow_negative_numbers = true)]
    lon_min: f64,

    #[arg(long, allow_negative_numbers = true)]
    lon_max: f64,

    /// single_axis, dual_axis or z_order (overrides the config file)
    #[arg(short, long)]
    strategy: Option<StrategyKind>,

    /// Run every strategy, report timings and check they agree
    #[arg(long, conflicts_with = "strategy")]
    compare: bool,

    /// JSON (or TOML with the `toml` feature) configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only print the number of matches
    #[arg(short = 'n', long)]
    count: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("cityscan=info"))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(strategy) = args.strategy {
        config = config.with_strategy(strategy);
    }

    let cities = CityLoader::from_config(&config).load(&args.cities)?;
    let bounds = BoundingBox::new(args.lat_min, args.lat_max, args.lon_min, args.lon_max);
    let engine = QueryEngine::new(config);

    if args.compare {
        let reports = engine.compare_strategies(&cities, &bounds)?;
        for report in &reports {
            println!(
                "{:<12} {:>8} matches {:>12.3?}",
                report.kind.name(),
                report.cities.len(),
                report.elapsed
            );
        }
        return Ok(());
    }

    let found = engine.find_cities(&cities, &bounds)?;
    if args.count {
        println!("{}", found.len());
    } else {
        for city in &found {
            println!("{}\t{}\t{}", city.name, city.latitude, city.longitude);
        }
        log::info!(
            "{} of {} cities matched using {}",
            found.len(),
            cities.len(),
            engine.strategy()
        );
    }

    Ok(())
}
