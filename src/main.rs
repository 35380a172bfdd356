use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_santa::utils::logging::init_tracing;
use secret_santa::{
    compose_message, deliver, load_draw_record, save_draw_record, ConsoleNotifier,
    DerangementSampler, DrawConfig, DrawRecord, FileNotifier, SamplerConfig,
};
use std::path::PathBuf;
use std::time::Instant;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Secret Santa draws without repeats across gift rounds",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a draw from a TOML file and hand each participant their assignment
    Draw {
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
        /// Write one <name>.txt per participant here instead of printing everything
        #[arg(short, long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Keep a binary record of the draw for later `reveal`
        #[arg(short, long, value_name = "FILE")]
        record: Option<PathBuf>,
        /// Overrides the seed from the config file
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Sample raw derangements over 0..n and print them
    Derange {
        #[arg(short, long)]
        n: usize,
        #[arg(short, long, default_value_t = 1)]
        rounds: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, help = "Give up after this many candidates (default: never)")]
        max_attempts: Option<u64>,
        #[arg(long, help = "Print rounds and sampling stats as JSON")]
        json: bool,
    },
    /// Show one participant's message from a saved draw record
    Reveal {
        #[arg(short, long, value_name = "FILE")]
        record: PathBuf,
        #[arg(short, long)]
        name: String,
    },
}

fn main() {
    init_tracing("info");
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Draw {
            config,
            out_dir,
            record,
            seed,
        } => run_draw(config, out_dir, record, seed)?,
        Commands::Derange {
            n,
            rounds,
            seed,
            max_attempts,
            json,
        } => run_derange(n, rounds, seed, max_attempts, json)?,
        Commands::Reveal { record, name } => run_reveal(record, name)?,
    }
    Ok(())
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn run_draw(
    config_path: PathBuf,
    out_dir: Option<PathBuf>,
    record_path: Option<PathBuf>,
    seed: Option<u64>,
) -> CliResult<()> {
    let config = DrawConfig::load(&config_path)?;
    let santa = config.secret_santa()?;
    let seed = seed.or(config.seed);
    let mut rng = seeded_rng(seed);

    let start = Instant::now();
    let assignments = santa.draw(&config.sampler(), &mut rng)?;
    println!(
        "Drew {} gift round(s) for {} participants in {:.2?}",
        santa.gifts(),
        santa.roster().len(),
        start.elapsed()
    );

    let delivered = match &out_dir {
        Some(dir) => deliver(&assignments, config.gift_labels(), &mut FileNotifier::new(dir))?,
        None => deliver(
            &assignments,
            config.gift_labels(),
            &mut ConsoleNotifier::stdout(),
        )?,
    };
    if let Some(dir) = &out_dir {
        println!("{delivered} message(s) written to {}", dir.display());
    }

    if let Some(path) = record_path {
        let record = DrawRecord::new(assignments, config.gift_labels.clone(), seed);
        save_draw_record(&path, &record)?;
        println!("Draw record saved to {}", path.display());
    }
    Ok(())
}

fn run_derange(
    n: usize,
    rounds: usize,
    seed: Option<u64>,
    max_attempts: Option<u64>,
    json: bool,
) -> CliResult<()> {
    let sampler = DerangementSampler::new(SamplerConfig { max_attempts });
    let mut rng = seeded_rng(seed);
    let sampled = sampler.sample(n, rounds, None, &mut rng)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sampled)?);
        return Ok(());
    }

    for (round, permutation) in sampled.permutations.iter().enumerate() {
        println!("Round {}: {permutation}", round + 1);
    }
    println!(
        "candidates = {}, restarts = {}, collisions rejected = {}",
        sampled.stats.candidates,
        sampled.stats.derangement_restarts,
        sampled.stats.collision_rejections
    );
    Ok(())
}

fn run_reveal(record_path: PathBuf, name: String) -> CliResult<()> {
    let record = load_draw_record(&record_path)?;
    let assignment = record
        .assignment(&name)
        .ok_or_else(|| format!("{name} is not part of the draw in {}", record_path.display()))?;
    let message = compose_message(
        &assignment.gifter,
        &assignment.giftees,
        record.gift_labels.as_deref(),
    )?;
    println!("{}", message.body);
    Ok(())
}
