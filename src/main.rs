use std::{
    path::PathBuf,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use clap::{Parser, ValueEnum};
use tracing::info;

use evoart_engine_rust::{
    engine::Engine,
    models::{bitmap::Bitmap, buffer::PixelBuffer, drawing::Drawing, genome::Genome},
    progress::{load_genome, load_target, print_inline, save_genome, save_png, SnapshotSink},
    settings::{Settings, MAX_IMAGE_HEIGHT, MAX_IMAGE_WIDTH},
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Encoding {
    /// Evolve a set of semi-transparent triangles.
    Triangles,
    /// Evolve the raw pixel bytes directly.
    Pixels,
}

#[derive(Parser, Debug)]
#[command(about = "Evolves an approximation of a target image.")]
struct Args {
    /// Image to approximate.
    target: PathBuf,

    /// Genome encoding to evolve.
    #[arg(long, value_enum, default_value = "triangles")]
    encoding: Encoding,

    /// Generator seed; defaults to the clock, so every unseeded run differs.
    #[arg(long)]
    seed: Option<u64>,

    /// Where the best render is written; the genome lands next to it as json.
    #[arg(long, default_value = "evolved.png")]
    out: PathBuf,

    /// Warm-start from a genome produced by an earlier run.
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Print snapshots into the terminal (iTerm2 inline images).
    #[arg(long)]
    preview: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let target = load_target(&args.target, MAX_IMAGE_WIDTH, MAX_IMAGE_HEIGHT)?;
    info!(width = target.width, height = target.height, "target loaded");
    if args.preview {
        print_inline(&target)?;
    }

    match args.encoding {
        Encoding::Triangles => run::<Drawing>(target, Settings::triangles(), &args),
        Encoding::Pixels => run::<Bitmap>(target, Settings::pixels(), &args),
    }
}

fn run<G: Genome>(target: PixelBuffer, settings: Settings, args: &Args) -> anyhow::Result<()> {
    let seed = args.seed.unwrap_or_else(clock_seed);
    info!(seed, "seeding population");
    let mut engine: Engine<G> = Engine::new(target, settings, seed);

    if let Some(path) = &args.resume {
        let genome: G = load_genome(path)?;
        engine.adopt(genome);
        info!(path = %path.display(), "resumed from saved genome");
    }

    let mut sink = SnapshotSink::new(args.out.clone(), args.preview);
    let started = Instant::now();
    let stats = engine.run(&mut sink)?;

    let best = engine.best();
    save_png(&args.out, best.pixels())?;
    save_genome(&sink.genome_path, best)?;
    if args.preview {
        print_inline(best.pixels())?;
    }
    info!(
        generations = stats.generations,
        evaluations = stats.evaluations,
        fitness = best.fitness(),
        elapsed_s = started.elapsed().as_secs(),
        "converged"
    );
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before the epoch")
        .as_nanos() as u64
}
