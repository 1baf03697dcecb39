use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use explainer_motion::{
    Composition, EvalThreading, Evaluator, FrameIndex, FrameRange, PaintList, Registry, Theme,
    eval_range_with_stats, fingerprint_frame, present,
};

#[derive(Parser, Debug)]
#[command(name = "explainer-motion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List built-in compositions with their metadata.
    List(ListArgs),
    /// Evaluate a single frame and print its state (or its paint calls) as JSON.
    Frame(FrameArgs),
    /// Evaluate a frame range and print per-frame fingerprints plus stats.
    Range(RangeArgs),
    /// Print the declaration of a composition as JSON.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Theme JSON overriding the default theme.
    #[arg(long)]
    theme: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct Source {
    /// Built-in composition id.
    #[arg(long, conflicts_with = "in_path", required_unless_present = "in_path")]
    comp: Option<String>,

    /// Composition declaration JSON.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Theme JSON for built-in compositions.
    #[arg(long)]
    theme: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: Source,

    /// Frame index; out-of-range values clamp.
    #[arg(long, allow_negative_numbers = true)]
    frame: i64,

    /// Print the paint calls instead of the frame state.
    #[arg(long)]
    paint: bool,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RangeArgs {
    #[command(flatten)]
    source: Source,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// End frame (exclusive); defaults to the composition duration.
    #[arg(long)]
    end: Option<u64>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    #[command(flatten)]
    source: Source,
}

#[derive(serde::Serialize)]
struct RangeReport {
    composition: String,
    stats: explainer_motion::EvalStats,
    fingerprints: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Range(args) => cmd_range(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn load_theme(path: Option<&PathBuf>) -> anyhow::Result<Theme> {
    match path {
        Some(p) => Theme::from_path(p).with_context(|| format!("load theme '{}'", p.display())),
        None => Ok(Theme::default()),
    }
}

fn load_composition(source: &Source) -> anyhow::Result<Arc<Composition>> {
    if let Some(path) = &source.in_path {
        let comp = Composition::from_path(path)
            .with_context(|| format!("load composition '{}'", path.display()))?;
        return Ok(Arc::new(comp));
    }
    let id = source
        .comp
        .as_deref()
        .context("either --comp or --in is required")?;
    let theme = load_theme(source.theme.as_ref())?;
    let registry = Registry::builtin(&theme).context("build built-in compositions")?;
    Ok(Arc::clone(registry.require(id)?))
}

fn write_json<T: serde::Serialize>(value: &T, out: Option<&PathBuf>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let file =
                File::create(path).with_context(|| format!("create '{}'", path.display()))?;
            let mut w = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut w, value).context("serialize json")?;
            w.flush().context("flush output")?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut w = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut w, value).context("serialize json")?;
            writeln!(w).context("write stdout")?;
        }
    }
    Ok(())
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let theme = load_theme(args.theme.as_ref())?;
    let registry = Registry::builtin(&theme).context("build built-in compositions")?;
    write_json(&registry.list(), None)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = load_composition(&args.source)?;
    let state = Evaluator::eval_frame(&comp, args.frame);
    if args.paint {
        let mut host = PaintList::new();
        present(&comp, &state, &mut host)?;
        write_json(&host, args.out.as_ref())
    } else {
        write_json(&state, args.out.as_ref())
    }
}

fn cmd_range(args: RangeArgs) -> anyhow::Result<()> {
    let comp = load_composition(&args.source)?;
    let end = args.end.unwrap_or(comp.duration_in_frames());
    let range = FrameRange::new(FrameIndex(args.start), FrameIndex(end))?;
    let threading = EvalThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let (frames, stats) = eval_range_with_stats(&comp, range, &threading)?;
    let report = RangeReport {
        composition: comp.id().to_owned(),
        stats,
        fingerprints: frames
            .iter()
            .map(|f| fingerprint_frame(f).to_string())
            .collect(),
    };
    write_json(&report, args.out.as_ref())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let comp = load_composition(&args.source)?;
    write_json(comp.def(), None)
}
