//! Seamweave CLI - texture synthesis on UV islands.
//!
//! Usage: seamweave <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `seamweave --help` for available commands.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use clap::{Parser, Subcommand};
use serde::Deserialize;

use seamweave::algo::pipeline::{synthesize_textures_on_uvs_with_progress, SynthesisOptions};
use seamweave::algo::rasterize::{island_bounding_box, rasterize_islands, UvIsland};
use seamweave::algo::snapshot::{snapshot_channel, SnapshotSink};
use seamweave::algo::Progress;
use seamweave::engine::{EdgePair, QuiltEngine, UvEdge};
use seamweave::io::{self, SynthesisRecord};
use seamweave::texture::Texture;

/// Pending previews the snapshot writer may fall behind by before snapshots are dropped.
const SNAPSHOT_BACKLOG: usize = 4;

#[derive(Parser)]
#[command(name = "seamweave")]
#[command(author, version, about = "Texture synthesis on UV islands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill the UV islands of a record and repair its seams
    Run {
        /// Input record (.bin, .rec or .json)
        record: PathBuf,

        /// Output image file
        output: PathBuf,

        /// Skip the island fill stage
        #[arg(long)]
        skip_fill: bool,

        /// Skip the seam repair stage
        #[arg(long)]
        skip_seams: bool,

        /// Stop seam repair after this edge index (0 processes every edge)
        #[arg(short, long, default_value = "0")]
        edge_iterations: usize,

        /// Random seed for patch selection (default: system entropy)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Engine debug level
        #[arg(short, long, default_value = "0")]
        debug_level: u32,

        /// Directory for numbered preview images
        #[arg(long)]
        snapshots: Option<PathBuf>,

        /// Use single-threaded patch search (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },

    /// Display record information
    Info {
        /// Input record
        record: PathBuf,
    },

    /// Write the island mask of a record as an image
    Mask {
        /// Input record
        record: PathBuf,

        /// Output image file
        output: PathBuf,
    },

    /// Build a record from images and a JSON layout
    Pack {
        /// Target image
        #[arg(long)]
        target: PathBuf,

        /// Example image
        #[arg(long)]
        example: PathBuf,

        /// JSON file with `patch_ratio`, `libsize`, `island_uvs` and `edge_infos`
        #[arg(long)]
        layout: PathBuf,

        /// Output record (.bin, .rec or .json)
        output: PathBuf,
    },
}

/// UV layout and patch parameters read by `pack`.
#[derive(Deserialize)]
struct Layout {
    patch_ratio: f64,
    libsize: usize,
    island_uvs: Vec<UvIsland>,
    #[serde(default)]
    edge_infos: Vec<EdgePair<UvEdge>>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Run {
            record,
            output,
            skip_fill,
            skip_seams,
            edge_iterations,
            seed,
            debug_level,
            snapshots,
            sequential,
        } => {
            let options = SynthesisOptions::default()
                .with_fill(!skip_fill)
                .with_seams(!skip_seams)
                .with_edge_iterations(edge_iterations)
                .with_debug_level(debug_level);
            cmd_run(&record, &output, &options, seed, snapshots.as_deref(), sequential)?;
        }

        Commands::Info { record } => {
            cmd_info(&record)?;
        }

        Commands::Mask { record, output } => {
            cmd_mask(&record, &output)?;
        }

        Commands::Pack {
            target,
            example,
            layout,
            output,
        } => {
            cmd_pack(&target, &example, &layout, &output)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
///
/// Each stage gets its own bar; a new message starts a new bar.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0)); // Highest percent seen in the current stage
    let stage = Arc::new(Mutex::new(String::new()));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        if let Ok(mut stage) = stage.lock() {
            if *stage != message {
                *stage = message.to_string();
                max_percent.store(0, Ordering::Relaxed);
            }
        }

        let raw_percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Monotonic within a stage
        let (percent, increased) = loop {
            let old_max = max_percent.load(Ordering::Relaxed);
            let new_max = old_max.max(raw_percent);
            if new_max == old_max {
                break (old_max, false);
            }
            match max_percent.compare_exchange_weak(old_max, new_max, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => break (new_max, true),
                Err(_) => continue,
            }
        };

        if !increased && percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {:3}% {}", bar, space, percent, message);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn cmd_run(
    input: &Path,
    output: &Path,
    options: &SynthesisOptions,
    seed: Option<u64>,
    snapshots: Option<&Path>,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let record: SynthesisRecord<UvEdge> = io::load_record(input)?;
    let job = record.into_job()?;

    let (h, w, channels) = job.target.shape();
    println!(
        "Loaded: {}x{} target ({} channels), {} islands, {} edge pairs",
        h,
        w,
        channels,
        job.island_uvs.len(),
        job.edge_infos.len()
    );

    let mut engine = match seed {
        Some(seed) => QuiltEngine::with_seed(seed),
        None => QuiltEngine::new(),
    }
    .with_parallel(!sequential);

    let (sink, receiver) = snapshot_channel(SNAPSHOT_BACKLOG);
    let writer = match snapshots {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let dir = dir.to_path_buf();
            Some(thread::spawn(move || {
                let mut written = 0;
                for (i, snapshot) in receiver.iter().enumerate() {
                    let path = dir.join(format!("snapshot_{:04}.png", i));
                    match io::save_texture(&snapshot, &path) {
                        Ok(()) => written += 1,
                        Err(e) => log::warn!("failed to write {}: {}", path.display(), e),
                    }
                }
                written
            }))
        }
        None => {
            drop(receiver);
            None
        }
    };

    let stages = match (options.synth_tex, options.seamless_uvs) {
        (true, true) => "fill + seams",
        (true, false) => "fill",
        (false, true) => "seams",
        (false, false) => "nothing",
    };
    let mode = if sequential { "sequential" } else { "parallel" };
    println!("Synthesizing ({}, {})...", stages, mode);

    let previews: Option<&dyn SnapshotSink> = if writer.is_some() { Some(&sink) } else { None };
    let progress = create_progress();
    let start = Instant::now();
    let result = synthesize_textures_on_uvs_with_progress(&mut engine, job, options, previews, &progress);
    let elapsed = start.elapsed();

    let dropped = sink.dropped();
    drop(sink);
    if let Some(writer) = writer {
        let written = writer.join().map_err(|_| "snapshot writer panicked")?;
        println!("Snapshots: {} written, {} dropped", written, dropped);
    }

    let target = result?;
    io::save_texture(&target, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let record: SynthesisRecord<UvEdge> = io::load_record(input)?;

    println!("File: {}", input.display());

    let describe = |tex: &Option<Texture>| match tex {
        Some(tex) => {
            let (h, w, c) = tex.shape();
            match tex.value_range() {
                Some((min, max)) => format!("{}x{}x{} (values {:.3} to {:.3})", h, w, c, min, max),
                None => format!("{}x{}x{} (empty)", h, w, c),
            }
        }
        None => "missing".to_string(),
    };
    println!("Target: {}", describe(&record.target));
    println!("Example: {}", describe(&record.example));

    match (record.patch_ratio, record.libsize) {
        (Some(ratio), Some(libsize)) => println!("Patch ratio: {}, library size: {}", ratio, libsize),
        (ratio, libsize) => println!("Patch ratio: {:?}, library size: {:?}", ratio, libsize),
    }

    match &record.island_uvs {
        Some(islands) => {
            println!("Islands: {}", islands.len());
            for (i, island) in islands.iter().enumerate() {
                println!(
                    "  #{}: {} vertices, {:?}, area {:.6}",
                    i,
                    island.len(),
                    island.orientation(),
                    island.signed_area().abs()
                );
            }

            if let Some(target) = &record.target {
                let (h, w) = (target.height(), target.width());
                let bbox = island_bounding_box(islands, h, w);
                let mask = rasterize_islands(islands, h, w);
                println!("Bounding box: {:?}", bbox.as_tuple());
                println!(
                    "Mask coverage: {} pixels ({:.1}% of target)",
                    mask.count(),
                    100.0 * mask.count() as f64 / (h * w).max(1) as f64
                );
            }
        }
        None => println!("Islands: missing"),
    }

    match &record.edge_infos {
        Some(edges) => println!("Edge pairs: {}", edges.len()),
        None => println!("Edge pairs: missing"),
    }

    if let Err(e) = record.into_job() {
        println!("Incomplete: {}", e);
    }

    Ok(())
}

fn cmd_mask(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let record: SynthesisRecord<UvEdge> = io::load_record(input)?;
    let job = record.into_job()?;
    let (h, w) = (job.target.height(), job.target.width());

    let mask = rasterize_islands(&job.island_uvs, h, w);
    let bbox = mask.bounding_box();

    let mut image = Texture::new(h, w, 1);
    for (row, col) in mask.covered_pixels() {
        image.pixel_mut(row, col)[0] = 1.0;
    }
    io::save_texture(&image, output)?;

    println!("Mask: {} pixels in bounding box {:?}", mask.count(), bbox.as_tuple());
    println!("Saved: {}", output.display());

    Ok(())
}

fn cmd_pack(
    target: &Path,
    example: &Path,
    layout: &Path,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let layout: Layout = serde_json::from_reader(BufReader::new(File::open(layout)?))?;

    let record = SynthesisRecord {
        target: Some(io::load_texture(target)?),
        example: Some(io::load_texture(example)?),
        patch_ratio: Some(layout.patch_ratio),
        libsize: Some(layout.libsize),
        island_uvs: Some(layout.island_uvs),
        edge_infos: Some(layout.edge_infos),
    };

    io::save_record(&record, output)?;
    println!("Saved: {}", output.display());

    Ok(())
}
