//! Relief CLI - image to relief mesh conversion
//!
//! Command-line interface for turning grayscale (or any decodable) images into
//! watertight OBJ relief blocks.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use relief::{
    heightmap_to_mesh, write_obj, FaceCounts, Grid, HeightMode, ReliefConfig, ReliefMesh,
    WallMode,
};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    /// Dark pixels raised to a fixed height
    Binary,
    /// Height proportional to intensity
    Continuous,
}

impl From<ModeArg> for HeightMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Binary => HeightMode::BinaryThreshold,
            ModeArg::Continuous => HeightMode::Continuous,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WallArg {
    /// Outer perimeter only (watertight)
    Perimeter,
    /// Every grid edge (legacy, not watertight)
    InteriorTransitions,
}

impl From<WallArg> for WallMode {
    fn from(walls: WallArg) -> Self {
        match walls {
            WallArg::Perimeter => WallMode::Perimeter,
            WallArg::InteriorTransitions => WallMode::InteriorTransitions,
        }
    }
}

#[derive(Parser)]
#[command(name = "relief")]
#[command(author, version, about = "Convert images into 3D-printable OBJ relief meshes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image into an OBJ relief mesh
    Convert {
        /// Input image (any format the image crate decodes)
        input: PathBuf,

        /// Output file path (must end in .obj)
        #[arg(short, long)]
        output: PathBuf,

        /// TOML config file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Height mapping mode
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Extrusion height for dark pixels (binary mode)
        #[arg(long)]
        height: Option<f32>,

        /// Intensity threshold below which pixels are raised (binary mode)
        #[arg(short, long)]
        threshold: Option<u8>,

        /// Height per intensity level (continuous mode)
        #[arg(short, long)]
        scale: Option<f32>,

        /// Use 255 - intensity (continuous mode)
        #[arg(long)]
        invert: bool,

        /// Side wall layout
        #[arg(long, value_enum)]
        walls: Option<WallArg>,

        /// Laplacian smoothing passes over the top surface
        #[arg(long)]
        smooth: Option<u32>,

        /// Smoothing blend factor in (0, 1]
        #[arg(long, default_value = "0.5")]
        smooth_lambda: f32,

        /// Gaussian pre-blur; bare --blur uses sigma 1.1
        #[arg(long, num_args = 0..=1, default_missing_value = "1.1")]
        blur: Option<f32>,

        /// Emit per-vertex normals (vn lines)
        #[arg(long)]
        normals: bool,
    },

    /// Show grid size and the mesh a conversion would produce
    Info {
        /// Input image
        input: PathBuf,

        /// Side wall layout
        #[arg(long, value_enum, default_value = "perimeter")]
        walls: WallArg,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            config,
            mode,
            height,
            threshold,
            scale,
            invert,
            walls,
            smooth,
            smooth_lambda,
            blur,
            normals,
        } => {
            if output.extension().is_none_or(|ext| ext != "obj") {
                anyhow::bail!("Output file must have .obj extension");
            }

            let mut relief_config = match &config {
                Some(path) => ReliefConfig::from_file(path)?,
                None => ReliefConfig::default(),
            }
            .apply_env()?;

            if let Some(mode) = mode {
                relief_config.height_mode = mode.into();
            }
            if let Some(height) = height {
                relief_config.extrusion_height = height;
            }
            if let Some(threshold) = threshold {
                relief_config.threshold = threshold;
            }
            if let Some(scale) = scale {
                relief_config.scale_factor = scale;
            }
            if invert {
                relief_config.invert_intensity = true;
            }
            if let Some(walls) = walls {
                relief_config.wall_mode = walls.into();
            }
            if let Some(iterations) = smooth {
                relief_config = relief_config.with_smoothing(iterations, smooth_lambda);
            }
            if let Some(sigma) = blur {
                relief_config = relief_config.with_blur(sigma);
            }
            if normals {
                relief_config.emit_normals = true;
            }
            relief_config.validate()?;

            let progress = ProgressBar::new_spinner();
            progress.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")?
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
            );
            progress.enable_steady_tick(Duration::from_millis(100));

            progress.set_message(format!("Decoding {}...", input.display()));
            let grid = load_grid(&input)?;

            progress.set_message(format!(
                "Building relief for {}x{} grid...",
                grid.rows(),
                grid.cols()
            ));
            let mesh = heightmap_to_mesh(&grid, &relief_config)?;

            progress.set_message("Writing output file...");
            write_atomically(&mesh, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            progress.finish_with_message(format!("Saved to {}", output.display()));
            print_summary(&mesh);
        }

        Commands::Info { input, walls } => {
            let luma = load_image(&input)?.to_luma8();
            let grid = Grid::new(
                luma.height() as usize,
                luma.width() as usize,
                luma.into_raw(),
            )?;
            let counts = FaceCounts::expected(grid.rows(), grid.cols(), walls.into());

            println!("\nImage Information:");
            println!("  File: {}", input.display());
            println!("  Grid: {} rows x {} cols", grid.rows(), grid.cols());
            if !grid.is_tessellable() {
                println!("  Too small to tessellate (need at least 2x2)");
                return Ok(());
            }
            println!("  Vertices: {}", 2 * grid.len());
            println!(
                "  Faces: {} (top {}, bottom {}, walls {})",
                counts.total(),
                counts.top,
                counts.bottom,
                counts.walls
            );
            let dark = grid.samples().iter().filter(|&&v| v < 128).count();
            println!(
                "  Dark pixels: {} ({:.1}%)",
                dark,
                100.0 * dark as f64 / grid.len() as f64
            );
        }
    }

    Ok(())
}

fn load_image(input: &Path) -> anyhow::Result<image::DynamicImage> {
    image::open(input).with_context(|| format!("Failed to decode {}", input.display()))
}

fn load_grid(input: &Path) -> anyhow::Result<Grid> {
    Ok(Grid::from_image(&load_image(input)?)?)
}

/// Write to a sibling temp file, then rename over the destination
fn write_atomically(mesh: &ReliefMesh, output: &Path) -> anyhow::Result<()> {
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write_obj(mesh, &mut writer)?;
        writer.flush()?;
    }
    temp.persist(output)?;
    Ok(())
}

fn print_summary(mesh: &ReliefMesh) {
    let stats = mesh.stats();
    let edges = mesh.edge_report();

    println!("\nMesh Statistics:");
    println!("  Grid: {}x{}", stats.rows, stats.cols);
    println!("  Vertices: {}", stats.vertices);
    println!(
        "  Faces: {} (top {}, bottom {}, walls {})",
        stats.counts.total(),
        stats.counts.top,
        stats.counts.bottom,
        stats.counts.walls
    );
    if let Some(bounds) = stats.bounds {
        let size = bounds.size();
        println!("  Size: {:.1} x {:.1} x {:.2}", size.x, size.y, size.z);
    }
    println!("  Volume: {:.2}", stats.volume);
    println!(
        "  Watertight: {}",
        if edges.is_closed() { "yes" } else { "no" }
    );
}
