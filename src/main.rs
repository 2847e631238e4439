// main.rs
//
// Command line front end: decode the image, convert it to 8-bit gray, and
// hand it to the library with the parameters below.

use anyhow::{Context as _, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use frieze::config::{StampConfig, StlFormat, WrapConfig};
use frieze::float_types::Real;
use frieze::pipeline::{Model, write_stl};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "frieze",
    version,
    about = "Turn a grayscale image into a printable STL solid",
    after_help = "EXAMPLES:\n  \
                  # wrap image.png around a cylinder: black at 60mm, white at 70mm, 40mm bore\n  \
                  frieze wrap -i image.png -o image.stl --inner-radius 70 --outer-radius 80 --hole-radius 40\n\n  \
                  # stamp an image into the face of a 20mm cylinder, 4mm deep\n  \
                  frieze stamp -i image.png -o stamp.stl --image-low 0 --image-high -4"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Wrap an image around a cylinder (height field in cylindrical coordinates)
    Wrap(WrapArgs),

    /// Stamp an image into the bottom face of a cylinder
    Stamp(StampArgs),
}

#[derive(Args)]
struct Io {
    /// Input image name
    #[arg(short = 'i', long = "image-file")]
    image_file: PathBuf,

    /// Output STL file name
    #[arg(short = 'o', long = "output-file")]
    output_file: PathBuf,

    /// STL file type: bin or txt
    #[arg(short = 's', long = "stl-type", default_value = "bin")]
    stl_type: StlFormat,
}

#[derive(Args)]
struct WrapArgs {
    #[command(flatten)]
    io: Io,

    /// Radius of maximum image value
    #[arg(long = "inner-radius", default_value_t = 70.0)]
    inner_radius: Real,

    /// Outer radius; outer - inner is the relief depth
    #[arg(long = "outer-radius", default_value_t = 80.0)]
    outer_radius: Real,

    /// Radius of the hole (negative for no hole)
    #[arg(long = "hole-radius", default_value_t = -1.0, allow_negative_numbers = true)]
    hole_radius: Real,

    /// Scale value for Z height (mm per pixel row)
    #[arg(short = 'z', long = "z-scale", default_value_t = 1.0)]
    z_scale: Real,

    /// Reverse the x axis (scan clockwise instead of counter-clockwise)
    #[arg(long = "reverse-x")]
    reverse_x: bool,

    /// Invert offsets (darker colors in the image stick out further)
    #[arg(long = "invert")]
    invert: bool,
}

#[derive(Args)]
struct StampArgs {
    #[command(flatten)]
    io: Io,

    /// Margin around the image (percentage)
    #[arg(short = 'm', long, default_value_t = 1.0)]
    margin: Real,

    /// Low Z value for the stamp Z height
    #[arg(long = "image-low", default_value_t = 0.0, allow_negative_numbers = true)]
    image_low: Real,

    /// High Z value for the stamp Z height
    #[arg(long = "image-high", default_value_t = -4.0, allow_negative_numbers = true)]
    image_high: Real,

    /// Invert the image (darker colors in the image stick out further)
    #[arg(long = "invert-image", default_value_t = true, action = ArgAction::Set)]
    invert_image: bool,

    /// Mirror the image
    #[arg(long = "mirror-image", default_value_t = true, action = ArgAction::Set)]
    mirror_image: bool,

    /// Radius of the cylinder
    #[arg(long = "outer-radius", default_value_t = 20.0)]
    outer_radius: Real,

    /// Roundness of the cylinder (1-50)
    #[arg(short = 'r', long, default_value_t = 6)]
    roundness: u32,

    /// Height of the cylinder for the stamp
    #[arg(short = 'z', long = "z-height", default_value_t = 70.0)]
    z_height: Real,
}

impl WrapArgs {
    fn model(&self) -> Model {
        Model::Wrap(
            WrapConfig {
                inner_radius: self.inner_radius,
                outer_radius: self.outer_radius,
                hole_radius: None,
                z_scale: self.z_scale,
                invert: self.invert,
                reverse_x: self.reverse_x,
            }
            .with_hole_radius(self.hole_radius),
        )
    }
}

impl StampArgs {
    fn model(&self) -> Result<Model> {
        let cfg = StampConfig {
            outer_radius: self.outer_radius,
            margin_pct: self.margin,
            low_z: self.image_low,
            high_z: self.image_high,
            invert: self.invert_image,
            mirror: self.mirror_image,
            z_height: self.z_height,
            ..StampConfig::default()
        }
        .with_roundness(self.roundness)?;
        Ok(Model::Stamp(cfg))
    }
}

fn options(model: &Model) -> Vec<&'static str> {
    let mut options = Vec::new();
    match model {
        Model::Wrap(cfg) => {
            if cfg.reverse_x {
                options.push("reversed");
            }
            if cfg.invert {
                options.push("inverted");
            }
            if cfg.hole().is_some() {
                options.push("hole");
            }
        },
        Model::Stamp(cfg) => {
            if cfg.mirror {
                options.push("mirrored");
            }
            if cfg.invert {
                options.push("inverted");
            }
        },
    }
    options
}

fn run(model: &Model, io: &Io) -> Result<()> {
    let img = image::open(&io.image_file)
        .with_context(|| format!("failed to open image {}", io.image_file.display()))?
        .to_luma8();

    let kind = match model {
        Model::Wrap(_) => "cylindrical frieze",
        Model::Stamp(_) => "image stamp",
    };
    tracing::info!(
        image = %io.image_file.display(),
        output = %io.output_file.display(),
        options = ?options(model),
        "creating {kind}"
    );

    let name = model_name(&io.output_file);
    let summary = write_stl(model, &img, &io.output_file, io.stl_type, &name)
        .with_context(|| format!("failed to write {}", io.output_file.display()))?;

    tracing::info!(triangles = summary.triangles, "{kind} completed successfully");
    Ok(())
}

fn model_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    match &cli.command {
        Commands::Wrap(args) => run(&args.model(), &args.io),
        Commands::Stamp(args) => run(&args.model()?, &args.io),
    }
}
