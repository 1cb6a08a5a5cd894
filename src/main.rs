use brandmark::config::Config;
use brandmark::error::Error;
use brandmark::watermark::{WatermarkPosition, WatermarkProcessor};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

/// Brandmark - stamp a business logo onto a product image
#[derive(Parser, Debug)]
#[command(name = "brandmark")]
#[command(version, about, long_about = None)]
struct Args {
    /// Image to watermark: URL, local path or file:// URI
    #[arg(required_unless_present = "list_positions")]
    image: Option<String>,

    /// Path to configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Logo path, overrides `logo_path` from the configuration
    #[arg(short, long)]
    logo: Option<PathBuf>,

    /// Anchor position (bottom-right, bottom-left, top-right, top-left, center)
    #[arg(short, long)]
    position: Option<String>,

    /// Overlay opacity between 0.0 and 1.0
    #[arg(long)]
    opacity: Option<f32>,

    /// Output file, or "-" for stdout
    #[arg(short, long, default_value = "watermarked.jpg")]
    output: PathBuf,

    /// Print the supported positions and exit
    #[arg(long)]
    list_positions: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("brandmark: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(args: Args) -> Result<(), Error> {
    if args.list_positions {
        for position in WatermarkPosition::ALL {
            println!("{}", position);
        }
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::from_file(path).map_err(Error::Config)?,
        None => Config::default(),
    };
    if let Some(logo) = &args.logo {
        config.logo_path = logo.display().to_string();
    }
    config.validate().map_err(Error::Config)?;

    brandmark::logging::init_subscriber(&config.logging)
        .map_err(|e| Error::Logging(e.to_string()))?;

    tracing::info!(
        config_file = ?args.config,
        logo_path = %config.logo_path,
        size_ratio = config.watermark.size_ratio,
        quality = config.watermark.quality,
        "Configuration loaded successfully"
    );

    let processor = WatermarkProcessor::new(&config.logo_path, config.watermark.clone())?;

    let reference = args.image.unwrap_or_default();
    let position = args
        .position
        .unwrap_or_else(|| config.watermark.default_position.to_string());
    let opacity = args.opacity.unwrap_or(config.watermark.default_opacity);

    let bytes = processor
        .add_watermark(&reference, &position, opacity)
        .ok_or_else(|| {
            Error::Failed(format!(
                "could not watermark '{}' (see log for details)",
                reference
            ))
        })?;

    if args.output.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&bytes)?;
        stdout.flush()?;
    } else {
        std::fs::write(&args.output, &bytes)?;
        tracing::info!(
            output = %args.output.display(),
            size_bytes = bytes.len(),
            "Watermarked image written"
        );
    }

    Ok(())
}
