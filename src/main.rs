use clap::Parser;
use fastimage_resize::config::{self, ResizeConfig};
use fastimage_resize::imaging::{Format, Quality, ResizeRequest, resize_with};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fastimage-resize")]
#[command(version, about = "Resize a JPEG, PNG or GIF file")]
#[command(long_about = "\
Resize a JPEG, PNG or GIF file

The output is written in the same format as the input. Pass only --width or
only --height to derive the other side from the aspect ratio (truncating).

GIF transparency is carried over by re-declaring whichever palette color
lands where the first transparent pixel was. This is exact when the size is
unchanged and best-effort otherwise.

Run 'fastimage-resize --print-config' for a documented config file.")]
struct Cli {
    /// Input image
    #[arg(required_unless_present = "print_config")]
    input: Option<PathBuf>,

    /// Output image
    #[arg(required_unless_present = "print_config")]
    output: Option<PathBuf>,

    /// Format of both input and output
    #[arg(short, long, value_enum, required_unless_present = "print_config")]
    format: Option<Format>,

    /// Target width (0 = derive from height)
    #[arg(short = 'W', long, default_value_t = 0)]
    width: u32,

    /// Target height (0 = derive from width)
    #[arg(short = 'H', long, default_value_t = 0)]
    height: u32,

    /// JPEG quality, 1-100 (default from config)
    #[arg(short, long)]
    quality: Option<u32>,

    /// TOML config file with encoder defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a stock config file with all options documented
    #[arg(long)]
    print_config: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    log: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let level = if cli.log {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let resize_config = match &cli.config {
        Some(path) => ResizeConfig::load(path)?,
        None => ResizeConfig::default(),
    };

    let (Some(input), Some(output), Some(format)) = (cli.input, cli.output, cli.format) else {
        return Err("input, output and --format are required".into());
    };

    let mut request = ResizeRequest::new(input, output, format).with_size(cli.width, cli.height);
    if let Some(q) = cli.quality {
        request = request.with_quality(Quality::new(q));
    }

    resize_with(&request, &resize_config)?;
    println!("{}", request.output.display());
    Ok(())
}
