mod logger;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use pdf_images::source::has_supported_extension;
use pdf_images::{ConversionOptions, FailurePolicy, ImageSource, PageGeometry, PageSize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "img2pdf", about = "Convert images into a multi-page PDF", version)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert image files or URLs into one PDF, one image per page
    Convert {
        /// Image files or http(s) URLs, in page order
        inputs: Vec<String>,

        /// Text file with one image URL per line (appended after INPUTS)
        #[arg(long)]
        url_file: Option<PathBuf>,

        /// Output PDF file (defaults to the configured output name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page size
        #[arg(long, value_enum)]
        page_size: Option<PageSizeArg>,

        /// Target DPI (72-600)
        #[arg(long)]
        dpi: Option<u32>,

        /// Leave out images that fail to load instead of aborting
        #[arg(long)]
        skip_failed: bool,

        /// Timeout for each URL fetch, in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// JSON config file with conversion options
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show where an image of the given size would be placed
    Placement {
        /// Image width in pixels
        #[arg(long)]
        width: u32,

        /// Image height in pixels
        #[arg(long)]
        height: u32,

        /// Page size
        #[arg(long, default_value = "a4", value_enum)]
        page_size: PageSizeArg,

        /// Target DPI
        #[arg(long, default_value = "150")]
        dpi: u32,
    },

    /// Write the default conversion options as JSON
    InitConfig {
        /// Config file to create
        #[arg(short, long, default_value = "img2pdf.json")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PageSizeArg {
    A4,
    Letter,
}

impl From<PageSizeArg> for PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::A4 => Self::A4,
            PageSizeArg::Letter => Self::Letter,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logger::CliLogger::new(level).init()?;

    match cli.command {
        Commands::Convert {
            inputs,
            url_file,
            output,
            page_size,
            dpi,
            skip_failed,
            timeout,
            config,
        } => {
            let mut options = match &config {
                Some(path) => ConversionOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => ConversionOptions::default(),
            };
            if let Some(page_size) = page_size {
                options.page_size = page_size.into();
            }
            if let Some(dpi) = dpi {
                options.dpi = dpi;
            }
            if skip_failed {
                options.failure_policy = FailurePolicy::Skip;
            }
            if let Some(timeout) = timeout {
                options.http_timeout_secs = timeout;
            }
            if let Some(name) = output.as_ref().and_then(|p| p.file_name()) {
                options.output_name = name.to_string_lossy().into_owned();
            }
            options.validate()?;

            let mut inputs = inputs;
            if let Some(path) = &url_file {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read URL list {}", path.display()))?;
                inputs.extend(pdf_images::parse_url_list(&text));
            }
            if inputs.is_empty() {
                bail!("No images given: pass image files or URLs, or --url-file");
            }

            let sources = pdf_images::parse_inputs(&inputs, &options)?;
            for source in sources.iter().filter(|s| !s.is_remote()) {
                if !has_supported_extension(source.label()) {
                    log::warn!(
                        "{} does not look like an image (expected png, jpg, jpeg, bmp, gif, tiff or webp)",
                        source.label()
                    );
                }
            }

            let output_path = output.unwrap_or_else(|| PathBuf::from(&options.output_name));
            let report = pdf_images::convert_to_file(&sources, &options, &output_path).await?;

            for err in &report.skipped {
                eprintln!("Skipped: {}", err);
            }
            if report.skipped.iter().any(is_remote_decode_failure) {
                eprintln!(
                    "A URL did not point to an image. Use a direct image link ending in .png, .jpg, .jpeg, .bmp, .gif, .tiff or .webp"
                );
            }

            println!("{}", report.summary(&output_path.display().to_string()));
        }

        Commands::Placement {
            width,
            height,
            page_size,
            dpi,
        } => {
            let page_size: PageSize = page_size.into();
            let geometry = PageGeometry::from_page_size(page_size, dpi)?;
            let placement = geometry.place(width, height)?;
            let (target_w, target_h) = geometry.target_pixels();

            println!("Page: {} at {} DPI ({:.0}x{:.0} px)", page_size, dpi, target_w, target_h);
            println!(
                "  Scaled image: {}x{} px (scale {:.4})",
                placement.new_width_px,
                placement.new_height_px,
                placement.scale(width)
            );
            println!(
                "  Drawn size: {:.2} x {:.2} pt",
                placement.draw_width_pt, placement.draw_height_pt
            );
            println!("  Offset: ({:.2}, {:.2}) pt", placement.x, placement.y);
        }

        Commands::InitConfig { output } => {
            ConversionOptions::default().save(&output).await?;
            println!("Wrote default options → {}", output.display());
        }
    }

    Ok(())
}

fn is_remote_decode_failure(err: &pdf_images::ImageToPdfError) -> bool {
    matches!(
        err,
        pdf_images::ImageToPdfError::ImageDecode { label, .. }
            if label.starts_with("http://") || label.starts_with("https://")
    )
}
