//! # barcode128 CLI
//!
//! Command-line interface for rendering Code 128 barcodes.
//!
//! ## Usage
//!
//! ```bash
//! # Write a PNG to stdout
//! barcode128 "ABC-123" > abc.png
//!
//! # Save to a file with a TrueType caption font
//! barcode128 --font DejaVuSans.ttf -o abc.png "ABC-123"
//!
//! # Wider modules, no guard bars, no caption
//! barcode128 --module-width 3 --no-ean-style --no-text -o plain.png 0123456789
//!
//! # GS1-128 style data with a leading FNC1
//! barcode128 --fnc1 -o gs1.png 0101234567890128
//!
//! # Show the symbol values and modules instead of rendering
//! barcode128 --print-encoding "ABC"
//! ```

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use barcode128::{
    Barcode128, BarcodeError, FontFace, LayoutParams,
    code128::{self, Function, Token},
};

/// barcode128 - Code 128 barcode renderer
#[derive(Parser, Debug)]
#[command(name = "barcode128")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Text to encode
    text: String,

    /// Output PNG file, or "-" for stdout
    #[arg(short, long, default_value = "-")]
    output: String,

    /// JSON file with layout parameters (flags override it)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<i32>,

    /// Number of border outlines
    #[arg(long)]
    border_width: Option<i32>,

    /// Gap between border and bars in pixels
    #[arg(long)]
    border_spacing: Option<i32>,

    /// Width of one module in pixels
    #[arg(long)]
    module_width: Option<i32>,

    /// Gap between bars and caption in pixels
    #[arg(long)]
    text_spacing: Option<i32>,

    /// TrueType/OpenType caption font (defaults to the built-in bitmap font)
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Caption point size (implies --no-auto-fit)
    #[arg(long)]
    font_size: Option<u32>,

    /// Draw all bars the same height
    #[arg(long)]
    no_ean_style: bool,

    /// Omit the human-readable caption
    #[arg(long)]
    no_text: bool,

    /// Use --font-size instead of fitting the caption to the barcode width
    #[arg(long)]
    no_auto_fit: bool,

    /// Prefix the data with FNC1
    #[arg(long)]
    fnc1: bool,

    /// Print symbol values and modules instead of rendering
    #[arg(long)]
    print_encoding: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), cli.log_level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), BarcodeError> {
    let params = layout_params(&cli)?;

    let mut tokens = Vec::new();
    if cli.fnc1 {
        tokens.push(Token::Function(Function::Fnc1));
    }
    tokens.extend(code128::tokenize(&cli.text));
    let encoding = code128::encode_tokens(&tokens)?;

    if cli.print_encoding {
        let symbols: Vec<String> = encoding.symbols().iter().map(|s| s.to_string()).collect();
        println!("symbols: {}", symbols.join(" "));
        println!("start set: {:?}", encoding.start_set());
        println!("checksum: {}", encoding.checksum());
        println!("modules ({}): {}", encoding.module_count(), encoding.bit_string());
        return Ok(());
    }

    let font = match &cli.font {
        Some(path) => FontFace::load(path)?,
        None => FontFace::builtin(),
    };
    info!(font = font.name(), "using caption font");

    let barcode = Barcode128::with_encoding(cli.text.clone(), encoding, params, Some(font));

    if cli.output == "-" {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        barcode.render(&mut handle)?;
        handle.flush()?;
    } else {
        barcode.save(&cli.output)?;
        eprintln!(
            "Saved {}x{} barcode to {}",
            barcode.image_width(),
            barcode.image_height(),
            cli.output
        );
    }

    Ok(())
}

/// Config file values, then command-line overrides.
fn layout_params(cli: &Cli) -> Result<LayoutParams, BarcodeError> {
    let mut params = match &cli.config {
        Some(path) => LayoutParams::from_json_file(path)?,
        None => LayoutParams::default(),
    };

    if let Some(height) = cli.height {
        params = params.image_height(height);
    }
    if let Some(width) = cli.border_width {
        params = params.border_width(width);
    }
    if let Some(spacing) = cli.border_spacing {
        params = params.border_spacing(spacing);
    }
    if let Some(width) = cli.module_width {
        params = params.module_width(width);
    }
    if let Some(spacing) = cli.text_spacing {
        params = params.text_spacing(spacing);
    }
    if let Some(size) = cli.font_size {
        params = params.font_size(size).auto_fit(false);
    }
    if cli.no_ean_style {
        params = params.ean_style(false);
    }
    if cli.no_text {
        params = params.show_text(false);
    }
    if cli.no_auto_fit {
        params = params.auto_fit(false);
    }

    Ok(params)
}
