//! Folio CLI - Command-line interface for preparing unpacked books

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve covers and section titles of an unpacked book directory
    Process {
        /// Directory holding the book's files
        input: String,

        /// Href of the cover image
        #[arg(long)]
        cover_image: Option<String>,

        /// Href of the cover page
        #[arg(long)]
        cover_page: Option<String>,

        /// Book title (repeat for several)
        #[arg(short, long = "title")]
        titles: Vec<String>,

        /// Href of an untitled TOC section (repeat for several)
        #[arg(short, long = "section")]
        sections: Vec<String>,

        /// Processor to run instead of the standard pipeline (repeat for several)
        #[arg(short, long = "processor")]
        processors: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a thumbnail of an image
    Thumbnail {
        /// Input image path
        input: String,

        /// Output file path
        #[arg(short, long)]
        output: String,

        /// Larger side of the thumbnail in pixels
        #[arg(short, long)]
        max_size: Option<u32>,

        /// JSON config file
        #[arg(short, long)]
        config: Option<String>,

        /// Keep the alpha channel (png only)
        #[arg(long)]
        preserve_alpha: bool,

        /// Output format (png, jpeg)
        #[arg(short, long, default_value = "png")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "folio_cli=debug,folio_core=debug"
    } else {
        "folio_cli=info,folio_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Process {
            input,
            cover_image,
            cover_page,
            titles,
            sections,
            processors,
            json,
        } => commands::process(
            &input,
            &commands::ProcessOptions {
                cover_image,
                cover_page,
                titles,
                sections,
                processors,
            },
            json,
        ),

        Commands::Thumbnail {
            input,
            output,
            max_size,
            config,
            preserve_alpha,
            format,
        } => commands::thumbnail(
            &input,
            &output,
            &commands::ThumbnailArgs {
                max_size,
                config,
                preserve_alpha,
                format,
            },
        ),
    }
}
