//! Thumbnail command implementation

use anyhow::{bail, Context, Result};
use folio_core::config::ProcessorConfig;
use folio_core::thumbnail::{create_thumbnail, ThumbnailFormat, ThumbnailOptions};

/// Thumbnail command options
pub struct ThumbnailArgs {
    pub max_size: Option<u32>,
    pub config: Option<String>,
    pub preserve_alpha: bool,
    pub format: String,
}

/// Write a thumbnail of `input` to `output`
pub fn thumbnail(input: &str, output: &str, args: &ThumbnailArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => ProcessorConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => ProcessorConfig::default(),
    };
    let mut config = config
        .with_env_overrides()
        .context("Invalid environment configuration")?;
    if let Some(max_size) = args.max_size {
        config.max_cover_image_size = max_size;
    }

    let options = ThumbnailOptions::from(&config)
        .with_preserve_alpha(args.preserve_alpha)
        .with_format(parse_format(&args.format)?);

    let data = std::fs::read(input).with_context(|| format!("Failed to read input file: {}", input))?;
    let thumbnail = create_thumbnail(&data, &options)
        .with_context(|| format!("Failed to create thumbnail of {}", input))?;
    std::fs::write(output, &thumbnail)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    tracing::info!(
        "Wrote {} byte thumbnail (max {}px) -> {}",
        thumbnail.len(),
        options.max_dimension,
        output
    );

    Ok(())
}

fn parse_format(format: &str) -> Result<ThumbnailFormat> {
    match format.to_lowercase().as_str() {
        "png" => Ok(ThumbnailFormat::Png),
        "jpg" | "jpeg" => Ok(ThumbnailFormat::Jpeg),
        other => bail!("Unsupported thumbnail format: {}", other),
    }
}
