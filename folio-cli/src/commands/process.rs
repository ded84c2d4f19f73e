//! Process command implementation

use anyhow::{bail, Context, Result};
use folio_core::processor::{processor_for_name, Pipeline};
use folio_core::types::{Book, Metadata, Resource, Section};
use serde::Serialize;
use std::path::Path;
use walkdir::WalkDir;

/// What to tell the pipeline about the book
pub struct ProcessOptions {
    pub cover_image: Option<String>,
    pub cover_page: Option<String>,
    pub titles: Vec<String>,
    pub sections: Vec<String>,
    pub processors: Vec<String>,
}

/// Processed book report
#[derive(Serialize)]
struct BookReport {
    titles: Vec<String>,
    cover_image: Option<CoverReport>,
    cover_page: Option<CoverReport>,
    sections: Vec<SectionReport>,
    resources: usize,
}

#[derive(Serialize)]
struct CoverReport {
    id: Option<String>,
    href: String,
    media_type: String,
}

impl From<&Resource> for CoverReport {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id.clone(),
            href: resource.href.clone(),
            media_type: resource.media_type.to_string(),
        }
    }
}

#[derive(Serialize)]
struct SectionReport {
    title: String,
    href: Option<String>,
}

/// Run the book processors over an unpacked book and report the result
pub fn process(input: &str, options: &ProcessOptions, json: bool) -> Result<()> {
    let input_path = Path::new(input);
    if !input_path.is_dir() {
        bail!("Input is not a directory: {}", input);
    }

    let mut book = load_book(input_path, options)?;
    tracing::info!(
        "Loaded {} resources from {}",
        book.resources.len(),
        input_path.display()
    );

    let pipeline = build_pipeline(&options.processors)?;
    book = pipeline.run(book);

    let report = BookReport {
        titles: book.metadata.titles.clone(),
        cover_image: book.metadata.cover_image().map(CoverReport::from),
        cover_page: book.metadata.cover_page().map(CoverReport::from),
        sections: book
            .sections()
            .map(|s| SectionReport {
                title: s.title.clone(),
                href: s.href.clone(),
            })
            .collect(),
        resources: book.resources.len(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &BookReport) {
    if let Some(title) = report.titles.first() {
        println!("Title:       {}", title);
    }
    match &report.cover_image {
        Some(cover) => println!("Cover image: {} ({})", cover.href, cover.media_type),
        None => println!("Cover image: none"),
    }
    match &report.cover_page {
        Some(cover) => println!("Cover page:  {}", cover.href),
        None => println!("Cover page:  none"),
    }
    for section in &report.sections {
        println!(
            "Section:     {} -> {}",
            section.href.as_deref().unwrap_or("-"),
            section.title
        );
    }
    println!("Resources:   {}", report.resources);
}

fn build_pipeline(names: &[String]) -> Result<Pipeline> {
    if names.is_empty() {
        return Ok(Pipeline::standard());
    }
    names.iter().try_fold(Pipeline::new(), |pipeline, name| {
        let processor = processor_for_name(name)
            .with_context(|| format!("Unknown processor: {}", name))?;
        Ok(pipeline.with_processor(processor))
    })
}

/// Build a book from every file under `dir`
fn load_book(dir: &Path, options: &ProcessOptions) -> Result<Book> {
    let mut metadata = Metadata::new();
    for title in &options.titles {
        metadata.add_title(title.clone());
    }
    let mut book = Book::with_metadata(metadata);

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let href = href_for(dir, entry.path())?;
        tracing::debug!("Adding resource {}", href);
        book.resources.add(Resource::from_file(href, entry.path()));
    }

    if let Some(href) = &options.cover_image {
        let image = book
            .resources
            .remove(href)
            .with_context(|| format!("Cover image not found: {}", href))?;
        book.metadata.set_cover_image(Some(image));
    }
    if let Some(href) = &options.cover_page {
        let page = book
            .resources
            .remove(href)
            .with_context(|| format!("Cover page not found: {}", href))?;
        book.metadata.set_cover_page(Some(page));
    }

    for href in &options.sections {
        book.toc.push(Section::new("", href.clone()));
    }

    Ok(book)
}

/// Package href of a file: its path below `root`, `/`-separated
fn href_for(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .with_context(|| format!("{} is outside {}", path.display(), root.display()))?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
