//! Command-line interface for gist-preview.
//!
//! Parses arguments and runs the subcommands against local files or a gist
//! payload saved from the gists API. Nothing here touches the network.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use gist_preview_config::{LogLevel, PreviewConfig};

use crate::error::PreviewError;
use crate::preview::{Bundle, File, PreviewPipeline, RenderedDocument, transpile};

/// gist-preview - classify gist files and render sandbox-ready HTML previews
#[derive(Parser)]
#[command(name = "gist-preview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log verbosity (off, error, warn, info, debug, trace); overrides the config file
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the inferred content type of each file
    Classify {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Render one file to a standalone HTML document
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the document here instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Print the plain JavaScript for a JSX/TSX component, or the transform error
    Transpile {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Preview a gist payload saved as JSON
    Bundle {
        #[arg(value_name = "GIST_JSON")]
        payload: PathBuf,

        /// File to preview (default: the first HTML file, else the first file)
        #[arg(long, value_name = "NAME")]
        file: Option<String>,

        /// Write the document here instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
}

/// Load the configuration named on the command line, or the default one.
pub fn load_config(cli: &Cli) -> Result<PreviewConfig> {
    match &cli.config {
        Some(path) => PreviewConfig::load_from(path),
        None => PreviewConfig::load(),
    }
}

/// Run a subcommand. Returns the process exit code.
pub fn run(command: Commands, config: PreviewConfig) -> Result<i32> {
    match command {
        Commands::Classify { files } => {
            let pipeline = PreviewPipeline::new(config);
            let mut stdout = io::stdout().lock();
            for path in &files {
                let file = read_file(path)?;
                writeln!(stdout, "{}\t{}", path.display(), pipeline.classify(&file))?;
            }
            Ok(0)
        }
        Commands::Render { file, output } => {
            let pipeline = PreviewPipeline::new(config);
            let file = read_file(&file)?;
            let document = pipeline.render_file(&file);
            write_document(&document, output.as_deref())?;
            Ok(0)
        }
        Commands::Transpile { file } => {
            let file = read_file(&file)?;
            match transpile(&file.content, &file.filename) {
                Ok(module) => {
                    let mut stdout = io::stdout().lock();
                    writeln!(stdout, "{}", module.code)?;
                    for specifier in &module.imports {
                        log::info!("import: {specifier}");
                    }
                    Ok(0)
                }
                Err(err) => {
                    eprintln!("{err}");
                    Ok(1)
                }
            }
        }
        Commands::Bundle {
            payload,
            file,
            output,
        } => {
            let json = std::fs::read_to_string(&payload)
                .map_err(|e| PreviewError::io(&payload, e))?;
            let bundle = Bundle::from_gist_json(&json)?;
            let pipeline = PreviewPipeline::new(config);
            let document = match file {
                Some(name) => pipeline.preview(&bundle, &name)?,
                None => pipeline.preview_default(&bundle)?,
            };
            write_document(&document, output.as_deref())?;
            Ok(0)
        }
    }
}

/// Read a local file; the preview filename is the path's final component.
fn read_file(path: &Path) -> Result<File, PreviewError> {
    let content = std::fs::read_to_string(path).map_err(|e| PreviewError::io(path, e))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(File::new(filename, content))
}

fn write_document(document: &RenderedDocument, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, document.as_str()).map_err(|e| PreviewError::io(path, e))?;
            log::info!("wrote {} bytes to {}", document.as_str().len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(document.as_str().as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
