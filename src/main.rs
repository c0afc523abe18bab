use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use ucdocx::Config;

#[derive(Parser)]
#[command(name = "ucdocx")]
#[command(about = "Convert use-case Markdown files to Word documents")]
struct Cli {
    /// Directory containing the use-case files (CU-*.md)
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Output directory (defaults to the configured subdirectory of DIR)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file
    #[arg(short, long, default_value = "ucdocx.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config);
    let output_dir = cli
        .output
        .unwrap_or_else(|| cli.dir.join(&config.output.dir));

    let mut inputs = use_case_files(&cli.dir)?;
    if inputs.is_empty() {
        println!("No se encontraron archivos de casos de uso (CU-*.md)");
        return Ok(());
    }
    inputs.sort();

    println!("Convirtiendo {} casos de uso a formato Word...", inputs.len());

    // One file's failure is reported and does not abort the batch.
    let mut converted = Vec::new();
    for input in &inputs {
        match ucdocx::convert_file(input, &output_dir, &config) {
            Ok(output) => {
                println!(
                    "✓ Convertido: {} -> {}",
                    file_name(input),
                    file_name(&output)
                );
                converted.push(output);
            }
            Err(e) => {
                eprintln!("✗ Error convirtiendo {}: {}", file_name(input), e);
            }
        }
    }

    println!("\n¡Conversión completada!");
    println!("Archivos Word generados en: {}", output_dir.display());
    println!("Total convertidos: {}", converted.len());

    println!("\nArchivos generados:");
    for path in &converted {
        println!("  - {}", file_name(path));
    }

    Ok(())
}

fn use_case_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with("CU-") && name.ends_with(".md") {
            files.push(path);
        }
    }
    Ok(files)
}

fn file_name(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default()
}
