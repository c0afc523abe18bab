mod block;
mod config;
mod docx;
mod error;
mod meta;
mod parser;

use std::fs;
use std::path::{Path, PathBuf};

pub use block::{Block, ParaStyle, Run, RunStyle};
pub use config::Config;
pub use docx::{StyleDef, StyleRegistry};
pub use error::{ConvertError, Result};
pub use meta::CaseMeta;

/// Parse use-case Markdown into a vector of blocks.
pub fn parse(content: &str) -> Vec<Block> {
    parser::parse(content)
}

/// Convert use-case Markdown to `.docx` bytes.
pub fn markdown_to_docx(content: &str, config: &Config) -> Result<Vec<u8>> {
    let meta = CaseMeta::extract(content);
    let blocks = parser::parse(content);
    docx::render(&meta, &blocks, config)
}

/// Convert one Markdown file, writing `<stem>.docx` into `output_dir`
/// (created if absent). Returns the path of the written document.
pub fn convert_file(input: &Path, output_dir: &Path, config: &Config) -> Result<PathBuf> {
    let content = fs::read_to_string(input)?;
    let bytes = markdown_to_docx(&content, config)?;

    fs::create_dir_all(output_dir)?;
    let output = output_dir
        .join(input.file_stem().unwrap_or(input.as_os_str()))
        .with_extension("docx");
    fs::write(&output, bytes)?;
    Ok(output)
}
