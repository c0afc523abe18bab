use regex::Regex;
use std::sync::LazyLock;

use crate::block::{Block, ParaStyle, Run};

/// Leading source lines reserved for the title/metadata header, which is
/// rendered from [`CaseMeta`](crate::CaseMeta) instead of being parsed.
const METADATA_WINDOW: usize = 10;

static BOLD_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*.*?\*\*").unwrap());

/// Parser state carried across the line walk.
enum Mode {
    Normal,
    CodeBlock,
    /// Active between a detected header row and the first non-table line.
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Parse use-case Markdown into a list of blocks.
///
/// Each line yields at most one block. The first [`METADATA_WINDOW`] lines
/// are skipped.
pub fn parse(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut mode = Mode::Normal;

    for (i, raw) in content.lines().enumerate() {
        if i < METADATA_WINDOW {
            continue;
        }
        let line = raw.trim();

        // Fence lines toggle code mode and are never emitted.
        if line.starts_with("```") {
            if matches!(mode, Mode::CodeBlock) {
                mode = Mode::Normal;
            } else {
                finish_table(&mut mode, &mut blocks);
                mode = Mode::CodeBlock;
            }
            continue;
        }

        if matches!(mode, Mode::CodeBlock) {
            // Verbatim monospace; no inline markup inside code blocks.
            blocks.push(Block::paragraph(ParaStyle::Normal, vec![Run::mono(line)]));
            continue;
        }

        if let Some(rest) = line.strip_prefix("# ") {
            finish_table(&mut mode, &mut blocks);
            blocks.push(Block::paragraph(ParaStyle::Heading1, vec![Run::bold(rest)]));
        } else if let Some(rest) = line.strip_prefix("## ") {
            // Second-level source headings share the heading-1 style,
            // unbolded; the heading-2 style is reserved for `###`.
            finish_table(&mut mode, &mut blocks);
            blocks.push(Block::paragraph(ParaStyle::Heading1, vec![Run::plain(rest)]));
        } else if let Some(rest) = line.strip_prefix("### ") {
            finish_table(&mut mode, &mut blocks);
            blocks.push(Block::paragraph(ParaStyle::Heading2, vec![Run::plain(rest)]));
        } else if let Some(rest) = line
            .strip_prefix("- ")
            .or_else(|| line.strip_prefix("* "))
        {
            finish_table(&mut mode, &mut blocks);
            blocks.push(Block::list_item(inline_runs(rest)));
        } else if is_ordered_item(line) {
            // Numbered items keep their `N. ` prefix in the output.
            finish_table(&mut mode, &mut blocks);
            blocks.push(Block::list_item(inline_runs(line)));
        } else if is_table_line(line) {
            table_line(line, &mut mode);
        } else {
            finish_table(&mut mode, &mut blocks);
            if !line.is_empty() && is_plain_paragraph(line) {
                blocks.push(Block::paragraph(ParaStyle::Normal, inline_runs(line)));
            }
        }
    }

    finish_table(&mut mode, &mut blocks);
    blocks
}

/// A single digit 1-9 followed by `. `.
fn is_ordered_item(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_digit() && c != '0') && line[1..].starts_with(". ")
}

fn is_table_line(line: &str) -> bool {
    line.matches('|').count() >= 2
}

/// The fallback excludes every prefix already claimed by another rule;
/// lines that match neither (e.g. `#### x`) emit nothing.
fn is_plain_paragraph(line: &str) -> bool {
    match line.chars().next() {
        Some('#' | '-' | '*' | '|') => false,
        Some(c) if c.is_ascii_digit() && c != '0' => false,
        _ => true,
    }
}

fn table_line(line: &str, mode: &mut Mode) {
    match mode {
        Mode::Table { headers, rows } => {
            if line.starts_with("|---") || line.starts_with("| ---") {
                return;
            }
            let cells = split_cells(line);
            // Rows with a different cell count than the header are dropped.
            if cells.len() == headers.len() {
                rows.push(cells);
            }
        }
        _ => {
            *mode = Mode::Table {
                headers: split_cells(line),
                rows: Vec::new(),
            };
        }
    }
}

/// Split on `|`, dropping the segments outside the outermost pipes.
fn split_cells(line: &str) -> Vec<String> {
    let parts: Vec<&str> = line.split('|').collect();
    parts[1..parts.len() - 1]
        .iter()
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn finish_table(mode: &mut Mode, blocks: &mut Vec<Block>) {
    if matches!(mode, Mode::Table { .. }) {
        if let Mode::Table { headers, rows } = std::mem::replace(mode, Mode::Normal) {
            blocks.push(Block::Table { headers, rows });
        }
    }
}

/// Split text into styled runs on `**bold**` boundaries; a remaining
/// segment wholly wrapped in single `*` becomes italic, anything else is
/// literal text. Bold spans are matched first and never rescanned.
pub fn inline_runs(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut cursor = 0;

    for m in BOLD_SPAN_RE.find_iter(text) {
        push_segment(&text[cursor..m.start()], &mut runs);
        let span = m.as_str();
        runs.push(Run::bold(&span[2..span.len() - 2]));
        cursor = m.end();
    }
    push_segment(&text[cursor..], &mut runs);
    runs
}

fn push_segment(seg: &str, runs: &mut Vec<Run>) {
    if seg.is_empty() {
        return;
    }
    if seg.len() > 2 && seg.starts_with('*') && seg.ends_with('*') && !seg.starts_with("**") {
        runs.push(Run::italic(&seg[1..seg.len() - 1]));
    } else {
        runs.push(Run::plain(seg));
    }
}
