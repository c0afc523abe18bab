/// Paragraph styles available in the output document.
///
/// `Heading1` covers both `#` and `##` source headings; `Heading2` is
/// reserved for `###`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParaStyle {
    Title,
    Heading1,
    Heading2,
    Normal,
}

/// Formatting applied to a single run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStyle {
    Plain,
    Bold,
    Italic,
    /// Courier New at code size, used for fenced code lines.
    Mono,
}

/// A contiguous span of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::Plain,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::Bold,
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::Italic,
        }
    }

    pub fn mono(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::Mono,
        }
    }
}

/// Block-level elements of the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph {
        style: ParaStyle,
        runs: Vec<Run>,
        /// List items get a fixed left indent.
        indented: bool,
    },
    Table {
        /// Header cell texts, rendered bold.
        headers: Vec<String>,
        /// Data rows; every row has exactly `headers.len()` cells.
        rows: Vec<Vec<String>>,
    },
}

impl Block {
    pub fn paragraph(style: ParaStyle, runs: Vec<Run>) -> Self {
        Block::Paragraph {
            style,
            runs,
            indented: false,
        }
    }

    pub fn list_item(runs: Vec<Run>) -> Self {
        Block::Paragraph {
            style: ParaStyle::Normal,
            runs,
            indented: true,
        }
    }
}
