use regex::Regex;
use std::sync::LazyLock;

static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Caso de Uso:\*\* (.+)").unwrap());
static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"- \*\*ID:\*\* (.+)").unwrap());
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- \*\*Nombre:\*\* (.+)").unwrap());

/// Metadata pulled from the head of a use-case document.
///
/// Missing fields fall back to placeholders; malformed or incomplete
/// headers never abort a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseMeta {
    /// Full text of the `**Caso de Uso:**` line.
    pub label: String,
    /// Use-case identifier, e.g. `CU-001`.
    pub id: String,
    /// Human-readable use-case name.
    pub name: String,
}

impl CaseMeta {
    pub fn extract(content: &str) -> Self {
        Self {
            label: first_capture(&LABEL_RE, content).unwrap_or_else(|| "Caso de Uso".to_string()),
            id: first_capture(&ID_RE, content).unwrap_or_else(|| "CU-XXX".to_string()),
            name: first_capture(&NAME_RE, content)
                .unwrap_or_else(|| "Nombre del Caso de Uso".to_string()),
        }
    }
}

fn first_capture(re: &Regex, content: &str) -> Option<String> {
    re.captures(content)
        .map(|caps| caps[1].to_string())
}
