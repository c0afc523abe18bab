use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub document: DocumentConfig,
    pub font: FontConfig,
    pub output: OutputConfig,
}

/// Institutional text placed in the preamble, header and footer.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DocumentConfig {
    pub institution: String,
    pub school: String,
    /// System caption, also used as the footer text.
    pub system: String,
    pub version: String,
    pub date: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            institution: "Universidad Nacional de Costa Rica".to_string(),
            school: "Escuela de Informática".to_string(),
            system: "Sistema de Control y Planificación de Mano de Obra Agroindustrial"
                .to_string(),
            version: "1.0".to_string(),
            date: "Diciembre 2024".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FontConfig {
    pub body: String,
    pub code: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            body: "Arial".to_string(),
            code: "Courier New".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    /// Subdirectory (relative to the input directory) that receives the
    /// generated documents.
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "word".to_string(),
        }
    }
}

impl Config {
    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load(Path::new("does-not-exist.toml"));
        assert_eq!(config.font.body, "Arial");
        assert_eq!(config.output.dir, "word");
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: Config = toml::from_str("[document]\ninstitution = \"UNA\"\n").unwrap();
        assert_eq!(config.document.institution, "UNA");
        assert_eq!(config.document.version, "1.0");
        assert_eq!(config.font.code, "Courier New");
    }
}
