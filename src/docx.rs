//! WordprocessingML (`.docx`) writer.
//!
//! Assembles the document parts as XML text and packages them into the
//! OOXML zip layout: `[Content_Types].xml`, `_rels/.rels`,
//! `word/document.xml`, `word/styles.xml`, `word/header1.xml`,
//! `word/footer1.xml` and `word/_rels/document.xml.rels`.

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::block::{Block, ParaStyle, Run, RunStyle};
use crate::config::Config;
use crate::error::Result;
use crate::meta::CaseMeta;

const TWIPS_PER_PT: u32 = 20;
/// 0.25 inch left indent for list paragraphs.
const LIST_INDENT_TWIPS: u32 = 360;
/// Courier runs inside code blocks are 10pt (half-point units).
const CODE_SIZE: u32 = 20;

/// A named paragraph style.
#[derive(Debug, Clone)]
pub struct StyleDef {
    pub id: &'static str,
    pub name: &'static str,
    pub font: String,
    /// Half-point units, as WordprocessingML measures font size.
    pub size: u32,
    pub bold: bool,
    pub centered: bool,
    /// Twips.
    pub space_before: u32,
    pub space_after: u32,
}

/// Style registry owned by one output document. Registration is keyed by
/// style id; re-registering an id is a no-op.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    styles: Vec<StyleDef>,
}

impl StyleRegistry {
    pub fn ensure(&mut self, def: StyleDef) {
        if self.styles.iter().any(|s| s.id == def.id) {
            return;
        }
        self.styles.push(def);
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Register the fixed style set used by every use-case document.
fn default_styles(registry: &mut StyleRegistry, config: &Config) {
    let body = &config.font.body;
    registry.ensure(StyleDef {
        id: "TituloPrincipal",
        name: "Título Principal",
        font: body.clone(),
        size: 32,
        bold: true,
        centered: true,
        space_before: 0,
        space_after: 12 * TWIPS_PER_PT,
    });
    registry.ensure(StyleDef {
        id: "Encabezado1Custom",
        name: "Encabezado 1 Custom",
        font: body.clone(),
        size: 28,
        bold: true,
        centered: false,
        space_before: 12 * TWIPS_PER_PT,
        space_after: 6 * TWIPS_PER_PT,
    });
    registry.ensure(StyleDef {
        id: "Encabezado2Custom",
        name: "Encabezado 2 Custom",
        font: body.clone(),
        size: 24,
        bold: true,
        centered: false,
        space_before: 6 * TWIPS_PER_PT,
        space_after: 3 * TWIPS_PER_PT,
    });
    registry.ensure(StyleDef {
        id: "Normal",
        name: "Normal",
        font: body.clone(),
        size: 22,
        bold: false,
        centered: false,
        space_before: 0,
        space_after: 6 * TWIPS_PER_PT,
    });
}

fn style_id(style: ParaStyle) -> &'static str {
    match style {
        ParaStyle::Title => "TituloPrincipal",
        ParaStyle::Heading1 => "Encabezado1Custom",
        ParaStyle::Heading2 => "Encabezado2Custom",
        ParaStyle::Normal => "Normal",
    }
}

/// Render the document to `.docx` bytes.
pub fn render(meta: &CaseMeta, blocks: &[Block], config: &Config) -> Result<Vec<u8>> {
    let mut registry = StyleRegistry::default();
    default_styles(&mut registry, config);

    let document = document_xml(meta, blocks, config);
    let styles = styles_xml(&registry);
    let header = header_xml(&format!(
        "{} - {}: {}",
        config.document.institution, meta.id, meta.name
    ));
    let footer = footer_xml(&config.document.system);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opt = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", opt)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.add_directory("_rels/", opt)?;
    zip.start_file("_rels/.rels", opt)?;
    zip.write_all(RELS_XML.as_bytes())?;

    zip.add_directory("word/", opt)?;
    zip.add_directory("word/_rels/", opt)?;

    zip.start_file("word/document.xml", opt)?;
    zip.write_all(document.as_bytes())?;

    zip.start_file("word/_rels/document.xml.rels", opt)?;
    zip.write_all(WORD_RELS_XML.as_bytes())?;

    zip.start_file("word/styles.xml", opt)?;
    zip.write_all(styles.as_bytes())?;

    zip.start_file("word/header1.xml", opt)?;
    zip.write_all(header.as_bytes())?;

    zip.start_file("word/footer1.xml", opt)?;
    zip.write_all(footer.as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Build the document body: the fixed title/info preamble followed by the
/// parsed blocks.
pub fn document_xml(meta: &CaseMeta, blocks: &[Block], config: &Config) -> String {
    let mut body = String::new();

    // Title page preamble.
    paragraph_xml(
        ParaStyle::Title,
        &[Run::bold("ESPECIFICACIÓN DE CASO DE USO")],
        false,
        false,
        config,
        &mut body,
    );
    let info = format!(
        "Sistema: {}\n{}\nVersión: {}\nFecha: {}\n{}\n{}",
        config.document.system,
        meta.label,
        config.document.version,
        config.document.date,
        config.document.institution,
        config.document.school,
    );
    paragraph_xml(
        ParaStyle::Normal,
        &[Run::plain(info)],
        false,
        true,
        config,
        &mut body,
    );
    paragraph_xml(
        ParaStyle::Normal,
        &[Run::plain("=".repeat(80))],
        false,
        false,
        config,
        &mut body,
    );

    for block in blocks {
        match block {
            Block::Paragraph {
                style,
                runs,
                indented,
            } => paragraph_xml(*style, runs, *indented, false, config, &mut body),
            Block::Table { headers, rows } => table_xml(headers, rows, &mut body),
        }
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
 xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>{body}<w:sectPr>
<w:headerReference w:type="default" r:id="rId2"/>
<w:footerReference w:type="default" r:id="rId3"/>
<w:pgSz w:w="12240" w:h="15840"/>
<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>
<w:cols w:space="708"/>
</w:sectPr>
</w:body>
</w:document>"#
    )
}

fn paragraph_xml(
    style: ParaStyle,
    runs: &[Run],
    indented: bool,
    centered: bool,
    config: &Config,
    out: &mut String,
) {
    out.push_str("<w:p><w:pPr>");
    out.push_str(&format!("<w:pStyle w:val=\"{}\"/>", style_id(style)));
    if indented {
        out.push_str(&format!("<w:ind w:left=\"{LIST_INDENT_TWIPS}\"/>"));
    }
    if centered {
        out.push_str("<w:jc w:val=\"center\"/>");
    }
    out.push_str("</w:pPr>");
    for run in runs {
        run_xml(run, config, out);
    }
    out.push_str("</w:p>");
}

fn run_xml(run: &Run, config: &Config, out: &mut String) {
    out.push_str("<w:r>");
    match run.style {
        RunStyle::Plain => {}
        RunStyle::Bold => out.push_str("<w:rPr><w:b/></w:rPr>"),
        RunStyle::Italic => out.push_str("<w:rPr><w:i/></w:rPr>"),
        RunStyle::Mono => {
            let font = xml_escape(&config.font.code);
            out.push_str(&format!(
                "<w:rPr><w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\"/><w:sz w:val=\"{CODE_SIZE}\"/></w:rPr>"
            ));
        }
    }
    // Embedded newlines become explicit breaks.
    let mut first = true;
    for segment in run.text.split('\n') {
        if !first {
            out.push_str("<w:br/>");
        }
        first = false;
        if !segment.is_empty() {
            out.push_str("<w:t xml:space=\"preserve\">");
            out.push_str(&xml_escape(segment));
            out.push_str("</w:t>");
        }
    }
    out.push_str("</w:r>");
}

fn table_xml(headers: &[String], rows: &[Vec<String>], out: &mut String) {
    out.push_str(
        "<w:tbl><w:tblPr><w:tblW w:w=\"0\" w:type=\"auto\"/><w:tblBorders>\
<w:top w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>\
<w:left w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>\
<w:bottom w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>\
<w:right w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>\
<w:insideH w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>\
<w:insideV w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>\
</w:tblBorders></w:tblPr><w:tblGrid>",
    );
    for _ in headers {
        out.push_str("<w:gridCol/>");
    }
    out.push_str("</w:tblGrid>");

    table_row_xml(headers, true, out);
    for row in rows {
        table_row_xml(row, false, out);
    }
    out.push_str("</w:tbl>");
}

fn table_row_xml(cells: &[String], header: bool, out: &mut String) {
    out.push_str("<w:tr>");
    for cell in cells {
        out.push_str("<w:tc><w:tcPr/><w:p>");
        out.push_str("<w:r>");
        if header {
            out.push_str("<w:rPr><w:b/></w:rPr>");
        }
        out.push_str("<w:t xml:space=\"preserve\">");
        out.push_str(&xml_escape(cell));
        out.push_str("</w:t></w:r></w:p></w:tc>");
    }
    out.push_str("</w:tr>");
}

fn styles_xml(registry: &StyleRegistry) -> String {
    let mut styles = String::new();
    for def in &registry.styles {
        let default_attr = if def.id == "Normal" { " w:default=\"1\"" } else { "" };
        styles.push_str(&format!(
            "<w:style w:type=\"paragraph\"{default_attr} w:styleId=\"{}\">",
            def.id
        ));
        styles.push_str(&format!(
            "<w:name w:val=\"{}\"/><w:qFormat/>",
            xml_escape(def.name)
        ));
        styles.push_str("<w:pPr>");
        if def.space_before > 0 || def.space_after > 0 {
            styles.push_str(&format!(
                "<w:spacing w:before=\"{}\" w:after=\"{}\"/>",
                def.space_before, def.space_after
            ));
        }
        if def.centered {
            styles.push_str("<w:jc w:val=\"center\"/>");
        }
        styles.push_str("</w:pPr><w:rPr>");
        let font = xml_escape(&def.font);
        styles.push_str(&format!(
            "<w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\"/><w:sz w:val=\"{}\"/>",
            def.size
        ));
        if def.bold {
            styles.push_str("<w:b/>");
        }
        styles.push_str("</w:rPr></w:style>");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">{styles}</w:styles>"#
    )
}

fn header_xml(text: &str) -> String {
    hdr_ftr_xml("w:hdr", text)
}

fn footer_xml(text: &str) -> String {
    hdr_ftr_xml("w:ftr", text)
}

fn hdr_ftr_xml(tag: &str, text: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<{tag} xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p></{tag}>"#,
        xml_escape(text)
    )
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
<Override PartName="/word/header1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml"/>
<Override PartName="/word/footer1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml"/>
</Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const WORD_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" Target="footer1.xml"/>
</Relationships>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_meta() -> CaseMeta {
        CaseMeta {
            label: "CU-001 - Registrar Asistencia".to_string(),
            id: "CU-001".to_string(),
            name: "Registrar Asistencia".to_string(),
        }
    }

    #[test]
    fn ensure_style_is_idempotent() {
        let mut registry = StyleRegistry::default();
        let config = Config::default();
        default_styles(&mut registry, &config);
        let before = registry.len();
        default_styles(&mut registry, &config);
        assert_eq!(registry.len(), before);
    }

    #[test]
    fn escapes_xml_text() {
        assert_eq!(xml_escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn heading_paragraph_uses_custom_style() {
        let blocks = vec![Block::paragraph(
            ParaStyle::Heading1,
            vec![Run::bold("Flujo Principal")],
        )];
        let xml = document_xml(&test_meta(), &blocks, &Config::default());
        assert!(xml.contains("<w:pStyle w:val=\"Encabezado1Custom\"/>"));
        assert!(xml.contains("<w:rPr><w:b/></w:rPr>"));
        assert!(xml.contains("Flujo Principal"));
    }

    #[test]
    fn preamble_comes_before_content() {
        let xml = document_xml(&test_meta(), &[], &Config::default());
        let title = xml.find("ESPECIFICACIÓN DE CASO DE USO").unwrap();
        let separator = xml.find(&"=".repeat(80)).unwrap();
        assert!(title < separator);
        assert!(xml.contains("Sistema: "));
        assert!(xml.contains("CU-001 - Registrar Asistencia"));
    }

    #[test]
    fn table_renders_bold_header_and_plain_rows() {
        let blocks = vec![Block::Table {
            headers: vec!["Campo".to_string(), "Valor".to_string()],
            rows: vec![vec!["actor".to_string(), "capataz".to_string()]],
        }];
        let xml = document_xml(&test_meta(), &blocks, &Config::default());
        let tbl = &xml[xml.find("<w:tbl>").unwrap()..];
        assert_eq!(tbl.matches("<w:tr>").count(), 2);
        assert_eq!(tbl.matches("<w:rPr><w:b/></w:rPr>").count(), 2);
        assert!(tbl.contains("capataz"));
    }

    #[test]
    fn mono_runs_use_code_font() {
        let blocks = vec![Block::paragraph(ParaStyle::Normal, vec![Run::mono("let x = 1;")])];
        let xml = document_xml(&test_meta(), &blocks, &Config::default());
        assert!(xml.contains("w:ascii=\"Courier New\""));
        assert!(xml.contains("<w:sz w:val=\"20\"/>"));
    }

    #[test]
    fn header_carries_id_and_name() {
        let xml = header_xml("Universidad Nacional de Costa Rica - CU-001: Registrar");
        assert!(xml.contains("<w:jc w:val=\"center\"/>"));
        assert!(xml.contains("CU-001: Registrar"));
    }

    #[test]
    fn styles_part_lists_all_four_styles() {
        let mut registry = StyleRegistry::default();
        default_styles(&mut registry, &Config::default());
        let xml = styles_xml(&registry);
        for id in [
            "TituloPrincipal",
            "Encabezado1Custom",
            "Encabezado2Custom",
            "Normal",
        ] {
            assert!(xml.contains(&format!("w:styleId=\"{id}\"")), "missing {id}");
        }
        assert!(xml.contains("w:default=\"1\""));
    }

    #[test]
    fn render_produces_archive_bytes() {
        let bytes = render(&test_meta(), &[], &Config::default()).unwrap();
        // Zip local file header magic.
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }
}
