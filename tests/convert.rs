use std::fs;
use std::io::Read;
use std::path::Path;

use pretty_assertions::assert_eq;
use ucdocx::Config;

const FIXTURE: &str = "\
# CU-001: Registrar Asistencia

**Caso de Uso:** CU-001 - Registrar Asistencia

- **ID:** CU-001
- **Nombre:** Registrar Asistencia Diaria
- **Actor:** Capataz

---

## Descripción

El capataz registra la asistencia **diaria** de la cuadrilla.

### Flujo Principal

1. Seleccionar la cuadrilla
- El sistema muestra la *lista* de trabajadores

| Campo | Valor |
|---|---|
| Actor | Capataz |

```
POST /api/asistencia
```
";

fn read_part(archive: &Path, name: &str) -> String {
    let file = fs::File::open(archive).unwrap();
    let mut zip = zip::ZipArchive::new(file).unwrap();
    let mut part = String::new();
    zip.by_name(name).unwrap().read_to_string(&mut part).unwrap();
    part
}

#[test]
fn converts_one_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("CU-001-registrar-asistencia.md");
    fs::write(&input, FIXTURE).unwrap();

    let out_dir = dir.path().join("word");
    let output = ucdocx::convert_file(&input, &out_dir, &Config::default()).unwrap();
    assert_eq!(
        output,
        out_dir.join("CU-001-registrar-asistencia.docx")
    );

    let document = read_part(&output, "word/document.xml");

    // Preamble.
    assert!(document.contains("ESPECIFICACIÓN DE CASO DE USO"));
    assert!(document.contains("CU-001 - Registrar Asistencia"));

    // `##` heading keeps the heading-1 style; `###` takes heading-2.
    assert!(document.contains("<w:pStyle w:val=\"Encabezado1Custom\"/></w:pPr><w:r><w:t xml:space=\"preserve\">Descripción</w:t>"));
    assert!(document.contains("<w:pStyle w:val=\"Encabezado2Custom\"/></w:pPr><w:r><w:t xml:space=\"preserve\">Flujo Principal</w:t>"));

    // Inline bold inside a body paragraph.
    assert!(document.contains("<w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">diaria</w:t>"));

    // Ordered item keeps its numeric prefix.
    assert!(document.contains("1. Seleccionar la cuadrilla"));

    // Table with bold header cells and one data row.
    assert!(document.contains("<w:tbl>"));
    assert!(document.contains("<w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">Campo</w:t>"));
    assert!(document.contains(">Capataz</w:t>"));

    // Fenced code rendered as Courier New run.
    assert!(document.contains("POST /api/asistencia"));
    assert!(document.contains("w:ascii=\"Courier New\""));

    // Header/footer parts carry the metadata and caption.
    let header = read_part(&output, "word/header1.xml");
    assert!(header.contains(
        "Universidad Nacional de Costa Rica - CU-001: Registrar Asistencia Diaria"
    ));
    let footer = read_part(&output, "word/footer1.xml");
    assert!(footer.contains("Sistema de Control y Planificación de Mano de Obra Agroindustrial"));
}

#[test]
fn missing_metadata_falls_back_to_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("CU-999.md");
    fs::write(&input, "sin encabezado\n").unwrap();

    let output = ucdocx::convert_file(&input, dir.path(), &Config::default()).unwrap();
    let header = read_part(&output, "word/header1.xml");
    assert!(header.contains("CU-XXX: Nombre del Caso de Uso"));
}

#[test]
fn conversion_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("CU-001.md");
    fs::write(&input, FIXTURE).unwrap();

    let first = ucdocx::convert_file(&input, &dir.path().join("a"), &Config::default()).unwrap();
    let second = ucdocx::convert_file(&input, &dir.path().join("b"), &Config::default()).unwrap();

    for part in ["word/document.xml", "word/styles.xml", "word/header1.xml"] {
        assert_eq!(read_part(&first, part), read_part(&second, part));
    }
}

#[test]
fn config_overrides_institution() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("CU-001.md");
    fs::write(&input, FIXTURE).unwrap();

    let mut config = Config::default();
    config.document.institution = "Instituto de Prueba".to_string();
    let output = ucdocx::convert_file(&input, dir.path(), &config).unwrap();

    let header = read_part(&output, "word/header1.xml");
    assert!(header.contains("Instituto de Prueba - CU-001"));
}
