use docgrep::extract::CellRecord;
use docgrep::{
    extract_file, search, CancellationToken, ExtensionFilter, Extracted, MatchLabel, SearchConfig,
    SearchSummary,
};
use docx_rs::{Docx, Paragraph, Run};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

fn search_for(root: &Path, query: &str) -> SearchSummary {
    search(&SearchConfig::new(root, query), &CancellationToken::new()).unwrap()
}

const WORKBOOK_RELS_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#;

/// Writes a minimal `.xlsx` package. Each sheet is a list of rows; a cell is
/// either a number, inline text, or `None` for a gap.
fn write_xlsx(path: &Path, sheets: &[(&str, Vec<Vec<Option<XlsxCell>>>)]) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let mut content_types = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    );
    let mut workbook = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut workbook_rels = String::from(WORKBOOK_RELS_HEADER);

    for (i, (name, rows)) in sheets.iter().enumerate() {
        let n = i + 1;
        content_types.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ));
        workbook.push_str(&format!(r#"<sheet name="{name}" sheetId="{n}" r:id="rId{n}"/>"#));
        workbook_rels.push_str(&format!(
            r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{n}.xml"/>"#
        ));

        let mut sheet = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
        );
        for (r, row) in rows.iter().enumerate() {
            sheet.push_str(&format!(r#"<row r="{}">"#, r + 1));
            for (c, cell) in row.iter().enumerate() {
                let reference = format!("{}{}", (b'A' + c as u8) as char, r + 1);
                match cell {
                    Some(XlsxCell::Number(v)) => {
                        sheet.push_str(&format!(r#"<c r="{reference}"><v>{v}</v></c>"#))
                    }
                    Some(XlsxCell::Text(t)) => sheet.push_str(&format!(
                        r#"<c r="{reference}" t="inlineStr"><is><t>{t}</t></is></c>"#
                    )),
                    None => {}
                }
            }
            sheet.push_str("</row>");
        }
        sheet.push_str("</sheetData></worksheet>");

        zip.start_file(format!("xl/worksheets/sheet{n}.xml"), options).unwrap();
        zip.write_all(sheet.as_bytes()).unwrap();
    }

    content_types.push_str("</Types>");
    workbook.push_str("</sheets></workbook>");
    workbook_rels.push_str("</Relationships>");
    let package_rels = format!(
        r#"{WORKBOOK_RELS_HEADER}<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
    );

    for (name, body) in [
        ("[Content_Types].xml", content_types),
        ("_rels/.rels", package_rels),
        ("xl/workbook.xml", workbook),
        ("xl/_rels/workbook.xml.rels", workbook_rels),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

enum XlsxCell {
    Number(f64),
    Text(&'static str),
}

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
    }
    docx.build().pack(File::create(path).unwrap()).unwrap();
}

fn write_pdf(path: &Path, pages: &[&str]) {
    let font = dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    };
    write_pdf_with_font(path, pages, font);
}

fn write_pdf_with_font(path: &Path, pages: &[&str], font: Dictionary) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(font);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

#[test]
fn test_docx_paragraph_windows() {
    let dir = TempDir::new().unwrap();
    write_docx(
        &dir.path().join("contract.docx"),
        &["Parties", "The supplier shall deliver", "Payment terms", "Signatures"],
    );

    let config = SearchConfig::new(dir.path(), "SUPPLIER").context(1, 1);
    let summary = search(&config, &CancellationToken::new()).unwrap();

    assert_eq!(summary.results.len(), 1);
    let hit = &summary.results[0].hits[0];
    assert_eq!(hit.label, MatchLabel::Paragraph(2));
    assert_eq!(hit.context, "Parties\nThe supplier shall deliver\nPayment terms");
}

#[test]
fn test_pdf_hits_are_labelled_by_page() {
    let dir = TempDir::new().unwrap();
    write_pdf(
        &dir.path().join("report.pdf"),
        &["Quarterly overview", "Revenue grew strongly"],
    );

    let config = SearchConfig::new(dir.path(), "revenue").extensions(ExtensionFilter::parse("pdf"));
    let summary = search(&config, &CancellationToken::new()).unwrap();

    assert!(summary.diagnostics.is_empty(), "{:?}", summary.diagnostics);
    assert_eq!(summary.files_scanned, 1);
    assert_eq!(summary.results.len(), 1);
    let hits = &summary.results[0].hits;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].label, MatchLabel::Page(2));
    assert!(hits[0].context.contains("Revenue grew strongly"));
}

#[test]
fn test_mixed_formats_in_one_walk() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("plain.txt"), "apple\nbanana\n").unwrap();
    write_docx(&dir.path().join("memo.docx"), &["banana bread recipe"]);
    write_docx(&dir.path().join("other.docx"), &["nothing relevant"]);

    let summary = search_for(dir.path(), "banana");

    assert_eq!(summary.files_scanned, 3);
    assert_eq!(summary.total_matches, 2);
    let mut labels: Vec<String> = summary
        .results
        .iter()
        .flat_map(|r| r.hits.iter().map(|h| h.label.to_string()))
        .collect();
    labels.sort();
    assert_eq!(labels, ["Line 2", "Paragraph 1"]);
}

#[test]
fn test_blank_pdf_page_yields_no_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gap.pdf");
    write_pdf(&path, &["", "Appendix with figures"]);

    match extract_file(&path).unwrap() {
        Extracted::Pages(pages) => {
            assert_eq!(pages.len(), 1);
            assert_eq!(pages[0].page, 2);
        }
        other => panic!("expected pages, got {other:?}"),
    }

    let summary = search_for(dir.path(), "appendix");
    assert_eq!(summary.total_matches, 1);
    assert_eq!(summary.results[0].hits[0].label, MatchLabel::Page(2));
}

#[test]
fn test_pdf_parser_panic_is_a_diagnostic() {
    let dir = TempDir::new().unwrap();
    // lopdf asserts (in debug builds) that font resources carry `/Type /Font`.
    let untyped_font = dictionary! {
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    };
    write_pdf_with_font(&dir.path().join("odd.pdf"), &["needle in a pdf"], untyped_font);
    std::fs::write(dir.path().join("y.txt"), "needle\n").unwrap();

    let summary = search_for(dir.path(), "needle");

    assert_eq!(summary.files_scanned, 2);
    assert!(summary
        .results
        .iter()
        .any(|r| r.path.ends_with("y.txt")));
    if cfg!(debug_assertions) {
        assert_eq!(summary.diagnostics.len(), 1, "{:?}", summary.diagnostics);
        assert!(summary.diagnostics[0].path.ends_with("odd.pdf"));
    }
}

#[test]
fn test_xlsx_cells_by_sheet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("budget.xlsx");
    write_xlsx(
        &path,
        &[
            (
                "Totals",
                vec![
                    vec![Some(XlsxCell::Text("Item")), None, Some(XlsxCell::Text("Amount"))],
                    vec![Some(XlsxCell::Text("Rent")), None, Some(XlsxCell::Number(42.0))],
                ],
            ),
            (
                "Notes",
                vec![vec![Some(XlsxCell::Text("Rent is due monthly"))]],
            ),
        ],
    );

    let cells = match extract_file(&path).unwrap() {
        Extracted::Cells(cells) => cells,
        other => panic!("expected cells, got {other:?}"),
    };
    let cell = |sheet: &str, value: &str| CellRecord {
        sheet: sheet.to_string(),
        value: value.to_string(),
    };
    assert_eq!(
        cells,
        vec![
            cell("Totals", "Item"),
            cell("Totals", "Amount"),
            cell("Totals", "Rent"),
            cell("Totals", "42"),
            cell("Notes", "Rent is due monthly"),
        ]
    );

    let summary = search_for(dir.path(), "42");
    assert_eq!(summary.total_matches, 1);
    let hit = &summary.results[0].hits[0];
    assert_eq!(hit.label, MatchLabel::Sheet("Totals".to_string()));
    assert_eq!(hit.context, "42");

    let summary = search_for(dir.path(), "rent");
    assert_eq!(summary.total_matches, 2);
    let sheets: Vec<String> = summary.results[0]
        .hits
        .iter()
        .map(|h| h.label.to_string())
        .collect();
    assert_eq!(sheets, ["Sheet Totals", "Sheet Notes"]);
}
