//! Client-side report export
//!
//! Pure transformations of an already-fetched [`Report`] into CSV text and a
//! self-contained PDF document. Both render the record verbatim: the grand
//! total comes from `total_all_scopes_kg`, never from re-adding the scope
//! rows, so the exported figures cannot drift from the server's.

use printpdf::{BuiltinFont, Color, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb};

use crate::error::Error;
use crate::types::Report;

const CSV_HEADERS: [&str; 8] = [
    "Report Name",
    "Start Date",
    "End Date",
    "Scope 1 (kg)",
    "Scope 2 (kg)",
    "Scope 3 (kg)",
    "Total (kg)",
    "Generated At",
];

// printpdf measures in Mm(f32); only the kg totals stay f64
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 14.0;
const VALUE_COLUMN_MM: f32 = 110.0;
const ROW_STEP_MM: f32 = 8.0;

/// Two-decimal fixed-point rendering shared by both exporters, so the CSV
/// and the PDF agree bit-for-bit on every numeric string
fn format_kg(value: f64) -> String {
    format!("{:.2}", value)
}

/// The date portion of an ISO 8601 timestamp
fn date_portion(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

/// Download file name for a report: spaces become underscores
pub fn export_file_name(report: &Report, extension: &str) -> String {
    format!("{}.{}", report.report_name.replace(' ', "_"), extension)
}

/// Render a report as CSV: the fixed header row plus one data row.
///
/// Deterministic: the same record always yields byte-identical text. Fields
/// are quoted only when they contain the delimiter or quotes (RFC 4180).
pub fn to_csv(report: &Report) -> Result<String, Error> {
    let scope1 = format_kg(report.total_scope1_kg);
    let scope2 = format_kg(report.total_scope2_kg);
    let scope3 = format_kg(report.total_scope3_kg);
    let total = format_kg(report.total_all_scopes_kg);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS).map_err(Error::export)?;
    writer
        .write_record([
            report.report_name.as_str(),
            report.start_date.as_str(),
            report.end_date.as_str(),
            scope1.as_str(),
            scope2.as_str(),
            scope3.as_str(),
            total.as_str(),
            report.generated_at.as_str(),
        ])
        .map_err(Error::export)?;

    let bytes = writer.into_inner().map_err(Error::export)?;
    String::from_utf8(bytes).map_err(Error::export)
}

/// Render a report as a single-page PDF: title, reporting period, generation
/// date, a per-scope table and a total footer row.
///
/// Uses only builtin fonts, so the output is self-contained.
pub fn to_pdf(report: &Report) -> Result<Vec<u8>, Error> {
    let (doc, page, layer) = PdfDocument::new(
        format!("GHG Emissions Report: {}", report.report_name),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "report",
    );
    let layer = doc.get_page(page).get_layer(layer);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(Error::export)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(Error::export)?;

    layer.use_text(
        format!("GHG Emissions Report: {}", report.report_name),
        18.0,
        Mm(MARGIN_MM),
        Mm(272.0),
        &bold,
    );
    layer.use_text(
        format!(
            "Reporting Period: {} to {}",
            report.start_date, report.end_date
        ),
        12.0,
        Mm(MARGIN_MM),
        Mm(263.0),
        &regular,
    );
    layer.use_text(
        format!("Generated On: {}", date_portion(&report.generated_at)),
        12.0,
        Mm(MARGIN_MM),
        Mm(257.0),
        &regular,
    );

    let rows = [
        ("Scope 1", format_kg(report.total_scope1_kg)),
        ("Scope 2", format_kg(report.total_scope2_kg)),
        ("Scope 3", format_kg(report.total_scope3_kg)),
    ];

    let mut y: f32 = 240.0;
    layer.use_text("Scope", 12.0, Mm(MARGIN_MM), Mm(y), &bold);
    layer.use_text("Emissions (kg CO2e)", 12.0, Mm(VALUE_COLUMN_MM), Mm(y), &bold);
    draw_rule(&layer, y - 2.5);

    for (label, value) in &rows {
        y -= ROW_STEP_MM;
        layer.use_text(*label, 12.0, Mm(MARGIN_MM), Mm(y), &regular);
        layer.use_text(value.as_str(), 12.0, Mm(VALUE_COLUMN_MM), Mm(y), &regular);
        draw_rule(&layer, y - 2.5);
    }

    y -= ROW_STEP_MM;
    layer.use_text("Total Emissions", 12.0, Mm(MARGIN_MM), Mm(y), &bold);
    layer.use_text(
        format_kg(report.total_all_scopes_kg),
        12.0,
        Mm(VALUE_COLUMN_MM),
        Mm(y),
        &bold,
    );

    doc.save_to_bytes().map_err(Error::export)
}

fn draw_rule(layer: &PdfLayerReference, y: f32) {
    layer.set_outline_color(Color::Rgb(Rgb::new(0.7, 0.7, 0.7, None)));
    layer.set_outline_thickness(0.5);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN_MM), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(y)), false),
        ],
        is_closed: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q1_report() -> Report {
        Report {
            id: 1,
            report_name: "Q1 2024".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-03-31".to_string(),
            total_scope1_kg: 120.5,
            total_scope2_kg: 80.25,
            total_scope3_kg: 40.0,
            total_all_scopes_kg: 240.75,
            generated_at: "2024-04-01T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn csv_matches_the_fixed_schema() {
        let csv = to_csv(&q1_report()).unwrap();
        let expected = "Report Name,Start Date,End Date,Scope 1 (kg),Scope 2 (kg),Scope 3 (kg),Total (kg),Generated At\n\
                        Q1 2024,2024-01-01,2024-03-31,120.50,80.25,40.00,240.75,2024-04-01T12:00:00Z\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn csv_is_deterministic() {
        let report = q1_report();
        assert_eq!(to_csv(&report).unwrap(), to_csv(&report).unwrap());
    }

    #[test]
    fn exporters_never_recompute_the_grand_total() {
        let mut report = q1_report();
        report.total_scope1_kg = 10.0;
        report.total_scope2_kg = 20.0;
        report.total_scope3_kg = 5.0;
        report.total_all_scopes_kg = 999.0;

        let csv = to_csv(&report).unwrap();
        let data_row = csv.lines().nth(1).unwrap();
        let fields: Vec<&str> = data_row.split(',').collect();
        assert_eq!(fields[6], "999.00");

        let text = pdf_text(&to_pdf(&report).unwrap());
        assert!(text.contains("999.00"));
        assert!(!text.contains("35.00"));
    }

    #[test]
    fn pdf_is_a_self_contained_document() {
        let pdf = to_pdf(&q1_report()).unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let text = pdf_text(&pdf);
        assert!(text.contains("GHG Emissions Report: Q1 2024"));
        assert!(text.contains("Reporting Period: 2024-01-01 to 2024-03-31"));
        assert!(text.contains("Generated On: 2024-04-01"));
        assert!(text.contains("Scope 1"));
        assert!(text.contains("120.50"));
        assert!(text.contains("Total Emissions"));
        assert!(text.contains("240.75"));
    }

    #[test]
    fn file_names_replace_spaces_with_underscores() {
        let report = q1_report();
        assert_eq!(export_file_name(&report, "csv"), "Q1_2024.csv");
        assert_eq!(export_file_name(&report, "pdf"), "Q1_2024.pdf");
    }

    /// Recover the rendered text from an uncompressed PDF. printpdf writes
    /// every string operand hex-encoded (`<...> Tj`), so decoding the hex
    /// runs yields the page text; dictionary delimiters and other non-hex
    /// runs are skipped.
    fn pdf_text(pdf: &[u8]) -> String {
        let mut text = String::new();
        let mut i = 0;
        while i < pdf.len() {
            if pdf[i] == b'<' {
                if let Some(len) = pdf[i + 1..].iter().position(|&b| b == b'>') {
                    let run = &pdf[i + 1..i + 1 + len];
                    if !run.is_empty() && run.iter().all(u8::is_ascii_hexdigit) {
                        for pair in run.chunks(2) {
                            let hex = std::str::from_utf8(pair).unwrap();
                            let byte = u8::from_str_radix(hex, 16).unwrap();
                            text.push(byte as char);
                        }
                        text.push('\n');
                    }
                    i += len + 2;
                    continue;
                }
            }
            i += 1;
        }
        text
    }
}
