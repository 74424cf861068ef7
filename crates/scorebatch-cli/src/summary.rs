//! Terminal rendering of scoring results with `comfy-table`.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use scorebatch_model::ScoreFrame;
use scorebatch_model::polars_utils::any_to_string;
use scorebatch_report::{EnrichedReport, ReportError, SegmentShare};

use crate::pipeline::ScoreOutcome;

/// Print the full result of a scoring run: overall counts, the class
/// distribution, the per-segment breakdown when a segment column exists,
/// and the top-K ranking when the model provided probabilities.
pub fn print_outcome(outcome: &ScoreOutcome, top_k: usize) -> Result<(), ReportError> {
    let report = &outcome.report;
    println!("Input: {}", report.source);
    match &outcome.output_path {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, not written)"),
    }

    print_summary_table(report);
    print_histogram(report);
    if let Some(shares) = report.segment_summary()? {
        print_segments(&shares);
    }
    if let Some(top) = report.top_ranking(top_k)? {
        println!();
        println!("Top {} by positive probability:", top.height());
        println!("{}", frame_table(&top));
    }
    Ok(())
}

/// Print the shape and columns of a loaded file without scoring it.
pub fn print_inspect(frame: &ScoreFrame) {
    println!("Input: {}", frame.source);
    println!("Rows: {}", frame.record_count());
    println!("Columns: {}", frame.column_count());

    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Type")]);
    apply_table_style(&mut table);
    for column in frame.data.get_columns() {
        table.add_row(vec![
            Cell::new(column.name().as_str()),
            dim_cell(column.dtype().to_string()),
        ]);
    }
    println!("{table}");
}

fn print_summary_table(report: &EnrichedReport) {
    let summary = report.summary();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Class"),
        header_cell("Rows"),
        header_cell("Share"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("positive").fg(Color::Green),
        Cell::new(summary.positive),
        Cell::new(format!("{:.1}%", summary.positive_pct)),
    ]);
    table.add_row(vec![
        Cell::new("negative").fg(Color::Red),
        Cell::new(summary.negative),
        Cell::new(format!("{:.1}%", summary.negative_pct)),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.total).add_attribute(Attribute::Bold),
        dim_cell("100.0%"),
    ]);
    println!("{table}");
}

fn print_histogram(report: &EnrichedReport) {
    let histogram = report.class_histogram();
    if histogram.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Prediction"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, count) in histogram {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    println!();
    println!("Class distribution:");
    println!("{table}");
}

fn print_segments(shares: &[SegmentShare]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Segment"),
        header_cell("Positive share"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for share in shares {
        table.add_row(vec![
            Cell::new(&share.segment)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(format!("{:.3}", share.fraction_positive)),
            Cell::new(share.rows),
        ]);
    }
    println!();
    println!("Positive share by segment:");
    println!("{table}");
}

/// Render an arbitrary DataFrame as a table, one row per record.
fn frame_table(frame: &DataFrame) -> Table {
    let mut table = Table::new();
    table.set_header(
        frame
            .get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    let columns = frame.get_columns();
    for row in 0..frame.height() {
        let cells: Vec<Cell> = columns
            .iter()
            .map(|column| match column.get(row) {
                Ok(value) => Cell::new(any_to_string(value)),
                Err(_) => dim_cell("-"),
            })
            .collect();
        table.add_row(cells);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use scorebatch_model::polars_utils::format_numeric;

    #[test]
    fn frame_table_renders_every_row() {
        let df = DataFrame::new(vec![
            Column::new("amount".into(), vec![10.5f64, 20.0]),
            Column::new("segment".into(), vec!["x", "y"]),
        ])
        .unwrap();
        let rendered = frame_table(&df).to_string();
        assert!(rendered.contains("amount"));
        assert!(rendered.contains("10.5"));
        assert!(rendered.contains("y"));
    }

    #[test]
    fn numeric_formatting_drops_trailing_zeros() {
        assert_eq!(format_numeric(0.9500), "0.95");
    }
}
