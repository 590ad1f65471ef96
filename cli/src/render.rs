use gridsweep_core::{Board, CellValue, CellView};

fn value_symbol(value: CellValue) -> String {
    match value {
        CellValue::Hazard => " * ".to_string(),
        CellValue::Clear(0) => "   ".to_string(),
        CellValue::Clear(count) => format!(" {count} "),
    }
}

fn cell_symbol(board: &Board, row: i64, col: i64, show_all: bool) -> String {
    if show_all {
        if let Some(value) = board.value_at(row, col) {
            return value_symbol(value);
        }
    }
    match board.cell_at(row, col) {
        Some(CellView::Flagged) => " F ".to_string(),
        Some(CellView::Revealed(value)) => value_symbol(value),
        Some(CellView::Hidden) | None => " ■ ".to_string(),
    }
}

/// Grid with a column header and row labels; `show_all` uncovers every placed value.
pub fn render_board(board: &Board, show_all: bool) -> String {
    let (rows, cols) = board.size();
    let mut out = String::from("    ");

    for col in 0..cols {
        out.push_str(&format!("{col:2} "));
    }
    out.push('\n');

    for row in 0..i64::from(rows) {
        out.push_str(&format!("{row:2}  "));
        for col in 0..i64::from(cols) {
            out.push_str(&cell_symbol(board, row, col, show_all));
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

pub fn render_status(board: &Board) -> String {
    let progress = board.progress();
    format!(
        "Revealed: {}/{}   Hazards left: {}",
        progress.revealed,
        progress.total_safe,
        board.hazards_left()
    )
}

pub const LEGEND: &str = "\
Commands:
  r <row> <col>  reveal a cell
  f <row> <col>  flag or unflag a cell
  q              quit the game
Symbols:
  ■  hidden cell
  F  flagged cell
  *  hazard
  1-8  number of adjacent hazards
";
