use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::board::{Board, Cell};

pub fn parse_board_str(s: &str) -> Result<Board> {
    parse_board_reader(std::io::Cursor::new(s.as_bytes()))
}

pub fn parse_board_reader<R: BufRead>(r: R) -> Result<Board> {
    let mut rows = Vec::<Vec<Cell>>::new();
    for (idx, line) in r.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.context("failed to read grid line")?;
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split(',')
            .map(parse_token)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("line {}: invalid row", line_no))?;
        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                bail!(
                    "line {}: expected {} cells, found {}",
                    line_no,
                    first.len(),
                    row.len()
                );
            }
        }
        rows.push(row);
    }
    Ok(Board::from_rows(rows)?)
}

fn parse_token(token: &str) -> Result<Cell> {
    match token.trim() {
        "" | "_" => Ok(Cell::Unknown),
        "T" => Ok(Cell::Trap),
        "G" => Ok(Cell::Gem),
        t => {
            let k = t
                .parse::<u8>()
                .with_context(|| format!("invalid cell token: {}", t))?;
            Ok(Cell::Number(k))
        }
    }
}

pub fn cell_token(cell: Cell) -> String {
    match cell {
        Cell::Number(k) => k.to_string(),
        Cell::Trap => "T".to_string(),
        Cell::Gem => "G".to_string(),
        Cell::Unknown => "_".to_string(),
    }
}

pub fn to_text(board: &Board) -> String {
    let mut out = String::new();
    for row in board.rows() {
        let line = row.iter().map(|&c| cell_token(c)).collect::<Vec<_>>();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

pub fn load_board<P: AsRef<Path>>(path: P) -> Result<Board> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_board_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn save_board<P: AsRef<Path>>(path: P, board: &Board) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_text(board))
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{parse_board_str, parse_token, to_text};
    use crate::grid::board::Cell;

    #[test]
    fn parse_blank_and_underscore_as_unknown() {
        let board = match parse_board_str("1, ,_\n2,T,G\n") {
            Ok(v) => v,
            Err(e) => panic!("parse failed: {e}"),
        };
        assert_eq!(board.dims(), (3, 2));
        assert_eq!(board.at(1, 0), Ok(Cell::Unknown));
        assert_eq!(board.at(2, 0), Ok(Cell::Unknown));
        assert_eq!(board.at(1, 1), Ok(Cell::Trap));
        assert_eq!(board.at(2, 1), Ok(Cell::Gem));
        assert_eq!(to_text(&board), "1,_,_\n2,T,G\n");
    }

    #[test]
    fn rejects_negative_numbers() {
        assert!(parse_token("-1").is_err());
        assert!(parse_token("x").is_err());
    }

    #[test]
    fn ragged_rows_report_line() {
        let err = match parse_board_str("1,2\n\n1,2,3\n") {
            Ok(_) => panic!("ragged grid accepted"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("line 3"));
    }
}
