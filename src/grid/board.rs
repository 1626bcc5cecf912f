use thiserror::Error;

use crate::cnf::Lit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Visible clue: how many of the surrounding cells hold traps.
    Number(u8),
    Trap,
    Gem,
    Unknown,
}

impl Cell {
    /// Trap, gem and unknown all look the same to the encoder.
    pub fn is_hidden(self) -> bool {
        !matches!(self, Cell::Number(_))
    }

    pub fn clue(self) -> Option<usize> {
        match self {
            Cell::Number(k) => Some(k as usize),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside a {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("grid has no cells")]
    EmptyGrid,
}

/// Rectangular grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn filled(width: usize, height: usize, cell: Cell) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        Ok(Self {
            width,
            height,
            cells: vec![cell; width * height],
        })
    }

    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GridError::EmptyGrid);
        }
        let mut cells = Vec::with_capacity(width * height);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != width {
                return Err(GridError::RaggedRows {
                    row,
                    expected: width,
                    found: cols.len(),
                });
            }
            cells.extend(cols);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if !self.in_bounds(x, y) {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    pub fn at(&self, x: usize, y: usize) -> Result<Cell, GridError> {
        let idx = self.index(x, y)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), GridError> {
        let idx = self.index(x, y)?;
        self.cells[idx] = cell;
        Ok(())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Every cell with its coordinate, in row-major scan order.
    pub fn cells(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &c)| (Point::new(i % self.width, i / self.width), c))
    }

    pub fn has_hidden(&self) -> bool {
        self.cells.iter().any(|c| c.is_hidden())
    }

    pub fn is_fully_resolved(&self) -> bool {
        !self.cells.iter().any(|&c| c == Cell::Unknown)
    }

    /// Copy with traps and gems turned back into unknown cells.
    pub fn blur(&self) -> Board {
        let cells = self
            .cells
            .iter()
            .map(|&c| if c.is_hidden() { Cell::Unknown } else { c })
            .collect();
        Board {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Equal once trap/gem distinctions are ignored.
    pub fn fuzzy_matches(&self, other: &Board) -> bool {
        self.blur() == other.blur()
    }

    /// Sparse variable id of a cell: `y * width + x + 1`.
    pub fn var_of(&self, x: usize, y: usize) -> u32 {
        (y * self.width + x + 1) as u32
    }

    pub fn point_of(&self, var: u32) -> Option<Point> {
        let idx = (var as usize).checked_sub(1)?;
        if idx >= self.cells.len() {
            return None;
        }
        Some(Point::new(idx % self.width, idx / self.width))
    }

    /// In-bounds Moore neighbours, row-major over the 3x3 window.
    pub fn neighbors(&self, x: usize, y: usize) -> Vec<Point> {
        let mut out = Vec::with_capacity(8);
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                else {
                    continue;
                };
                if self.in_bounds(nx, ny) {
                    out.push(Point::new(nx, ny));
                }
            }
        }
        out
    }

    pub fn traps_around(&self, x: usize, y: usize) -> usize {
        self.neighbors(x, y)
            .into_iter()
            .filter(|p| self.cells[p.y * self.width + p.x] == Cell::Trap)
            .count()
    }

    /// Clue cells whose neighbourhood does not hold exactly the stated number of traps.
    pub fn violated_clues(&self) -> Vec<Point> {
        self.cells()
            .filter_map(|(p, c)| {
                let k = c.clue()?;
                (self.traps_around(p.x, p.y) != k).then_some(p)
            })
            .collect()
    }

    /// Paints a sparse-space model: positive literals become traps, negative gems.
    pub fn apply_model(&mut self, lits: &[Lit]) -> Result<(), GridError> {
        for &lit in lits {
            let p = self.point_of(lit.var).ok_or(GridError::OutOfBounds {
                x: (lit.var as usize).saturating_sub(1) % self.width,
                y: (lit.var as usize).saturating_sub(1) / self.width,
                width: self.width,
                height: self.height,
            })?;
            let cell = if lit.sign { Cell::Trap } else { Cell::Gem };
            self.set(p.x, p.y, cell)?;
        }
        Ok(())
    }
}
