use serde::{Deserialize, Serialize};

/// Board edge length. The grid is always square and never resizes.
pub const BOARD_SIZE: usize = 4;

/// Raw cell grid, row-major. 0 means empty; every other value is a power of
/// two starting at 2.
pub type Grid = [[u32; BOARD_SIZE]; BOARD_SIZE];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Outcome of collapsing a single row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineResult {
    /// The transformed line, compacted toward index 0 and padded with zeros.
    pub cells: [u32; BOARD_SIZE],
    /// Whether the output differs from the input at any position.
    pub moved: bool,
    /// Points scored by merges: each merge awards the doubled value.
    pub points: u32,
}

/// Compacts and merges one line toward index 0.
///
/// Zeros are dropped preserving order, then a single left-to-right pass
/// merges each pair of equal neighbors into one doubled tile. A tile
/// produced by a merge is never merged again in the same pass. The result
/// is padded back to four cells.
pub fn collapse_line(line: [u32; BOARD_SIZE]) -> LineResult {
    let compacted: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();

    let mut cells = [0u32; BOARD_SIZE];
    let mut points = 0;
    let mut write = 0;
    let mut read = 0;
    while read < compacted.len() {
        if read + 1 < compacted.len() && compacted[read] == compacted[read + 1] {
            let merged = compacted[read] * 2;
            cells[write] = merged;
            points += merged;
            read += 2;
        } else {
            cells[write] = compacted[read];
            read += 1;
        }
        write += 1;
    }

    LineResult {
        cells,
        moved: cells != line,
        points,
    }
}

/// Aggregate outcome of shifting the whole grid in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftOutcome {
    pub moved: bool,
    pub points: u32,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: Grid,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self) -> &Grid {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row][col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: u32) {
        self.cells[row][col] = value;
    }

    fn column(&self, col: usize) -> [u32; BOARD_SIZE] {
        let mut line = [0u32; BOARD_SIZE];
        for row in 0..BOARD_SIZE {
            line[row] = self.cells[row][col];
        }
        line
    }

    fn set_column(&mut self, col: usize, line: [u32; BOARD_SIZE]) {
        for row in 0..BOARD_SIZE {
            self.cells[row][col] = line[row];
        }
    }

    /// Shifts the whole grid in `direction`, merging as it goes.
    ///
    /// The collapse itself always works toward index 0; the direction only
    /// decides which lines are extracted and whether they are reversed
    /// around the collapse.
    pub fn shift(&mut self, direction: Direction) -> ShiftOutcome {
        let mut moved = false;
        let mut points = 0;

        match direction {
            Direction::Left => {
                for row in 0..BOARD_SIZE {
                    let result = collapse_line(self.cells[row]);
                    if result.moved {
                        moved = true;
                        self.cells[row] = result.cells;
                    }
                    points += result.points;
                }
            }
            Direction::Right => {
                for row in 0..BOARD_SIZE {
                    let mut line = self.cells[row];
                    line.reverse();
                    let result = collapse_line(line);
                    if result.moved {
                        moved = true;
                        let mut cells = result.cells;
                        cells.reverse();
                        self.cells[row] = cells;
                    }
                    points += result.points;
                }
            }
            Direction::Up => {
                for col in 0..BOARD_SIZE {
                    let result = collapse_line(self.column(col));
                    if result.moved {
                        moved = true;
                        self.set_column(col, result.cells);
                    }
                    points += result.points;
                }
            }
            Direction::Down => {
                for col in 0..BOARD_SIZE {
                    let mut line = self.column(col);
                    line.reverse();
                    let result = collapse_line(line);
                    if result.moved {
                        moved = true;
                        let mut cells = result.cells;
                        cells.reverse();
                        self.set_column(col, cells);
                    }
                    points += result.points;
                }
            }
        }

        ShiftOutcome { moved, points }
    }

    /// Returns the coordinates (row, col) of every empty cell.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut empties = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.cells[row][col] == 0 {
                    empties.push((row, col));
                }
            }
        }
        empties
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&v| v != 0)
    }

    /// The largest tile currently on the board, 0 when empty.
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// True when two equal non-zero tiles touch horizontally or vertically.
    pub fn has_adjacent_pair(&self) -> bool {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE - 1 {
                let v = self.cells[row][col];
                if v != 0 && v == self.cells[row][col + 1] {
                    return true;
                }
            }
        }
        for row in 0..BOARD_SIZE - 1 {
            for col in 0..BOARD_SIZE {
                let v = self.cells[row][col];
                if v != 0 && v == self.cells[row + 1][col] {
                    return true;
                }
            }
        }
        false
    }
}

impl From<Grid> for Board {
    fn from(cells: Grid) -> Self {
        Self { cells }
    }
}
