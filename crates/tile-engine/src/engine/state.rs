use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const NAMES: [&'static str; 4] = ["up", "down", "left", "right"];

    /// Unit step toward the cell a tile moves into.
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// True when the scan must run from the last cell back to the first.
    #[inline]
    pub(crate) fn scans_reversed(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(EngineError::UnknownDirection(s.to_string())),
        }
    }
}

/// Board coordinate; `x` is the column, `y` the row (0 = top).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Pos { x, y }
    }
}

/// An occupied cell: where it is and what it holds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tile {
    pub pos: Pos,
    pub value: u32,
}

/// One tile displacement produced by a move action.
///
/// `value` is what `to` holds once the whole action has completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Pos,
    pub to: Pos,
    pub value: u32,
}

/// Rectangular grid of optional tile values.
///
/// Cells are stored row-major in a flat vector (`y * width + x`); the set of
/// coordinates is fixed at construction.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    pub(crate) cells: Vec<Option<u32>>,
}

impl Board {
    pub const DEFAULT_SIZE: usize = 4;
    /// Largest number of cells a board may hold.
    pub const MAX_CELLS: usize = 1 << 20;

    /// Allocate a `width` x `height` board with every cell empty.
    ///
    /// Zero sides and boards above [`Board::MAX_CELLS`] cells are rejected
    /// with [`EngineError::InvalidDimensions`].
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let cells = width
            .checked_mul(height)
            .filter(|&n| n > 0 && n <= Self::MAX_CELLS)
            .ok_or(EngineError::InvalidDimensions { width, height })?;
        Ok(Board {
            width,
            height,
            cells: vec![None; cells],
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells, occupied or not.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// True when no cell holds a tile.
    #[inline]
    pub fn has_no_tiles(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    #[inline]
    pub(crate) fn index(&self, pos: Pos) -> usize {
        pos.y * self.width + pos.x
    }

    #[inline]
    pub(crate) fn pos_of(&self, idx: usize) -> Pos {
        Pos::new(idx % self.width, idx / self.width)
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(EngineError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.index(Pos::new(x, y)))
    }

    /// Neighbouring position one step in `dir`, if it is on the board.
    #[inline]
    pub(crate) fn neighbor(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let x = pos.x.checked_add_signed(dx)?;
        let y = pos.y.checked_add_signed(dy)?;
        (x < self.width && y < self.height).then_some(Pos::new(x, y))
    }

    /// Value at `(x, y)`; `None` means the cell is empty.
    pub fn value(&self, x: usize, y: usize) -> Result<Option<u32>> {
        let idx = self.checked_index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Overwrite a cell. Out-of-range coordinates are rejected rather than
    /// growing the board.
    pub fn set_value(&mut self, x: usize, y: usize, value: Option<u32>) -> Result<&mut Self> {
        if let Some(v) = value {
            if v < 2 || !v.is_power_of_two() {
                return Err(EngineError::InvalidValue(v));
            }
        }
        let idx = self.checked_index(x, y)?;
        self.cells[idx] = value;
        Ok(self)
    }

    /// Empty coordinates in row-major order.
    pub fn empty_cells(&self) -> Vec<Pos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(idx, _)| self.pos_of(idx))
            .collect()
    }

    /// Occupied cells in row-major order.
    pub fn occupied_cells(&self) -> Vec<Tile> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, c)| {
                c.map(|value| Tile {
                    pos: self.pos_of(idx),
                    value,
                })
            })
            .collect()
    }

    /// Highest tile on the board, if any.
    pub fn highest_tile(&self) -> Option<u32> {
        self.cells.iter().flatten().copied().max()
    }

    /// Text grid with every cell printed as `[` + right-aligned value + `]`.
    ///
    /// ```
    /// use tile_engine::Board;
    /// let mut b = Board::new(2, 2).unwrap();
    /// b.set_value(1, 0, Some(16)).unwrap();
    /// assert_eq!(b.render(2), "[  ][16]\n[  ][  ]");
    /// ```
    pub fn render(&self, padding: usize) -> String {
        let mut out = String::with_capacity(self.cell_count() * (padding + 2) + self.height);
        for (y, row) in self.cells.chunks(self.width).enumerate() {
            if y > 0 {
                out.push('\n');
            }
            for cell in row {
                match cell {
                    Some(v) => out.push_str(&format!("[{v:>padding$}]")),
                    None => out.push_str(&format!("[{:>padding$}]", "")),
                }
            }
        }
        out
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({}x{})\n{}", self.width, self.height, self.render(4))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_all_empty() {
        let b = Board::new(4, 4).unwrap();
        assert_eq!(b.cell_count(), 16);
        assert!(b.has_no_tiles());
        assert_eq!(b.empty_cells().len(), 16);
        assert!(b.occupied_cells().is_empty());
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(
            Board::new(0, 4),
            Err(EngineError::InvalidDimensions { width: 0, height: 4 })
        );
        assert!(Board::new(4, 0).is_err());
    }

    #[test]
    fn oversized_dimensions_rejected() {
        assert_eq!(
            Board::new(usize::MAX, 2),
            Err(EngineError::InvalidDimensions { width: usize::MAX, height: 2 })
        );
        assert!(Board::new(usize::MAX, usize::MAX).is_err());
        assert!(Board::new(Board::MAX_CELLS + 1, 1).is_err());
        assert!(Board::new(1 << 10, 1 << 10).is_ok());
    }

    #[test]
    fn cell_count_ignores_occupancy() {
        let mut b = Board::new(3, 2).unwrap();
        b.set_value(2, 1, Some(4)).unwrap();
        assert_eq!(b.cell_count(), 6);
        assert!(!b.has_no_tiles());
        b.set_value(2, 1, None).unwrap();
        assert_eq!(b.cell_count(), 6);
        assert!(b.has_no_tiles());
    }

    #[test]
    fn set_and_get_roundtrip() {
        let mut b = Board::new(4, 4).unwrap();
        b.set_value(3, 3, Some(8)).unwrap().set_value(2, 2, Some(2)).unwrap();
        assert_eq!(b.value(3, 3), Ok(Some(8)));
        assert_eq!(b.value(0, 0), Ok(None));
        assert_eq!(b.empty_cells().len(), 14);
    }

    #[test]
    fn out_of_range_is_rejected_not_grown() {
        let mut b = Board::new(4, 4).unwrap();
        let err = b.set_value(3, 4, Some(8)).unwrap_err();
        assert!(matches!(err, EngineError::OutOfRange { x: 3, y: 4, .. }));
        assert!(b.value(4, 0).is_err());
        assert_eq!(b.cell_count(), 16);
    }

    #[test]
    fn non_power_of_two_rejected() {
        let mut b = Board::new(2, 2).unwrap();
        assert_eq!(b.set_value(0, 0, Some(6)).unwrap_err(), EngineError::InvalidValue(6));
        assert_eq!(b.set_value(0, 0, Some(1)).unwrap_err(), EngineError::InvalidValue(1));
        assert!(b.set_value(0, 0, Some(0)).is_err());
    }

    #[test]
    fn empty_cells_are_row_major() {
        let mut b = Board::new(3, 2).unwrap();
        b.set_value(1, 0, Some(2)).unwrap();
        assert_eq!(
            b.empty_cells(),
            vec![
                Pos::new(0, 0),
                Pos::new(2, 0),
                Pos::new(0, 1),
                Pos::new(1, 1),
                Pos::new(2, 1)
            ]
        );
    }

    #[test]
    fn neighbor_stops_at_edges() {
        let b = Board::new(3, 3).unwrap();
        assert_eq!(b.neighbor(Pos::new(0, 0), Direction::Left), None);
        assert_eq!(b.neighbor(Pos::new(0, 0), Direction::Up), None);
        assert_eq!(b.neighbor(Pos::new(2, 2), Direction::Right), None);
        assert_eq!(b.neighbor(Pos::new(2, 2), Direction::Down), None);
        assert_eq!(b.neighbor(Pos::new(1, 1), Direction::Up), Some(Pos::new(1, 0)));
    }

    #[test]
    fn direction_parsing() {
        assert_eq!("LEFT".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(" down ".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(EngineError::UnknownDirection("sideways".into()))
        );
    }

    #[test]
    fn render_pads_values() {
        let mut b = Board::new(3, 1).unwrap();
        b.set_value(0, 0, Some(2048)).unwrap();
        assert_eq!(b.render(4), "[2048][    ][    ]");
        assert_eq!(b.to_string(), b.render(4));
    }
}
