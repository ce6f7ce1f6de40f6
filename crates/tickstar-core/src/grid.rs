//! The [`Grid`] type: the fixed-size array of [`Cell`] records a search
//! runs over.
//!
//! The grid is the exclusive owner of every cell. Search state changes go
//! through the transition methods below, which refuse moves that would break
//! the state ordering (`Empty → Frontier → Closed`, `Blocked` terminal).

use std::fmt;

use crate::cell::{Cell, CellState};
use crate::geom::{Point, Range};

/// Errors raised by grid construction and setup.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Width or height was not positive.
    InvalidDimensions { width: i32, height: i32 },
    /// A coordinate fell outside the grid.
    InvalidPosition { pos: Point, bounds: Range },
    /// Text rows have different widths.
    InconsistentSize(String),
    /// A character that is not a cell glyph was found.
    InvalidGlyph { ch: char, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "grid dimensions must be positive, got {width}x{height}")
            }
            Self::InvalidPosition { pos, bounds } => {
                write!(f, "position {pos} is outside grid bounds {bounds}")
            }
            Self::InconsistentSize(s) => write!(f, "grid text has inconsistent row widths:\n{s}"),
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "invalid cell glyph \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A `width × height` grid of [`Cell`]s stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Create a grid with every cell `Empty`.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let bounds = Range::new(0, 0, width, height);
        let cells = bounds.iter().map(Cell::new).collect();
        Ok(Self { cells, bounds })
    }

    /// Parse a grid from glyph rows (see [`CellState::glyph`]).
    ///
    /// Surrounding whitespace is trimmed from the whole text; rows must all
    /// have the same width. Only setup glyphs (`.`, `#`, `S`, `F`) are
    /// accepted.
    pub fn from_text(s: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = s.trim().lines().map(str::trim).collect();
        let width = rows.first().map_or(0, |r| r.chars().count()) as i32;
        if rows.iter().any(|r| r.chars().count() as i32 != width) {
            return Err(GridError::InconsistentSize(s.to_string()));
        }
        let mut grid = Self::new(width, rows.len() as i32)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let state = match CellState::from_glyph(ch) {
                    Some(
                        st @ (CellState::Empty
                        | CellState::Blocked
                        | CellState::Start
                        | CellState::Finish),
                    ) => st,
                    _ => return Err(GridError::InvalidGlyph { ch, pos }),
                };
                let i = grid.index_of(pos).ok_or(GridError::InvalidPosition {
                    pos,
                    bounds: grid.bounds,
                })?;
                grid.cells[i].state = state;
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: grids have positive dimensions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index_of(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.width() as usize) + (p.x as usize))
    }

    /// Fail with [`GridError::InvalidPosition`] unless `p` is in bounds.
    pub fn check(&self, p: Point) -> Result<(), GridError> {
        if self.contains(p) {
            Ok(())
        } else {
            Err(GridError::InvalidPosition {
                pos: p,
                bounds: self.bounds,
            })
        }
    }

    /// The cell at `p`, or `None` outside the grid.
    pub fn at(&self, p: Point) -> Option<&Cell> {
        self.index_of(p).map(|i| &self.cells[i])
    }

    /// The state at `p`, or `None` outside the grid.
    pub fn state(&self, p: Point) -> Option<CellState> {
        self.at(p).map(Cell::state)
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// First cell in row-major order with the given state.
    pub fn find(&self, state: CellState) -> Option<Point> {
        self.cells.iter().find(|c| c.state == state).map(Cell::pos)
    }

    /// Count cells in the given state.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    fn cell_mut(&mut self, p: Point) -> Option<&mut Cell> {
        self.index_of(p).map(|i| &mut self.cells[i])
    }

    // -----------------------------------------------------------------------
    // Setup
    // -----------------------------------------------------------------------

    /// Block the cell at `p` if it is `Empty`. Returns whether it changed.
    pub fn set_blocked(&mut self, p: Point) -> Result<bool, GridError> {
        self.check(p)?;
        let Some(cell) = self.cell_mut(p) else {
            return Ok(false);
        };
        if cell.state != CellState::Empty {
            return Ok(false);
        }
        cell.state = CellState::Blocked;
        Ok(true)
    }

    /// Mark `p` as the start cell, overwriting whatever was there.
    pub fn set_start(&mut self, p: Point) -> Result<(), GridError> {
        self.set_special(p, CellState::Start)
    }

    /// Mark `p` as the finish cell, overwriting whatever was there.
    pub fn set_finish(&mut self, p: Point) -> Result<(), GridError> {
        self.set_special(p, CellState::Finish)
    }

    fn set_special(&mut self, p: Point, state: CellState) -> Result<(), GridError> {
        self.check(p)?;
        if let Some(cell) = self.cell_mut(p) {
            cell.clear();
            cell.state = state;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Search transitions
    // -----------------------------------------------------------------------

    /// Record the root metrics of the start cell: no parent, zero steps.
    pub fn seed_origin(&mut self, p: Point, distance_to_goal: f64) -> bool {
        let Some(cell) = self.cell_mut(p) else {
            return false;
        };
        cell.parent = None;
        cell.distance_from_start = 0;
        cell.distance_to_goal = distance_to_goal;
        true
    }

    /// Turn an `Empty` or `Finish` cell into `Frontier`, recording its parent
    /// and metrics. Cells in any other state are left untouched, so a parent
    /// is assigned at most once.
    pub fn discover(
        &mut self,
        p: Point,
        parent: Point,
        distance_from_start: u32,
        distance_to_goal: f64,
    ) -> bool {
        let Some(cell) = self.cell_mut(p) else {
            return false;
        };
        if !cell.state.is_discoverable() {
            return false;
        }
        cell.state = CellState::Frontier;
        cell.parent = Some(parent);
        cell.distance_from_start = distance_from_start;
        cell.distance_to_goal = distance_to_goal;
        true
    }

    /// Move a `Frontier` cell to `Closed`.
    pub fn close(&mut self, p: Point) -> bool {
        match self.cell_mut(p) {
            Some(cell) if cell.state == CellState::Frontier => {
                cell.state = CellState::Closed;
                true
            }
            _ => false,
        }
    }

    /// Tag a discovered (`Frontier` or `Closed`) cell as lying on the path.
    pub fn mark(&mut self, p: Point) -> bool {
        match self.cell_mut(p) {
            Some(cell) if matches!(cell.state, CellState::Frontier | CellState::Closed) => {
                cell.state = CellState::Marked;
                true
            }
            _ => false,
        }
    }

    /// Clear all search state. Every non-`Blocked` cell returns to `Empty`
    /// with no parent; returns the positions whose state changed.
    pub fn reset(&mut self) -> Vec<Point> {
        let mut changed = Vec::new();
        for cell in &mut self.cells {
            let before = cell.state;
            cell.clear();
            if cell.state != before {
                changed.push(cell.pos);
            }
        }
        changed
    }

    // -----------------------------------------------------------------------
    // Neighbours
    // -----------------------------------------------------------------------

    /// Positions in the box `[x-(radius-1), x+radius) × [y-(radius-1), y+radius)`
    /// clamped to the grid, sharing a row or column with `p`, excluding `p`.
    ///
    /// With `radius == 2` this is exactly the in-bounds orthogonal
    /// neighbours. Results are in row-major order.
    pub fn neighbors_in_radius(&self, p: Point, radius: i32) -> Vec<Point> {
        if radius <= 0 {
            return Vec::new();
        }
        let window = Range::new(
            p.x - (radius - 1),
            p.y - (radius - 1),
            p.x + radius,
            p.y + radius,
        )
        .intersect(self.bounds);
        window
            .iter()
            .filter(|q| *q != p && (q.x == p.x || q.y == p.y))
            .collect()
    }

    /// In-bounds orthogonal neighbours of `p`, row-major.
    #[inline]
    pub fn neighbors(&self, p: Point) -> Vec<Point> {
        self.neighbors_in_radius(p, 2)
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders one glyph per cell, one row per line.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width() as usize) {
            for cell in row {
                write!(f, "{}", cell.state.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_bad_dimensions() {
        assert_eq!(
            Grid::new(0, 3),
            Err(GridError::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(Grid::new(4, -1).is_err());
    }

    #[test]
    fn new_is_empty_with_positions() {
        let g = Grid::new(4, 3).unwrap();
        assert_eq!(g.size(), Point::new(4, 3));
        assert_eq!(g.len(), 12);
        assert_eq!(g.count(CellState::Empty), 12);
        for cell in &g {
            assert_eq!(g.at(cell.pos()), Some(cell));
        }
        assert!(g.at(Point::new(4, 0)).is_none());
    }

    #[test]
    fn set_blocked_only_overwrites_empty() {
        let mut g = Grid::new(3, 3).unwrap();
        let s = Point::new(0, 0);
        let f = Point::new(2, 2);
        g.set_start(s).unwrap();
        g.set_finish(f).unwrap();

        assert_eq!(g.set_blocked(s), Ok(false));
        assert_eq!(g.set_blocked(f), Ok(false));
        assert_eq!(g.state(s), Some(CellState::Start));
        assert_eq!(g.state(f), Some(CellState::Finish));

        let p = Point::new(1, 1);
        assert_eq!(g.set_blocked(p), Ok(true));
        assert_eq!(g.set_blocked(p), Ok(false));
        assert_eq!(g.state(p), Some(CellState::Blocked));
    }

    #[test]
    fn setup_fails_fast_out_of_bounds() {
        let mut g = Grid::new(3, 3).unwrap();
        let bad = Point::new(3, 0);
        let err = GridError::InvalidPosition {
            pos: bad,
            bounds: g.bounds(),
        };
        assert_eq!(g.set_blocked(bad), Err(err.clone()));
        assert_eq!(g.set_start(bad), Err(err.clone()));
        assert!(g.set_finish(Point::new(-1, 2)).is_err());
        assert_eq!(g.count(CellState::Empty), 9);
    }

    #[test]
    fn radius_two_is_plus_shape() {
        let g = Grid::new(5, 5).unwrap();
        assert_eq!(
            g.neighbors_in_radius(Point::new(2, 2), 2),
            vec![
                Point::new(2, 1),
                Point::new(1, 2),
                Point::new(3, 2),
                Point::new(2, 3),
            ]
        );
    }

    #[test]
    fn radius_clamps_at_edges() {
        let g = Grid::new(5, 5).unwrap();
        assert_eq!(
            g.neighbors_in_radius(Point::new(0, 0), 2),
            vec![Point::new(1, 0), Point::new(0, 1)]
        );
        assert_eq!(
            g.neighbors_in_radius(Point::new(4, 4), 2),
            vec![Point::new(4, 3), Point::new(3, 4)]
        );
        let line = Grid::new(1, 1).unwrap();
        assert!(line.neighbors(Point::ZERO).is_empty());
    }

    #[test]
    fn radius_edge_values() {
        let g = Grid::new(5, 5).unwrap();
        let c = Point::new(2, 2);
        assert!(g.neighbors_in_radius(c, 0).is_empty());
        assert!(g.neighbors_in_radius(c, 1).is_empty());
        // Radius 3 reaches two cells each way.
        assert_eq!(
            g.neighbors_in_radius(c, 3),
            vec![
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(3, 2),
                Point::new(4, 2),
                Point::new(2, 3),
                Point::new(2, 4),
            ]
        );
    }

    #[test]
    fn discover_sets_parent_once() {
        let mut g = Grid::new(3, 1).unwrap();
        let p = Point::new(1, 0);
        assert!(g.discover(p, Point::new(0, 0), 1, 1.0));
        assert!(!g.discover(p, Point::new(2, 0), 1, 1.0));
        let cell = g.at(p).unwrap();
        assert_eq!(cell.state(), CellState::Frontier);
        assert_eq!(cell.parent(), Some(Point::new(0, 0)));
    }

    #[test]
    fn discover_accepts_finish_but_not_blocked_or_start() {
        let mut g = Grid::new(3, 1).unwrap();
        g.set_start(Point::new(0, 0)).unwrap();
        g.set_finish(Point::new(2, 0)).unwrap();
        g.set_blocked(Point::new(1, 0)).unwrap();
        assert!(!g.discover(Point::new(1, 0), Point::new(0, 0), 1, 1.0));
        assert!(!g.discover(Point::new(0, 0), Point::new(1, 0), 1, 1.0));
        assert!(g.discover(Point::new(2, 0), Point::new(1, 0), 2, 0.0));
    }

    #[test]
    fn close_and_mark_follow_state_order() {
        let mut g = Grid::new(2, 1).unwrap();
        let p = Point::new(1, 0);
        assert!(!g.close(p));
        assert!(!g.mark(p));
        g.discover(p, Point::ZERO, 1, 0.0);
        assert!(g.close(p));
        assert!(!g.close(p));
        assert!(g.mark(p));
        assert!(!g.mark(p));
        assert_eq!(g.state(p), Some(CellState::Marked));
    }

    #[test]
    fn reset_clears_all_but_blocked() {
        let mut g = Grid::from_text("S.#\n..F").unwrap();
        g.discover(Point::new(1, 0), Point::ZERO, 1, 1.5);
        g.close(Point::new(1, 0));
        let changed = g.reset();
        assert_eq!(
            changed,
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 1)]
        );
        assert_eq!(g.count(CellState::Blocked), 1);
        assert_eq!(g.count(CellState::Empty), 5);
        assert!(g.iter().all(|c| c.parent().is_none()));
    }

    #[test]
    fn from_text_and_display() {
        let text = "S..\n.#.\n..F\n";
        let g = Grid::from_text(text).unwrap();
        assert_eq!(g.find(CellState::Start), Some(Point::new(0, 0)));
        assert_eq!(g.find(CellState::Finish), Some(Point::new(2, 2)));
        assert_eq!(g.state(Point::new(1, 1)), Some(CellState::Blocked));
        assert_eq!(g.to_string(), text);
    }

    #[test]
    fn from_text_errors() {
        assert!(matches!(
            Grid::from_text("..\n..."),
            Err(GridError::InconsistentSize(_))
        ));
        assert_eq!(
            Grid::from_text("..\n.o"),
            Err(GridError::InvalidGlyph {
                ch: 'o',
                pos: Point::new(1, 1)
            })
        );
    }
}
