//! The incremental search engine.
//!
//! Each [`Search::step`] closes the most promising frontier cell and
//! discovers its open orthogonal neighbours. The frontier is kept in a
//! row-major ordered set, so equal candidates resolve to the one that comes
//! first in grid order.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use tickstar_core::{Cell, CellState, Grid, GridError, Point};

use crate::config::SearchConfig;
use crate::distance::euclidean;
use crate::error::SearchError;
use crate::report::{Annotation, CellSink, NullSink};
use crate::setup::{ObstacleGen, seeded_rng};

/// Outcome of a single [`Search::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StepResult {
    /// One cell was expanded; the goal has not been discovered yet.
    Continue,
    /// The goal has been discovered. Terminal.
    Reached,
    /// No frontier cells remain, so no path exists. Terminal.
    Exhausted,
}

impl StepResult {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// Lifecycle of a [`Search`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Searching,
    Reached,
    Exhausted,
}

/// A best-first grid search advanced one expansion at a time.
///
/// The search owns its [`Grid`] and reports every cell transition to its
/// sink `S`. Running another search means building a new `Search` or
/// calling [`reset`](Self::reset).
pub struct Search<S: CellSink = NullSink> {
    grid: Grid,
    start: Point,
    finish: Point,
    frontier: BTreeSet<Point>,
    phase: Phase,
    steps: usize,
    sink: S,
}

impl<S: CellSink> Search<S> {
    /// Start a search on a prepared grid.
    ///
    /// `start` and `finish` are written into the grid (overwriting whatever
    /// was there) and reported, then the start's neighbours become the first
    /// frontier.
    pub fn new(grid: Grid, start: Point, finish: Point, sink: S) -> Result<Self, SearchError> {
        grid.check(start)?;
        grid.check(finish)?;
        let mut search = Self::unstarted(grid, start, finish, sink);
        search.place_endpoints()?;
        search.initialize();
        Ok(search)
    }

    /// Build a random board from `config` and start searching it.
    ///
    /// Endpoints not fixed by the config are drawn from the same seeded RNG
    /// as the obstacles.
    pub fn from_config(config: &SearchConfig, sink: S) -> Result<Self, SearchError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height)?;
        let (rng, seed) = seeded_rng(config.seed);
        if config.seed.is_none() {
            log::info!("board seed: {seed}");
        }
        let mut generator = ObstacleGen::new(rng);
        let bounds = grid.bounds();
        let start = match config.start {
            Some(p) => p,
            None => generator.random_point(bounds),
        };
        let finish = match config.finish {
            Some(p) => p,
            None => generator.random_point(bounds),
        };

        let mut search = Self::unstarted(grid, start, finish, sink);
        search.place_endpoints()?;
        let blocked =
            generator.scatter(&mut search.grid, config.obstacle_percent, &mut search.sink)?;
        log::debug!(
            "board {}x{} seed {seed}: {blocked} obstacles",
            config.width,
            config.height
        );
        search.initialize();
        Ok(search)
    }

    fn unstarted(grid: Grid, start: Point, finish: Point, sink: S) -> Self {
        Self {
            grid,
            start,
            finish,
            frontier: BTreeSet::new(),
            phase: Phase::Searching,
            steps: 0,
            sink,
        }
    }

    fn place_endpoints(&mut self) -> Result<(), GridError> {
        self.grid.set_start(self.start)?;
        self.sink.on_cell_updated(self.start, CellState::Start, None);
        if self.finish != self.start {
            self.grid.set_finish(self.finish)?;
            self.sink.on_cell_updated(self.finish, CellState::Finish, None);
        }
        Ok(())
    }

    /// Seed the start cell and discover its neighbours. The start itself is
    /// never frontier: it is the root of the discovery tree.
    fn initialize(&mut self) {
        self.frontier.clear();
        self.phase = Phase::Searching;
        self.steps = 0;
        self.grid.seed_origin(self.start, euclidean(self.start, self.finish));
        if self.start == self.finish {
            log::debug!("search {}: start is the goal", self.start);
            return;
        }
        self.expand(self.start);
        log::debug!(
            "search {} -> {}: {} initial frontier cells",
            self.start,
            self.finish,
            self.frontier.len()
        );
    }

    /// Perform exactly one expansion, or report the terminal outcome.
    ///
    /// The goal counts as reached as soon as it is discovered: a call whose
    /// expansion turns the finish into frontier returns
    /// [`StepResult::Reached`]. If the finish was already discovered during
    /// initialization, the next call returns `Reached` without expanding.
    /// Once terminal, further calls return the same result and change
    /// nothing.
    pub fn step(&mut self) -> StepResult {
        match self.phase {
            Phase::Reached => return StepResult::Reached,
            Phase::Exhausted => return StepResult::Exhausted,
            Phase::Searching => {}
        }
        if self.goal_discovered() {
            return self.conclude(Phase::Reached);
        }
        let Some(best) = self.select() else {
            return self.conclude(Phase::Exhausted);
        };

        self.frontier.remove(&best);
        if self.grid.close(best) {
            self.sink.on_cell_updated(best, CellState::Closed, None);
        }
        self.steps += 1;
        log::trace!("step {}: closed {best}", self.steps);
        self.expand(best);

        if self.goal_discovered() {
            return self.conclude(Phase::Reached);
        }
        StepResult::Continue
    }

    /// Step until a terminal result. Terminates after at most
    /// `width * height` calls.
    pub fn run(&mut self) -> StepResult {
        loop {
            let result = self.step();
            if result.is_terminal() {
                return result;
            }
        }
    }

    fn goal_discovered(&self) -> bool {
        self.start == self.finish || self.frontier.contains(&self.finish)
    }

    fn conclude(&mut self, phase: Phase) -> StepResult {
        self.phase = phase;
        match phase {
            Phase::Reached => {
                log::debug!("goal {} reached after {} steps", self.finish, self.steps);
                StepResult::Reached
            }
            Phase::Exhausted => {
                log::debug!(
                    "frontier exhausted after {} expansions, {} unreachable",
                    self.steps,
                    self.finish
                );
                StepResult::Exhausted
            }
            Phase::Searching => StepResult::Continue,
        }
    }

    /// Lowest total cost wins, then lowest distance to goal, then the first
    /// in row-major order.
    fn select(&self) -> Option<Point> {
        let mut best: Option<&Cell> = None;
        for cell in self.frontier.iter().filter_map(|&p| self.grid.at(p)) {
            let better = match best {
                None => true,
                Some(b) => match cell.total_cost().total_cmp(&b.total_cost()) {
                    Ordering::Less => true,
                    Ordering::Equal => cell.distance_to_goal() < b.distance_to_goal(),
                    Ordering::Greater => false,
                },
            };
            if better {
                best = Some(cell);
            }
        }
        best.map(Cell::pos)
    }

    fn expand(&mut self, from: Point) {
        let passed = self.grid.at(from).map_or(0, Cell::distance_from_start) + 1;
        for n in self.grid.neighbors(from) {
            if !self.grid.discover(n, from, passed, euclidean(n, self.finish)) {
                continue;
            }
            self.frontier.insert(n);
            if let Some(cell) = self.grid.at(n) {
                let annotation = Annotation::of(cell);
                self.sink.on_cell_updated(n, CellState::Frontier, Some(&annotation));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Path
    // -----------------------------------------------------------------------

    /// Collect the path by walking parent links from the finish back to the
    /// start. Positions are in goal-to-start order and include both ends.
    ///
    /// Has no side effects; see [`reconstruct_path`](Self::reconstruct_path).
    pub fn path(&self) -> Result<Vec<Point>, SearchError> {
        if self.phase != Phase::Reached {
            return Err(SearchError::ReconstructBeforeReached);
        }
        let mut path = vec![self.finish];
        let mut cur = self.finish;
        while let Some(parent) = self.grid.at(cur).and_then(Cell::parent) {
            path.push(parent);
            cur = parent;
        }
        Ok(path)
    }

    /// Tag the given cells as [`CellState::Marked`] and report each one.
    /// The start cell keeps its `Start` state; cells already marked are
    /// skipped.
    pub fn mark_path(&mut self, path: &[Point]) {
        for &p in path {
            if self.grid.mark(p) {
                self.sink.on_cell_updated(p, CellState::Marked, None);
            }
        }
    }

    /// [`path`](Self::path) followed by [`mark_path`](Self::mark_path).
    pub fn reconstruct_path(&mut self) -> Result<Vec<Point>, SearchError> {
        let path = self.path()?;
        self.mark_path(&path);
        Ok(path)
    }

    // -----------------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------------

    /// Clear all search state, keeping obstacles, start and finish, and
    /// begin again. Every cleared cell is reported as `Empty` first.
    pub fn reset(&mut self) -> Result<(), SearchError> {
        let cleared = self.grid.reset();
        for &p in &cleared {
            self.sink.on_cell_updated(p, CellState::Empty, None);
        }
        log::debug!("reset: cleared {} cells", cleared.len());
        self.place_endpoints()?;
        self.initialize();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn finish(&self) -> Point {
        self.finish
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.phase != Phase::Searching
    }

    /// Number of expansions performed so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Frontier cells in row-major order.
    pub fn frontier(&self) -> impl Iterator<Item = Point> + '_ {
        self.frontier.iter().copied()
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
