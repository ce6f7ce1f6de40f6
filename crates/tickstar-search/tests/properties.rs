//! Property tests over randomly generated boards.

use proptest::prelude::*;
use tickstar_core::{CellState, Grid, Point};
use tickstar_search::{NullSink, Recorder, Search, StepResult, manhattan};

/// Grid dimensions plus start and finish inside them.
fn arb_board() -> impl Strategy<Value = (i32, i32, Point, Point)> {
    (1i32..14, 1i32..14).prop_flat_map(|(w, h)| {
        (
            Just(w),
            Just(h),
            (0..w, 0..h).prop_map(|(x, y)| Point::new(x, y)),
            (0..w, 0..h).prop_map(|(x, y)| Point::new(x, y)),
        )
    })
}

/// Board plus a blocked flag per cell.
fn arb_blocked_board() -> impl Strategy<Value = (i32, i32, Point, Point, Vec<bool>)> {
    arb_board().prop_flat_map(|(w, h, s, f)| {
        (
            Just(w),
            Just(h),
            Just(s),
            Just(f),
            proptest::collection::vec(proptest::bool::weighted(0.3), (w * h) as usize),
        )
    })
}

fn blocked_grid(w: i32, h: i32, blocked: &[bool]) -> Grid {
    let mut grid = Grid::new(w, h).unwrap();
    for (i, _) in blocked.iter().enumerate().filter(|(_, b)| **b) {
        let p = Point::new(i as i32 % w, i as i32 / w);
        grid.set_blocked(p).unwrap();
    }
    grid
}

proptest! {
    #[test]
    fn open_grids_always_reach((w, h, start, finish) in arb_board()) {
        let grid = Grid::new(w, h).unwrap();
        let mut search = Search::new(grid, start, finish, NullSink).unwrap();
        prop_assert_eq!(search.run(), StepResult::Reached);

        let reached = search.grid().at(finish).unwrap().distance_from_start();
        let path = search.reconstruct_path().unwrap();
        prop_assert_eq!(path.len() - 1, reached as usize);
        // No orthogonal path is shorter than the L1 distance.
        prop_assert!(reached as i32 >= manhattan(start, finish));
    }

    #[test]
    fn path_distances_increase_by_one((w, h, start, finish, blocked) in arb_blocked_board()) {
        let grid = blocked_grid(w, h, &blocked);
        let mut search = Search::new(grid, start, finish, NullSink).unwrap();
        if search.run() != StepResult::Reached {
            return Ok(());
        }
        let mut path = search.path().unwrap();
        path.reverse();
        prop_assert_eq!(path[0], start);
        for (i, p) in path.iter().enumerate() {
            prop_assert_eq!(search.grid().at(*p).unwrap().distance_from_start(), i as u32);
        }
        for pair in path.windows(2) {
            prop_assert!(pair[0].is_adjacent_4(pair[1]));
        }
        prop_assert!(path.len() as i32 - 1 >= manhattan(start, finish));
    }

    #[test]
    fn terminates_within_cell_count((w, h, start, finish, blocked) in arb_blocked_board()) {
        let grid = blocked_grid(w, h, &blocked);
        let mut search = Search::new(grid, start, finish, NullSink).unwrap();
        let mut calls = 0usize;
        while !search.step().is_terminal() {
            calls += 1;
            prop_assert!(calls <= (w * h) as usize);
        }
        prop_assert!(calls < (w * h) as usize);
    }

    #[test]
    fn state_is_stable_between_steps((w, h, start, finish, blocked) in arb_blocked_board()) {
        let grid = blocked_grid(w, h, &blocked);
        let mut search = Search::new(grid, start, finish, Recorder::new()).unwrap();
        for _ in 0..3 {
            search.step();
        }
        search.sink_mut().drain();
        let snapshot = search.grid().clone();
        prop_assert_eq!(search.grid(), &snapshot);
        prop_assert!(search.sink().is_empty());
        // Every reported frontier cell is in the grid's frontier state.
        for p in search.frontier() {
            prop_assert_eq!(search.grid().state(p), Some(CellState::Frontier));
        }
    }
}
