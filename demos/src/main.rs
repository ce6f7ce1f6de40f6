//! Terminal driver for a tickstar search.
//!
//! Builds a random board, then calls `step()` once per tick and repaints the
//! cells each tick changed. The engine has no clock of its own; the delay
//! and interval here are the host's choice.
//!
//! Run: cargo run --bin tickstar-demo -- --seed 7 --width 30 --height 15

mod term;

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tickstar_core::{CellState, Point};
use tickstar_search::{Recorder, Search, SearchConfig, StepResult};

use crate::term::TermView;

/// Animate a step-by-step grid search.
#[derive(Parser, Debug)]
#[command(name = "tickstar-demo")]
#[command(about = "Animate an incremental best-first grid search, one expansion per tick")]
#[command(version)]
struct Args {
    /// JSON file with a search config; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<i32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<i32>,

    /// Start cell as X,Y (random when omitted)
    #[arg(long, value_parser = parse_point)]
    start: Option<Point>,

    /// Finish cell as X,Y (random when omitted)
    #[arg(long, value_parser = parse_point)]
    finish: Option<Point>,

    /// Obstacle probability per cell, in percent
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    obstacles: Option<u8>,

    /// Random seed for endpoints and obstacles
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pause before the first tick, in milliseconds
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,

    /// Time between ticks, in milliseconds
    #[arg(long, default_value_t = 200)]
    interval_ms: u64,

    /// Run to completion and print the final board instead of animating
    #[arg(long)]
    headless: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs here. Without it, logging is off while animating and goes
    /// to stderr in headless mode.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let Some((x, y)) = s.split_once(',') else {
        return Err(format!("expected X,Y, got {s:?}"));
    };
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    initialize_logging(args)?;
    let config = build_config(args)?;
    log::info!(
        "tickstar-demo v{}: {}x{} board, {}% obstacles",
        env!("CARGO_PKG_VERSION"),
        config.width,
        config.height,
        config.obstacle_percent
    );

    let search = Search::from_config(&config, Recorder::new())?;
    if args.headless {
        run_headless(search)
    } else {
        run_animated(
            search,
            Duration::from_millis(args.delay_ms),
            Duration::from_millis(args.interval_ms),
        )
    }
}

fn initialize_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&args.log_level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    match &args.log_file {
        Some(path) => {
            builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
        }
        None if !args.headless => {
            builder.filter_level(log::LevelFilter::Off);
        }
        None => {}
    }
    builder.try_init()?;
    Ok(())
}

/// Defaults, then the JSON file, then individual flags.
fn build_config(args: &Args) -> Result<SearchConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_reader(File::open(path)?)?,
        None => SearchConfig::default(),
    };
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if args.start.is_some() {
        config.start = args.start;
    }
    if args.finish.is_some() {
        config.finish = args.finish;
    }
    if let Some(pct) = args.obstacles {
        config.obstacle_percent = pct;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    if !args.headless && (config.width > term::MAX_WIDTH || config.height > term::MAX_HEIGHT) {
        return Err(format!(
            "{}x{} board does not fit a terminal (max {}x{}); use --headless",
            config.width,
            config.height,
            term::MAX_WIDTH,
            term::MAX_HEIGHT
        )
        .into());
    }
    Ok(config)
}

fn run_headless(mut search: Search<Recorder>) -> Result<(), Box<dyn std::error::Error>> {
    let result = search.run();
    let summary = finish_search(&mut search, result)?;
    search.sink_mut().drain();
    print!("{}", search.grid());
    println!("{summary}");
    Ok(())
}

fn run_animated(
    mut search: Search<Recorder>,
    delay: Duration,
    interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = TermView::open(search.grid().size())?;
    view.draw_grid(search.grid())?;
    search.sink_mut().drain();
    view.draw_status(&format!(
        "{} -> {}   q: quit",
        search.start(),
        search.finish()
    ))?;
    if view.wait_quit(delay)? {
        return Ok(());
    }

    let mut last_label = String::new();
    loop {
        let result = search.step();
        let updates = search.sink_mut().drain();
        if let Some(a) = updates
            .iter()
            .rev()
            .find(|u| u.state == CellState::Frontier)
            .and_then(|u| u.annotation)
        {
            last_label = a.legacy().replace('\n', " ");
        }
        view.draw_updates(&updates)?;

        if search.is_done() {
            let summary = finish_search(&mut search, result)?;
            view.draw_updates(&search.sink_mut().drain())?;
            view.draw_status(&format!("{summary}   press any key"))?;
            view.wait_any_key()?;
            return Ok(());
        }

        view.draw_status(&format!(
            "tick {:>4}   last: {last_label}   q: quit",
            search.steps()
        ))?;
        if view.wait_quit(interval)? {
            return Ok(());
        }
    }
}

/// Mark the path on success and describe the outcome.
fn finish_search(
    search: &mut Search<Recorder>,
    result: StepResult,
) -> Result<String, Box<dyn std::error::Error>> {
    let summary = match result {
        StepResult::Reached => {
            let path = search.reconstruct_path()?;
            log::info!(
                "path of {} steps after {} expansions",
                path.len() - 1,
                search.steps()
            );
            format!(
                "reached {} in {} steps ({} expansions)",
                search.finish(),
                path.len() - 1,
                search.steps()
            )
        }
        StepResult::Exhausted => {
            log::info!("no path after {} expansions", search.steps());
            format!(
                "no path to {} ({} expansions)",
                search.finish(),
                search.steps()
            )
        }
        StepResult::Continue => format!("stopped after {} expansions", search.steps()),
    };
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("3,4"), Ok(Point::new(3, 4)));
        assert_eq!(parse_point(" 0 , 12 "), Ok(Point::new(0, 12)));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "tickstar-demo",
            "--width",
            "9",
            "--start",
            "1,1",
            "--obstacles",
            "0",
            "--seed",
            "5",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.width, 9);
        assert_eq!(config.height, SearchConfig::default().height);
        assert_eq!(config.start, Some(Point::new(1, 1)));
        assert_eq!(config.obstacle_percent, 0);
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    fn invalid_flags_are_rejected() {
        assert!(Args::try_parse_from(["tickstar-demo", "--obstacles", "101"]).is_err());
        let args = Args::parse_from(["tickstar-demo", "--width", "4", "--finish", "4,0"]);
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn oversized_boards_need_headless() {
        let wide = (term::MAX_WIDTH + 1).to_string();
        let animated = ["tickstar-demo", "--width", wide.as_str(), "--height", "1"];
        assert!(build_config(&Args::parse_from(animated)).is_err());

        let headless = Args::parse_from(animated.iter().copied().chain(["--headless"]));
        assert_eq!(build_config(&headless).unwrap().width, term::MAX_WIDTH + 1);

        let widest = Args::parse_from(["tickstar-demo", "--width", "32767", "--height", "1"]);
        assert!(build_config(&widest).is_ok());
    }

    #[test]
    fn headless_summary_reports_path() {
        let config = SearchConfig {
            width: 5,
            height: 5,
            start: Some(Point::new(0, 0)),
            finish: Some(Point::new(4, 4)),
            obstacle_percent: 0,
            seed: Some(1),
        };
        let mut search = Search::from_config(&config, Recorder::new()).unwrap();
        let result = search.run();
        let summary = finish_search(&mut search, result).unwrap();
        let expected = format!("reached (4, 4) in 8 steps ({} expansions)", search.steps());
        assert_eq!(summary, expected);
    }
}
