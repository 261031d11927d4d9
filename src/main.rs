use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use astar_grid::batch::BatchRunner;
use astar_grid::config::Config;
use astar_grid::error::{Error, Result};
use astar_grid::scenario::Scenario;
use astar_grid::{Cell, PathFinder, SearchOutcome};

fn main() {
    init_tracing();
    let config = Config::parse();

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    let finder = PathFinder::new(config.distance(), config.movement_rule()?)
        .with_tie_break(config.tie_break());
    let seed = config.seed.unwrap_or_else(rand::random);

    if let Some(runs) = config.runs {
        println!(
            "Running {} random {}x{} scenarios with {} walls (first seed {})",
            runs, config.rows, config.cols, config.walls, seed
        );
        let summary = BatchRunner::new(finder, config.rows, config.cols, config.walls).run(runs, seed)?;
        println!("\n=== BATCH SUMMARY ===");
        print!("{}", summary);
        return Ok(());
    }

    let scenario = match &config.grid_file {
        Some(path) => Scenario::load(path)?,
        None => {
            println!("Random grid seed: {}", seed);
            Scenario::random(config.rows, config.cols, config.walls, seed)?
        }
    };

    let start = config
        .start
        .or(scenario.start)
        .ok_or_else(|| Error::InvalidGrid("no start cell; mark 'S' or pass --start".to_string()))?;
    let goal = config
        .goal
        .or(scenario.goal)
        .ok_or_else(|| Error::InvalidGrid("no goal cell; mark 'G' or pass --goal".to_string()))?;

    println!(
        "Grid: {}x{}, blocked cells: {}",
        scenario.grid.height(),
        scenario.grid.width(),
        scenario.grid.blocked_count()
    );
    println!("Start: {}, Goal: {}", start, goal);

    let report = finder.search(&scenario.grid, start, goal)?;
    let path_cells: &[Cell] = match &report.outcome {
        SearchOutcome::Found(path) => {
            println!("\nPath found ({} steps, cost {:.3}):", path.steps(), path.cost());
            for cell in path.iter() {
                println!("  {}", cell);
            }
            path.cells()
        }
        SearchOutcome::NotFound => {
            println!("\nNo path found!");
            &[]
        }
    };

    if !config.quiet {
        println!("\nVisualization (S=start, G=goal, *=path, #=obstacle):");
        print!("{}", scenario.grid.render(Some(start), Some(goal), path_cells));
    }

    println!("\n=== SEARCH STATISTICS ===");
    print!("{}", report.stats);
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
