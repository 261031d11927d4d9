//! A* shortest-path search on 2D grids of blocked and free cells.
//!
//! ```
//! use astar_grid::{find_path, Cell, Distance, Grid, MovementRule, SearchOutcome};
//!
//! let grid = Grid::with_blocked(3, 3, [Cell::new(1, 1)]).unwrap();
//! let outcome = find_path(
//!     &grid,
//!     Cell::new(0, 0),
//!     Cell::new(2, 2),
//!     &Distance::Manhattan,
//!     &MovementRule::four_way(),
//! )
//! .unwrap();
//!
//! match outcome {
//!     SearchOutcome::Found(path) => assert_eq!(path.steps(), 4),
//!     SearchOutcome::NotFound => unreachable!(),
//! }
//! ```

pub mod algorithms;
pub mod batch;
pub mod config;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod movement;
pub mod scenario;
pub mod statistics;

pub use algorithms::a_star::{find_path, Path, PathFinder, SearchOutcome};
pub use algorithms::open_set::TieBreak;
pub use error::{Endpoint, EndpointIssue, Error, Result};
pub use grid::{Cell, Grid};
pub use heuristic::{Distance, Heuristic};
pub use movement::{CornerCutting, MovementRule, Step};
pub use statistics::{SearchReport, SearchStats};
