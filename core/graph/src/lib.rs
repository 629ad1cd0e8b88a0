#![warn(clippy::pedantic)]
//! Dependency ordering for compiled units.
//!
//! ```
//! use serpent_graph::DirectedGraph;
//!
//! let mut graph = DirectedGraph::new();
//! graph.add_arc("app", "util");
//! graph.add_arc("util", "base");
//! assert_eq!(graph.topological_ordering().unwrap(), ["base", "util", "app"]);
//! ```

mod directed;
mod errors;

pub use directed::DirectedGraph;
pub use errors::CyclicGraphError;
