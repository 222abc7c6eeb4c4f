//! `RoadGraph`: a directed multigraph of lane-to-lane `Connection`s with
//! Dijkstra shortest-path search and induced-subgraph extraction.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                    |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | Backs the graph's internal maps with `rustc_hash::FxHashMap`/`FxHashSet` instead of the stdlib `HashMap`/`HashSet`. |

mod error;
mod graph;


pub use error::{GraphError, GraphResult};
pub use graph::{Connection, RoadGraph};
