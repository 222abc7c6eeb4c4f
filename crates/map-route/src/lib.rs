//! An ordered traversal over a [`map_model::Map`]'s lanes between two
//! points, following the shortest path through the lane graph.

mod error;
mod route;
mod section;

#[cfg(test)]
mod tests;

pub use error::{RouteError, RouteResult};
pub use route::{projection_error, Route};
pub use section::RouteSection;
