//! `Border` and `Borders`: ordered polylines along lane edges, with
//! arc-length parameterization, an optional fitted spline, and a uniformly
//! resampled point set.

mod border;
mod borders;


pub use border::Border;
pub use borders::Borders;
