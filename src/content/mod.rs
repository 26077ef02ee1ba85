//! Chapter pages and the paths that select them.

pub mod chapters;
pub mod formula;
pub mod routes;

pub use chapters::{Block, Chapter, chapter};
pub use formula::typeset;
pub use routes::{Location, Route, Router};
