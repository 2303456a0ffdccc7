pub mod analysis;
pub mod config;
pub mod iterative;
mod round;
pub mod slist;

pub use analysis::{analyze, Analysis};
pub use config::ResolverSettings;
pub use iterative::IterativeResolver;
