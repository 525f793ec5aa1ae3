pub use alignment::{Alignment, GappedPair, Op, Step};

pub mod alignment;
pub mod scoring;
pub mod sw;
