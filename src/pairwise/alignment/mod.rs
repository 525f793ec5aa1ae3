pub use alignment::Alignment;
pub use gapped::GappedPair;
pub use op::Op;
pub use step::Step;

pub mod alignment;
mod gapped;
mod op;
pub mod step;
pub mod utils;
