pub use alignable::Alignable;
pub use num::{PrimInt, PrimUInt, Score};
pub use pairwise::sw::{align_kbest, AlignmentResult, KBestScan, Status};

mod alignable;
mod num;
pub mod pairwise;
