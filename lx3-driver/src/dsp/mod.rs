mod conv;
mod interp;
mod sort;

pub use conv::*;
pub use interp::*;
pub use sort::*;
