mod fixed;

pub use fixed::*;
