mod bias;
mod noise;
pub(crate) mod poly;
mod smooth;

pub use bias::*;
pub use noise::*;
pub use poly::*;
pub use smooth::*;
