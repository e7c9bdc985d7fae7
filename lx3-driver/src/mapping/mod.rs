mod channel_map;

pub use channel_map::*;
