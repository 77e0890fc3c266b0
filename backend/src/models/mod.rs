pub mod climate;
pub mod time;

pub use climate::*;
pub use time::*;
