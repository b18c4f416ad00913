pub mod motion;
pub mod spatial;
pub mod target;

pub use motion::*;
pub use spatial::*;
pub use target::*;
