mod microtask;
mod timers;

pub use microtask::*;
pub use timers::*;
