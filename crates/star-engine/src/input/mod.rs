pub mod pointer;
pub mod queue;

pub use pointer::PointerState;
pub use queue::{InputEvent, InputQueue};
