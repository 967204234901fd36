//! Process driver for texsift.
//!
//! Spawns a TeX engine with its stdout and stderr merged into a single
//! pipe, feeds the combined stream line by line through the
//! [`LogFilter`](texsift_log::LogFilter), and relays the engine's exit
//! status. Single-threaded and blocking throughout; the pipe provides the
//! backpressure.

pub mod driver;
pub mod stream;

pub use driver::Compiler;
pub use stream::{collect, pump};
