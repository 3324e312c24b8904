//! MkDocs process spawning and output relay.

mod args;
mod classify;
mod drain;
mod process;
mod sink;

pub use args::*;
pub use classify::*;
pub use drain::*;
pub use process::*;
pub use sink::*;
