//! Core types shared by the scanstore crates: the parsed scan-result document.

mod model;

pub use model::*;

pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
