//! Auto-growing bitset over non-negative integers, usable from Rust and, via
//! `wasm-bindgen`, from JavaScript.

use wasm_bindgen::prelude::*;

mod bit_set;
mod config;
mod error;
mod int_set;
mod js;
mod serialize;

pub use bit_set::{BitSet, Values};
pub use config::Config;
pub use error::{Error, Result};
pub use int_set::IntSet;
pub use js::JsBitSet;

/// Element type of a [`BitSet`]. Signed so negative input is rejected rather
/// than wrapped.
pub type Offset = i64;

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}
