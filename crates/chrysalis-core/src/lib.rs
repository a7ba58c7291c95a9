#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared pieces of the Chrysalis toolchain.
//!
//! - [`layout`]: the fixed memory image geometry that the compiler and VM agree on
//! - [`Colors`]: ANSI palette for dumps and traces
//! - [`utils`]: small formatting helpers

mod colors;
pub mod layout;
pub mod utils;


pub use colors::Colors;
pub use layout::{
    CALL_STACK_SIZE, DATA_END, MEMORY_SIZE, POOL_SIZE, POOL_START, Region, SCRATCH_START,
    STACK_SIZE,
};
