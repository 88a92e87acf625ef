//! Helpers shared between days.

pub mod dp_cache;
pub mod grid;
pub mod parse;
pub mod union_find;
