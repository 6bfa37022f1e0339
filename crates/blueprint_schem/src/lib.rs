#![doc = include_str!("../README.md")]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    rustdoc::missing_crate_level_docs,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls,
    rustdoc::invalid_html_tags
)]
#![warn(
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_import_braces,
    unreachable_pub,
    clippy::dbg_macro
)]

pub use block::{Block, BlockKind, Direction};
pub use decode::{decode, decode_with, load, DecodeSettings};
pub use error::*;
pub use grid::{flat_index, CellFault, Slice, SliceStack};
pub use item::{Item, ItemKind};
pub use redstone::{Axis, WireShape};

pub mod block;
pub mod decode;
mod error;
mod field;
pub mod grid;
pub mod item;
pub mod redstone;
pub mod registry;
