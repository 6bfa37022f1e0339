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

#[cfg(test)]
mod tests;

pub use blueprint_nbt as nbt;
pub use blueprint_schem as schem;
pub use blueprint_schem::{decode, decode_with, load};

/// Contains the most frequently used items.
///
/// This is usually glob imported like so:
///
/// ```
/// use blueprint::prelude::*;
///
/// let settings = DecodeSettings {
///     connect_redstone_wires: false,
///     ..Default::default()
/// };
/// # let _ = settings;
/// ```
pub mod prelude {
    pub use blueprint_nbt::{Compound, List, Value};
    pub use blueprint_schem::block::{
        Beacon, BrewingStand, CommandBlock, Container, ContainerKind, MobHead, Note, Sign,
        SkullType,
    };
    pub use blueprint_schem::{
        decode, decode_with, load, Axis, Block, BlockError, BlockKind, CellFault, DecodeSettings,
        Direction, Item, ItemKind, ParseError, SchematicError, Slice, SliceStack, WireShape,
    };
}
