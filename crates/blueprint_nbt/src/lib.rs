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

pub use binary::{from_binary, to_binary};
pub use compound::Compound;
pub use error::*;
pub use tag::Tag;
pub use value::{List, Value};

pub mod binary;
pub mod compound;
mod error;
pub mod gzip;
mod tag;
pub mod value;

/// A convenience macro for constructing [`Compound`]s.
///
/// Key expressions must implement `Into<String>` while value expressions must
/// implement `Into<Value>`.
///
/// # Examples
///
/// ```
/// use blueprint_nbt::{compound, List};
///
/// let c = compound! {
///     "Materials" => "Alpha",
///     "Width" => 3_i16,
///     "Blocks" => vec![0_i8; 27],
///     "TileEntities" => List::Compound(vec![]),
/// };
///
/// assert_eq!(c.len(), 4);
/// ```
#[macro_export]
macro_rules! compound {
    ($($key:expr => $value:expr),* $(,)?) => {
        <$crate::Compound as ::std::iter::FromIterator<(::std::string::String, $crate::Value)>>::from_iter([
            $(
                (
                    ::std::convert::Into::<::std::string::String>::into($key),
                    ::std::convert::Into::<$crate::Value>::into($value)
                ),
            )*
        ])
    };
}
