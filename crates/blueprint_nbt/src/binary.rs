//! Support for reading and writing compounds in Java edition's binary format.
//!
//! Legacy schematic files are a single gzip-wrapped root compound in this
//! format. See [`crate::gzip`] for the compressed entry point.
//!
//! # Examples
//!
//! ```
//! use blueprint_nbt::{compound, from_binary, to_binary};
//!
//! let c = compound! {
//!     "Materials" => "Alpha",
//!     "Height" => 4_i16,
//! };
//!
//! let mut buf = vec![];
//! to_binary(&c, &mut buf, "Schematic").unwrap();
//!
//! let (decoded, root_name) = from_binary(&mut buf.as_slice()).unwrap();
//!
//! assert_eq!(decoded, c);
//! assert_eq!(root_name, "Schematic");
//! ```

mod decode;
mod encode;
#[cfg(test)]
mod tests;

pub use decode::from_binary;
pub use encode::to_binary;
