use std::borrow::Cow;

use byteorder::{BigEndian, ReadBytesExt};
use cesu8::from_java_cesu8;

use crate::tag::Tag;
use crate::{Compound, Error, List, Result, Value};

/// Maximum recursion depth to prevent overflowing the call stack.
const MAX_DEPTH: usize = 512;

/// Decodes uncompressed NBT binary data from the provided slice.
///
/// The returned tuple is the root compound and the root name. On success the
/// slice is advanced past the decoded data. Trailing bytes are left in place
/// for the caller to inspect.
pub fn from_binary(slice: &mut &[u8]) -> Result<(Compound, String)> {
    let mut state = DecodeState { slice, depth: 0 };

    let root_tag = state.read_tag()?;

    if root_tag != Tag::Compound {
        return Err(Error::new_owned(format!(
            "expected root tag for compound (got {root_tag})",
        )));
    }

    let root_name = state.read_string()?;
    let root = state.read_compound()?;

    debug_assert_eq!(state.depth, 0);

    Ok((root, root_name))
}

struct DecodeState<'a, 'b> {
    slice: &'a mut &'b [u8],
    /// Current recursion depth.
    depth: usize,
}

impl<'b> DecodeState<'_, 'b> {
    #[inline]
    fn check_depth<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::new_static("reached maximum recursion depth"));
        }

        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }

    fn read_tag(&mut self) -> Result<Tag> {
        Tag::from_u8(self.slice.read_u8()?)
    }

    fn read_value(&mut self, tag: Tag) -> Result<Value> {
        match tag {
            Tag::End => unreachable!("illegal TAG_End argument"),
            Tag::Byte => Ok(self.read_byte()?.into()),
            Tag::Short => Ok(self.read_short()?.into()),
            Tag::Int => Ok(self.read_int()?.into()),
            Tag::Long => Ok(self.read_long()?.into()),
            Tag::Float => Ok(self.read_float()?.into()),
            Tag::Double => Ok(self.read_double()?.into()),
            Tag::ByteArray => Ok(self.read_byte_array()?.into()),
            Tag::String => Ok(self.read_string()?.into()),
            Tag::List => self.check_depth(|st| Ok(st.read_any_list()?.into())),
            Tag::Compound => self.check_depth(|st| Ok(st.read_compound()?.into())),
            Tag::IntArray => Ok(self.read_int_array()?.into()),
            Tag::LongArray => Ok(self.read_long_array()?.into()),
        }
    }

    fn read_byte(&mut self) -> Result<i8> {
        Ok(self.slice.read_i8()?)
    }

    fn read_short(&mut self) -> Result<i16> {
        Ok(self.slice.read_i16::<BigEndian>()?)
    }

    fn read_int(&mut self) -> Result<i32> {
        Ok(self.slice.read_i32::<BigEndian>()?)
    }

    fn read_long(&mut self) -> Result<i64> {
        Ok(self.slice.read_i64::<BigEndian>()?)
    }

    fn read_float(&mut self) -> Result<f32> {
        Ok(self.slice.read_f32::<BigEndian>()?)
    }

    fn read_double(&mut self) -> Result<f64> {
        Ok(self.slice.read_f64::<BigEndian>()?)
    }

    /// Reads a length prefix and checks that `len * elem_size` bytes remain,
    /// so a corrupt length cannot trigger a huge allocation.
    fn read_len(&mut self, what: &str, elem_size: usize) -> Result<usize> {
        let len = self.read_int()?;

        let Ok(len) = usize::try_from(len) else {
            return Err(Error::new_owned(format!(
                "negative {what} length of {len}"
            )));
        };

        if len.saturating_mul(elem_size) > self.slice.len() {
            return Err(Error::new_owned(format!(
                "{what} of length {len} exceeds remaining input of {} bytes",
                self.slice.len()
            )));
        }

        Ok(len)
    }

    fn read_byte_array(&mut self) -> Result<Vec<i8>> {
        let len = self.read_len("byte array", 1)?;

        let input: &'b [u8] = *self.slice;
        let (left, right) = input.split_at(len);
        let array = left.iter().map(|b| *b as i8).collect();
        *self.slice = right;

        Ok(array)
    }

    fn read_string(&mut self) -> Result<String> {
        let len = usize::from(self.slice.read_u16::<BigEndian>()?);

        if len > self.slice.len() {
            return Err(Error::new_owned(format!(
                "string of length {len} exceeds remaining input of {} bytes",
                self.slice.len()
            )));
        }

        let input: &'b [u8] = *self.slice;
        let (left, right) = input.split_at(len);

        match from_java_cesu8(left) {
            Ok(Cow::Borrowed(s)) => {
                let s = s.to_owned();
                *self.slice = right;
                Ok(s)
            }
            Ok(Cow::Owned(s)) => {
                *self.slice = right;
                Ok(s)
            }
            Err(_) => Err(Error::new_static("could not decode modified UTF-8 data")),
        }
    }

    fn read_any_list(&mut self) -> Result<List> {
        match self.read_tag()? {
            Tag::End => match self.read_int()? {
                0 => Ok(List::End),
                len => Err(Error::new_owned(format!(
                    "TAG_End list with nonzero length of {len}"
                ))),
            },
            Tag::Byte => Ok(List::Byte(self.read_byte_array()?)),
            Tag::Short => Ok(List::Short(self.read_list(Tag::Short, 2, |st| {
                st.read_short()
            })?)),
            Tag::Int => Ok(List::Int(self.read_list(Tag::Int, 4, |st| st.read_int())?)),
            Tag::Long => Ok(List::Long(self.read_list(Tag::Long, 8, |st| {
                st.read_long()
            })?)),
            Tag::Float => Ok(List::Float(self.read_list(Tag::Float, 4, |st| {
                st.read_float()
            })?)),
            Tag::Double => Ok(List::Double(self.read_list(Tag::Double, 8, |st| {
                st.read_double()
            })?)),
            Tag::ByteArray => Ok(List::ByteArray(self.read_list(Tag::ByteArray, 4, |st| {
                st.read_byte_array()
            })?)),
            Tag::String => Ok(List::String(self.read_list(Tag::String, 2, |st| {
                st.read_string()
            })?)),
            Tag::List => self.check_depth(|st| {
                Ok(List::List(st.read_list(Tag::List, 5, |st| {
                    st.read_any_list()
                })?))
            }),
            Tag::Compound => self.check_depth(|st| {
                Ok(List::Compound(st.read_list(Tag::Compound, 1, |st| {
                    st.read_compound()
                })?))
            }),
            Tag::IntArray => Ok(List::IntArray(self.read_list(Tag::IntArray, 4, |st| {
                st.read_int_array()
            })?)),
            Tag::LongArray => Ok(List::LongArray(self.read_list(Tag::LongArray, 4, |st| {
                st.read_long_array()
            })?)),
        }
    }

    /// Assumes the element tag has already been read.
    ///
    /// `min_elem_size` is the smallest number of bytes an element can occupy.
    #[inline]
    fn read_list<T, F>(&mut self, elem_type: Tag, min_elem_size: usize, mut read_elem: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let len = self.read_len(elem_type.name(), min_elem_size)?;

        let mut list = Vec::with_capacity(len);

        for _ in 0..len {
            list.push(read_elem(self)?);
        }

        Ok(list)
    }

    fn read_compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::new();

        loop {
            let tag = self.read_tag()?;
            if tag == Tag::End {
                return Ok(compound);
            }

            let name = self.read_string()?;
            let value = self.read_value(tag)?;
            compound.insert(name, value);
        }
    }

    fn read_int_array(&mut self) -> Result<Vec<i32>> {
        let len = self.read_len("int array", 4)?;

        let mut array = Vec::with_capacity(len);
        for _ in 0..len {
            array.push(self.read_int()?);
        }

        Ok(array)
    }

    fn read_long_array(&mut self) -> Result<Vec<i64>> {
        let len = self.read_len("long array", 8)?;

        let mut array = Vec::with_capacity(len);
        for _ in 0..len {
            array.push(self.read_long()?);
        }

        Ok(array)
    }
}
