// SPDX-License-Identifier: PMPL-1.0-or-later

//! Binary MO container parsing
//!
//! Layout (all fields 32-bit unsigned, in the byte order announced by the
//! magic number):
//!
//! | offset | field                                   |
//! |--------|-----------------------------------------|
//! | 0      | magic `0x950412de`                      |
//! | 4      | revision                                |
//! | 8      | number of strings N                     |
//! | 12     | offset of original-string table         |
//! | 16     | offset of translated-string table       |
//! | 20     | hash table size                         |
//! | 24     | hash table offset                       |
//!
//! Each string table holds N `(length, offset)` descriptors. Strings are
//! NUL-terminated in the file but the terminator is not counted in `length`.

use std::fmt;
use thiserror::Error;

pub const MAGIC: u32 = 0x9504_12de;
pub const HEADER_LEN: usize = 28;
const DESCRIPTOR_LEN: usize = 8;
const HASH_SLOT_LEN: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("file is {0} bytes, shorter than the 28-byte header")]
    Truncated(usize),
    #[error("bad magic number {0:#010x}")]
    BadMagic(u32),
    #[error("unsupported major revision {0}")]
    UnsupportedRevision(u32),
    #[error("{table} table ({count} entries at offset {offset}) extends past end of file")]
    TableOutOfBounds {
        table: &'static str,
        count: u32,
        offset: u32,
    },
    #[error("{table} string {index} (length {length} at offset {offset}) extends past end of file")]
    StringOutOfBounds {
        table: &'static str,
        index: usize,
        length: u32,
        offset: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    fn read(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Little => write!(f, "little-endian"),
            ByteOrder::Big => write!(f, "big-endian"),
        }
    }
}

/// Fixed header fields of an MO file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoHeader {
    pub byte_order: ByteOrder,
    pub revision: u32,
    pub count: u32,
    pub originals_offset: u32,
    pub translations_offset: u32,
    pub hash_size: u32,
    pub hash_offset: u32,
}

impl MoHeader {
    pub fn major_revision(&self) -> u32 {
        self.revision >> 16
    }

    pub fn minor_revision(&self) -> u32 {
        self.revision & 0xffff
    }
}

/// One original/translation pair, still as raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMessage<'a> {
    pub original: &'a [u8],
    pub translation: &'a [u8],
}

/// A parsed MO file borrowing from the underlying bytes.
#[derive(Debug, Clone)]
pub struct MoFile<'a> {
    pub header: MoHeader,
    pub messages: Vec<RawMessage<'a>>,
}

struct Reader<'a> {
    bytes: &'a [u8],
    order: ByteOrder,
}

impl<'a> Reader<'a> {
    fn u32_at(&self, offset: usize) -> Option<u32> {
        let end = offset.checked_add(4)?;
        let word: [u8; 4] = self.bytes.get(offset..end)?.try_into().ok()?;
        Some(self.order.read(word))
    }

    /// `length` bytes at `offset`, or `None` if the range leaves the file.
    fn slice(&self, offset: u32, length: u32) -> Option<&'a [u8]> {
        let start = usize::try_from(offset).ok()?;
        let end = start.checked_add(usize::try_from(length).ok()?)?;
        self.bytes.get(start..end)
    }

    /// Whether `count` records of `width` bytes starting at `offset` lie
    /// inside the file.
    fn table_fits(&self, offset: u32, count: u32, width: usize) -> bool {
        usize::try_from(count)
            .ok()
            .and_then(|count| count.checked_mul(width))
            .and_then(|len| usize::try_from(offset).ok()?.checked_add(len))
            .is_some_and(|end| end <= self.bytes.len())
    }

    fn descriptor(&self, table_offset: u32, index: usize) -> Option<(u32, u32)> {
        let base = usize::try_from(table_offset)
            .ok()?
            .checked_add(index.checked_mul(DESCRIPTOR_LEN)?)?;
        Some((self.u32_at(base)?, self.u32_at(base.checked_add(4)?)?))
    }
}

/// Parse an MO file, bounds-checking every table and string against the
/// file length before slicing.
pub fn parse(bytes: &[u8]) -> Result<MoFile<'_>, FormatError> {
    if bytes.len() < HEADER_LEN {
        return Err(FormatError::Truncated(bytes.len()));
    }
    let mut magic = [0u8; 4];
    magic.copy_from_slice(&bytes[..4]);
    let order = if u32::from_le_bytes(magic) == MAGIC {
        ByteOrder::Little
    } else if u32::from_be_bytes(magic) == MAGIC {
        ByteOrder::Big
    } else {
        return Err(FormatError::BadMagic(u32::from_le_bytes(magic)));
    };

    let reader = Reader { bytes, order };
    let field = |index: usize| reader.u32_at(index * 4).unwrap_or_default();
    let header = MoHeader {
        byte_order: order,
        revision: field(1),
        count: field(2),
        originals_offset: field(3),
        translations_offset: field(4),
        hash_size: field(5),
        hash_offset: field(6),
    };

    if !matches!(header.major_revision(), 0 | 1) {
        return Err(FormatError::UnsupportedRevision(header.major_revision()));
    }

    for (table, offset) in [
        ("original", header.originals_offset),
        ("translation", header.translations_offset),
    ] {
        if !reader.table_fits(offset, header.count, DESCRIPTOR_LEN) {
            return Err(FormatError::TableOutOfBounds {
                table,
                count: header.count,
                offset,
            });
        }
    }
    if header.hash_size > 0
        && !reader.table_fits(header.hash_offset, header.hash_size, HASH_SLOT_LEN)
    {
        return Err(FormatError::TableOutOfBounds {
            table: "hash",
            count: header.hash_size,
            offset: header.hash_offset,
        });
    }

    let count = usize::try_from(header.count).unwrap_or(usize::MAX);
    let mut messages = Vec::with_capacity(count);
    for index in 0..count {
        let original = read_string(&reader, "original", header.originals_offset, index)?;
        let translation = read_string(&reader, "translation", header.translations_offset, index)?;
        messages.push(RawMessage {
            original,
            translation,
        });
    }

    Ok(MoFile { header, messages })
}

fn read_string<'a>(
    reader: &Reader<'a>,
    table: &'static str,
    table_offset: u32,
    index: usize,
) -> Result<&'a [u8], FormatError> {
    // The table extent was checked by the caller, so the descriptor is readable.
    let (length, offset) = reader
        .descriptor(table_offset, index)
        .unwrap_or((u32::MAX, u32::MAX));
    reader
        .slice(offset, length)
        .ok_or(FormatError::StringOutOfBounds {
            table,
            index,
            length,
            offset,
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal writer producing the layout GNU msgfmt emits (no hash table).
    pub(crate) fn build<K: AsRef<[u8]>, V: AsRef<[u8]>>(
        order: ByteOrder,
        pairs: &[(K, V)],
    ) -> Vec<u8> {
        let word = |v: u32| match order {
            ByteOrder::Little => v.to_le_bytes(),
            ByteOrder::Big => v.to_be_bytes(),
        };
        let n = pairs.len() as u32;
        let originals = HEADER_LEN as u32;
        let translations = originals + 8 * n;
        let mut strings_at = translations + 8 * n;
        let mut out = Vec::new();
        for v in [MAGIC, 0, n, originals, translations, 0, strings_at] {
            out.extend_from_slice(&word(v));
        }
        let mut descriptors = Vec::new();
        let mut blob = Vec::new();
        for side in 0..2 {
            for (original, translation) in pairs {
                let s = if side == 0 {
                    original.as_ref()
                } else {
                    translation.as_ref()
                };
                descriptors.extend_from_slice(&word(s.len() as u32));
                descriptors.extend_from_slice(&word(strings_at));
                blob.extend_from_slice(s);
                blob.push(0);
                strings_at += s.len() as u32 + 1;
            }
        }
        out.extend(descriptors);
        out.extend(blob);
        out
    }

    #[test]
    fn parses_both_byte_orders() {
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let bytes = build(order, &[("", "Language: fr\n"), ("hello", "bonjour")]);
            let mo = parse(&bytes).unwrap();
            assert_eq!(mo.header.byte_order, order);
            assert_eq!(mo.header.count, 2);
            assert_eq!(mo.messages[1].original, b"hello");
            assert_eq!(mo.messages[1].translation, b"bonjour");
        }
    }

    #[test]
    fn rejects_short_file() {
        assert_eq!(parse(&[0xde, 0x12]).unwrap_err(), FormatError::Truncated(2));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = build::<&str, &str>(ByteOrder::Little, &[]);
        bytes[0] = 0;
        assert!(matches!(parse(&bytes), Err(FormatError::BadMagic(_))));
    }

    #[test]
    fn rejects_unknown_major_revision() {
        let mut bytes = build::<&str, &str>(ByteOrder::Little, &[]);
        bytes[4..8].copy_from_slice(&(2u32 << 16).to_le_bytes());
        assert_eq!(
            parse(&bytes).unwrap_err(),
            FormatError::UnsupportedRevision(2)
        );
    }

    #[test]
    fn accepts_minor_revision() {
        let mut bytes = build(ByteOrder::Big, &[("a", "b")]);
        bytes[4..8].copy_from_slice(&1u32.to_be_bytes());
        let mo = parse(&bytes).unwrap();
        assert_eq!(mo.header.minor_revision(), 1);
    }

    #[test]
    fn rejects_table_past_end() {
        let mut bytes = build(ByteOrder::Little, &[("a", "b")]);
        bytes[8..12].copy_from_slice(&1000u32.to_le_bytes());
        assert!(matches!(
            parse(&bytes),
            Err(FormatError::TableOutOfBounds { table: "original", .. })
        ));
    }

    #[test]
    fn rejects_string_past_end() {
        let mut bytes = build(ByteOrder::Little, &[("a", "b")]);
        // translation descriptor: length at 36, offset at 40
        bytes[36..40].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            parse(&bytes),
            Err(FormatError::StringOutOfBounds {
                table: "translation",
                index: 0,
                ..
            })
        ));
    }

    #[test]
    fn rejects_hash_table_past_end() {
        let mut bytes = build(ByteOrder::Little, &[("a", "b")]);
        bytes[20..24].copy_from_slice(&64u32.to_le_bytes());
        assert!(matches!(
            parse(&bytes),
            Err(FormatError::TableOutOfBounds { table: "hash", .. })
        ));
    }

    #[test]
    fn odd_hash_table_ending_at_eof_is_accepted() {
        let mut bytes = build(ByteOrder::Little, &[("a", "b")]);
        let hash_offset = bytes.len() as u32;
        bytes[20..24].copy_from_slice(&1u32.to_le_bytes());
        bytes[24..28].copy_from_slice(&hash_offset.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        let mo = parse(&bytes).unwrap();
        assert_eq!(mo.header.hash_size, 1);
        assert_eq!(mo.messages[0].translation, b"b");

        bytes.pop();
        assert!(matches!(
            parse(&bytes),
            Err(FormatError::TableOutOfBounds { table: "hash", .. })
        ));
    }

    #[test]
    fn string_ending_exactly_at_eof_is_accepted() {
        let mut bytes = build(ByteOrder::Little, &[("a", "b")]);
        bytes.pop(); // drop the final NUL terminator
        let mo = parse(&bytes).unwrap();
        assert_eq!(mo.messages[0].translation, b"b");
    }
}
