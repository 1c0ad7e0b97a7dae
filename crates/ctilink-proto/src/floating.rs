//! Tag-length-value floating fields.
//!
//! The variable-length tail of a message body is a sequence of entries
//! `tag: u16, length: u16, value: length bytes`, all big-endian. The same
//! tag may appear more than once (repeated records such as conference
//! parties); order is otherwise unconstrained. String values carry a NUL
//! terminator inside their declared length and readers stop at the first
//! NUL. A tag the reader does not recognize is skipped, never an error —
//! forward compatibility depends on both peers tolerating unknown tags.

use std::collections::HashMap;

use crate::error::ProtocolError;
use crate::wire::str_before_nul;

/// One parsed floating-field entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingField {
    /// Field tag from the protocol dictionary.
    pub tag: u16,
    /// Raw value bytes, exactly as they appeared on the wire.
    pub value: Vec<u8>,
}

/// The parsed floating region of a message.
///
/// Entries are kept in on-wire order; the first occurrence of each tag is
/// indexed for O(1) lookup. Accessors come in two flavors: `first_*`
/// returns the first occurrence (the common case) and [`all_str`] returns
/// every occurrence for repeated tags.
///
/// [`all_str`]: FloatingFields::all_str
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloatingFields {
    entries: Vec<FloatingField>,
    first: HashMap<u16, usize>,
}

impl FloatingFields {
    /// Parses a floating region.
    ///
    /// Walks the range reading entry headers until fewer than 4 bytes
    /// remain. A declared length running past the end of the range is a
    /// hard decode error; trailing bytes shorter than an entry header are
    /// ignored.
    pub fn parse(data: &[u8]) -> Result<Self, ProtocolError> {
        let mut entries = Vec::new();
        let mut first = HashMap::new();
        let mut off = 0;

        while data.len() - off >= 4 {
            let tag = u16::from_be_bytes([data[off], data[off + 1]]);
            let length = u16::from_be_bytes([data[off + 2], data[off + 3]]) as usize;
            off += 4;

            if length > data.len() - off {
                return Err(ProtocolError::FloatingOverrun {
                    length,
                    remaining: data.len() - off,
                });
            }

            first.entry(tag).or_insert(entries.len());
            entries.push(FloatingField {
                tag,
                value: data[off..off + length].to_vec(),
            });
            off += length;
        }

        Ok(Self { entries, first })
    }

    /// Number of entries parsed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the region held no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if at least one entry carries `tag`.
    pub fn has(&self, tag: u16) -> bool {
        self.first.contains_key(&tag)
    }

    /// Raw bytes of the first entry with `tag`.
    pub fn first_bytes(&self, tag: u16) -> Option<&[u8]> {
        self.first.get(&tag).map(|&i| self.entries[i].value.as_slice())
    }

    /// First entry with `tag` as a NUL-terminated string; empty if absent.
    pub fn first_str(&self, tag: u16) -> String {
        self.first_bytes(tag).map(str_before_nul).unwrap_or_default()
    }

    /// First entry with `tag` as a big-endian `u16`; zero if absent or
    /// short.
    pub fn first_u16(&self, tag: u16) -> u16 {
        match self.first_bytes(tag) {
            Some(b) if b.len() >= 2 => u16::from_be_bytes([b[0], b[1]]),
            _ => 0,
        }
    }

    /// First entry with `tag` as a big-endian `u32`; zero if absent or
    /// short.
    pub fn first_u32(&self, tag: u16) -> u32 {
        match self.first_bytes(tag) {
            Some(b) if b.len() >= 4 => u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
            _ => 0,
        }
    }

    /// Every entry with `tag` as a string, in on-wire order.
    pub fn all_str(&self, tag: u16) -> Vec<String> {
        self.entries
            .iter()
            .filter(|f| f.tag == tag)
            .map(|f| str_before_nul(&f.value))
            .collect()
    }

    /// Every tag present, in on-wire order, duplicates included.
    ///
    /// Diagnostic listing: unknown tags show up here even though no typed
    /// accessor reads them.
    pub fn tags(&self) -> Vec<u16> {
        self.entries.iter().map(|f| f.tag).collect()
    }

    /// Iterates over the parsed entries in on-wire order.
    pub fn iter(&self) -> impl Iterator<Item = &FloatingField> {
        self.entries.iter()
    }
}

/// Builder for the floating region of an outgoing message.
///
/// Fields appear on the wire in the order they are written. Default values
/// are never emitted: an empty string or a zero integer produces no entry.
#[derive(Debug, Default)]
pub struct FloatingWriter {
    buf: Vec<u8>,
}

impl FloatingWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no fields have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the writer and returns the encoded region.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn entry(&mut self, tag: u16, value: &[u8]) {
        self.buf.extend_from_slice(&tag.to_be_bytes());
        self.buf.extend_from_slice(&(value.len() as u16).to_be_bytes());
        self.buf.extend_from_slice(value);
    }

    /// Writes a string field with its NUL terminator; skipped when empty.
    pub fn put_str(&mut self, tag: u16, s: &str) {
        if s.is_empty() {
            return;
        }
        let mut value = Vec::with_capacity(s.len() + 1);
        value.extend_from_slice(s.as_bytes());
        value.push(0);
        self.entry(tag, &value);
    }

    /// Writes a `u16` field; skipped when zero.
    pub fn put_u16(&mut self, tag: u16, v: u16) {
        if v != 0 {
            self.entry(tag, &v.to_be_bytes());
        }
    }

    /// Writes a `u32` field; skipped when zero.
    pub fn put_u32(&mut self, tag: u16, v: u32) {
        if v != 0 {
            self.entry(tag, &v.to_be_bytes());
        }
    }

    /// Re-emits a value byte-for-byte, including any NUL terminator.
    ///
    /// Used when a decoded message re-encodes its retained floating
    /// entries.
    pub fn put_raw(&mut self, tag: u16, value: &[u8]) {
        self.entry(tag, value);
    }
}
