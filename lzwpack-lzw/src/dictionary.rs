//! LZW dictionaries (code tables).
//!
//! The encoder and decoder describe the same sequence of codes but store it
//! differently:
//!
//! - [`EncodeDictionary`] keeps each entry as a parent link plus one appended
//!   byte. The encoder only ever asks "does W+k exist?", which the
//!   [`LookupIndex`] answers without touching the strings themselves.
//! - [`DecodeDictionary`] materializes every entry into a shared byte arena so
//!   the decoder can write a code's bytes as one borrowed slice.

use crate::config::{Code, INIT_DICT_SIZE, LzwConfig};
use crate::index::LookupIndex;

/// One encoder dictionary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeEntry {
    /// Code of the string this entry extends, `None` for roots.
    pub prefix: Option<Code>,
    /// Last byte of the represented string.
    pub byte: u8,
    /// Length of the represented string.
    pub len: usize,
}

/// Encoder-side dictionary: parent-chain entries plus a hash index.
#[derive(Debug)]
pub struct EncodeDictionary {
    /// Code table: code -> entry.
    entries: Vec<EncodeEntry>,
    /// Reverse lookup: (prefix, byte) -> code.
    index: LookupIndex,
    /// Entry cap, roots included.
    max_size: usize,
}

impl EncodeDictionary {
    /// Create a dictionary seeded with the 256 single-byte roots.
    pub fn new(config: &LzwConfig) -> Self {
        let max_size = config.max_dict_size();
        let mut entries = Vec::with_capacity(max_size);
        entries.extend((0..INIT_DICT_SIZE).map(|i| EncodeEntry {
            prefix: None,
            byte: i as u8,
            len: 1,
        }));

        Self {
            entries,
            index: LookupIndex::with_capacity_for(max_size),
            max_size,
        }
    }

    /// Find the code for `prefix` extended by `byte`.
    #[inline]
    pub fn find(&self, prefix: Code, byte: u8) -> Option<Code> {
        self.index.get(prefix, byte)
    }

    /// Add `prefix` extended by `byte` as a new entry.
    ///
    /// Returns the assigned code, or `None` once the dictionary is full. A
    /// full dictionary is not an error: it simply stops growing.
    pub fn insert(&mut self, prefix: Code, byte: u8) -> Option<Code> {
        if self.is_full() {
            return None;
        }

        let prefix_len = self.entries.get(prefix as usize)?.len;
        let code = self.entries.len() as Code;
        if !self.index.insert(prefix, byte, code) {
            return None;
        }
        self.entries.push(EncodeEntry {
            prefix: Some(prefix),
            byte,
            len: prefix_len + 1,
        });

        Some(code)
    }

    /// Get the entry for a code.
    pub fn entry(&self, code: Code) -> Option<&EncodeEntry> {
        self.entries.get(code as usize)
    }

    /// Length of the string a code represents.
    pub fn sequence_len(&self, code: Code) -> Option<usize> {
        self.entry(code).map(|e| e.len)
    }

    /// Rebuild the string a code represents by walking its parent chain.
    pub fn sequence(&self, code: Code) -> Option<Vec<u8>> {
        let mut entry = self.entry(code)?;
        let mut bytes = vec![0u8; entry.len];
        let mut pos = entry.len;
        loop {
            pos -= 1;
            bytes[pos] = entry.byte;
            match entry.prefix {
                Some(prefix) => entry = self.entry(prefix)?,
                None => break,
            }
        }
        Some(bytes)
    }

    /// Number of entries, roots included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the roots are present from construction.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if the dictionary reached its cap.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max_size
    }

    /// Entry cap, roots included.
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

/// Location of one materialized string inside the arena.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    len: usize,
}

/// Decoder-side dictionary: every entry's bytes stored in one arena.
#[derive(Debug)]
pub struct DecodeDictionary {
    /// Concatenated bytes of every entry.
    arena: Vec<u8>,
    /// Code table: code -> span in `arena`.
    spans: Vec<Span>,
    /// Entry cap, roots included.
    max_size: usize,
}

impl DecodeDictionary {
    /// Create a dictionary seeded with the 256 single-byte roots.
    pub fn new(config: &LzwConfig) -> Self {
        let max_size = config.max_dict_size();
        let mut spans = Vec::with_capacity(max_size);
        spans.extend((0..INIT_DICT_SIZE).map(|i| Span { start: i, len: 1 }));

        Self {
            arena: (0..INIT_DICT_SIZE).map(|i| i as u8).collect(),
            spans,
            max_size,
        }
    }

    /// Get the byte sequence for a code.
    #[inline]
    pub fn get(&self, code: Code) -> Option<&[u8]> {
        let span = self.spans.get(code as usize)?;
        Some(&self.arena[span.start..span.start + span.len])
    }

    /// First byte of the string a code represents.
    #[inline]
    pub fn first_byte(&self, code: Code) -> Option<u8> {
        let span = self.spans.get(code as usize)?;
        Some(self.arena[span.start])
    }

    /// Add the string of `prefix` extended by `byte` as a new entry.
    ///
    /// Returns the assigned code, or `None` if the dictionary is full or
    /// `prefix` is unknown.
    pub fn insert(&mut self, prefix: Code, byte: u8) -> Option<Code> {
        if self.is_full() {
            return None;
        }

        let prefix = *self.spans.get(prefix as usize)?;
        let start = self.arena.len();
        self.arena
            .extend_from_within(prefix.start..prefix.start + prefix.len);
        self.arena.push(byte);

        let code = self.spans.len() as Code;
        self.spans.push(Span {
            start,
            len: prefix.len + 1,
        });
        Some(code)
    }

    /// Number of entries, roots included.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Always `false`: the roots are present from construction.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Check if the dictionary reached its cap.
    pub fn is_full(&self) -> bool {
        self.spans.len() >= self.max_size
    }

    /// Entry cap, roots included.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Total bytes held by the arena.
    pub fn arena_len(&self) -> usize {
        self.arena.len()
    }
}
