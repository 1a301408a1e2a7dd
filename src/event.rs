//! The data model shared between the lexer and the writer: value
//! kinds, per-`Start` role flags, the event taxonomy, and the two
//! record types (`LexResult`, `TextOutput`) each call returns.

use bitflags::bitflags;

use crate::status::Status;

/// The five JSON value shapes the lexer distinguishes.
///
/// Represented without a reserved "none" discriminant; the idiomatic
/// Rust spelling of that sentinel is `Option<ValueKind>`, used
/// everywhere a "none" needs representing (see `LexResult::kind`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Object,
    Array,
    String,
    Number,
    Literal,
}

bitflags! {
    /// Flags describing a [`crate::event::Event::Start`] event's role
    /// inside its parent container, plus whether the event carries
    /// bytes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct Flags: u8 {
        /// This `Start` is an object member's name string.
        const IS_MEMBER_NAME  = 0b0000_0001;
        /// This `Start` is an object member's value.
        const IS_MEMBER_VALUE = 0b0000_0010;
        /// This `Start` is an array element.
        const IS_ELEMENT      = 0b0000_0100;
        /// This `Start` is the first child of its parent (or, at the
        /// document level, the first top-level value seen).
        const IS_FIRST        = 0b0000_1000;
        /// The event carries 1-4 bytes retrievable via `Lexer::bytes`.
        const HAS_BYTES       = 0b0001_0000;
    }
}

/// The five kinds of structural observation the lexer can report for
/// a single input byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The byte was consumed but produced no observable event
    /// (whitespace, or a mid-token continuation such as a hex nibble).
    Nothing,
    /// The first byte of a value.
    Start,
    /// The byte that closes a value.
    End,
    /// One byte that closed both a number/literal and its surrounding
    /// container in a single call (e.g. `]` immediately after `123`).
    DoubleEnd,
    /// 1-4 UTF-8 bytes belonging to a string, number, or literal body.
    Bytes,
}

/// The record returned by a single `Lexer::read_byte` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexResult {
    pub status: Status,
    pub event: Event,
    /// The value kind this event concerns. For `DoubleEnd` this is the
    /// *outer* (container) kind; the inner kind is whatever the lexer
    /// had open just before (always `Number` or `Literal`, the only
    /// values whose boundary byte belongs to their parent instead of
    /// themselves).
    pub kind: Option<ValueKind>,
    pub flags: Flags,
}

impl LexResult {
    pub(crate) fn nothing(status: Status) -> Self {
        LexResult { status, event: Event::Nothing, kind: None, flags: Flags::empty() }
    }
}

/// One of the eight whitespace-insertion points the writer can report
/// for a fragment of text. The caller materializes the actual bytes
/// (newline + indent in pretty mode, nothing in terse mode).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prefix {
    None,
    ObjectStart,
    ArrayStart,
    ObjectEnd,
    ArrayEnd,
    MemberColon,
    MemberComma,
    ArrayComma,
}

/// The record returned by a single `Writer::write` call: a prefix hint
/// plus 0-6 bytes of literal JSON text to emit after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextOutput {
    pub status: Status,
    /// Container depth at the time of emission (post-decrement on a
    /// close, pre-increment before an open is written, mirroring the
    /// indentation the caller should already be at when it materializes
    /// the prefix for this fragment).
    pub indent: usize,
    pub prefix: Prefix,
    len: u8,
    bytes: [u8; 8],
}

impl TextOutput {
    pub(crate) fn new(status: Status, indent: usize, prefix: Prefix, bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() <= 8);
        let mut buf = [0u8; 8];
        buf[..bytes.len()].copy_from_slice(bytes);
        TextOutput { status, indent, prefix, len: bytes.len() as u8, bytes: buf }
    }

    /// The 0-6 literal bytes of JSON text this call produced.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_combine_with_bitor() {
        let f = Flags::IS_ELEMENT | Flags::IS_FIRST;
        assert!(f.contains(Flags::IS_ELEMENT));
        assert!(f.contains(Flags::IS_FIRST));
        assert!(!f.contains(Flags::IS_MEMBER_NAME));
    }

    #[test]
    fn text_output_exposes_only_its_written_bytes() {
        let out = TextOutput::new(Status::Success, 0, Prefix::None, b"\\u00");
        assert_eq!(out.bytes(), b"\\u00");
    }
}
