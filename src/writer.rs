//! Event-to-text transformer: turns a [`LexResult`]/byte-slice pair
//! into a [`TextOutput`] fragment. The writer never decides
//! whitespace or indentation width itself, it only reports a
//! [`Prefix`] hint and the literal bytes to emit after it; the caller
//! materializes pretty-mode newlines/indentation or terse-mode
//! nothing.

use crate::event::{Event, Flags, LexResult, Prefix, TextOutput, ValueKind};
use crate::status::Status;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Escapes a lexer-decoded content fragment back into JSON text.
///
/// Multi-byte fragments are always a decoded `\uXXXX`/surrogate-pair
/// UTF-8 sequence (codepoint >= 0x80) and never need escaping.
/// Single-byte fragments may be `"`, `\`, or a control character that
/// does.
fn escape_string_bytes(input: &[u8]) -> ([u8; 6], u8) {
    let mut buf = [0u8; 6];
    if input.len() != 1 {
        buf[..input.len()].copy_from_slice(input);
        return (buf, input.len() as u8);
    }
    let b = input[0];
    let len: u8 = match b {
        b'"' => {
            buf[0] = b'\\';
            buf[1] = b'"';
            2
        }
        b'\\' => {
            buf[0] = b'\\';
            buf[1] = b'\\';
            2
        }
        0x08 => {
            buf[0] = b'\\';
            buf[1] = b'b';
            2
        }
        0x0C => {
            buf[0] = b'\\';
            buf[1] = b'f';
            2
        }
        0x0A => {
            buf[0] = b'\\';
            buf[1] = b'n';
            2
        }
        0x0D => {
            buf[0] = b'\\';
            buf[1] = b'r';
            2
        }
        0x09 => {
            buf[0] = b'\\';
            buf[1] = b't';
            2
        }
        0x00..=0x1F => {
            buf[0] = b'\\';
            buf[1] = b'u';
            buf[2] = b'0';
            buf[3] = b'0';
            buf[4] = HEX_DIGITS[(b >> 4) as usize];
            buf[5] = HEX_DIGITS[(b & 0x0F) as usize];
            6
        }
        _ => {
            buf[0] = b;
            1
        }
    };
    (buf, len)
}

/// Which prefix a `Start` event needs, derived purely from its role
/// flags. No container bookkeeping required, since `IS_FIRST` is
/// mutually exclusive with `IS_MEMBER_VALUE` and always paired with
/// exactly one of `IS_MEMBER_NAME`/`IS_ELEMENT`/neither (document
/// level).
fn start_prefix(flags: Flags) -> Prefix {
    if flags.contains(Flags::IS_MEMBER_VALUE) {
        Prefix::MemberColon
    } else if flags.contains(Flags::IS_MEMBER_NAME) {
        if flags.contains(Flags::IS_FIRST) { Prefix::ObjectStart } else { Prefix::MemberComma }
    } else if flags.contains(Flags::IS_ELEMENT) {
        if flags.contains(Flags::IS_FIRST) { Prefix::ArrayStart } else { Prefix::ArrayComma }
    } else {
        Prefix::None
    }
}

/// Turns a stream of [`LexResult`]s into JSON text fragments.
///
/// Tracks only container-nesting depth (for `indent` and for
/// detecting an unbalanced `End`/`DoubleEnd`); it has no notion of
/// member names or array elements beyond what each `LexResult`'s
/// flags already carry.
pub struct Writer {
    depth: usize,
}

impl Writer {
    pub fn new() -> Self {
        Writer { depth: 0 }
    }

    /// Current container-nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Converts one `LexResult` (plus the bytes the lexer reported
    /// alongside it, if any) into a text fragment.
    pub fn write(&mut self, result: &LexResult, bytes: &[u8]) -> TextOutput {
        match result.event {
            Event::Nothing => TextOutput::new(Status::Success, self.depth, Prefix::None, &[]),
            Event::Start => self.on_start(result, bytes),
            Event::End | Event::DoubleEnd => self.on_end(result, bytes),
            Event::Bytes => self.on_bytes(result, bytes),
        }
    }

    fn on_start(&mut self, result: &LexResult, bytes: &[u8]) -> TextOutput {
        let prefix = start_prefix(result.flags);
        match result.kind.expect("Start always carries a kind") {
            ValueKind::Object => self.open_container(prefix, b"{"),
            ValueKind::Array => self.open_container(prefix, b"["),
            ValueKind::String => TextOutput::new(Status::Success, self.depth, prefix, b"\""),
            // A number's or literal's first byte is never re-emitted as a
            // separate Bytes event (see `Lexer::begin_number`/`begin_literal`),
            // so it has to be written here, passed through unescaped.
            ValueKind::Number | ValueKind::Literal => {
                TextOutput::new(Status::Success, self.depth, prefix, bytes)
            }
        }
    }

    fn open_container(&mut self, prefix: Prefix, delim: &[u8]) -> TextOutput {
        let indent = self.depth;
        self.depth += 1;
        TextOutput::new(Status::Success, indent, prefix, delim)
    }

    fn on_end(&mut self, result: &LexResult, bytes: &[u8]) -> TextOutput {
        match result.kind.expect("End/DoubleEnd always carries a kind") {
            ValueKind::Object => self.close_container(Prefix::ObjectEnd, b"}"),
            ValueKind::Array => self.close_container(Prefix::ArrayEnd, b"]"),
            ValueKind::String => TextOutput::new(Status::Success, self.depth, Prefix::None, b"\""),
            ValueKind::Number | ValueKind::Literal => {
                let (buf, len) = escape_string_bytes(bytes);
                TextOutput::new(Status::Success, self.depth, Prefix::None, &buf[..len as usize])
            }
        }
    }

    fn close_container(&mut self, prefix: Prefix, delim: &[u8]) -> TextOutput {
        if self.depth == 0 {
            return TextOutput::new(Status::Underflow, 0, Prefix::None, &[]);
        }
        self.depth -= 1;
        TextOutput::new(Status::Success, self.depth, prefix, delim)
    }

    fn on_bytes(&mut self, result: &LexResult, bytes: &[u8]) -> TextOutput {
        match result.kind.expect("Bytes always carries a kind") {
            ValueKind::String => {
                let (buf, len) = escape_string_bytes(bytes);
                TextOutput::new(Status::Success, self.depth, Prefix::None, &buf[..len as usize])
            }
            ValueKind::Number | ValueKind::Literal => {
                TextOutput::new(Status::Success, self.depth, Prefix::None, bytes)
            }
            ValueKind::Object | ValueKind::Array => unreachable!("containers never emit Bytes"),
        }
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(kind: ValueKind, flags: Flags) -> LexResult {
        LexResult { status: Status::Success, event: Event::Start, kind: Some(kind), flags }
    }

    fn end(kind: ValueKind) -> LexResult {
        LexResult { status: Status::Success, event: Event::End, kind: Some(kind), flags: Flags::empty() }
    }

    #[test]
    fn top_level_array_open_has_no_prefix_and_indent_zero() {
        let mut w = Writer::new();
        let out = w.write(&start(ValueKind::Array, Flags::IS_FIRST), &[]);
        assert_eq!(out.prefix, Prefix::None);
        assert_eq!(out.indent, 0);
        assert_eq!(out.bytes(), b"[");
        assert_eq!(w.depth(), 1);
    }

    #[test]
    fn first_element_gets_array_start_prefix() {
        let mut w = Writer::new();
        w.write(&start(ValueKind::Array, Flags::IS_FIRST), &[]);
        let out = w.write(&start(ValueKind::Number, Flags::IS_ELEMENT | Flags::IS_FIRST), &[]);
        assert_eq!(out.prefix, Prefix::ArrayStart);
        assert_eq!(out.indent, 1);
    }

    #[test]
    fn number_start_carries_its_first_digit_through() {
        let mut w = Writer::new();
        w.write(&start(ValueKind::Array, Flags::IS_FIRST), &[]);
        let out = w.write(&start(ValueKind::Number, Flags::IS_ELEMENT | Flags::IS_FIRST), b"1");
        assert_eq!(out.bytes(), b"1");
    }

    #[test]
    fn second_element_gets_array_comma_prefix() {
        let mut w = Writer::new();
        w.write(&start(ValueKind::Array, Flags::IS_FIRST), &[]);
        let out = w.write(&start(ValueKind::Number, Flags::IS_ELEMENT), &[]);
        assert_eq!(out.prefix, Prefix::ArrayComma);
    }

    #[test]
    fn member_name_then_value_prefixes() {
        let mut w = Writer::new();
        w.write(&start(ValueKind::Object, Flags::IS_FIRST), &[]);
        let name = w.write(&start(ValueKind::String, Flags::IS_MEMBER_NAME | Flags::IS_FIRST), &[]);
        assert_eq!(name.prefix, Prefix::ObjectStart);
        let value = w.write(&start(ValueKind::Number, Flags::IS_MEMBER_VALUE), &[]);
        assert_eq!(value.prefix, Prefix::MemberColon);
    }

    #[test]
    fn second_member_name_gets_member_comma_prefix() {
        let mut w = Writer::new();
        w.write(&start(ValueKind::Object, Flags::IS_FIRST), &[]);
        let out = w.write(&start(ValueKind::String, Flags::IS_MEMBER_NAME), &[]);
        assert_eq!(out.prefix, Prefix::MemberComma);
    }

    #[test]
    fn closing_brace_lands_back_at_outer_indent() {
        let mut w = Writer::new();
        w.write(&start(ValueKind::Object, Flags::IS_FIRST), &[]);
        let out = w.write(&end(ValueKind::Object), &[]);
        assert_eq!(out.indent, 0);
        assert_eq!(out.prefix, Prefix::ObjectEnd);
        assert_eq!(out.bytes(), b"}");
        assert_eq!(w.depth(), 0);
    }

    #[test]
    fn double_end_closes_the_container_once() {
        let mut w = Writer::new();
        w.write(&start(ValueKind::Array, Flags::IS_FIRST), &[]);
        w.write(&start(ValueKind::Number, Flags::IS_ELEMENT | Flags::IS_FIRST), &[]);
        let merged = LexResult { status: Status::Success, event: Event::DoubleEnd, kind: Some(ValueKind::Array), flags: Flags::empty() };
        let out = w.write(&merged, b"]");
        assert_eq!(out.bytes(), b"]");
        assert_eq!(out.prefix, Prefix::ArrayEnd);
        assert_eq!(w.depth(), 0);
    }

    #[test]
    fn closing_without_an_open_container_underflows() {
        let mut w = Writer::new();
        let out = w.write(&end(ValueKind::Object), &[]);
        assert_eq!(out.status, Status::Underflow);
    }

    #[test]
    fn quote_and_backslash_are_escaped_in_string_bytes() {
        let mut w = Writer::new();
        let bytes_event = LexResult { status: Status::Success, event: Event::Bytes, kind: Some(ValueKind::String), flags: Flags::HAS_BYTES };
        assert_eq!(w.write(&bytes_event, b"\"").bytes(), b"\\\"");
        assert_eq!(w.write(&bytes_event, b"\\").bytes(), b"\\\\");
    }

    #[test]
    fn control_byte_escapes_to_short_or_generic_form() {
        let mut w = Writer::new();
        let bytes_event = LexResult { status: Status::Success, event: Event::Bytes, kind: Some(ValueKind::String), flags: Flags::HAS_BYTES };
        assert_eq!(w.write(&bytes_event, &[0x0A]).bytes(), b"\\n");
        assert_eq!(w.write(&bytes_event, &[0x01]).bytes(), b"\\u0001");
    }

    #[test]
    fn number_bytes_pass_through_unescaped() {
        let mut w = Writer::new();
        let bytes_event = LexResult { status: Status::Success, event: Event::Bytes, kind: Some(ValueKind::Number), flags: Flags::HAS_BYTES };
        assert_eq!(w.write(&bytes_event, b"7").bytes(), b"7");
    }

    #[test]
    fn multi_byte_utf8_fragment_passes_through_unescaped() {
        let mut w = Writer::new();
        let bytes_event = LexResult { status: Status::Success, event: Event::Bytes, kind: Some(ValueKind::String), flags: Flags::HAS_BYTES };
        let clef = "\u{1D11E}".as_bytes();
        assert_eq!(w.write(&bytes_event, clef).bytes(), clef);
    }
}
