//! Byte-incremental JSON lexer: a pushdown automaton whose stack
//! frames are themselves states, reading one input byte (or the EOF
//! sentinel) per call and reporting exactly one [`LexResult`] per call.

use crate::event::{Event, Flags, LexResult, ValueKind};
use crate::status::Status;

/// The 24 states the lexer's stack frames can hold. Frame 0 is always
/// [`LexerState::Start`] (the document position); pushing a frame
/// begins a new value, popping one ends it and resumes whatever
/// structural position was underneath.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LexerState {
    // structural positions, whitespace is skipped here
    Start,
    ElemFirst,
    ElemSep,
    ElemNext,
    MemNameFirst,
    MemNameSep,
    MemValueStart,
    MemSep,
    MemNext,
    // string body, every byte is significant
    String,
    StringEsc,
    StringEscHex,
    StringEscLo,
    // number body
    NumIntStart,
    NumIntCont,
    NumIntEnd,
    NumFracStart,
    NumFracCont,
    NumExpStart,
    NumExpIntStart,
    NumExpIntCont,
    // literals
    False,
    Null,
    True,
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, 0x09 | 0x0A | 0x0D | 0x20)
}

/// Whitespace, `,`, `]`, `}`, or EOF: the set of bytes that can
/// terminate a number, none of which are part of the number itself.
fn is_number_boundary(c: i32) -> bool {
    c < 0 || matches!(c, 0x09 | 0x0A | 0x0D | 0x20 | 0x2C | 0x5D | 0x7D)
}

fn hex_value(b: u8) -> Option<u32> {
    (b as char).to_digit(16)
}

fn error(status: Status) -> LexResult {
    LexResult { status, event: Event::Nothing, kind: None, flags: Flags::empty() }
}

fn nothing() -> LexResult {
    LexResult::nothing(Status::Success)
}

/// A single-byte-incremental JSON lexer over a caller-bounded
/// container-nesting stack.
///
/// `max_depth` is the stack's total frame capacity, including the
/// always-present document-level frame; a fresh lexer can therefore
/// nest `max_depth - 1` values deep before [`Status::Overflow`].
pub struct Lexer {
    max_depth: usize,
    stack: Vec<LexerState>,
    /// Accumulator for `\uXXXX` hex nibbles and surrogate-pair low halves.
    value: u32,
    /// Progress counter: hex nibbles read so far, or how much of a
    /// literal's remaining suffix (or a low-surrogate `\uYYYY`
    /// sequence) has matched.
    length: u8,
    /// The high half of a surrogate pair, held while `StringEscLo`
    /// waits for its low half.
    surrogate_hi: Option<u16>,
    /// Whether a top-level value has ever been started. Governs EOF
    /// handling at document level (empty input is `NoData`, EOF after
    /// a value completed is a quiet no-op).
    seen_top_level_value: bool,
    num_bytes: u8,
    raw_bytes: [u8; 4],
}

impl Lexer {
    /// Creates a lexer with a container stack of `max_depth` frames.
    /// Returns `None` if `max_depth == 0`, matching the C original's
    /// "memory smaller than the minimum" rejection at `init`.
    pub fn new(max_depth: usize) -> Option<Self> {
        if max_depth == 0 {
            return None;
        }
        let mut stack = Vec::with_capacity(max_depth);
        stack.push(LexerState::Start);
        Some(Lexer {
            max_depth,
            stack,
            value: 0,
            length: 0,
            surrogate_hi: None,
            seen_top_level_value: false,
            num_bytes: 0,
            raw_bytes: [0; 4],
        })
    }

    /// Current container-nesting depth; 0 means "at document level".
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// The 1-4 bytes produced by the most recent [`Lexer::read_byte`]
    /// call, valid until the next call.
    pub fn bytes(&self) -> &[u8] {
        &self.raw_bytes[..self.num_bytes as usize]
    }

    /// Feeds one input byte (0..=255) or the EOF sentinel (any
    /// negative value) to the lexer, returning exactly one result.
    ///
    /// Internally this may dispatch twice against the *same* input
    /// (the number-termination retry protocol, see the state diagrams
    /// in the `design/` folder), but that is never visible to the
    /// caller as two calls or two results.
    pub fn read_byte(&mut self, c: i32) -> LexResult {
        let r1 = self.dispatch(c);
        if r1.status == Status::Retry {
            let r2 = self.dispatch(c);
            return Self::merge_retry(r1, r2);
        }
        r1
    }

    fn merge_retry(r1: LexResult, r2: LexResult) -> LexResult {
        if r1.event == Event::End && r2.event == Event::End {
            LexResult { status: r2.status, event: Event::DoubleEnd, kind: r2.kind, flags: r2.flags }
        } else {
            LexResult { status: r2.status, event: r1.event, kind: r1.kind, flags: r1.flags }
        }
    }

    fn top(&self) -> LexerState {
        *self.stack.last().expect("frame 0 is never popped")
    }

    fn set_top(&mut self, state: LexerState) {
        *self.stack.last_mut().expect("frame 0 is never popped") = state;
    }

    fn push_frame(&mut self, state: LexerState) -> bool {
        if self.stack.len() == self.max_depth {
            return false;
        }
        self.stack.push(state);
        true
    }

    /// Pops the current frame; `None` means underflow (only the
    /// document frame remained). Unreachable through any structural
    /// dispatcher in this module, since `close_value` is only ever
    /// invoked from a frame that was itself pushed. Kept as a
    /// defensive check that reports `Status::Underflow` instead of
    /// panicking.
    fn pop_frame(&mut self) -> Option<LexerState> {
        if self.stack.len() <= 1 {
            return None;
        }
        self.stack.pop()
    }

    fn clear_bytes(&mut self) {
        self.num_bytes = 0;
    }

    fn set_single_byte(&mut self, b: u8) {
        self.num_bytes = 1;
        self.raw_bytes[0] = b;
    }

    fn emit_codepoint(&mut self, codepoint: u32) {
        let ch = char::from_u32(codepoint).unwrap_or(char::REPLACEMENT_CHARACTER);
        let mut buf = [0u8; 4];
        let len = ch.encode_utf8(&mut buf).len();
        self.raw_bytes[..len].copy_from_slice(&buf[..len]);
        self.num_bytes = len as u8;
    }

    /// Pops the current (value) frame and updates the newly-exposed
    /// parent frame to its post-value structural state. `None` means
    /// underflow.
    fn close_value(&mut self) -> Option<()> {
        self.pop_frame()?;
        match self.top() {
            LexerState::ElemFirst | LexerState::ElemNext => self.set_top(LexerState::ElemSep),
            LexerState::MemValueStart => self.set_top(LexerState::MemSep),
            LexerState::MemNameFirst | LexerState::MemNext => self.set_top(LexerState::MemNameSep),
            LexerState::Start => {}
            other => unreachable!("frame {other:?} cannot be a value's parent"),
        }
        Some(())
    }

    fn dispatch(&mut self, c: i32) -> LexResult {
        match self.top() {
            LexerState::Start => self.at_start(c),
            LexerState::ElemFirst => self.at_elem_first(c),
            LexerState::ElemSep => self.at_elem_sep(c),
            LexerState::ElemNext => self.at_elem_next(c),
            LexerState::MemNameFirst => self.at_mem_name_first(c),
            LexerState::MemNameSep => self.at_mem_name_sep(c),
            LexerState::MemValueStart => self.at_mem_value_start(c),
            LexerState::MemSep => self.at_mem_sep(c),
            LexerState::MemNext => self.at_mem_next(c),
            LexerState::String => self.in_string(c),
            LexerState::StringEsc => self.in_string_esc(c),
            LexerState::StringEscHex => self.in_string_esc_hex(c),
            LexerState::StringEscLo => self.in_string_esc_lo(c),
            LexerState::NumIntStart => self.in_num_int_start(c),
            LexerState::NumIntCont => self.in_num_int_cont(c),
            LexerState::NumIntEnd => self.in_num_int_end(c),
            LexerState::NumFracStart => self.in_num_frac_start(c),
            LexerState::NumFracCont => self.in_num_frac_cont(c),
            LexerState::NumExpStart => self.in_num_exp_start(c),
            LexerState::NumExpIntStart => self.in_num_exp_int_start(c),
            LexerState::NumExpIntCont => self.in_num_exp_int_cont(c),
            LexerState::False => self.in_literal(c, b"alse"),
            LexerState::Null => self.in_literal(c, b"ull"),
            LexerState::True => self.in_literal(c, b"rue"),
        }
    }

    // --- "expect a value" positions -------------------------------------

    fn begin_value(&mut self, b: u8, role: Flags) -> LexResult {
        match b {
            b'"' => {
                if !self.push_frame(LexerState::String) {
                    return error(Status::Overflow);
                }
                self.clear_bytes();
                LexResult { status: Status::Success, event: Event::Start, kind: Some(ValueKind::String), flags: role }
            }
            b'-' => self.begin_number(b, LexerState::NumIntStart, role),
            b'0' => self.begin_number(b, LexerState::NumIntEnd, role),
            b'1'..=b'9' => self.begin_number(b, LexerState::NumIntCont, role),
            b'{' => self.begin_container(LexerState::MemNameFirst, ValueKind::Object, role),
            b'[' => self.begin_container(LexerState::ElemFirst, ValueKind::Array, role),
            b'f' => self.begin_literal(b, LexerState::False, role),
            b'n' => self.begin_literal(b, LexerState::Null, role),
            b't' => self.begin_literal(b, LexerState::True, role),
            _ => error(Status::ExpectedValue),
        }
    }

    fn begin_number(&mut self, b: u8, state: LexerState, role: Flags) -> LexResult {
        if !self.push_frame(state) {
            return error(Status::Overflow);
        }
        self.set_single_byte(b);
        LexResult { status: Status::Success, event: Event::Start, kind: Some(ValueKind::Number), flags: role | Flags::HAS_BYTES }
    }

    fn begin_container(&mut self, state: LexerState, kind: ValueKind, role: Flags) -> LexResult {
        if !self.push_frame(state) {
            return error(Status::Overflow);
        }
        self.clear_bytes();
        LexResult { status: Status::Success, event: Event::Start, kind: Some(kind), flags: role }
    }

    fn begin_literal(&mut self, b: u8, state: LexerState, role: Flags) -> LexResult {
        if !self.push_frame(state) {
            return error(Status::Overflow);
        }
        self.length = 0;
        self.set_single_byte(b);
        LexResult { status: Status::Success, event: Event::Start, kind: Some(ValueKind::Literal), flags: role | Flags::HAS_BYTES }
    }

    fn end_container(&mut self, kind: ValueKind, byte: u8) -> LexResult {
        if self.close_value().is_none() {
            return error(Status::Underflow);
        }
        self.set_single_byte(byte);
        LexResult { status: Status::Success, event: Event::End, kind: Some(kind), flags: Flags::HAS_BYTES }
    }

    // --- structural positions --------------------------------------------

    fn at_start(&mut self, c: i32) -> LexResult {
        if c < 0 {
            self.clear_bytes();
            return if self.seen_top_level_value { nothing() } else { error(Status::NoData) };
        }
        let b = c as u8;
        if is_whitespace(b) {
            self.clear_bytes();
            return nothing();
        }
        self.seen_top_level_value = true;
        self.begin_value(b, Flags::IS_FIRST)
    }

    fn at_elem_first(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return error(Status::NoData);
        }
        let b = c as u8;
        if is_whitespace(b) {
            return nothing();
        }
        if b == b']' {
            return self.end_container(ValueKind::Array, b);
        }
        self.begin_value(b, Flags::IS_ELEMENT | Flags::IS_FIRST)
    }

    fn at_elem_sep(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return error(Status::NoData);
        }
        let b = c as u8;
        if is_whitespace(b) {
            return nothing();
        }
        match b {
            b',' => {
                self.set_top(LexerState::ElemNext);
                nothing()
            }
            b']' => self.end_container(ValueKind::Array, b),
            _ => error(Status::ExpectedComma),
        }
    }

    fn at_elem_next(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return error(Status::NoData);
        }
        let b = c as u8;
        if is_whitespace(b) {
            return nothing();
        }
        self.begin_value(b, Flags::IS_ELEMENT)
    }

    fn at_mem_name_first(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return error(Status::NoData);
        }
        let b = c as u8;
        if is_whitespace(b) {
            return nothing();
        }
        if b == b'}' {
            return self.end_container(ValueKind::Object, b);
        }
        if b == b'"' {
            if !self.push_frame(LexerState::String) {
                return error(Status::Overflow);
            }
            self.clear_bytes();
            return LexResult {
                status: Status::Success,
                event: Event::Start,
                kind: Some(ValueKind::String),
                flags: Flags::IS_MEMBER_NAME | Flags::IS_FIRST,
            };
        }
        error(Status::ExpectedQuote)
    }

    fn at_mem_name_sep(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return error(Status::NoData);
        }
        let b = c as u8;
        if is_whitespace(b) {
            return nothing();
        }
        if b == b':' {
            self.set_top(LexerState::MemValueStart);
            return nothing();
        }
        error(Status::ExpectedColon)
    }

    fn at_mem_value_start(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return error(Status::NoData);
        }
        let b = c as u8;
        if is_whitespace(b) {
            return nothing();
        }
        self.begin_value(b, Flags::IS_MEMBER_VALUE)
    }

    fn at_mem_sep(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return error(Status::NoData);
        }
        let b = c as u8;
        if is_whitespace(b) {
            return nothing();
        }
        match b {
            b',' => {
                self.set_top(LexerState::MemNext);
                nothing()
            }
            b'}' => self.end_container(ValueKind::Object, b),
            _ => error(Status::ExpectedComma),
        }
    }

    fn at_mem_next(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return error(Status::NoData);
        }
        let b = c as u8;
        if is_whitespace(b) {
            return nothing();
        }
        if b == b'"' {
            if !self.push_frame(LexerState::String) {
                return error(Status::Overflow);
            }
            self.clear_bytes();
            return LexResult {
                status: Status::Success,
                event: Event::Start,
                kind: Some(ValueKind::String),
                flags: Flags::IS_MEMBER_NAME,
            };
        }
        error(Status::ExpectedQuote)
    }

    // --- string body -------------------------------------------------------

    fn in_string(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return error(Status::NoData);
        }
        let b = c as u8;
        match b {
            b'"' => {
                if self.close_value().is_none() {
                    return error(Status::Underflow);
                }
                self.set_single_byte(b);
                LexResult { status: Status::Success, event: Event::End, kind: Some(ValueKind::String), flags: Flags::HAS_BYTES }
            }
            b'\\' => {
                self.set_top(LexerState::StringEsc);
                self.clear_bytes();
                nothing()
            }
            _ if b < 0x20 => error(Status::ExpectedPrintable),
            _ => {
                self.set_single_byte(b);
                LexResult { status: Status::Success, event: Event::Bytes, kind: Some(ValueKind::String), flags: Flags::HAS_BYTES }
            }
        }
    }

    fn in_string_esc(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return error(Status::NoData);
        }
        let b = c as u8;
        let decoded = match b {
            b'"' => Some(b'"'),
            b'\\' => Some(b'\\'),
            b'/' => Some(b'/'),
            b'b' => Some(0x08),
            b'f' => Some(0x0C),
            b'n' => Some(0x0A),
            b'r' => Some(0x0D),
            b't' => Some(0x09),
            b'u' => None,
            _ => return error(Status::ExpectedStringEscape),
        };
        match decoded {
            Some(d) => {
                self.set_top(LexerState::String);
                self.set_single_byte(d);
                LexResult { status: Status::Success, event: Event::Bytes, kind: Some(ValueKind::String), flags: Flags::HAS_BYTES }
            }
            None => {
                self.set_top(LexerState::StringEscHex);
                self.value = 0;
                self.length = 0;
                self.clear_bytes();
                nothing()
            }
        }
    }

    fn in_string_esc_hex(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return error(Status::NoData);
        }
        let b = c as u8;
        let nibble = match hex_value(b) {
            Some(v) => v,
            None => return error(Status::ExpectedHexDigit),
        };
        self.value = (self.value << 4) | nibble;
        self.length += 1;
        if self.length < 4 {
            return nothing();
        }
        let codepoint = self.value;
        self.value = 0;
        self.length = 0;
        if (0xDC00..=0xDFFF).contains(&codepoint) {
            return error(Status::ExpectedUTF16Hi);
        }
        if (0xD800..=0xDBFF).contains(&codepoint) {
            self.surrogate_hi = Some(codepoint as u16);
            self.set_top(LexerState::StringEscLo);
            self.clear_bytes();
            return nothing();
        }
        self.emit_codepoint(codepoint);
        self.set_top(LexerState::String);
        LexResult { status: Status::Success, event: Event::Bytes, kind: Some(ValueKind::String), flags: Flags::HAS_BYTES }
    }

    fn in_string_esc_lo(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return self.fail_lo();
        }
        let b = c as u8;
        match self.length {
            0 => {
                if b == b'\\' {
                    self.length = 1;
                    nothing()
                } else {
                    self.fail_lo()
                }
            }
            1 => {
                if b == b'u' {
                    self.length = 2;
                    self.value = 0;
                    nothing()
                } else {
                    self.fail_lo()
                }
            }
            2..=5 => {
                let nibble = match hex_value(b) {
                    Some(v) => v,
                    None => return self.fail_lo(),
                };
                self.value = (self.value << 4) | nibble;
                self.length += 1;
                if self.length < 6 {
                    return nothing();
                }
                let lo = self.value;
                if !(0xDC00..=0xDFFF).contains(&lo) {
                    return self.fail_lo();
                }
                let hi = self.surrogate_hi.take().expect("hi surrogate recorded before entering StringEscLo") as u32;
                let codepoint = (hi - 0xD800) * 0x400 + (lo - 0xDC00) + 0x10000;
                self.length = 0;
                self.value = 0;
                self.emit_codepoint(codepoint);
                self.set_top(LexerState::String);
                LexResult { status: Status::Success, event: Event::Bytes, kind: Some(ValueKind::String), flags: Flags::HAS_BYTES }
            }
            _ => unreachable!("StringEscLo progress never exceeds 6"),
        }
    }

    fn fail_lo(&mut self) -> LexResult {
        self.length = 0;
        self.value = 0;
        self.surrogate_hi = None;
        error(Status::ExpectedUTF16Lo)
    }

    // --- number body ---------------------------------------------------------

    fn in_num_int_start(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return error(Status::ExpectedDigit);
        }
        match c as u8 {
            b'0' => {
                self.set_top(LexerState::NumIntEnd);
                self.set_single_byte(b'0');
                LexResult { status: Status::Success, event: Event::Bytes, kind: Some(ValueKind::Number), flags: Flags::HAS_BYTES }
            }
            b @ b'1'..=b'9' => {
                self.set_top(LexerState::NumIntCont);
                self.set_single_byte(b);
                LexResult { status: Status::Success, event: Event::Bytes, kind: Some(ValueKind::Number), flags: Flags::HAS_BYTES }
            }
            _ => error(Status::ExpectedDigit),
        }
    }

    fn in_num_int_cont(&mut self, c: i32) -> LexResult {
        if is_number_boundary(c) {
            return self.end_number(c);
        }
        match c as u8 {
            b @ b'0'..=b'9' => {
                self.set_single_byte(b);
                LexResult { status: Status::Success, event: Event::Bytes, kind: Some(ValueKind::Number), flags: Flags::HAS_BYTES }
            }
            b'.' => self.byte_change(LexerState::NumFracStart, b'.'),
            b @ (b'e' | b'E') => self.byte_change(LexerState::NumExpStart, b),
            _ => error(Status::ExpectedDigit),
        }
    }

    /// After a lone leading `0`, only `.`, `e`/`E`, or a boundary byte
    /// may follow; another digit means a rejected leading zero.
    fn in_num_int_end(&mut self, c: i32) -> LexResult {
        if is_number_boundary(c) {
            return self.end_number(c);
        }
        match c as u8 {
            b'.' => self.byte_change(LexerState::NumFracStart, b'.'),
            b @ (b'e' | b'E') => self.byte_change(LexerState::NumExpStart, b),
            _ => error(Status::ExpectedDecimal),
        }
    }

    fn in_num_frac_start(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return error(Status::ExpectedDigit);
        }
        match c as u8 {
            b @ b'0'..=b'9' => self.byte_change(LexerState::NumFracCont, b),
            _ => error(Status::ExpectedDigit),
        }
    }

    fn in_num_frac_cont(&mut self, c: i32) -> LexResult {
        if is_number_boundary(c) {
            return self.end_number(c);
        }
        match c as u8 {
            b @ b'0'..=b'9' => {
                self.set_single_byte(b);
                LexResult { status: Status::Success, event: Event::Bytes, kind: Some(ValueKind::Number), flags: Flags::HAS_BYTES }
            }
            b @ (b'e' | b'E') => self.byte_change(LexerState::NumExpStart, b),
            _ => error(Status::ExpectedDigit),
        }
    }

    fn in_num_exp_start(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return error(Status::ExpectedExponent);
        }
        match c as u8 {
            b @ (b'+' | b'-') => self.byte_change(LexerState::NumExpIntStart, b),
            b @ b'0'..=b'9' => self.byte_change(LexerState::NumExpIntCont, b),
            _ => error(Status::ExpectedExponent),
        }
    }

    fn in_num_exp_int_start(&mut self, c: i32) -> LexResult {
        if c < 0 {
            return error(Status::ExpectedExponent);
        }
        match c as u8 {
            b @ b'0'..=b'9' => self.byte_change(LexerState::NumExpIntCont, b),
            _ => error(Status::ExpectedExponent),
        }
    }

    fn in_num_exp_int_cont(&mut self, c: i32) -> LexResult {
        if is_number_boundary(c) {
            return self.end_number(c);
        }
        match c as u8 {
            b @ b'0'..=b'9' => {
                self.set_single_byte(b);
                LexResult { status: Status::Success, event: Event::Bytes, kind: Some(ValueKind::Number), flags: Flags::HAS_BYTES }
            }
            _ => error(Status::ExpectedExponent),
        }
    }

    fn byte_change(&mut self, state: LexerState, b: u8) -> LexResult {
        self.set_top(state);
        self.set_single_byte(b);
        LexResult { status: Status::Success, event: Event::Bytes, kind: Some(ValueKind::Number), flags: Flags::HAS_BYTES }
    }

    /// The number-termination retry protocol: the boundary byte isn't
    /// part of the number, so it must be replayed. EOF that closes the
    /// last open value back to document level is the one case that
    /// resolves immediately with plain `Success`, see the state
    /// diagrams in the `design/` folder.
    fn end_number(&mut self, c: i32) -> LexResult {
        if self.close_value().is_none() {
            return error(Status::Underflow);
        }
        self.clear_bytes();
        let back_to_document_level = self.stack.len() == 1;
        if c < 0 && back_to_document_level {
            LexResult { status: Status::Success, event: Event::End, kind: Some(ValueKind::Number), flags: Flags::empty() }
        } else {
            LexResult { status: Status::Retry, event: Event::End, kind: Some(ValueKind::Number), flags: Flags::empty() }
        }
    }

    // --- literals --------------------------------------------------------------

    fn in_literal(&mut self, c: i32, rest: &'static [u8]) -> LexResult {
        if c < 0 {
            return error(Status::ExpectedLiteral);
        }
        let b = c as u8;
        if b != rest[self.length as usize] {
            return error(Status::ExpectedLiteral);
        }
        self.length += 1;
        if (self.length as usize) == rest.len() {
            if self.close_value().is_none() {
                return error(Status::Underflow);
            }
            self.set_single_byte(b);
            LexResult { status: Status::Success, event: Event::End, kind: Some(ValueKind::Literal), flags: Flags::HAS_BYTES }
        } else {
            self.set_single_byte(b);
            LexResult { status: Status::Success, event: Event::Bytes, kind: Some(ValueKind::Literal), flags: Flags::HAS_BYTES }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (Vec<LexResult>, Lexer) {
        let mut lexer = Lexer::new(32).unwrap();
        let mut results = Vec::new();
        for b in input.bytes() {
            results.push(lexer.read_byte(b as i32));
        }
        results.push(lexer.read_byte(-1));
        (results, lexer)
    }

    #[test]
    fn empty_array() {
        let (results, lexer) = run("[]");
        assert_eq!(results[0], LexResult { status: Status::Success, event: Event::Start, kind: Some(ValueKind::Array), flags: Flags::IS_FIRST });
        assert_eq!(results[1], LexResult { status: Status::Success, event: Event::End, kind: Some(ValueKind::Array), flags: Flags::HAS_BYTES });
        assert_eq!(lexer.depth(), 0);
    }

    #[test]
    fn array_of_numbers_closes_with_double_end() {
        let (results, _lexer) = run("[1]");
        let last_real = results.iter().rev().nth(1).unwrap();
        assert_eq!(last_real.event, Event::DoubleEnd);
        assert_eq!(last_real.kind, Some(ValueKind::Array));
        assert_eq!(last_real.status, Status::Success);
        assert!(last_real.flags.contains(Flags::HAS_BYTES));
    }

    #[test]
    fn object_member_sequence() {
        let (results, _) = run(r#"{"a":1}"#);
        assert_eq!(results[0].event, Event::Start);
        assert_eq!(results[0].kind, Some(ValueKind::Object));
        assert!(results[0].flags.contains(Flags::IS_FIRST));

        assert_eq!(results[1].event, Event::Start);
        assert_eq!(results[1].kind, Some(ValueKind::String));
        assert!(results[1].flags.contains(Flags::IS_MEMBER_NAME));
        assert!(results[1].flags.contains(Flags::IS_FIRST));

        assert_eq!(results[2].event, Event::Bytes);
        assert_eq!(results[2].kind, Some(ValueKind::String));

        assert_eq!(results[3].event, Event::End);
        assert_eq!(results[3].kind, Some(ValueKind::String));

        // results[4] is the ':' byte, consumed silently (Nothing).
        assert_eq!(results[4].event, Event::Nothing);

        assert_eq!(results[5].event, Event::Start);
        assert_eq!(results[5].kind, Some(ValueKind::Number));
        assert!(results[5].flags.contains(Flags::IS_MEMBER_VALUE));

        let closing = results[6];
        assert_eq!(closing.event, Event::DoubleEnd);
        assert_eq!(closing.kind, Some(ValueKind::Object));
    }

    #[test]
    fn overflow_on_deep_nesting() {
        let mut lexer = Lexer::new(2).unwrap(); // base frame + 1 nesting level
        assert_eq!(lexer.read_byte(b'[' as i32).status, Status::Success);
        assert_eq!(lexer.read_byte(b'[' as i32).status, Status::Overflow);
    }

    #[test]
    fn init_rejects_zero_capacity() {
        assert!(Lexer::new(0).is_none());
    }

    #[test]
    fn surrogate_pair_encodes_musical_g_clef() {
        let (results, _) = run("\"\u{1D11E}\"");
        let bytes_event = results.iter().find(|r| r.event == Event::Bytes).unwrap();
        assert_eq!(bytes_event.status, Status::Success);
    }

    #[test]
    fn lone_low_surrogate_is_rejected() {
        let (results, _) = run(r#""\uDC00""#);
        assert!(results.iter().any(|r| r.status == Status::ExpectedUTF16Hi));
    }

    #[test]
    fn lone_high_surrogate_with_no_follow_up_is_rejected() {
        let (results, _) = run(r#""\uD800""#);
        assert!(results.iter().any(|r| r.status == Status::ExpectedUTF16Lo));
    }

    #[test]
    fn control_byte_in_string_is_rejected() {
        let mut lexer = Lexer::new(8).unwrap();
        lexer.read_byte(b'"' as i32);
        let r = lexer.read_byte(0x01);
        assert_eq!(r.status, Status::ExpectedPrintable);
    }

    #[test]
    fn bare_minus_is_rejected() {
        let mut lexer = Lexer::new(8).unwrap();
        lexer.read_byte(b'-' as i32);
        let r = lexer.read_byte(b'x' as i32);
        assert_eq!(r.status, Status::ExpectedDigit);
    }

    #[test]
    fn leading_zero_rejects_further_digits() {
        let mut lexer = Lexer::new(8).unwrap();
        lexer.read_byte(b'0' as i32);
        let r = lexer.read_byte(b'1' as i32);
        assert_eq!(r.status, Status::ExpectedDecimal);
    }

    #[test]
    fn whitespace_skipped_only_structurally() {
        let mut lexer = Lexer::new(8).unwrap();
        assert_eq!(lexer.read_byte(b' ' as i32).event, Event::Nothing);
        lexer.read_byte(b'"' as i32);
        let r = lexer.read_byte(b' ' as i32);
        assert_eq!(r.event, Event::Bytes);
    }

    #[test]
    fn depth_is_zero_after_well_formed_input() {
        let (_results, lexer) = run(r#"{"a":[1,2,3],"b":true}"#);
        assert_eq!(lexer.depth(), 0);
    }
}
