//! Forward-moving cursor used by state-machine lexers.
//!
//! A [`StyleContext`] walks the bytes of one lex range, exposing the previous, current and
//! next byte and line-boundary flags. Changing state closes the open span and paints it with
//! the old state's style. The range is extended by one virtual position when it reaches the
//! end of the document, where [`StyleContext::at_line_end`] is true, so constructs left open
//! at end of file are closed the same way as at a line end.

use crate::Style;
use crate::accessor::Accessor;
use crate::lexer::LexState;

/// Cursor over one lex range, generic over the language's state type.
pub struct StyleContext<'s, 'a, S: LexState> {
    styler: &'s mut Accessor<'a>,
    end_pos: usize,
    doc_len: usize,
    last_line: usize,
    current_pos: usize,
    current_line: usize,
    line_start_next: usize,
    at_line_start: bool,
    at_line_end: bool,
    state: S,
    ch_prev: u8,
    ch: u8,
    ch_next: u8,
}

impl<'s, 'a, S: LexState> StyleContext<'s, 'a, S> {
    /// Begin lexing `start..start + length` in `init_state`.
    pub fn new(start: usize, length: usize, init_state: S, styler: &'s mut Accessor<'a>) -> Self {
        let doc_len = styler.len();
        let start = start.min(doc_len);
        let mut end_pos = (start + length).min(doc_len);
        if end_pos == doc_len {
            end_pos += 1;
        }
        styler.start_at(start);
        styler.start_segment(start);

        let current_line = styler.line_of(start);
        let line_start_next = styler.line_start(current_line + 1);
        let at_line_start = styler.line_start(current_line) == start;
        let last_line = styler.line_of(doc_len);
        let ch_prev = if start > 0 {
            styler.char_at(start - 1)
        } else {
            0
        };
        let ch = styler.char_at(start);
        let ch_next = styler.char_at(start + 1);

        let mut sc = Self {
            styler,
            end_pos,
            doc_len,
            last_line,
            current_pos: start,
            current_line,
            line_start_next,
            at_line_start,
            at_line_end: false,
            state: init_state,
            ch_prev,
            ch,
            ch_next,
        };
        sc.update_line_end();
        sc
    }

    fn update_line_end(&mut self) {
        self.at_line_end = if self.current_line < self.last_line {
            self.current_pos + 1 >= self.line_start_next
        } else {
            self.current_pos >= self.line_start_next
        };
    }

    /// `true` while the cursor is inside the range.
    pub fn more(&self) -> bool {
        self.current_pos < self.end_pos
    }

    /// Advance one byte. Past the range end the cursor stays put and reports spaces.
    pub fn forward(&mut self) {
        if self.current_pos < self.end_pos {
            self.at_line_start = self.at_line_end;
            if self.at_line_start {
                self.current_line += 1;
                self.line_start_next = self.styler.line_start(self.current_line + 1);
            }
            self.ch_prev = self.ch;
            self.current_pos += 1;
            self.ch = self.ch_next;
            self.ch_next = self.styler.char_at(self.current_pos + 1);
            self.update_line_end();
        } else {
            self.at_line_start = false;
            self.ch_prev = b' ';
            self.ch = b' ';
            self.ch_next = b' ';
            self.at_line_end = true;
        }
    }

    /// Advance `n` bytes.
    pub fn forward_n(&mut self, n: usize) {
        for _ in 0..n {
            self.forward();
        }
    }

    /// Close the open span with the current state and start a new span in `state`.
    pub fn set_state(&mut self, state: S) {
        let style = self.state.style();
        self.styler
            .colour_before(self.current_pos.min(self.doc_len), style);
        self.state = state;
    }

    /// Advance one byte, then [`set_state`](Self::set_state).
    pub fn forward_set_state(&mut self, state: S) {
        self.forward();
        self.set_state(state);
    }

    /// Relabel the open span without closing it.
    pub fn change_state(&mut self, state: S) {
        self.state = state;
    }

    /// Paint the final span and flush. Call exactly once, after the loop.
    pub fn complete(&mut self) {
        let style: Style = self.state.style();
        self.styler
            .colour_before(self.current_pos.min(self.doc_len), style);
        self.styler.flush();
    }

    /// Current state.
    pub fn state(&self) -> S {
        self.state
    }

    /// Current position.
    pub fn current_pos(&self) -> usize {
        self.current_pos
    }

    /// Line of the current position.
    pub fn current_line(&self) -> usize {
        self.current_line
    }

    /// Byte before the cursor.
    pub fn ch_prev(&self) -> u8 {
        self.ch_prev
    }

    /// Byte under the cursor (0 past the end of the document).
    pub fn ch(&self) -> u8 {
        self.ch
    }

    /// Byte after the cursor.
    pub fn ch_next(&self) -> u8 {
        self.ch_next
    }

    /// `true` on the first byte of a line.
    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    /// `true` on the last byte of a line (the LF of CRLF) and at the end of the document.
    pub fn at_line_end(&self) -> bool {
        self.at_line_end
    }

    /// Byte at `offset` from the cursor, or 0 outside the document.
    pub fn relative(&self, offset: isize) -> u8 {
        self.styler.char_at_relative(self.current_pos, offset)
    }

    /// Length of the open span.
    pub fn length_current(&self) -> usize {
        self.current_pos
            .saturating_sub(self.styler.start_segment_pos())
    }

    /// `true` if the cursor is on `ch`.
    pub fn match_char(&self, ch: u8) -> bool {
        self.ch == ch
    }

    /// `true` if the cursor is on `ch0` followed by `ch1`.
    pub fn match_pair(&self, ch0: u8, ch1: u8) -> bool {
        self.ch == ch0 && self.ch_next == ch1
    }

    /// `true` if the bytes from the cursor spell `text`.
    pub fn match_str(&self, text: &str) -> bool {
        let bytes = text.as_bytes();
        match bytes {
            [] => true,
            [first] => self.ch == *first,
            [first, second, rest @ ..] => {
                self.ch == *first
                    && self.ch_next == *second
                    && rest
                        .iter()
                        .enumerate()
                        .all(|(i, &b)| self.styler.char_at(self.current_pos + 2 + i) == b)
            }
        }
    }

    /// Like [`match_str`](Self::match_str) but ignoring ASCII case; `text` must be lower case.
    pub fn match_ignore_case(&self, text: &str) -> bool {
        text.bytes()
            .enumerate()
            .all(|(i, b)| self.styler.char_at(self.current_pos + i).to_ascii_lowercase() == b)
    }

    /// Text of the open span.
    pub fn current_text(&self) -> String {
        self.styler
            .range_text(self.styler.start_segment_pos(), self.current_pos)
    }

    /// Text of the open span, ASCII lower-cased.
    pub fn current_lowered(&self) -> String {
        self.current_text().to_ascii_lowercase()
    }

    /// Underlying accessor, for look-behind and property reads.
    pub fn styler(&self) -> &Accessor<'a> {
        self.styler
    }

    /// Mutable accessor.
    pub fn styler_mut(&mut self) -> &mut Accessor<'a> {
        self.styler
    }
}
