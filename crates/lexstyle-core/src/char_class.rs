//! Byte classification helpers used by lexers.

/// A set of ASCII bytes, with a fixed answer for bytes `>= 0x80`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterSet {
    bits: u128,
    high: bool,
}

impl CharacterSet {
    /// Lower-case ASCII letters.
    pub const LOWER: &'static str = "abcdefghijklmnopqrstuvwxyz";
    /// Upper-case ASCII letters.
    pub const UPPER: &'static str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    /// ASCII digits.
    pub const DIGITS: &'static str = "0123456789";

    /// An empty set; `high` decides membership of non-ASCII bytes.
    pub const fn empty(high: bool) -> Self {
        Self { bits: 0, high }
    }

    /// Set of ASCII letters, plus `extra`.
    pub fn alpha(extra: &str, high: bool) -> Self {
        Self::empty(high)
            .with(Self::LOWER)
            .with(Self::UPPER)
            .with(extra)
    }

    /// Set of ASCII letters and digits, plus `extra`.
    pub fn alpha_numeric(extra: &str, high: bool) -> Self {
        Self::alpha(extra, high).with(Self::DIGITS)
    }

    /// Set of exactly the bytes of `chars` (ASCII only).
    pub fn of(chars: &str) -> Self {
        Self::empty(false).with(chars)
    }

    /// Add the ASCII bytes of `chars`.
    pub fn with(mut self, chars: &str) -> Self {
        for b in chars.bytes().filter(u8::is_ascii) {
            self.bits |= 1u128 << b;
        }
        self
    }

    /// `true` if `ch` is in the set.
    pub fn contains(&self, ch: u8) -> bool {
        if ch.is_ascii() {
            self.bits & (1u128 << ch) != 0
        } else {
            self.high
        }
    }
}

/// Space, tab, and the other ASCII whitespace controls (0x09..=0x0D).
pub fn is_space_char(ch: u8) -> bool {
    ch == b' ' || (0x09..=0x0d).contains(&ch)
}

/// `true` for CR or LF.
pub fn is_eol(ch: u8) -> bool {
    ch == b'\r' || ch == b'\n'
}

/// ASCII decimal digit.
pub fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

/// Digit in the given base (up to 36).
pub fn is_digit_in_base(ch: u8, base: u32) -> bool {
    char::from(ch).to_digit(base).is_some()
}

/// ASCII letter or digit.
pub fn is_alpha_numeric(ch: u8) -> bool {
    ch.is_ascii_alphanumeric()
}

/// ASCII punctuation commonly used as operators.
pub fn is_operator(ch: u8) -> bool {
    matches!(
        ch,
        b'%' | b'^'
            | b'&'
            | b'*'
            | b'('
            | b')'
            | b'-'
            | b'+'
            | b'='
            | b'|'
            | b'{'
            | b'}'
            | b'['
            | b']'
            | b':'
            | b';'
            | b'<'
            | b'>'
            | b','
            | b'/'
            | b'?'
            | b'!'
            | b'.'
            | b'~'
    )
}

/// ASCII lower-casing; other bytes are returned unchanged.
pub fn to_lower(ch: u8) -> u8 {
    ch.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_set_membership() {
        let word = CharacterSet::alpha_numeric("._", true);
        assert!(word.contains(b'a'));
        assert!(word.contains(b'Z'));
        assert!(word.contains(b'7'));
        assert!(word.contains(b'_'));
        assert!(word.contains(0xC3));
        assert!(!word.contains(b'-'));

        let ops = CharacterSet::of("+-");
        assert!(ops.contains(b'+'));
        assert!(!ops.contains(b'*'));
        assert!(!ops.contains(0xFF));
    }

    #[test]
    fn test_space_and_digits() {
        assert!(is_space_char(b'\t'));
        assert!(is_space_char(b'\r'));
        assert!(!is_space_char(b'x'));
        assert!(is_digit_in_base(b'f', 16));
        assert!(!is_digit_in_base(b'8', 8));
        assert!(is_operator(b'{'));
        assert!(!is_operator(b'#'));
    }
}
