/// A byte cursor over HTML source.
///
/// Only ASCII delimiters are ever matched, so every position the lexer
/// slices at is a char boundary even when the input contains multi-byte
/// characters.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Peeks `n` bytes ahead of the current position.
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.s.as_bytes().get(self.i + n).copied()
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat)
    }

    /// Case-insensitive variant of [`Cursor::starts_with`] for ASCII patterns.
    pub fn starts_with_ignore_case(&self, pat: &[u8]) -> bool {
        let rest = &self.s.as_bytes()[self.i.min(self.s.len())..];
        rest.len() >= pat.len() && rest[..pat.len()].eq_ignore_ascii_case(pat)
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Advances while `pred` holds and returns the consumed slice.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let s = self.s;
        let start = self.i;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.i += 1;
        }
        &s[start..self.i]
    }

    pub fn skip_whitespace(&mut self) {
        self.eat_while(|b| b.is_ascii_whitespace());
    }

    /// Moves to the next occurrence of `pat` (case-insensitive), leaving the
    /// cursor on its first byte. Returns false and moves to EOF if absent.
    pub fn advance_to_ignore_case(&mut self, pat: &[u8]) -> bool {
        while !self.eof() {
            if self.starts_with_ignore_case(pat) {
                return true;
            }
            self.i += 1;
        }
        false
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.s[start..end]
    }
}
