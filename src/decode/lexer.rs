//! Stage one of the parse pipeline: classify the input into a flat symbol
//! stream. Symbols borrow spans of the input; string spans keep their escape
//! sequences, which are decoded later while building the AST.

use memchr::memchr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SymbolKind {
    OpenBrace,
    CloseBrace,
    Comma,
    Colon,
    OpenBracket,
    CloseBracket,
    Str,
    Float,
    Int,
    U64,
    Bool,
    Null,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Symbol {
    pub kind: SymbolKind,
    pub start: u32,
    pub len: u32,
}

impl Symbol {
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start as usize..(self.start + self.len) as usize]
    }

    pub fn offset(&self) -> usize {
        self.start as usize
    }
}

/// Scan the whole input. Worst case is one symbol per byte, so the symbol
/// vector is sized to the input up front and never reallocates.
pub(crate) fn lex(input: &str) -> Result<Vec<Symbol>> {
    let bytes = input.as_bytes();
    let mut symbols = Vec::with_capacity(bytes.len());
    let mut pos = 0usize;

    while pos < bytes.len() {
        let punct = |kind| Symbol {
            kind,
            start: pos as u32,
            len: 1,
        };
        match bytes[pos] {
            b' ' | b'\t' | b'\r' | b'\n' => pos += 1,
            b'{' => {
                symbols.push(punct(SymbolKind::OpenBrace));
                pos += 1;
            }
            b'}' => {
                symbols.push(punct(SymbolKind::CloseBrace));
                pos += 1;
            }
            b',' => {
                symbols.push(punct(SymbolKind::Comma));
                pos += 1;
            }
            b':' => {
                symbols.push(punct(SymbolKind::Colon));
                pos += 1;
            }
            b'[' => {
                symbols.push(punct(SymbolKind::OpenBracket));
                pos += 1;
            }
            b']' => {
                symbols.push(punct(SymbolKind::CloseBracket));
                pos += 1;
            }
            b'"' => {
                let symbol = lex_string(bytes, pos)?;
                pos = (symbol.start + symbol.len) as usize + 1;
                symbols.push(symbol);
            }
            b'-' | b'0'..=b'9' => {
                let symbol = lex_number(input, pos)?;
                pos += symbol.len as usize;
                symbols.push(symbol);
            }
            b't' | b'f' => {
                let len: u32 = if input[pos..].starts_with("true") {
                    4
                } else if input[pos..].starts_with("false") {
                    5
                } else {
                    return Err(unrecognized(input, pos));
                };
                symbols.push(Symbol {
                    kind: SymbolKind::Bool,
                    start: pos as u32,
                    len,
                });
                pos += len as usize;
            }
            b'n' => {
                if !input[pos..].starts_with("null") {
                    return Err(unrecognized(input, pos));
                }
                symbols.push(Symbol {
                    kind: SymbolKind::Null,
                    start: pos as u32,
                    len: 4,
                });
                pos += 4;
            }
            _ => return Err(unrecognized(input, pos)),
        }
    }

    Ok(symbols)
}

/// Span between the quotes, escapes intact. The closing quote is the first
/// `"` preceded by an even run of backslashes.
fn lex_string(bytes: &[u8], open: usize) -> Result<Symbol> {
    let content = open + 1;
    let mut search = content;
    loop {
        let Some(found) = memchr(b'"', &bytes[search..]) else {
            return Err(Error::syntax(open, "unterminated string literal"));
        };
        let quote = search + found;

        let mut backslashes = 0;
        while quote - backslashes > content && bytes[quote - backslashes - 1] == b'\\' {
            backslashes += 1;
        }
        if backslashes % 2 == 0 {
            return Ok(Symbol {
                kind: SymbolKind::Str,
                start: content as u32,
                len: (quote - content) as u32,
            });
        }
        search = quote + 1;
    }
}

/// Scan a number span and classify it: a `.`, `e`, or `E` makes it a float;
/// otherwise it is a signed 32-bit integer if it fits, an unsigned 64-bit
/// integer if it fits, and out of range otherwise.
fn lex_number(input: &str, start: usize) -> Result<Symbol> {
    let bytes = input.as_bytes();
    let mut end = start;
    let mut floaty = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' | b'+' | b'-' => end += 1,
            b'.' | b'e' | b'E' => {
                floaty = true;
                end += 1;
            }
            _ => break,
        }
    }

    let text = &input[start..end];
    let len = (end - start) as u32;
    let kind = if floaty {
        SymbolKind::Float
    } else if text.parse::<i32>().is_ok() {
        SymbolKind::Int
    } else if text.parse::<u64>().is_ok() {
        SymbolKind::U64
    } else {
        return Err(Error::syntax(
            start,
            format!("number {text:?} does not fit a 32-bit int or 64-bit unsigned int"),
        ));
    };

    Ok(Symbol {
        kind,
        start: start as u32,
        len,
    })
}

fn unrecognized(input: &str, pos: usize) -> Error {
    let ch = input[pos..].chars().next().unwrap_or('\u{FFFD}');
    Error::syntax(pos, format!("unrecognized character {ch:?}"))
}
