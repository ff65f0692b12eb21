//! Stage two of the parse pipeline: recursive descent over the symbol
//! stream into the AST arena. Any grammar violation unwinds immediately;
//! scratch the AST owns is reclaimed by `Drop`.

use smol_str::SmolStr;

use crate::decode::ast::{AstArena, AstKind, AST_TAIL};
use crate::decode::escape::unescape;
use crate::decode::lexer::{Symbol, SymbolKind};
use crate::error::{Error, Result};

pub(crate) struct Parser<'a> {
    input: &'a str,
    symbols: &'a [Symbol],
    read: usize,
    ast: &'a mut AstArena,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, symbols: &'a [Symbol], ast: &'a mut AstArena) -> Self {
        Self {
            input,
            symbols,
            read: 0,
            ast,
        }
    }

    /// Parse one value and return its AST node index.
    pub fn parse_value(&mut self) -> Result<u32> {
        let symbol = self.next("a value")?;
        match symbol.kind {
            SymbolKind::Int => {
                let value = symbol.text(self.input).parse::<i32>().map_err(|_| {
                    Error::syntax(symbol.offset(), "malformed 32-bit integer literal")
                })?;
                self.alloc(AstKind::Int(value), symbol)
            }
            SymbolKind::U64 => {
                let value = symbol.text(self.input).parse::<u64>().map_err(|_| {
                    Error::syntax(symbol.offset(), "malformed 64-bit unsigned literal")
                })?;
                self.alloc(AstKind::U64(value), symbol)
            }
            SymbolKind::Float => {
                let value = symbol
                    .text(self.input)
                    .parse::<f32>()
                    .map_err(|_| Error::syntax(symbol.offset(), "malformed number literal"))?;
                self.alloc(AstKind::Float(value), symbol)
            }
            SymbolKind::Bool => {
                let value = symbol.text(self.input) == "true";
                self.alloc(AstKind::Bool(value), symbol)
            }
            SymbolKind::Null => self.alloc(AstKind::Null, symbol),
            SymbolKind::Str => {
                let text = unescape(symbol.text(self.input), symbol.offset())?;
                self.alloc(AstKind::Str(text), symbol)
            }
            SymbolKind::OpenBrace => self.parse_object(symbol),
            SymbolKind::OpenBracket => self.parse_array(symbol),
            SymbolKind::CloseBrace | SymbolKind::CloseBracket | SymbolKind::Comma
            | SymbolKind::Colon => Err(self.unexpected(symbol, "a value")),
        }
    }

    /// Error unless every symbol was consumed.
    pub fn expect_end(&self) -> Result<()> {
        match self.symbols.get(self.read) {
            None => Ok(()),
            Some(symbol) => Err(Error::syntax(
                symbol.offset(),
                "unexpected content after the top-level value",
            )),
        }
    }

    fn parse_object(&mut self, open: Symbol) -> Result<u32> {
        let object = self.alloc(AstKind::Object { first: AST_TAIL }, open)?;

        if self.peek_kind() == Some(SymbolKind::CloseBrace) {
            self.read += 1;
            return Ok(object);
        }

        let first = self.parse_member()?;
        self.ast.set_first_child(object, first);

        let mut prev = first;
        while self.peek_kind() == Some(SymbolKind::Comma) {
            self.read += 1;
            let member = self.parse_member()?;
            self.ast.set_next(prev, member);
            prev = member;
        }

        self.expect(SymbolKind::CloseBrace, "'}' or ','")?;
        Ok(object)
    }

    fn parse_member(&mut self) -> Result<u32> {
        let key_symbol = self.next("a member key")?;
        if key_symbol.kind != SymbolKind::Str {
            return Err(self.unexpected(key_symbol, "a member key string"));
        }
        let key = unescape(key_symbol.text(self.input), key_symbol.offset())?;

        self.expect(SymbolKind::Colon, "':'")?;
        let value = self.parse_value()?;

        self.alloc(
            AstKind::Member {
                key: SmolStr::from(key),
                value,
            },
            key_symbol,
        )
    }

    fn parse_array(&mut self, open: Symbol) -> Result<u32> {
        let array = self.alloc(AstKind::Array { first: AST_TAIL }, open)?;

        if self.peek_kind() == Some(SymbolKind::CloseBracket) {
            self.read += 1;
            return Ok(array);
        }

        let first = self.parse_value()?;
        self.ast.set_first_child(array, first);

        let mut prev = first;
        while self.peek_kind() == Some(SymbolKind::Comma) {
            self.read += 1;
            let element = self.parse_value()?;
            self.ast.set_next(prev, element);
            prev = element;
        }

        self.expect(SymbolKind::CloseBracket, "']' or ','")?;
        Ok(array)
    }

    fn alloc(&mut self, kind: AstKind, at: Symbol) -> Result<u32> {
        self.ast
            .alloc(kind)
            .ok_or_else(|| Error::syntax(at.offset(), "parse tree exceeded its scratch arena"))
    }

    fn next(&mut self, wanted: &str) -> Result<Symbol> {
        match self.symbols.get(self.read).copied() {
            Some(symbol) => {
                self.read += 1;
                Ok(symbol)
            }
            None => Err(Error::syntax(
                self.input.len(),
                format!("unexpected end of input, expected {wanted}"),
            )),
        }
    }

    fn peek_kind(&self) -> Option<SymbolKind> {
        self.symbols.get(self.read).map(|s| s.kind)
    }

    fn expect(&mut self, kind: SymbolKind, wanted: &str) -> Result<()> {
        let symbol = self.next(wanted)?;
        if symbol.kind == kind {
            Ok(())
        } else {
            Err(self.unexpected(symbol, wanted))
        }
    }

    fn unexpected(&self, symbol: Symbol, wanted: &str) -> Error {
        Error::syntax(
            symbol.offset(),
            format!(
                "unexpected token {:?}, expected {wanted}",
                symbol.text(self.input)
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::lexer::lex;

    fn parse(input: &str) -> Result<(AstArena, u32)> {
        let symbols = lex(input)?;
        let mut ast = AstArena::new(symbols.len().max(1));
        let mut parser = Parser::new(input, &symbols, &mut ast);
        let root = parser.parse_value()?;
        parser.expect_end()?;
        Ok((ast, root))
    }

    #[rstest::rstest]
    fn test_scalars() {
        let (ast, root) = parse("42").unwrap();
        assert!(matches!(ast.get(root).kind, AstKind::Int(42)));

        let (ast, root) = parse("\"hi\\n\"").unwrap();
        assert!(matches!(&ast.get(root).kind, AstKind::Str(s) if s == "hi\n"));

        let (ast, root) = parse("null").unwrap();
        assert!(matches!(ast.get(root).kind, AstKind::Null));
    }

    #[rstest::rstest]
    fn test_nested_structure() {
        let (ast, root) = parse(r#"{"a":1,"b":[true,null]}"#).unwrap();
        let AstKind::Object { first } = ast.get(root).kind else {
            panic!("expected object root");
        };

        let AstKind::Member { key, value } = &ast.get(first).kind else {
            panic!("expected member");
        };
        assert_eq!(key.as_str(), "a");
        assert!(matches!(ast.get(*value).kind, AstKind::Int(1)));

        let second = ast.get(first).next;
        let AstKind::Member { key, value } = &ast.get(second).kind else {
            panic!("expected member");
        };
        assert_eq!(key.as_str(), "b");
        let AstKind::Array { first: elem } = ast.get(*value).kind else {
            panic!("expected array");
        };
        assert!(matches!(ast.get(elem).kind, AstKind::Bool(true)));
        let second_elem = ast.get(elem).next;
        assert!(matches!(ast.get(second_elem).kind, AstKind::Null));
        assert_eq!(ast.get(second_elem).next, AST_TAIL);
    }

    #[rstest::rstest]
    #[case("{", "unexpected end of input")]
    #[case("[1,]", "expected a value")]
    #[case("[,1]", "expected a value")]
    #[case("{\"a\" 1}", "expected ':'")]
    #[case("{\"a\":1,}", "expected a member key")]
    #[case("{1:2}", "expected a member key")]
    #[case("[1 2]", "expected ']' or ','")]
    #[case("1 2", "after the top-level value")]
    #[case("", "unexpected end of input")]
    fn test_malformed_inputs(#[case] input: &str, #[case] message: &str) {
        let err = parse(input).unwrap_err();
        assert!(
            err.to_string().contains(message),
            "error {err:?} should mention {message:?}"
        );
    }

    #[rstest::rstest]
    fn test_empty_containers() {
        let (ast, root) = parse("{}").unwrap();
        assert!(matches!(
            ast.get(root).kind,
            AstKind::Object { first: AST_TAIL }
        ));

        let (ast, root) = parse("[]").unwrap();
        assert!(matches!(
            ast.get(root).kind,
            AstKind::Array { first: AST_TAIL }
        ));
    }
}
