//! Text → value-graph pipeline: lex the whole input into symbols, parse the
//! symbols into a scratch AST, then materialize the AST into the document's
//! permanent storage.
//!
//! Each stage finishes before the next begins, so scratch memory is bounded
//! by input size and the permanent arena never sees a half-parsed document.
//! On failure every scratch allocation drops before the error returns;
//! values materialized before a capacity failure are not unwound.

mod ast;
mod escape;
mod lexer;
mod parser;

use crate::arena::{Payload, ValueHandle};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::hash::key_hash;
use crate::pool::{ListHandle, ELEMENT_END};

use ast::{AstArena, AstKind, AST_TAIL};
use parser::Parser;

pub(crate) fn parse_into(doc: &mut Document, input: &str) -> Result<ValueHandle> {
    let symbols = lexer::lex(input)?;
    if symbols.is_empty() {
        return Err(Error::syntax(0, "expected a value"));
    }

    let mut ast = AstArena::new(symbols.len());
    let mut parser = Parser::new(input, &symbols, &mut ast);
    let root = parser.parse_value()?;
    parser.expect_end()?;

    materialize(doc, &mut ast, root)
}

/// Post-order commit of one AST node into the document. Scratch strings are
/// moved, not copied; container children are committed in source order.
fn materialize(doc: &mut Document, ast: &mut AstArena, index: u32) -> Result<ValueHandle> {
    match ast.take_kind(index) {
        AstKind::Null => doc.alloc(Payload::Null),
        AstKind::Bool(value) => doc.alloc(Payload::Bool(value)),
        AstKind::Int(value) => doc.alloc(Payload::Int(value)),
        AstKind::U64(value) => doc.alloc(Payload::U64(value)),
        AstKind::Float(value) => doc.alloc(Payload::Float(value)),
        AstKind::Str(value) => doc.alloc(Payload::Str(value)),
        AstKind::Array { first } => {
            let array = doc.alloc(Payload::Array(ListHandle::EMPTY))?;
            let mut at = first;
            while at != AST_TAIL {
                let next = ast.get(at).next;
                let element = materialize(doc, ast, at)?;
                doc.try_insert_element(array, element, ELEMENT_END)?;
                at = next;
            }
            Ok(array)
        }
        AstKind::Object { first } => {
            let object = doc.alloc(Payload::Object(ListHandle::EMPTY))?;
            let mut at = first;
            while at != AST_TAIL {
                let next = ast.get(at).next;
                let AstKind::Member { key, value } = ast.take_kind(at) else {
                    return Err(Error::Corrupt("object member list holds a non-member node"));
                };
                let member_value = materialize(doc, ast, value)?;
                let hash = key_hash(&key);
                doc.try_add_member(object, key, hash, member_value)?;
                at = next;
            }
            Ok(object)
        }
        AstKind::Member { .. } => Err(Error::Corrupt("member node outside an object")),
    }
}
