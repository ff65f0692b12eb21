//! Value graph → text. One recursive emitter, two passes: a counting pass
//! computes the exact output size, then the write pass runs the identical
//! walk into a buffer pre-allocated to that size.

mod sink;

use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::arena::{Payload, ValueHandle};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::options::{Indent, SerializeMode, SerializeOptions};
use crate::pool::ListHandle;

use sink::{ByteCounter, ByteSink};

pub(crate) fn to_string(
    doc: &Document,
    value: ValueHandle,
    options: &SerializeOptions,
) -> Result<String> {
    let size = serialized_size(doc, value, options)?;
    let mut buffer = Vec::with_capacity(size);
    Emitter::new(doc, options, &mut buffer).value(value, 0)?;
    debug_assert_eq!(buffer.len(), size);
    Ok(String::from_utf8(buffer).expect("serializer output must be valid UTF-8"))
}

pub(crate) fn serialized_size(
    doc: &Document,
    value: ValueHandle,
    options: &SerializeOptions,
) -> Result<usize> {
    let mut counter = ByteCounter::default();
    Emitter::new(doc, options, &mut counter).value(value, 0)?;
    Ok(counter.len)
}

struct Emitter<'a, S> {
    doc: &'a Document,
    sink: &'a mut S,
    newline: &'static [u8],
    key_separator: &'static [u8],
    indent_byte: u8,
    indent_unit: usize,
    indent_cache: Vec<u8>,
}

impl<'a, S: ByteSink> Emitter<'a, S> {
    fn new(doc: &'a Document, options: &SerializeOptions, sink: &'a mut S) -> Self {
        let pretty = options.mode == SerializeMode::Pretty;
        let (indent_byte, indent_unit) = match (pretty, options.indent) {
            (false, _) => (b' ', 0),
            (true, Indent::Spaces(count)) => (b' ', count),
            (true, Indent::Tabs) => (b'\t', 1),
        };
        let newline: &'static [u8] = if pretty { options.newline.as_bytes() } else { b"" };
        let key_separator: &'static [u8] = if pretty { b" : " } else { b":" };
        Self {
            doc,
            sink,
            newline,
            key_separator,
            indent_byte,
            indent_unit,
            indent_cache: Vec::new(),
        }
    }

    fn value(&mut self, handle: ValueHandle, depth: usize) -> Result<()> {
        let slot = self
            .doc
            .values
            .get(handle)
            .ok_or(Error::stale("serializing a value"))?;
        match &slot.payload {
            Payload::Null => self.sink.put(b"null"),
            Payload::Bool(true) => self.sink.put(b"true"),
            Payload::Bool(false) => self.sink.put(b"false"),
            Payload::Int(value) => {
                let mut buf = itoa::Buffer::new();
                self.sink.put(buf.format(*value).as_bytes());
            }
            Payload::U64(value) => {
                let mut buf = itoa::Buffer::new();
                self.sink.put(buf.format(*value).as_bytes());
            }
            Payload::Float(value) => {
                // Fixed 18-digit fractional format; round-trips well within
                // 32-bit float precision.
                let text = format!("{value:.18}");
                self.sink.put(text.as_bytes());
            }
            Payload::Str(text) => self.string(text),
            Payload::Array(head) => return self.array(*head, depth),
            Payload::Object(head) => return self.object(*head, depth),
        }
        Ok(())
    }

    fn array(&mut self, head: ListHandle, depth: usize) -> Result<()> {
        self.sink.put_byte(b'[');
        if head.is_empty() {
            self.sink.put_byte(b']');
            return Ok(());
        }

        let elements: SmallVec<[ValueHandle; 16]> = self
            .doc
            .elements
            .iter(head)
            .map_err(|fault| self.doc.array_fault(fault, "serializing an array"))?
            .map(|node| node.value)
            .collect();

        self.sink.put(self.newline);
        let last = elements.len() - 1;
        for (i, element) in elements.into_iter().enumerate() {
            self.indent(depth + 1);
            self.value(element, depth + 1)?;
            if i != last {
                self.sink.put_byte(b',');
            }
            self.sink.put(self.newline);
        }
        self.indent(depth);
        self.sink.put_byte(b']');
        Ok(())
    }

    fn object(&mut self, head: ListHandle, depth: usize) -> Result<()> {
        let members: SmallVec<[(SmolStr, ValueHandle); 8]> = self
            .doc
            .members
            .iter(head)
            .map_err(|fault| self.doc.member_fault(fault, "serializing an object"))?
            .map(|member| (member.key.clone(), member.value))
            .collect();

        self.sink.put_byte(b'{');
        self.sink.put(self.newline);

        if !members.is_empty() {
            let last = members.len() - 1;
            for (i, (key, value)) in members.into_iter().enumerate() {
                self.indent(depth + 1);
                self.string(&key);
                self.sink.put(self.key_separator);
                self.value(value, depth + 1)?;
                if i != last {
                    self.sink.put_byte(b',');
                }
                self.sink.put(self.newline);
            }
        }

        self.indent(depth);
        self.sink.put_byte(b'}');
        Ok(())
    }

    /// Quoted, escaped string. The reserved characters each cost one extra
    /// byte; everything else is copied through in runs.
    fn string(&mut self, text: &str) {
        self.sink.put_byte(b'"');
        let bytes = text.as_bytes();
        let mut plain_start = 0;
        for (i, &byte) in bytes.iter().enumerate() {
            let code = match byte {
                b'"' => b'"',
                b'\\' => b'\\',
                b'/' => b'/',
                b'\n' => b'n',
                b'\r' => b'r',
                b'\t' => b't',
                0x08 => b'b',
                0x0c => b'f',
                _ => continue,
            };
            if plain_start < i {
                self.sink.put(&bytes[plain_start..i]);
            }
            self.sink.put(&[b'\\', code]);
            plain_start = i + 1;
        }
        if plain_start < bytes.len() {
            self.sink.put(&bytes[plain_start..]);
        }
        self.sink.put_byte(b'"');
    }

    fn indent(&mut self, depth: usize) {
        let total = depth * self.indent_unit;
        if total == 0 {
            return;
        }
        if self.indent_cache.len() < total {
            self.indent_cache.resize(total, self.indent_byte);
        }
        self.sink.put(&self.indent_cache[..total]);
    }
}
