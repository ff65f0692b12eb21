#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use genjson::{Document, DocumentConfig, Error, NumberKind, ValueHandle, ValueType};

/// A document whose faults are collected instead of panicking.
pub fn quiet_doc(capacity: u32) -> (Document, Rc<RefCell<Vec<Error>>>) {
    let mut doc = Document::with_config(DocumentConfig::new().with_max_value_count(capacity));
    let faults = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&faults);
    doc.set_failure_hook(move |error| sink.borrow_mut().push(error.clone()));
    (doc, faults)
}

/// Convert a stored value into a `serde_json::Value` for structural
/// comparison in tests.
pub fn to_serde(doc: &Document, value: ValueHandle) -> serde_json::Value {
    match doc.value_type(value).expect("live value") {
        ValueType::Null => serde_json::Value::Null,
        ValueType::Bool => serde_json::Value::Bool(doc.get_bool(value)),
        ValueType::String => serde_json::Value::String(doc.get_string(value).to_string()),
        ValueType::Number => match doc.number_kind(value).expect("number value") {
            NumberKind::Int => serde_json::Value::from(i64::from(doc.get_int(value))),
            NumberKind::U64 => serde_json::Value::from(doc.get_u64(value)),
            NumberKind::Float => serde_json::Value::from(f64::from(doc.get_float(value))),
        },
        ValueType::Array => {
            let items = (0..doc.element_count(value))
                .map(|i| to_serde(doc, doc.element(value, i)))
                .collect();
            serde_json::Value::Array(items)
        }
        ValueType::Object => {
            let mut map = serde_json::Map::new();
            for (key, member) in doc.members(value) {
                map.insert(key.to_string(), to_serde(doc, member));
            }
            serde_json::Value::Object(map)
        }
    }
}
