//! Use-after-free detection and slot reuse behavior across the public API.

mod common;

use common::quiet_doc;
use genjson::{Error, SerializeOptions, ValueType};
use rstest::rstest;

#[rstest]
fn freed_handles_fail_every_operation_with_safe_defaults() {
    let (mut doc, faults) = quiet_doc(16);

    let value = doc.new_string("gone soon");
    doc.delete_value(value);

    assert!(!doc.is_live(value));
    assert_eq!(doc.value_type(value), None);
    assert_eq!(doc.get_int(value), 0);
    assert_eq!(doc.get_u64(value), 0);
    assert_eq!(doc.get_float(value), 0.0);
    assert!(!doc.get_bool(value));
    assert_eq!(doc.get_string(value), "");
    assert_eq!(doc.element_count(value), 0);
    assert_eq!(doc.member_count(value), 0);
    assert!(doc.deep_copy(value).is_invalid());

    for fault in faults.borrow().iter() {
        assert!(
            matches!(fault, Error::StaleHandle { .. }),
            "expected a stale-handle report, got {fault}"
        );
    }
    assert_eq!(faults.borrow().len(), 9);
}

#[rstest]
fn slot_reuse_is_lowest_index_first_with_newer_generation() {
    let (mut doc, _) = quiet_doc(16);

    let handles: Vec<_> = (0..5).map(|i| doc.new_int(i)).collect();

    // Free slots 1 and 3; reallocation must fill 1 first, then 3.
    doc.delete_value(handles[1]);
    doc.delete_value(handles[3]);

    let first = doc.new_int(100);
    assert_eq!(first.index(), handles[1].index());
    assert!(first.generation() > handles[1].generation());

    let second = doc.new_int(101);
    assert_eq!(second.index(), handles[3].index());
    assert!(second.generation() > handles[3].generation());

    // Untouched neighbors are unaffected.
    assert_eq!(doc.get_int(handles[0]), 0);
    assert_eq!(doc.get_int(handles[2]), 2);
    assert_eq!(doc.get_int(handles[4]), 4);
}

#[rstest]
fn generation_distinguishes_old_and_new_occupant() {
    let (mut doc, faults) = quiet_doc(8);

    let old = doc.new_int(1);
    doc.delete_value(old);
    let new = doc.new_string("tenant");

    assert_eq!(new.index(), old.index());
    assert!(!doc.is_live(old));
    assert!(doc.is_live(new));

    // Reading through the old handle reports and defaults; the new occupant
    // is untouched.
    assert_eq!(doc.get_int(old), 0);
    assert!(matches!(faults.borrow()[0], Error::StaleHandle { .. }));
    assert_eq!(doc.get_string(new), "tenant");
}

#[rstest]
fn destroying_a_container_invalidates_the_whole_subtree() {
    let (mut doc, _) = quiet_doc(32);

    let root = doc.new_object();
    let list = doc.new_array();
    let leaf = doc.new_string("leaf");
    doc.push_element(list, leaf);
    doc.add_member(root, "list", list);

    doc.delete_value(root);

    assert!(!doc.is_live(root));
    assert!(!doc.is_live(list));
    assert!(!doc.is_live(leaf));

    let stats = doc.usage_stats();
    assert_eq!(stats.used_values, 0);
    assert_eq!(stats.used_array_elements, 0);
    assert_eq!(stats.used_object_members, 0);
}

#[rstest]
fn aliases_share_mutation_until_deep_copy() {
    let (mut doc, _) = quiet_doc(32);

    let value = doc.new_string("shared");
    let alias = value;
    doc.set_string(alias, "rewritten");
    assert_eq!(doc.get_string(value), "rewritten");

    let independent = doc.deep_copy(value);
    doc.set_string(independent, "diverged");
    assert_eq!(doc.get_string(value), "rewritten");
    assert_eq!(doc.get_string(independent), "diverged");
}

#[rstest]
fn stale_root_cannot_be_serialized() {
    let (mut doc, _) = quiet_doc(8);
    let value = doc.new_bool(true);
    doc.delete_value(value);

    let result = doc.serialize(value, &SerializeOptions::minified());
    assert!(matches!(result, Err(Error::StaleHandle { .. })));
}

#[rstest]
fn set_null_keeps_the_slot_alive() {
    let (mut doc, faults) = quiet_doc(8);
    let value = doc.new_int(5);

    doc.set_null(value);
    assert!(doc.is_live(value));
    assert_eq!(doc.value_type(value), Some(ValueType::Null));
    assert!(faults.borrow().is_empty());
}
