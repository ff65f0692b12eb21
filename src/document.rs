//! The document: one value arena plus the two node pools, behind the
//! handle-based value API.
//!
//! All storage is allocated once at construction and sized by
//! [`DocumentConfig::max_value_count`]; nothing grows afterwards. Operations
//! that cannot fail usefully report faults through the document's failure
//! hook and return a documented safe default (zero, `false`, the empty
//! string, [`ValueHandle::INVALID`]), so a non-fatal hook lets callers keep
//! going without undefined behavior. The default hook logs and panics.

use std::cell::RefCell;

use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::arena::{Payload, ValueArena, ValueHandle, ValueSlot, ValueType};
use crate::error::{Error, Result};
use crate::hash::key_hash;
use crate::options::{DocumentConfig, SerializeOptions};
use crate::pool::{ListHandle, ListIter, NodePool, PoolFault, ELEMENT_END};

#[derive(Debug)]
pub(crate) struct ArrayNode {
    pub value: ValueHandle,
}

#[derive(Debug)]
pub(crate) struct MemberNode {
    pub key: SmolStr,
    pub key_hash: u32,
    pub value: ValueHandle,
}

/// Which of the three numeric representations a number value holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Int,
    U64,
    Float,
}

/// Pool occupancy snapshot, matching the three fixed allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageStats {
    pub used_values: u32,
    pub free_values: u32,
    pub used_array_elements: u32,
    pub free_array_elements: u32,
    pub used_object_members: u32,
    pub free_object_members: u32,
}

#[derive(Debug, Clone, Copy)]
enum NumberValue {
    Int(i32),
    U64(u64),
    Float(f32),
}

type FailureHook = Box<dyn FnMut(&Error)>;

fn default_failure_hook(error: &Error) {
    tracing::error!(%error, "genjson fault");
    panic!("genjson fault: {error}");
}

/// A self-contained JSON document store.
///
/// Handles issued by one document are meaningless in another. Dropping the
/// document releases the single backing allocation and every value with it.
pub struct Document {
    pub(crate) values: ValueArena,
    pub(crate) elements: NodePool<ArrayNode>,
    pub(crate) members: NodePool<MemberNode>,
    failure_hook: RefCell<FailureHook>,
    config: DocumentConfig,
}

impl Document {
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    pub fn with_config(config: DocumentConfig) -> Self {
        let capacity = config.max_value_count;
        Self {
            values: ValueArena::new(capacity),
            elements: NodePool::new(capacity),
            members: NodePool::new(capacity),
            failure_hook: RefCell::new(Box::new(default_failure_hook)),
            config,
        }
    }

    pub fn config(&self) -> DocumentConfig {
        self.config
    }

    /// Replace the failure callback. The default logs through `tracing` and
    /// panics; tests and fault-tolerant callers install a collector instead.
    pub fn set_failure_hook(&mut self, hook: impl FnMut(&Error) + 'static) {
        *self.failure_hook.borrow_mut() = Box::new(hook);
    }

    //
    // Constructors
    //

    pub fn new_null(&mut self) -> ValueHandle {
        self.constructed(Payload::Null)
    }

    pub fn new_bool(&mut self, value: bool) -> ValueHandle {
        self.constructed(Payload::Bool(value))
    }

    pub fn new_int(&mut self, value: i32) -> ValueHandle {
        self.constructed(Payload::Int(value))
    }

    pub fn new_u64(&mut self, value: u64) -> ValueHandle {
        self.constructed(Payload::U64(value))
    }

    pub fn new_float(&mut self, value: f32) -> ValueHandle {
        self.constructed(Payload::Float(value))
    }

    pub fn new_string(&mut self, value: &str) -> ValueHandle {
        self.constructed(Payload::Str(value.to_string()))
    }

    pub fn new_array(&mut self) -> ValueHandle {
        self.constructed(Payload::Array(ListHandle::EMPTY))
    }

    pub fn new_object(&mut self) -> ValueHandle {
        self.constructed(Payload::Object(ListHandle::EMPTY))
    }

    //
    // Accessors
    //

    /// Whether the handle still refers to a live value.
    pub fn is_live(&self, value: ValueHandle) -> bool {
        self.values.get(value).is_some()
    }

    pub fn value_type(&self, value: ValueHandle) -> Option<ValueType> {
        match self.slot(value, "reading value type") {
            Ok(slot) => Some(slot.payload.value_type()),
            Err(error) => self.reported(error, None),
        }
    }

    /// The numeric subtype, or `None` (with a fault report) for anything
    /// that is not a live number.
    pub fn number_kind(&self, value: ValueHandle) -> Option<NumberKind> {
        match self.number_value(value, "reading number kind") {
            Ok(NumberValue::Int(_)) => Some(NumberKind::Int),
            Ok(NumberValue::U64(_)) => Some(NumberKind::U64),
            Ok(NumberValue::Float(_)) => Some(NumberKind::Float),
            Err(error) => self.reported(error, None),
        }
    }

    pub fn get_int(&self, value: ValueHandle) -> i32 {
        match self.number_value(value, "reading an int") {
            Ok(NumberValue::Int(i)) => i,
            Ok(NumberValue::U64(u)) => u as i32,
            Ok(NumberValue::Float(f)) => f as i32,
            Err(error) => self.reported(error, 0),
        }
    }

    pub fn get_u64(&self, value: ValueHandle) -> u64 {
        match self.number_value(value, "reading a u64") {
            Ok(NumberValue::Int(i)) => i as u64,
            Ok(NumberValue::U64(u)) => u,
            Ok(NumberValue::Float(f)) => f as u64,
            Err(error) => self.reported(error, 0),
        }
    }

    pub fn get_float(&self, value: ValueHandle) -> f32 {
        match self.number_value(value, "reading a float") {
            Ok(NumberValue::Int(i)) => i as f32,
            Ok(NumberValue::U64(u)) => u as f32,
            Ok(NumberValue::Float(f)) => f,
            Err(error) => self.reported(error, 0.0),
        }
    }

    pub fn get_bool(&self, value: ValueHandle) -> bool {
        match self.slot(value, "reading a bool") {
            Ok(slot) => match slot.payload {
                Payload::Bool(b) => b,
                ref other => self.reported(
                    Error::TypeMismatch {
                        expected: ValueType::Bool,
                        found: other.value_type(),
                    },
                    false,
                ),
            },
            Err(error) => self.reported(error, false),
        }
    }

    /// The string payload, or `""` on any fault.
    pub fn get_string(&self, value: ValueHandle) -> &str {
        match self.slot(value, "reading a string") {
            Ok(slot) => match &slot.payload {
                Payload::Str(s) => s.as_str(),
                other => self.reported(
                    Error::TypeMismatch {
                        expected: ValueType::String,
                        found: other.value_type(),
                    },
                    "",
                ),
            },
            Err(error) => self.reported(error, ""),
        }
    }

    //
    // Mutators. Each first frees any composite payload the slot owned; the
    // slot generation is untouched, so existing aliases stay valid.
    //

    pub fn set_int(&mut self, value: ValueHandle, new: i32) {
        self.set_payload(value, Payload::Int(new));
    }

    pub fn set_u64(&mut self, value: ValueHandle, new: u64) {
        self.set_payload(value, Payload::U64(new));
    }

    pub fn set_float(&mut self, value: ValueHandle, new: f32) {
        self.set_payload(value, Payload::Float(new));
    }

    pub fn set_bool(&mut self, value: ValueHandle, new: bool) {
        self.set_payload(value, Payload::Bool(new));
    }

    pub fn set_string(&mut self, value: ValueHandle, new: &str) {
        self.set_payload(value, Payload::Str(new.to_string()));
    }

    pub fn set_null(&mut self, value: ValueHandle) {
        self.set_payload(value, Payload::Null);
    }

    /// Recursively free the subtree rooted at `value`, then the slot itself.
    /// Every handle to anything in the subtree becomes stale. A handle that
    /// is already dead is ignored.
    pub fn delete_value(&mut self, value: ValueHandle) {
        self.free_value(value);
    }

    //
    // Array operations
    //

    pub fn element_count(&self, array: ValueHandle) -> u32 {
        match self.try_element_count(array) {
            Ok(count) => count,
            Err(error) => self.reported(error, 0),
        }
    }

    /// Element at `index`; silently `INVALID` past the end.
    pub fn element(&self, array: ValueHandle, index: u32) -> ValueHandle {
        match self.try_element(array, index) {
            Ok(handle) => handle,
            Err(error) => self.reported(error, ValueHandle::INVALID),
        }
    }

    /// Insert `value` at `at`; [`ELEMENT_END`] (or any index past the end)
    /// appends, `0` prepends.
    pub fn insert_element(&mut self, array: ValueHandle, value: ValueHandle, at: u32) {
        if let Err(error) = self.try_insert_element(array, value, at) {
            self.report(error);
        }
    }

    pub fn push_element(&mut self, array: ValueHandle, value: ValueHandle) {
        self.insert_element(array, value, ELEMENT_END);
    }

    /// Remove the element at `index`, freeing its value subtree.
    pub fn remove_element(&mut self, array: ValueHandle, index: u32) {
        if let Err(error) = self.try_remove_element(array, index) {
            self.report(error);
        }
    }

    /// Free every element and its value; the array stays usable and empty.
    pub fn clear_array(&mut self, array: ValueHandle) {
        if let Err(error) = self.try_clear_array(array) {
            self.report(error);
        }
    }

    //
    // Object operations
    //

    pub fn member_count(&self, object: ValueHandle) -> u32 {
        match self.try_member_count(object) {
            Ok(count) => count,
            Err(error) => self.reported(error, 0),
        }
    }

    pub fn member(&self, object: ValueHandle, key: &str) -> ValueHandle {
        self.member_by_hash(object, key_hash(key))
    }

    /// Lookup compares key hashes only; colliding keys are indistinguishable.
    pub fn member_by_hash(&self, object: ValueHandle, hash: u32) -> ValueHandle {
        match self.try_member_by_hash(object, hash) {
            Ok(handle) => handle,
            Err(error) => self.reported(error, ValueHandle::INVALID),
        }
    }

    pub fn has_member(&self, object: ValueHandle, key: &str) -> bool {
        self.has_member_hash(object, key_hash(key))
    }

    pub fn has_member_hash(&self, object: ValueHandle, hash: u32) -> bool {
        match self.try_find_member(object, hash, "testing for object member") {
            Ok(found) => found.is_some(),
            Err(error) => self.reported(error, false),
        }
    }

    /// Append a member. The key is copied and hashed; an existing member with
    /// the same hash is not replaced — lookups will find the first match.
    pub fn add_member(&mut self, object: ValueHandle, key: &str, value: ValueHandle) {
        if let Err(error) = self.try_add_member(object, SmolStr::new(key), key_hash(key), value) {
            self.report(error);
        }
    }

    /// Remove the first member whose key hash matches, freeing its value
    /// subtree and key.
    pub fn remove_member(&mut self, object: ValueHandle, key: &str) {
        self.remove_member_by_hash(object, key_hash(key));
    }

    pub fn remove_member_by_hash(&mut self, object: ValueHandle, hash: u32) {
        if let Err(error) = self.try_remove_member_by_hash(object, hash) {
            self.report(error);
        }
    }

    /// Free every member and its value; the object stays usable and empty.
    pub fn clear_object(&mut self, object: ValueHandle) {
        if let Err(error) = self.try_clear_object(object) {
            self.report(error);
        }
    }

    /// Iterate members in insertion order as `(key, value)` pairs. A stale
    /// or non-object handle reports a fault and yields nothing.
    pub fn members(&self, object: ValueHandle) -> Members<'_> {
        match self
            .object_head(object, "iterating object members")
            .and_then(|head| {
                self.members
                    .iter(head)
                    .map_err(|fault| self.member_fault(fault, "iterating object members"))
            }) {
            Ok(inner) => Members { inner: Some(inner) },
            Err(error) => self.reported(error, Members { inner: None }),
        }
    }

    //
    // Structural operations
    //

    /// Structural copy of the whole subtree. This is the only way to break
    /// handle aliasing. Member key hashes are copied, not recomputed.
    pub fn deep_copy(&mut self, value: ValueHandle) -> ValueHandle {
        match self.try_deep_copy(value) {
            Ok(handle) => handle,
            Err(error) => self.reported(error, ValueHandle::INVALID),
        }
    }

    pub fn usage_stats(&self) -> UsageStats {
        let used_values = self.values.live_count();
        let free_array_elements = self.elements.free_count();
        let free_object_members = self.members.free_count();
        UsageStats {
            used_values,
            free_values: self.values.capacity() - used_values,
            used_array_elements: self.elements.capacity() - free_array_elements,
            free_array_elements,
            used_object_members: self.members.capacity() - free_object_members,
            free_object_members,
        }
    }

    /// Parse a JSON text into the document and return the root value.
    pub fn parse(&mut self, input: &str) -> Result<ValueHandle> {
        crate::decode::parse_into(self, input)
    }

    /// Serialize `value` with the given options.
    pub fn serialize(&self, value: ValueHandle, options: &SerializeOptions) -> Result<String> {
        crate::encode::to_string(self, value, options)
    }

    /// Exact byte length [`serialize`](Self::serialize) would produce.
    pub fn serialized_size(&self, value: ValueHandle, options: &SerializeOptions) -> Result<usize> {
        crate::encode::serialized_size(self, value, options)
    }

    //
    // Fault plumbing
    //

    pub(crate) fn report(&self, error: Error) {
        (self.failure_hook.borrow_mut())(&error);
    }

    fn reported<T>(&self, error: Error, default: T) -> T {
        self.report(error);
        default
    }

    //
    // Internal: arena access
    //

    pub(crate) fn alloc(&mut self, payload: Payload) -> Result<ValueHandle> {
        let Some((index, generation)) = self.values.allocate() else {
            return Err(Error::ArenaFull {
                capacity: self.values.capacity(),
            });
        };
        let handle = ValueHandle { index, generation };
        if let Some(slot) = self.values.get_mut(handle) {
            slot.payload = payload;
        }
        Ok(handle)
    }

    fn constructed(&mut self, payload: Payload) -> ValueHandle {
        match self.alloc(payload) {
            Ok(handle) => handle,
            Err(error) => self.reported(error, ValueHandle::INVALID),
        }
    }

    fn slot(&self, value: ValueHandle, context: &'static str) -> Result<&ValueSlot> {
        self.values.get(value).ok_or(Error::stale(context))
    }

    fn number_value(&self, value: ValueHandle, context: &'static str) -> Result<NumberValue> {
        let slot = self.slot(value, context)?;
        match slot.payload {
            Payload::Int(i) => Ok(NumberValue::Int(i)),
            Payload::U64(u) => Ok(NumberValue::U64(u)),
            Payload::Float(f) => Ok(NumberValue::Float(f)),
            ref other => Err(Error::TypeMismatch {
                expected: ValueType::Number,
                found: other.value_type(),
            }),
        }
    }

    pub(crate) fn array_head(
        &self,
        value: ValueHandle,
        context: &'static str,
    ) -> Result<ListHandle> {
        let slot = self.slot(value, context)?;
        match slot.payload {
            Payload::Array(head) => Ok(head),
            ref other => Err(Error::TypeMismatch {
                expected: ValueType::Array,
                found: other.value_type(),
            }),
        }
    }

    pub(crate) fn object_head(
        &self,
        value: ValueHandle,
        context: &'static str,
    ) -> Result<ListHandle> {
        let slot = self.slot(value, context)?;
        match slot.payload {
            Payload::Object(head) => Ok(head),
            ref other => Err(Error::TypeMismatch {
                expected: ValueType::Object,
                found: other.value_type(),
            }),
        }
    }

    fn store_array_head(&mut self, value: ValueHandle, head: ListHandle) {
        if let Some(slot) = self.values.get_mut(value) {
            slot.payload = Payload::Array(head);
        }
    }

    fn store_object_head(&mut self, value: ValueHandle, head: ListHandle) {
        if let Some(slot) = self.values.get_mut(value) {
            slot.payload = Payload::Object(head);
        }
    }

    pub(crate) fn array_fault(&self, fault: PoolFault, context: &'static str) -> Error {
        match fault {
            PoolFault::Exhausted => Error::ArrayPoolFull {
                capacity: self.elements.capacity(),
            },
            PoolFault::StaleHandle => Error::stale(context),
            PoolFault::NotFound | PoolFault::Corrupt => Error::Corrupt("array list links"),
        }
    }

    pub(crate) fn member_fault(&self, fault: PoolFault, context: &'static str) -> Error {
        match fault {
            PoolFault::Exhausted => Error::MemberPoolFull {
                capacity: self.members.capacity(),
            },
            PoolFault::StaleHandle => Error::stale(context),
            PoolFault::NotFound | PoolFault::Corrupt => Error::Corrupt("member list links"),
        }
    }

    //
    // Internal: recursive free
    //

    fn set_payload(&mut self, value: ValueHandle, payload: Payload) {
        if self.values.get(value).is_none() {
            return self.report(Error::stale("overwriting a value"));
        }
        self.free_owned_data(value);
        if let Some(slot) = self.values.get_mut(value) {
            slot.payload = payload;
        }
    }

    /// Free whatever composite data the slot owns, leaving it `Null`. The
    /// slot itself stays allocated and its generation is unchanged.
    fn free_owned_data(&mut self, value: ValueHandle) {
        let Some(slot) = self.values.get_mut(value) else {
            return;
        };
        match std::mem::replace(&mut slot.payload, Payload::Null) {
            Payload::Array(head) => self.free_element_list(head),
            Payload::Object(head) => self.free_member_list(head),
            // Scalars and strings drop here.
            _ => {}
        }
    }

    fn free_value(&mut self, value: ValueHandle) {
        if self.values.get(value).is_none() {
            return;
        }
        self.free_owned_data(value);
        self.values.free(value.index);
    }

    fn free_element_list(&mut self, head: ListHandle) {
        let children: SmallVec<[ValueHandle; 16]> = match self.elements.iter(head) {
            Ok(iter) => iter.map(|node| node.value).collect(),
            // Stale head: the nodes were already reclaimed elsewhere.
            Err(_) => return,
        };
        self.elements.release_list(head);
        for child in children {
            self.free_value(child);
        }
    }

    fn free_member_list(&mut self, head: ListHandle) {
        let children: SmallVec<[ValueHandle; 16]> = match self.members.iter(head) {
            Ok(iter) => iter.map(|node| node.value).collect(),
            Err(_) => return,
        };
        self.members.release_list(head);
        for child in children {
            self.free_value(child);
        }
    }

    //
    // Internal: fallible op bodies
    //

    fn try_element_count(&self, array: ValueHandle) -> Result<u32> {
        let head = self.array_head(array, "counting array elements")?;
        self.elements
            .count(head)
            .map_err(|fault| self.array_fault(fault, "counting array elements"))
    }

    fn try_element(&self, array: ValueHandle, index: u32) -> Result<ValueHandle> {
        let head = self.array_head(array, "reading array element")?;
        let node = self
            .elements
            .get_at(head, index)
            .map_err(|fault| self.array_fault(fault, "reading array element"))?;
        Ok(node.map(|n| n.value).unwrap_or(ValueHandle::INVALID))
    }

    pub(crate) fn try_insert_element(
        &mut self,
        array: ValueHandle,
        value: ValueHandle,
        at: u32,
    ) -> Result<()> {
        let mut head = self.array_head(array, "inserting array element")?;
        self.elements
            .allocate_at(&mut head, at, ArrayNode { value })
            .map_err(|fault| self.array_fault(fault, "inserting array element"))?;
        self.store_array_head(array, head);
        Ok(())
    }

    fn try_remove_element(&mut self, array: ValueHandle, index: u32) -> Result<()> {
        let mut head = self.array_head(array, "removing array element")?;
        let node = self.elements.remove_at(&mut head, index).map_err(|fault| {
            if fault == PoolFault::NotFound {
                Error::MissingElement { index }
            } else {
                self.array_fault(fault, "removing array element")
            }
        })?;
        self.store_array_head(array, head);
        self.free_value(node.value);
        Ok(())
    }

    fn try_clear_array(&mut self, array: ValueHandle) -> Result<()> {
        let head = self.array_head(array, "clearing array")?;
        self.free_element_list(head);
        self.store_array_head(array, ListHandle::EMPTY);
        Ok(())
    }

    fn try_member_count(&self, object: ValueHandle) -> Result<u32> {
        let head = self.object_head(object, "counting object members")?;
        self.members
            .count(head)
            .map_err(|fault| self.member_fault(fault, "counting object members"))
    }

    fn try_find_member(
        &self,
        object: ValueHandle,
        hash: u32,
        context: &'static str,
    ) -> Result<Option<&MemberNode>> {
        let head = self.object_head(object, context)?;
        self.members
            .find_where(head, |member| member.key_hash == hash)
            .map_err(|fault| self.member_fault(fault, context))
    }

    fn try_member_by_hash(&self, object: ValueHandle, hash: u32) -> Result<ValueHandle> {
        match self.try_find_member(object, hash, "looking up object member")? {
            Some(member) => Ok(member.value),
            None => Err(Error::MissingMember { key_hash: hash }),
        }
    }

    pub(crate) fn try_add_member(
        &mut self,
        object: ValueHandle,
        key: SmolStr,
        hash: u32,
        value: ValueHandle,
    ) -> Result<()> {
        let mut head = self.object_head(object, "adding object member")?;
        self.members
            .allocate_at(
                &mut head,
                ELEMENT_END,
                MemberNode {
                    key,
                    key_hash: hash,
                    value,
                },
            )
            .map_err(|fault| self.member_fault(fault, "adding object member"))?;
        self.store_object_head(object, head);
        Ok(())
    }

    fn try_remove_member_by_hash(&mut self, object: ValueHandle, hash: u32) -> Result<()> {
        let mut head = self.object_head(object, "removing object member")?;
        let node = self
            .members
            .remove_where(&mut head, |member| member.key_hash == hash)
            .map_err(|fault| {
                if fault == PoolFault::NotFound {
                    Error::MissingMember { key_hash: hash }
                } else {
                    self.member_fault(fault, "removing object member")
                }
            })?;
        self.store_object_head(object, head);
        self.free_value(node.value);
        Ok(())
    }

    fn try_clear_object(&mut self, object: ValueHandle) -> Result<()> {
        let head = self.object_head(object, "clearing object")?;
        self.free_member_list(head);
        self.store_object_head(object, ListHandle::EMPTY);
        Ok(())
    }

    fn try_deep_copy(&mut self, value: ValueHandle) -> Result<ValueHandle> {
        enum Source {
            Scalar(Payload),
            Array(ListHandle),
            Object(ListHandle),
        }

        let source = {
            let slot = self.slot(value, "deep copying")?;
            match &slot.payload {
                Payload::Array(head) => Source::Array(*head),
                Payload::Object(head) => Source::Object(*head),
                other => Source::Scalar(other.clone()),
            }
        };

        match source {
            Source::Scalar(payload) => self.alloc(payload),
            Source::Array(head) => {
                let children: SmallVec<[ValueHandle; 16]> = self
                    .elements
                    .iter(head)
                    .map_err(|fault| self.array_fault(fault, "deep copying array"))?
                    .map(|node| node.value)
                    .collect();
                let copy = self.alloc(Payload::Array(ListHandle::EMPTY))?;
                for child in children {
                    let child_copy = self.try_deep_copy(child)?;
                    self.try_insert_element(copy, child_copy, ELEMENT_END)?;
                }
                Ok(copy)
            }
            Source::Object(head) => {
                let members: Vec<(SmolStr, u32, ValueHandle)> = self
                    .members
                    .iter(head)
                    .map_err(|fault| self.member_fault(fault, "deep copying object"))?
                    .map(|member| (member.key.clone(), member.key_hash, member.value))
                    .collect();
                let copy = self.alloc(Payload::Object(ListHandle::EMPTY))?;
                for (key, hash, child) in members {
                    let child_copy = self.try_deep_copy(child)?;
                    self.try_add_member(copy, key, hash, child_copy)?;
                }
                Ok(copy)
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.usage_stats();
        f.debug_struct("Document")
            .field("capacity", &self.config.max_value_count)
            .field("used_values", &stats.used_values)
            .field("used_array_elements", &stats.used_array_elements)
            .field("used_object_members", &stats.used_object_members)
            .finish()
    }
}

/// Iterator over an object's members in insertion order.
pub struct Members<'a> {
    inner: Option<ListIter<'a, MemberNode>>,
}

impl<'a> Iterator for Members<'a> {
    type Item = (&'a str, ValueHandle);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.inner.as_mut()?.next()?;
        Some((node.key.as_str(), node.value))
    }
}
