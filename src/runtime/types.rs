use super::Runtime;
use crate::error::{RuntimeError, RuntimeResult};
use crate::types::{JsValue, ObjectId};
use rustc_hash::FxHashMap;
use std::rc::Rc;

pub type NativeFn = Rc<dyn Fn(&mut Runtime, &JsValue, Args<'_>) -> RuntimeResult<JsValue>>;

/// A callable value. `arity` is the number of leading positional arguments
/// the callee reads; calls supplying fewer are rejected before entry.
#[derive(Clone)]
pub struct JsFunction {
    name: String,
    arity: usize,
    f: NativeFn,
}

impl JsFunction {
    pub fn native(
        name: impl Into<String>,
        arity: usize,
        f: impl Fn(&mut Runtime, &JsValue, Args<'_>) -> RuntimeResult<JsValue> + 'static,
    ) -> Self {
        JsFunction {
            name: name.into(),
            arity,
            f: Rc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub(crate) fn target(&self) -> &NativeFn {
        &self.f
    }
}

impl std::fmt::Debug for JsFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JsFunction({:?}, {})", self.name, self.arity)
    }
}

/// Positional arguments of a call. Reads past the supplied count fail with
/// `MissingArgument` instead of producing a value.
#[derive(Clone, Copy, Debug)]
pub struct Args<'a> {
    values: &'a [JsValue],
}

impl<'a> Args<'a> {
    pub fn new(values: &'a [JsValue]) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> RuntimeResult<&'a JsValue> {
        self.values
            .get(index)
            .ok_or(RuntimeError::MissingArgument {
                index,
                supplied: self.values.len(),
            })
    }

    /// Binds the first `N` positionals in declaration order.
    pub fn params<const N: usize>(&self) -> RuntimeResult<[&'a JsValue; N]> {
        if self.values.len() < N {
            return Err(RuntimeError::MissingArgument {
                index: self.values.len(),
                supplied: self.values.len(),
            });
        }
        let values = self.values;
        Ok(std::array::from_fn(|i| &values[i]))
    }

    pub fn as_slice(&self) -> &'a [JsValue] {
        self.values
    }
}

#[derive(Debug, Default)]
pub struct JsObjectData {
    pub properties: FxHashMap<String, JsValue>,
    pub prototype: Option<ObjectId>,
    // objects whose prototype link points here
    pub(crate) delegators: usize,
}

impl JsObjectData {
    pub(crate) fn new(prototype: Option<ObjectId>) -> Self {
        Self {
            properties: FxHashMap::default(),
            prototype,
            delegators: 0,
        }
    }

    pub fn get_own(&self, key: &str) -> Option<&JsValue> {
        self.properties.get(key)
    }

    pub fn has_own_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn insert_value(&mut self, key: String, value: JsValue) {
        self.properties.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) -> Option<JsValue> {
        self.properties.remove(key)
    }

    pub fn delegators(&self) -> usize {
        self.delegators
    }
}

#[derive(Debug, Default)]
pub struct ArrayData {
    pub elements: Vec<JsValue>,
}
