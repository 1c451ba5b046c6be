use super::types::{ArrayData, JsObjectData};
use crate::error::{RuntimeError, RuntimeResult};
use crate::types::{ArrayId, JsValue, ObjectId};
use log::trace;

struct Slot<T> {
    generation: u32,
    data: Option<T>,
}

/// Slot arena with a free list. Released slots bump their generation so
/// that handles minted before the release stop resolving.
pub(crate) struct Arena<T> {
    kind: &'static str,
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    live: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new(kind: &'static str) -> Self {
        Self {
            kind,
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
        }
    }

    pub(crate) fn allocate(&mut self, data: T) -> (usize, u32) {
        self.live += 1;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index];
            slot.data = Some(data);
            trace!("reuse {} slot #{index} gen {}", self.kind, slot.generation);
            (index, slot.generation)
        } else {
            let index = self.slots.len();
            self.slots.push(Slot {
                generation: 0,
                data: Some(data),
            });
            trace!("new {} slot #{index}", self.kind);
            (index, 0)
        }
    }

    fn stale(&self, index: usize) -> RuntimeError {
        RuntimeError::StaleHandle {
            kind: self.kind,
            index,
        }
    }

    pub(crate) fn get(&self, index: usize, generation: u32) -> RuntimeResult<&T> {
        match self.slots.get(index) {
            Some(Slot {
                generation: g,
                data: Some(data),
            }) if *g == generation => Ok(data),
            _ => Err(self.stale(index)),
        }
    }

    pub(crate) fn get_mut(&mut self, index: usize, generation: u32) -> RuntimeResult<&mut T> {
        let kind = self.kind;
        match self.slots.get_mut(index) {
            Some(Slot {
                generation: g,
                data: Some(data),
            }) if *g == generation => Ok(data),
            _ => Err(RuntimeError::StaleHandle { kind, index }),
        }
    }

    pub(crate) fn release(&mut self, index: usize, generation: u32) -> RuntimeResult<T> {
        self.get(index, generation)?;
        let slot = &mut self.slots[index];
        let data = slot.data.take().ok_or(RuntimeError::StaleHandle {
            kind: self.kind,
            index,
        })?;
        // a slot whose generation is exhausted is retired, never reused
        match slot.generation.checked_add(1) {
            Some(next) => {
                slot.generation = next;
                self.free_list.push(index);
            }
            None => trace!("retire {} slot #{index}", self.kind),
        }
        self.live -= 1;
        Ok(data)
    }

    pub(crate) fn live(&self) -> usize {
        self.live
    }
}

/// Storage for every object and array the runtime hands out.
pub struct Heap {
    objects: Arena<JsObjectData>,
    arrays: Arena<ArrayData>,
}

impl Heap {
    pub(crate) fn new() -> Self {
        Self {
            objects: Arena::new("object"),
            arrays: Arena::new("array"),
        }
    }

    /// Allocates an object linked to `prototype`. The link is non-owning;
    /// the prototype only records that it has one more delegator.
    pub(crate) fn allocate_object(&mut self, prototype: Option<ObjectId>) -> RuntimeResult<ObjectId> {
        if let Some(proto) = prototype {
            self.object_mut(proto)?.delegators += 1;
        }
        let (index, generation) = self.objects.allocate(JsObjectData::new(prototype));
        Ok(ObjectId { index, generation })
    }

    pub fn object(&self, id: ObjectId) -> RuntimeResult<&JsObjectData> {
        self.objects.get(id.index, id.generation)
    }

    pub(crate) fn object_mut(&mut self, id: ObjectId) -> RuntimeResult<&mut JsObjectData> {
        self.objects.get_mut(id.index, id.generation)
    }

    /// Releases the object's own storage. Refused while other objects still
    /// delegate to it, so a prototype always outlives its delegators.
    pub(crate) fn release_object(&mut self, id: ObjectId) -> RuntimeResult<()> {
        let delegators = self.object(id)?.delegators;
        if delegators > 0 {
            return Err(RuntimeError::PrototypeInUse {
                index: id.index,
                delegators,
            });
        }
        let data = self.objects.release(id.index, id.generation)?;
        if let Some(proto) = data.prototype {
            let proto = self.object_mut(proto)?;
            proto.delegators -= 1;
        }
        Ok(())
    }

    pub(crate) fn allocate_array(&mut self, elements: Vec<JsValue>) -> ArrayId {
        let (index, generation) = self.arrays.allocate(ArrayData { elements });
        ArrayId { index, generation }
    }

    pub fn array(&self, id: ArrayId) -> RuntimeResult<&ArrayData> {
        self.arrays.get(id.index, id.generation)
    }

    pub(crate) fn array_mut(&mut self, id: ArrayId) -> RuntimeResult<&mut ArrayData> {
        self.arrays.get_mut(id.index, id.generation)
    }

    pub(crate) fn release_array(&mut self, id: ArrayId) -> RuntimeResult<()> {
        self.arrays.release(id.index, id.generation).map(drop)
    }

    pub fn live_objects(&self) -> usize {
        self.objects.live()
    }

    pub fn live_arrays(&self) -> usize {
        self.arrays.live()
    }

    pub fn is_live(&self, id: ObjectId) -> bool {
        self.object(id).is_ok()
    }

    pub fn is_array_live(&self, id: ArrayId) -> bool {
        self.array(id).is_ok()
    }
}
