use super::*;

impl Runtime {
    /// New empty object delegating to the realm's object prototype.
    pub fn create_object(&mut self) -> RuntimeResult<ObjectId> {
        self.create_object_with_proto(Some(self.object_prototype))
    }

    pub fn create_object_with_proto(&mut self, prototype: Option<ObjectId>) -> RuntimeResult<ObjectId> {
        let id = self.heap.allocate_object(prototype)?;
        trace!("create object #{} proto {:?}", id.index, prototype.map(|p| p.index));
        Ok(id)
    }

    /// Own entries first, then exactly one hop to the prototype's own
    /// entries. The prototype's own prototype is never consulted.
    pub fn get(&self, obj: ObjectId, key: &str) -> RuntimeResult<Option<JsValue>> {
        let data = self.heap.object(obj)?;
        if let Some(value) = data.get_own(key) {
            return Ok(Some(value.clone()));
        }
        match data.prototype {
            Some(proto) => Ok(self.heap.object(proto)?.get_own(key).cloned()),
            None => Ok(None),
        }
    }

    pub fn get_own(&self, obj: ObjectId, key: &str) -> RuntimeResult<Option<JsValue>> {
        Ok(self.heap.object(obj)?.get_own(key).cloned())
    }

    pub fn has_property(&self, obj: ObjectId, key: &str) -> RuntimeResult<bool> {
        Ok(self.get(obj, key)?.is_some())
    }

    /// Inserts or overwrites an own entry. The prototype is never written.
    pub fn set(&mut self, obj: ObjectId, key: &str, value: JsValue) -> RuntimeResult<()> {
        self.heap.object_mut(obj)?.insert_value(key.to_string(), value);
        Ok(())
    }

    pub fn delete(&mut self, obj: ObjectId, key: &str) -> RuntimeResult<bool> {
        Ok(self.heap.object_mut(obj)?.remove(key).is_some())
    }

    /// Own keys in sorted order.
    pub fn keys(&self, obj: ObjectId) -> RuntimeResult<Vec<String>> {
        let mut keys: Vec<String> = self.heap.object(obj)?.properties.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    pub fn prototype_of(&self, obj: ObjectId) -> RuntimeResult<Option<ObjectId>> {
        Ok(self.heap.object(obj)?.prototype)
    }

    /// Releases this object's own storage; its prototype is left alone.
    pub fn free_object(&mut self, obj: ObjectId) -> RuntimeResult<()> {
        self.heap.release_object(obj)?;
        debug!("freed object #{}", obj.index);
        Ok(())
    }

    pub fn create_array(&mut self, elements: Vec<JsValue>) -> ArrayId {
        let id = self.heap.allocate_array(elements);
        trace!("create array #{}", id.index);
        id
    }

    pub fn array_get(&self, arr: ArrayId, index: usize) -> RuntimeResult<Option<JsValue>> {
        Ok(self.heap.array(arr)?.elements.get(index).cloned())
    }

    /// Writes `index`, padding any gap with undefined.
    pub fn array_set(&mut self, arr: ArrayId, index: usize, value: JsValue) -> RuntimeResult<()> {
        let elements = &mut self.heap.array_mut(arr)?.elements;
        if index >= elements.len() {
            elements.resize(index + 1, JsValue::Undefined);
        }
        elements[index] = value;
        Ok(())
    }

    pub fn array_push(&mut self, arr: ArrayId, value: JsValue) -> RuntimeResult<usize> {
        let elements = &mut self.heap.array_mut(arr)?.elements;
        elements.push(value);
        Ok(elements.len())
    }

    pub fn array_len(&self, arr: ArrayId) -> RuntimeResult<usize> {
        Ok(self.heap.array(arr)?.elements.len())
    }

    pub fn free_array(&mut self, arr: ArrayId) -> RuntimeResult<()> {
        self.heap.release_array(arr)?;
        debug!("freed array #{}", arr.index);
        Ok(())
    }
}
