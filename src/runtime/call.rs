use super::*;

impl Runtime {
    /// Invokes a function value with an explicit receiver.
    pub fn call_function(&mut self, func: &JsValue, this: &JsValue, args: &[JsValue]) -> RuntimeResult<JsValue> {
        let func = func.as_function()?.clone();
        self.invoke(&func, this, args)
    }

    pub fn invoke(&mut self, func: &JsFunction, this: &JsValue, args: &[JsValue]) -> RuntimeResult<JsValue> {
        if args.len() < func.arity() {
            return Err(RuntimeError::ArityMismatch {
                callee: func.name().to_string(),
                expected: func.arity(),
                supplied: args.len(),
            });
        }
        trace!("call {}({} args) this={}", func.name(), args.len(), this.tag());
        let target = func.target().clone();
        target(self, this, Args::new(args))
    }

    /// Looks `name` up on the receiver (own, then prototype) and calls it
    /// with the receiver as `this`.
    pub fn call_method(&mut self, receiver: &JsValue, name: &str, args: &[JsValue]) -> RuntimeResult<JsValue> {
        let obj = receiver.as_object()?;
        let method = self
            .get(obj, name)?
            .ok_or_else(|| RuntimeError::MissingProperty(name.to_string()))?;
        self.call_function(&method, receiver, args)
    }
}
