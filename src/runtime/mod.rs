use crate::config::Config;
use crate::error::{RuntimeError, RuntimeResult};
use crate::types::{ArrayId, JsValue, ObjectId};
use log::{debug, trace};
use rustc_hash::FxHashMap;
use std::io::{self, Write};

mod types;
pub use types::*;

mod helpers;
pub use helpers::{to_boolean, to_js_string, to_number};
mod heap;
pub use heap::Heap;
pub mod ops;
mod object;
mod call;
mod builtins;

/// Everything a lowered program runs against: the heap, the object
/// prototype every plain object delegates to, and the global bindings.
///
/// Construction order is object prototype, console, then the prelude
/// globals. [`Runtime::teardown`] releases them in reverse and leaves the
/// object prototype alive.
pub struct Runtime {
    heap: Heap,
    object_prototype: ObjectId,
    console: Option<ObjectId>,
    globals: FxHashMap<String, JsValue>,
    // handles allocated during bootstrap, released by teardown
    bootstrap_handles: Vec<JsValue>,
    out: Box<dyn Write>,
    config: Config,
}

impl Runtime {
    pub fn bootstrap(config: Config) -> RuntimeResult<Self> {
        Self::with_output(config, Box::new(io::stdout()))
    }

    /// Bootstraps with `out` standing in for standard output.
    pub fn with_output(config: Config, out: Box<dyn Write>) -> RuntimeResult<Self> {
        let mut heap = Heap::new();
        let object_prototype = heap.allocate_object(None)?;
        let mut rt = Self {
            heap,
            object_prototype,
            console: None,
            globals: FxHashMap::default(),
            bootstrap_handles: Vec::new(),
            out,
            config,
        };
        rt.setup_globals()?;
        debug!(
            "bootstrapped runtime: {} objects, {} globals",
            rt.heap.live_objects(),
            rt.globals.len()
        );
        Ok(rt)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn object_prototype(&self) -> ObjectId {
        self.object_prototype
    }

    pub fn console(&self) -> RuntimeResult<ObjectId> {
        self.console.ok_or(RuntimeError::NotBootstrapped)
    }

    pub fn global(&self, name: &str) -> Option<JsValue> {
        self.globals.get(name).cloned()
    }

    pub fn require_global(&self, name: &str) -> RuntimeResult<JsValue> {
        self.global(name)
            .ok_or_else(|| RuntimeError::MissingProperty(name.to_string()))
    }

    pub fn define_global(&mut self, name: &str, value: JsValue) {
        self.globals.insert(name.to_string(), value);
    }

    pub(crate) fn write_line(&mut self, line: &str) -> RuntimeResult<()> {
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    /// Runs the program entry once: no arguments, `this` undefined.
    pub fn run(&mut self, entry: &JsFunction) -> RuntimeResult<JsValue> {
        if self.console.is_none() {
            return Err(RuntimeError::NotBootstrapped);
        }
        debug!("running entry {}", entry.name());
        self.invoke(entry, &JsValue::Undefined, &[])
    }

    /// Releases the console and prelude globals. The object prototype stays
    /// live; calling this twice is a no-op.
    pub fn teardown(&mut self) -> RuntimeResult<()> {
        while let Some(handle) = self.bootstrap_handles.last().cloned() {
            match handle {
                JsValue::Object(id) if self.heap.is_live(id) => self.free_object(id)?,
                JsValue::Array(id) if self.heap.is_array_live(id) => self.free_array(id)?,
                _ => trace!("teardown skips released {:?}", handle),
            }
            self.bootstrap_handles.pop();
            self.forget_globals_bound_to(&handle);
        }
        self.console = None;
        self.globals.clear();
        self.out.flush()?;
        debug!(
            "teardown complete: {} objects, {} arrays still live",
            self.heap.live_objects(),
            self.heap.live_arrays()
        );
        Ok(())
    }

    fn forget_globals_bound_to(&mut self, handle: &JsValue) {
        self.globals.retain(|_, value| match (value, handle) {
            (JsValue::Object(a), JsValue::Object(b)) => a != b,
            (JsValue::Array(a), JsValue::Array(b)) => a != b,
            _ => true,
        });
        if matches!(handle, JsValue::Object(id) if self.console == Some(*id)) {
            self.console = None;
        }
    }
}

/// Bootstrap, run `entry`, tear down.
pub fn execute(config: Config, entry: &JsFunction) -> RuntimeResult<()> {
    execute_with_output(config, entry, Box::new(io::stdout()))
}

pub fn execute_with_output(config: Config, entry: &JsFunction, out: Box<dyn Write>) -> RuntimeResult<()> {
    let mut rt = Runtime::with_output(config, out)?;
    rt.run(entry)?;
    rt.teardown()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Output sink whose contents stay readable after the runtime owns it.
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    pub(crate) fn capturing_runtime(config: Config) -> (Runtime, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let rt = Runtime::with_output(config, Box::new(buffer.clone())).unwrap();
        (rt, buffer)
    }

    pub(crate) fn quiet_runtime() -> Runtime {
        Runtime::with_output(Config::default(), Box::new(io::sink())).unwrap()
    }
}
