//! Programs lowered by hand into calls against the runtime, in the shape a
//! transpiler would emit them. Each one is a module entry taking no
//! arguments.

use crate::error::RuntimeResult;
use crate::runtime::{JsFunction, Runtime, ops};
use crate::types::JsValue;

pub struct Demo {
    pub name: &'static str,
    pub summary: &'static str,
    entry: fn() -> JsFunction,
}

impl Demo {
    pub fn entry(&self) -> JsFunction {
        (self.entry)()
    }
}

pub static DEMOS: &[Demo] = &[
    Demo {
        name: "hello",
        summary: "console.log(\"hello, world\")",
        entry: hello,
    },
    Demo {
        name: "coercion",
        summary: "operator results across mixed operand types",
        entry: coercion,
    },
    Demo {
        name: "prototype",
        summary: "method lookup through a shared prototype",
        entry: prototype,
    },
    Demo {
        name: "fib",
        summary: "recursive fibonacci through a global function",
        entry: fib,
    },
    Demo {
        name: "args",
        summary: "sums process.argv with parseInt",
        entry: args,
    },
];

pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|d| d.name == name)
}

fn log(rt: &mut Runtime, value: JsValue) -> RuntimeResult<()> {
    let console = rt.require_global("console")?;
    rt.call_method(&console, "log", &[value])?;
    Ok(())
}

fn hello() -> JsFunction {
    JsFunction::native("module_0", 0, |rt, _this, _args| {
        log(rt, JsValue::string("hello, world"))?;
        Ok(JsValue::Undefined)
    })
}

fn coercion() -> JsFunction {
    JsFunction::native("module_0", 0, |rt, _this, _args| {
        let three = JsValue::Number(3.0);
        let x = JsValue::string("x");
        log(rt, ops::add(&three, &x))?;
        log(rt, ops::add(&x, &three))?;
        log(rt, ops::add(&JsValue::Boolean(true), &JsValue::Null))?;
        log(rt, ops::divide(&JsValue::Number(1.0), &JsValue::Number(0.0)))?;
        log(rt, ops::subtract(&JsValue::string("a"), &JsValue::Number(1.0)))?;
        log(rt, JsValue::Boolean(ops::loose_equals(&JsValue::string("a"), &JsValue::string("a"))))?;
        log(rt, JsValue::Boolean(ops::logical_or(&JsValue::Number(0.0), &JsValue::string(""))))?;
        log(rt, ops::remainder(&JsValue::Number(7.0), &JsValue::Number(4.0)))?;
        Ok(JsValue::Undefined)
    })
}

fn prototype() -> JsFunction {
    JsFunction::native("module_0", 0, |rt, _this, _args| {
        let shape = rt.create_object()?;
        let describe = JsFunction::native("describe", 0, |rt, this, _args| {
            let area = rt.call_method(this, "area", &[])?;
            log(rt, ops::add(&JsValue::string("shape with area "), &area))?;
            Ok(JsValue::Undefined)
        });
        rt.set(shape, "describe", JsValue::Function(describe))?;

        let square = rt.create_object_with_proto(Some(shape))?;
        rt.set(square, "side", JsValue::Number(3.0))?;
        let area = JsFunction::native("area", 0, |rt, this, _args| {
            let side = rt.get(this.as_object()?, "side")?.unwrap_or(JsValue::Undefined);
            Ok(ops::multiply(&side, &side))
        });
        rt.set(square, "area", JsValue::Function(area))?;
        rt.call_method(&JsValue::Object(square), "describe", &[])?;

        rt.free_object(square)?;
        rt.free_object(shape)?;
        Ok(JsValue::Undefined)
    })
}

fn fib() -> JsFunction {
    JsFunction::native("module_0", 0, |rt, _this, _args| {
        let fib = JsFunction::native("fib", 1, |rt, _this, args| {
            let [n] = args.params()?;
            if ops::less_than(n, &JsValue::Number(2.0)) {
                return Ok(n.clone());
            }
            let fib = rt.require_global("fib")?;
            let a = rt.call_function(&fib, &JsValue::Undefined, &[ops::subtract(n, &JsValue::Number(1.0))])?;
            let b = rt.call_function(&fib, &JsValue::Undefined, &[ops::subtract(n, &JsValue::Number(2.0))])?;
            Ok(ops::add(&a, &b))
        });
        rt.define_global("fib", JsValue::Function(fib));

        let fib = rt.require_global("fib")?;
        let mut i = JsValue::Number(0.0);
        while ops::less_than(&i, &JsValue::Number(10.0)) {
            let value = rt.call_function(&fib, &JsValue::Undefined, &[i.clone()])?;
            let label = ops::add(&JsValue::string("fib("), &i);
            let label = ops::add(&label, &JsValue::string(") = "));
            log(rt, ops::add(&label, &value))?;
            i = ops::add(&i, &JsValue::Number(1.0));
        }
        Ok(JsValue::Undefined)
    })
}

fn args() -> JsFunction {
    JsFunction::native("module_0", 0, |rt, _this, _args| {
        let process = rt.require_global("process")?.as_object()?;
        let argc = rt.get(process, "argc")?.unwrap_or(JsValue::Undefined);
        let argv = rt.get(process, "argv")?.unwrap_or(JsValue::Undefined).as_array()?;
        let parse_int = rt.require_global("parseInt")?;

        let mut total = JsValue::Number(0.0);
        let mut i = JsValue::Number(1.0);
        while ops::less_than(&i, &argc) {
            let arg = rt.array_get(argv, i.as_number()? as usize)?.unwrap_or(JsValue::Undefined);
            let n = rt.call_function(&parse_int, &JsValue::Undefined, &[arg, JsValue::Number(10.0)])?;
            total = ops::add(&total, &n);
            i = ops::add(&i, &JsValue::Number(1.0));
        }
        log(rt, ops::add(&JsValue::string("sum of arguments: "), &total))?;
        Ok(JsValue::Undefined)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::runtime::execute_with_output;
    use crate::runtime::testing::SharedBuffer;

    fn run(name: &str, config: Config) -> String {
        let out = SharedBuffer::default();
        let demo = find(name).unwrap();
        execute_with_output(config, &demo.entry(), Box::new(out.clone())).unwrap();
        out.contents()
    }

    #[test]
    fn hello_prints_greeting() {
        assert_eq!(run("hello", Config::default()), "hello, world\n");
    }

    #[test]
    fn coercion_output() {
        assert_eq!(
            run("coercion", Config::default()),
            "3.000000x\nx3.000000\ntruenull\ninf\nnan\nfalse\nfalse\n3.000000\n"
        );
    }

    #[test]
    fn prototype_dispatches_through_shape() {
        assert_eq!(run("prototype", Config::default()), "shape with area 9.000000\n");
    }

    #[test]
    fn fib_sequence() {
        let out = run("fib", Config::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "fib(0.000000) = 0.000000");
        assert_eq!(lines[9], "fib(9.000000) = 34.000000");
    }

    #[test]
    fn args_sums_argv() {
        let config = Config::default().with_argv(["gum", "4", "38", "junk"]);
        assert_eq!(run("args", config), "sum of arguments: 42.000000\n");
    }

    #[test]
    fn every_demo_is_findable() {
        for demo in DEMOS {
            assert!(find(demo.name).is_some());
        }
        assert!(find("nope").is_none());
    }
}
