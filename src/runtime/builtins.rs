use super::*;
use super::helpers::parse_leading_integer;

impl Runtime {
    pub(crate) fn setup_globals(&mut self) -> RuntimeResult<()> {
        self.setup_console()?;
        if self.config.install_prelude {
            self.setup_prelude()?;
        }
        Ok(())
    }

    fn own_global(&mut self, name: &str, value: JsValue) {
        if matches!(value, JsValue::Object(_) | JsValue::Array(_)) {
            self.bootstrap_handles.push(value.clone());
        }
        self.define_global(name, value);
    }

    fn setup_console(&mut self) -> RuntimeResult<()> {
        let console = self.create_object()?;
        let log = JsFunction::native("log", 1, |rt, _this, args| {
            let [value] = args.params()?;
            let line = to_js_string(value);
            rt.write_line(&line)?;
            Ok(JsValue::Null)
        });
        self.set(console, "log", JsValue::Function(log))?;
        self.console = Some(console);
        self.own_global("console", JsValue::Object(console));
        Ok(())
    }

    fn setup_prelude(&mut self) -> RuntimeResult<()> {
        self.define_global("Infinity", JsValue::Number(f64::INFINITY));

        let math = self.create_object()?;
        self.set(math, "PI", JsValue::Number(std::f64::consts::PI))?;
        let ceil = JsFunction::native("ceil", 1, |_rt, _this, args| {
            let [n] = args.params()?;
            Ok(JsValue::Number(to_number(n).ceil()))
        });
        self.set(math, "ceil", JsValue::Function(ceil))?;
        let sqrt = JsFunction::native("sqrt", 1, |_rt, _this, args| {
            let [n] = args.params()?;
            Ok(JsValue::Number(to_number(n).sqrt()))
        });
        self.set(math, "sqrt", JsValue::Function(sqrt))?;
        self.own_global("Math", JsValue::Object(math));

        // only base 10 is supported; the base goes through the == cascade
        let parse_int = JsFunction::native("parseInt", 2, |_rt, _this, args| {
            let [text, base] = args.params()?;
            if !ops::loose_equals(base, &JsValue::Number(10.0)) {
                return Ok(JsValue::Number(f64::NAN));
            }
            Ok(JsValue::Number(parse_leading_integer(&to_js_string(text))))
        });
        self.define_global("parseInt", JsValue::Function(parse_int));

        let argv: Vec<JsValue> = self.config.argv.iter().map(|a| JsValue::string(a.as_str())).collect();
        let argc = argv.len();
        let argv = self.create_array(argv);
        self.bootstrap_handles.push(JsValue::Array(argv));
        let process = self.create_object()?;
        self.set(process, "argc", JsValue::Number(argc as f64))?;
        self.set(process, "argv", JsValue::Array(argv))?;
        self.own_global("process", JsValue::Object(process));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::{capturing_runtime, quiet_runtime};

    fn call_global(rt: &mut Runtime, name: &str, args: &[JsValue]) -> RuntimeResult<JsValue> {
        let f = rt.require_global(name)?;
        rt.call_function(&f, &JsValue::Undefined, args)
    }

    fn call_math(rt: &mut Runtime, name: &str, arg: JsValue) -> f64 {
        let math = rt.require_global("Math").unwrap();
        rt.call_method(&math, name, &[arg]).unwrap().as_number().unwrap()
    }

    #[test]
    fn console_log_formats_every_tag() {
        let (mut rt, out) = capturing_runtime(Config::default());
        let console = rt.require_global("console").unwrap();
        let obj = rt.create_object().unwrap();
        for value in [
            JsValue::Number(3.5),
            JsValue::string("text"),
            JsValue::Boolean(false),
            JsValue::Null,
            JsValue::Undefined,
            JsValue::Object(obj),
        ] {
            rt.call_method(&console, "log", &[value]).unwrap();
        }
        assert_eq!(
            out.contents(),
            "3.500000\ntext\nfalse\nnull\nundefined\n[object Object]\n"
        );
    }

    #[test]
    fn console_log_ignores_extra_arguments() {
        let (mut rt, out) = capturing_runtime(Config::default());
        let console = rt.require_global("console").unwrap();
        rt.call_method(&console, "log", &[JsValue::string("a"), JsValue::string("b")])
            .unwrap();
        assert_eq!(out.contents(), "a\n");
    }

    #[test]
    fn console_inherits_from_object_prototype() {
        let rt = quiet_runtime();
        let console = rt.console().unwrap();
        assert_eq!(rt.prototype_of(console).unwrap(), Some(rt.object_prototype()));
    }

    #[test]
    fn math_prelude() {
        let mut rt = quiet_runtime();
        let math = rt.require_global("Math").unwrap().as_object().unwrap();
        let pi = rt.get(math, "PI").unwrap().unwrap().as_number().unwrap();
        assert_eq!(pi, 3.141592653589793);
        assert_eq!(call_math(&mut rt, "ceil", JsValue::Number(1.2)), 2.0);
        assert_eq!(call_math(&mut rt, "sqrt", JsValue::Number(16.0)), 4.0);
        assert_eq!(call_math(&mut rt, "ceil", JsValue::Boolean(true)), 1.0);
        assert!(call_math(&mut rt, "sqrt", JsValue::string("9")).is_nan());
    }

    #[test]
    fn parse_int_base_ten_only() {
        let mut rt = quiet_runtime();
        let ten = JsValue::Number(10.0);
        let parsed = call_global(&mut rt, "parseInt", &[JsValue::string("123xyz"), ten.clone()]).unwrap();
        assert_eq!(parsed.as_number().unwrap(), 123.0);
        let negative = call_global(&mut rt, "parseInt", &[JsValue::string(" -5"), ten]).unwrap();
        assert_eq!(negative.as_number().unwrap(), -5.0);
        let hex = call_global(&mut rt, "parseInt", &[JsValue::string("ff"), JsValue::Number(16.0)]).unwrap();
        assert!(hex.is_nan());
        let string_base = call_global(&mut rt, "parseInt", &[JsValue::string("1"), JsValue::string("10")]).unwrap();
        assert!(string_base.is_nan());
        assert!(matches!(
            call_global(&mut rt, "parseInt", &[JsValue::string("1")]),
            Err(RuntimeError::ArityMismatch { expected: 2, .. })
        ));
    }

    #[test]
    fn infinity_global() {
        let rt = quiet_runtime();
        assert_eq!(rt.require_global("Infinity").unwrap().as_number().unwrap(), f64::INFINITY);
    }

    #[test]
    fn process_exposes_argv() {
        let config = Config::default().with_argv(["gum", "7", "x"]);
        let (rt, _) = capturing_runtime(config);
        let process = rt.require_global("process").unwrap().as_object().unwrap();
        assert_eq!(rt.get(process, "argc").unwrap().unwrap().as_number().unwrap(), 3.0);
        let argv = rt.get(process, "argv").unwrap().unwrap().as_array().unwrap();
        assert_eq!(rt.array_len(argv).unwrap(), 3);
        assert_eq!(rt.array_get(argv, 1).unwrap().unwrap().as_str().unwrap(), "7");
    }

    #[test]
    fn prelude_can_be_disabled() {
        let (mut rt, _) = capturing_runtime(Config::default().without_prelude());
        assert!(rt.global("console").is_some());
        assert!(rt.global("Math").is_none());
        assert!(rt.global("parseInt").is_none());
        assert_eq!(rt.heap().live_objects(), 2);
        rt.teardown().unwrap();
        assert_eq!(rt.heap().live_objects(), 1);
    }
}
