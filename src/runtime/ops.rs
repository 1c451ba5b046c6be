//! Binary operator dispatch.
//!
//! Every operator is a [`Cascade`]: a table of variants indexed by the tag
//! pair of its operands, plus a generic fallback that goes through the
//! coercions. A variant re-checks the shapes it was registered for and
//! hands off to the next step of the cascade when they do not match, so a
//! table entry can never observe a payload of the wrong variant.

use super::helpers::{to_boolean, to_js_string, to_number};
use crate::types::{JsValue, TAG_COUNT, Tag, number_ops};
use std::sync::LazyLock;

pub type Variant<R> = fn(&JsValue, &JsValue) -> R;

pub struct Cascade<R> {
    name: &'static str,
    variants: [[Option<Variant<R>>; TAG_COUNT]; TAG_COUNT],
    fallback: Variant<R>,
}

impl<R> Cascade<R> {
    pub fn new(name: &'static str, fallback: Variant<R>) -> Self {
        Self {
            name,
            variants: [[None; TAG_COUNT]; TAG_COUNT],
            fallback,
        }
    }

    /// Registers the handler for one operand-tag pair, replacing any
    /// previous one.
    pub fn with(mut self, left: Tag, right: Tag, variant: Variant<R>) -> Self {
        self.variants[left.index()][right.index()] = Some(variant);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn has_variant(&self, left: Tag, right: Tag) -> bool {
        self.variants[left.index()][right.index()].is_some()
    }

    pub fn apply(&self, a: &JsValue, b: &JsValue) -> R {
        match self.variants[a.tag().index()][b.tag().index()] {
            Some(variant) => variant(a, b),
            None => (self.fallback)(a, b),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Lt,
    Eq,
    Or,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

// <

fn lt_number_number(a: &JsValue, b: &JsValue) -> bool {
    match (a, b) {
        (JsValue::Number(x), JsValue::Number(y)) => number_ops::less_than(*x, *y),
        _ => lt_generic(a, b),
    }
}

fn lt_generic(a: &JsValue, b: &JsValue) -> bool {
    number_ops::less_than(to_number(a), to_number(b))
}

static LESS_THAN: LazyLock<Cascade<bool>> = LazyLock::new(|| {
    Cascade::new("<", lt_generic).with(Tag::Number, Tag::Number, lt_number_number)
});

// ==

fn eq_number_number(a: &JsValue, b: &JsValue) -> bool {
    match (a, b) {
        (JsValue::Number(x), JsValue::Number(y)) => number_ops::equal(*x, *y),
        _ => eq_generic(a, b),
    }
}

// Non-numeric operands compare numerically too, so "a" == "a" is false.
fn eq_generic(a: &JsValue, b: &JsValue) -> bool {
    number_ops::equal(to_number(a), to_number(b))
}

static LOOSE_EQUALS: LazyLock<Cascade<bool>> = LazyLock::new(|| {
    Cascade::new("==", eq_generic).with(Tag::Number, Tag::Number, eq_number_number)
});

// ||

fn or_bool_bool(a: &JsValue, b: &JsValue) -> bool {
    match (a, b) {
        (JsValue::Boolean(x), JsValue::Boolean(y)) => *x | *y,
        _ => or_generic(a, b),
    }
}

// Every route into the coercing step of `||` goes through here: it is the
// cascade's fallback and the deferral target of `or_bool_bool`.
fn or_generic(a: &JsValue, b: &JsValue) -> bool {
    logical_or_with(a, b, to_boolean)
}

static LOGICAL_OR: LazyLock<Cascade<bool>> = LazyLock::new(|| {
    Cascade::new("||", or_generic).with(Tag::Boolean, Tag::Boolean, or_bool_bool)
});

// +

fn add_number_number(a: &JsValue, b: &JsValue) -> JsValue {
    match (a, b) {
        (JsValue::Number(x), JsValue::Number(y)) => JsValue::Number(number_ops::add(*x, *y)),
        _ => add_number_string(a, b),
    }
}

fn add_number_string(a: &JsValue, b: &JsValue) -> JsValue {
    match (a, b) {
        (JsValue::Number(x), JsValue::String(s)) => {
            JsValue::String(format!("{}{s}", number_ops::to_string(*x)))
        }
        _ => add_string_number(a, b),
    }
}

fn add_string_number(a: &JsValue, b: &JsValue) -> JsValue {
    match (a, b) {
        (JsValue::String(s), JsValue::Number(y)) => {
            JsValue::String(format!("{s}{}", number_ops::to_string(*y)))
        }
        _ => add_string_string(a, b),
    }
}

fn add_string_string(a: &JsValue, b: &JsValue) -> JsValue {
    match (a, b) {
        (JsValue::String(l), JsValue::String(r)) => JsValue::String(format!("{l}{r}")),
        _ => add_generic(a, b),
    }
}

fn add_generic(a: &JsValue, b: &JsValue) -> JsValue {
    JsValue::String(format!("{}{}", to_js_string(a), to_js_string(b)))
}

static ADD: LazyLock<Cascade<JsValue>> = LazyLock::new(|| {
    Cascade::new("+", add_generic)
        .with(Tag::Number, Tag::Number, add_number_number)
        .with(Tag::Number, Tag::String, add_number_string)
        .with(Tag::String, Tag::Number, add_string_number)
        .with(Tag::String, Tag::String, add_string_string)
});

// - * / %

macro_rules! numeric_cascade {
    ($table:ident, $sym:literal, $direct:ident, $generic:ident, $op:path) => {
        fn $direct(a: &JsValue, b: &JsValue) -> JsValue {
            match (a, b) {
                (JsValue::Number(x), JsValue::Number(y)) => JsValue::Number($op(*x, *y)),
                _ => $generic(a, b),
            }
        }

        fn $generic(a: &JsValue, b: &JsValue) -> JsValue {
            JsValue::Number($op(to_number(a), to_number(b)))
        }

        static $table: LazyLock<Cascade<JsValue>> = LazyLock::new(|| {
            Cascade::new($sym, $generic).with(Tag::Number, Tag::Number, $direct)
        });
    };
}

numeric_cascade!(SUBTRACT, "-", sub_number_number, sub_generic, number_ops::subtract);
numeric_cascade!(MULTIPLY, "*", mul_number_number, mul_generic, number_ops::multiply);
numeric_cascade!(DIVIDE, "/", div_number_number, div_generic, number_ops::divide);
numeric_cascade!(REMAINDER, "%", mod_number_number, mod_generic, number_ops::remainder);

pub fn less_than(a: &JsValue, b: &JsValue) -> bool {
    LESS_THAN.apply(a, b)
}

pub fn loose_equals(a: &JsValue, b: &JsValue) -> bool {
    LOOSE_EQUALS.apply(a, b)
}

/// Logical or over already-evaluated operands. Both sides are always
/// coerced; there is no short-circuit.
pub fn logical_or(a: &JsValue, b: &JsValue) -> bool {
    LOGICAL_OR.apply(a, b)
}

/// The coercing step of `||` with the boolean coercion supplied by the
/// caller.
pub fn logical_or_with(
    a: &JsValue,
    b: &JsValue,
    mut truthy: impl FnMut(&JsValue) -> bool,
) -> bool {
    let left = truthy(a);
    let right = truthy(b);
    left || right
}

pub fn add(a: &JsValue, b: &JsValue) -> JsValue {
    ADD.apply(a, b)
}

pub fn subtract(a: &JsValue, b: &JsValue) -> JsValue {
    SUBTRACT.apply(a, b)
}

pub fn multiply(a: &JsValue, b: &JsValue) -> JsValue {
    MULTIPLY.apply(a, b)
}

pub fn divide(a: &JsValue, b: &JsValue) -> JsValue {
    DIVIDE.apply(a, b)
}

pub fn remainder(a: &JsValue, b: &JsValue) -> JsValue {
    REMAINDER.apply(a, b)
}

pub fn eval_binary(op: BinaryOp, a: &JsValue, b: &JsValue) -> JsValue {
    match op {
        BinaryOp::Lt => JsValue::Boolean(less_than(a, b)),
        BinaryOp::Eq => JsValue::Boolean(loose_equals(a, b)),
        BinaryOp::Or => JsValue::Boolean(logical_or(a, b)),
        BinaryOp::Add => add(a, b),
        BinaryOp::Sub => subtract(a, b),
        BinaryOp::Mul => multiply(a, b),
        BinaryOp::Div => divide(a, b),
        BinaryOp::Mod => remainder(a, b),
    }
}

/// Whether `op` has a dedicated variant for the tag pair, as opposed to
/// going straight to its coercing fallback.
pub fn has_variant(op: BinaryOp, left: Tag, right: Tag) -> bool {
    match op {
        BinaryOp::Lt => LESS_THAN.has_variant(left, right),
        BinaryOp::Eq => LOOSE_EQUALS.has_variant(left, right),
        BinaryOp::Or => LOGICAL_OR.has_variant(left, right),
        BinaryOp::Add => ADD.has_variant(left, right),
        BinaryOp::Sub => SUBTRACT.has_variant(left, right),
        BinaryOp::Mul => MULTIPLY.has_variant(left, right),
        BinaryOp::Div => DIVIDE.has_variant(left, right),
        BinaryOp::Mod => REMAINDER.has_variant(left, right),
    }
}
