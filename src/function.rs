use std::{collections::HashMap, f64::consts};

pub(crate) type Builtin = fn(f64) -> f64;

lazy_static::lazy_static! {
    static ref CONSTANTS: HashMap<&'static str, f64> = {
        let mut constants = HashMap::new();
        constants.insert("e", consts::E);
        for pi in ["pi", "Double.pi", "Float.pi", "CGFloat.pi"] {
            constants.insert(pi, consts::PI);
        }
        constants
    };

    static ref FUNCTIONS: HashMap<&'static str, Builtin> = {
        let mut functions: HashMap<&'static str, Builtin> = HashMap::new();
        functions.insert("exp", f64::exp);
        functions.insert("ln", f64::ln);
        functions.insert("log", f64::ln);
        functions.insert("log10", f64::log10);
        functions.insert("sqrt", f64::sqrt);
        functions.insert("sin", f64::sin);
        functions.insert("cos", f64::cos);
        functions.insert("tan", f64::tan);
        functions.insert("asin", f64::asin);
        functions.insert("acos", f64::acos);
        functions.insert("atan", f64::atan);
        functions.insert("abs", f64::abs);
        functions
    };
}

pub(crate) fn constant(name: &str) -> Option<f64> {
    CONSTANTS.get(name).copied()
}

pub(crate) fn function(name: &str) -> Option<Builtin> {
    FUNCTIONS.get(name).copied()
}
