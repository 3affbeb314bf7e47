#![allow(dead_code)]

use animatable::animatable;

#[animatable]
#[derive(Debug)]
pub struct Tagged<T> {
    pub value: f64,
    pub tag: T,
}

fn main() {}
