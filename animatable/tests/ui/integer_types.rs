#![allow(dead_code)]

use animatable::{Shape, animatable};

#[animatable(types(f64, i32))]
#[derive(Shape)]
pub struct Ticks {
    pub a: f64,
    pub b: i32,
}

fn main() {}
