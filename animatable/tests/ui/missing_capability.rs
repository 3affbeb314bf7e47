#![allow(dead_code)]

use animatable::animatable;

#[animatable]
#[derive(Debug)]
pub struct Circle {
    pub radius: f64,
}

fn main() {}
