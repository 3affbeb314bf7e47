#![allow(dead_code)]

use animatable::{Shape, animatable};

#[animatable]
#[derive(Shape)]
pub struct Counter {
    pub ticks: u64,
    pub rate: f64,
}

fn main() {}
