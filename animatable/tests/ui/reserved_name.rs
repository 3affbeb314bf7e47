#![allow(dead_code)]

use animatable::{Shape, animatable};

#[animatable]
#[derive(Shape)]
pub struct Gauge {
    pub animatable_data: f64,
    pub level: f64,
}

fn main() {}
