#![allow(dead_code)]

use animatable::{Shape, animatable};

#[animatable]
#[derive(Shape)]
pub enum Direction {
    Up,
    Down,
}

fn main() {}
