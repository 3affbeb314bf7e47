use animatable::{Animatable, Shape, VectorArithmetic, animatable, interpolate};

#[animatable]
#[derive(Debug, Clone, PartialEq, Shape)]
struct Circle {
    radius: f64,
    x_offset: f64,
}

#[animatable]
#[derive(Debug, Clone, PartialEq, Shape)]
struct Gauge {
    level: f64,
    #[animatable(ignore)]
    name: String,
}

#[animatable]
#[derive(Debug, Clone, Copy, animatable::Shape)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub alpha: f64,
    #[animatable(ignore)]
    pub frame: u32,
}

#[test]
fn zero_is_the_identity() {
    let a = CircleAnimatableData::new(1.5, -2.25);
    assert_eq!(CircleAnimatableData::zero() + a, a);
    assert_eq!(CircleAnimatableData::ZERO, CircleAnimatableData::default());
}

#[test]
fn subtraction_undoes_addition() {
    let a = CircleAnimatableData::new(1.5, -2.25);
    let b = CircleAnimatableData::new(0.75, 8.0);
    assert_eq!(a + b - b, a);

    let mut c = a;
    c += b;
    c -= b;
    assert_eq!(c, a);
}

#[test]
fn scaling() {
    let a = CircleAnimatableData::new(1.5, -2.25);
    assert_eq!(a.scaled(1.0), a);
    assert_eq!(a.scaled(0.0), CircleAnimatableData::zero());
    assert_eq!(a.scaled(2.0), CircleAnimatableData::new(3.0, -4.5));
}

#[test]
fn magnitude_squared_is_the_sum_of_squares() {
    assert_eq!(CircleAnimatableData::new(3.0, -4.0).magnitude_squared(), 25.0);
    assert_eq!(CircleAnimatableData::zero().magnitude_squared(), 0.0);
}

#[test]
fn vector_accessor_round_trips() {
    let mut circle = Circle {
        radius: 2.0,
        x_offset: 0.5,
    };
    assert_eq!(
        circle.animatable_data(),
        CircleAnimatableData {
            radius: 2.0,
            x_offset: 0.5
        }
    );

    circle.set_animatable_data(CircleAnimatableData::new(7.0, -1.0));
    assert_eq!(
        circle,
        Circle {
            radius: 7.0,
            x_offset: -1.0
        }
    );
}

#[test]
fn single_field_is_its_own_data() {
    let mut gauge = Gauge {
        level: 0.25,
        name: "fuel".to_string(),
    };
    let level: f64 = gauge.animatable_data();
    assert_eq!(level, 0.25);

    gauge.set_animatable_data(0.75);
    assert_eq!(gauge.level, 0.75);
    assert_eq!(gauge.name, "fuel");
}

#[test]
fn interpolation_leaves_ignored_fields_alone() {
    let from = Gauge {
        level: 0.0,
        name: "from".to_string(),
    };
    let to = Gauge {
        level: 1.0,
        name: "to".to_string(),
    };
    let mid = interpolate(&from, &to, 0.5);
    assert_eq!(mid.level, 0.5);
    assert_eq!(mid.name, "from");
}

#[test]
fn mixed_float_widths() {
    let mut sprite = Sprite {
        x: 1.0,
        y: -2.0,
        alpha: 0.5,
        frame: 3,
    };
    let data: SpriteAnimatableData = sprite.animatable_data();
    assert_eq!(data.magnitude_squared(), 1.0 + 4.0 + 0.25);
    assert_eq!(data.scaled(2.0), SpriteAnimatableData::new(2.0, -4.0, 1.0));

    let target = Sprite {
        x: 3.0,
        y: 2.0,
        alpha: 1.0,
        frame: 9,
    };
    sprite.animate_towards(&target, 0.5);
    assert_eq!(sprite.x, 2.0);
    assert_eq!(sprite.y, 0.0);
    assert_eq!(sprite.alpha, 0.75);
    assert_eq!(sprite.frame, 3);
}

#[test]
fn full_step_reaches_the_target() {
    let from = Circle {
        radius: 1.0,
        x_offset: -3.0,
    };
    let to = Circle {
        radius: 4.0,
        x_offset: 5.0,
    };
    assert_eq!(interpolate(&from, &to, 1.0), to);
    assert_eq!(interpolate(&from, &to, 0.0), from);
}

#[allow(deprecated)]
mod redundant {
    use animatable::{Shape, animatable};

    // No animatable fields: a warning, and the struct is left as written.
    #[animatable]
    #[derive(Debug, Default, Shape)]
    pub struct Label {
        #[animatable(ignore)]
        pub text: String,
    }
}

#[test]
fn struct_without_animatable_fields_is_untouched() {
    let label = redundant::Label {
        text: "hello".to_string(),
    };
    assert_eq!(label.text, "hello");
    assert_eq!(format!("{:?}", redundant::Label::default()), "Label { text: \"\" }");
}

mod runtime {
    pub use animatable::*;
}

#[animatable(crate = crate::runtime, types(f64))]
#[derive(Debug, Clone, Copy, PartialEq, runtime::Shape)]
#[shape(crate = crate::runtime)]
struct Point {
    x: f64,
    y: f64,
}

#[test]
fn arguments_are_honoured() {
    let mut point = Point { x: 1.0, y: 2.0 };
    point.set_animatable_data(PointAnimatableData::new(-1.0, 0.5) + point.animatable_data());
    assert_eq!(point, Point { x: 0.0, y: 2.5 });
}

fn requires_shape<T: runtime::Shape>(_: &T) {}

#[test]
fn shape_is_implemented_through_the_helper_path() {
    requires_shape(&Point { x: 0.0, y: 0.0 });
    requires_shape(&Circle {
        radius: 0.0,
        x_offset: 0.0,
    });
}
