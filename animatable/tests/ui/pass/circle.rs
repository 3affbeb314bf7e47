use animatable::{Animatable, Shape, VectorArithmetic, animatable};

#[animatable]
#[derive(Debug, Clone, PartialEq, Shape)]
pub struct Circle {
    pub radius: f64,
    pub x_offset: f64,
    #[animatable(ignore)]
    pub label: String,
}

fn main() {
    let circle = Circle {
        radius: 3.0,
        x_offset: -4.0,
        label: "c".to_string(),
    };
    let data = circle.animatable_data();
    assert_eq!(data, CircleAnimatableData::new(3.0, -4.0));
    assert_eq!(data.magnitude_squared(), 25.0);
    assert_eq!(circle.label, "c");
}
