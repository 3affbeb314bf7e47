//! Compiles with a deprecation warning pointing at `Label`.

use animatable::{Shape, animatable};

#[animatable]
#[derive(Debug, Default, Shape)]
pub struct Label {
    #[animatable(ignore)]
    pub text: String,
}

fn main() {
    let label = Label::default();
    assert!(label.text.is_empty());
}
