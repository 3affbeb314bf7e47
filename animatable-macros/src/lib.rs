#![doc = include_str!("../README.md")]

/// Synthesizes `Animatable` for a struct, plus a companion vector type when
/// the struct has more than one animatable field.
///
/// See the `animatable` crate for the full story.
#[proc_macro_attribute]
pub fn animatable(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    animatable_macros_impl::animatable(attr.into(), item.into()).into()
}

/// Implements the `Shape` marker trait.
#[proc_macro_derive(Shape, attributes(shape))]
pub fn derive_shape(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    animatable_macros_impl::derive_shape(input.into()).into()
}
