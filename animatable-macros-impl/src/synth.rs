//! Assembles the generated declarations from fragments.

use proc_macro2::{Ident, TokenStream};
use quote::quote;

use crate::{AnimatableConfig, FieldDescriptor, VectorFragments};

/// Declares the companion vector type, its constructor, its operators and its
/// `VectorArithmetic` implementation.
pub fn synthesize_vector(
    vector: &Ident,
    vis: &TokenStream,
    fragments: &VectorFragments,
    crate_path: &TokenStream,
) -> TokenStream {
    let VectorFragments {
        struct_fields,
        init_params,
        init_assignments,
        zero_components,
        add_components,
        sub_components,
        add_assign_statements,
        sub_assign_statements,
        scale_statements,
        magnitude_terms,
    } = fragments;

    quote! {
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        #vis struct #vector {
            #(#struct_fields,)*
        }

        #[allow(dead_code)]
        impl #vector {
            /// The additive identity.
            #vis const ZERO: Self = Self {
                #(#zero_components,)*
            };

            /// Creates a vector from its components.
            #[allow(clippy::too_many_arguments)]
            #vis const fn new(#(#init_params),*) -> Self {
                Self {
                    #(#init_assignments,)*
                }
            }
        }

        impl ::core::ops::Add for #vector {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                let lhs = self;
                Self {
                    #(#add_components,)*
                }
            }
        }

        impl ::core::ops::Sub for #vector {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                let lhs = self;
                Self {
                    #(#sub_components,)*
                }
            }
        }

        impl ::core::ops::AddAssign for #vector {
            fn add_assign(&mut self, rhs: Self) {
                let lhs = self;
                #(#add_assign_statements)*
            }
        }

        impl ::core::ops::SubAssign for #vector {
            fn sub_assign(&mut self, rhs: Self) {
                let lhs = self;
                #(#sub_assign_statements)*
            }
        }

        impl #crate_path::VectorArithmetic for #vector {
            fn zero() -> Self {
                Self::ZERO
            }

            fn scale(&mut self, rhs: f64) {
                #(#scale_statements)*
            }

            fn magnitude_squared(&self) -> f64 {
                #(#magnitude_terms)+*
            }
        }
    }
}

/// What the host exposes as its animatable data.
#[derive(Debug, Clone, Copy)]
pub enum AccessorData<'a> {
    /// The one animatable field, exposed with its own type.
    Scalar(&'a FieldDescriptor),
    /// The companion vector type built from these fields.
    Vector {
        /// Name of the companion type.
        ident: &'a Ident,
        /// The fields, in the order they appear in the companion type.
        fields: &'a [FieldDescriptor],
    },
}

/// Implements `Animatable` for the host.
pub fn synthesize_accessor(
    host: &Ident,
    data: AccessorData<'_>,
    config: &AnimatableConfig,
) -> TokenStream {
    let crate_path = &config.crate_path;
    let getter = config.getter_ident();
    let setter = config.setter_ident();

    let (data_type, get_body, set_body) = match data {
        AccessorData::Scalar(field) => {
            let name = &field.name;
            (
                field.ty.clone(),
                quote! { self.#name },
                quote! { self.#name = new_value; },
            )
        }
        AccessorData::Vector { ident, fields } => {
            let names: Vec<&Ident> = fields.iter().map(|f| &f.name).collect();
            (
                quote! { #ident },
                quote! { #ident { #(#names: self.#names),* } },
                quote! { #(self.#names = new_value.#names;)* },
            )
        }
    };

    quote! {
        impl #crate_path::Animatable for #host {
            type AnimatableData = #data_type;

            fn #getter(&self) -> Self::AnimatableData {
                #get_body
            }

            fn #setter(&mut self, new_value: Self::AnimatableData) {
                #set_body
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FragmentBuilder;
    use crate::grammar::type_text;
    use quote::format_ident;

    fn field(name: &str, ty: TokenStream) -> FieldDescriptor {
        FieldDescriptor {
            name: format_ident!("{}", name),
            type_text: type_text(&ty),
            ty,
            is_excluded: false,
        }
    }

    #[animatable_testhelpers::test]
    fn vector_has_every_operator() {
        let fields = [field("radius", quote! { f64 }), field("x_offset", quote! { f64 })];
        let mut builder = FragmentBuilder::new();
        for f in &fields {
            builder.append_field(f);
        }
        let fragments = builder.finish().unwrap();
        let vector = format_ident!("CircleAnimatableData");
        let text = synthesize_vector(&vector, &quote! { pub }, &fragments, &quote! { ::animatable })
            .to_string();

        for needle in [
            quote! { pub struct CircleAnimatableData },
            quote! { pub radius: f64, pub x_offset: f64, },
            quote! { impl ::core::ops::Add for CircleAnimatableData },
            quote! { impl ::core::ops::Sub for CircleAnimatableData },
            quote! { impl ::core::ops::AddAssign for CircleAnimatableData },
            quote! { impl ::core::ops::SubAssign for CircleAnimatableData },
            quote! { impl ::animatable::VectorArithmetic for CircleAnimatableData },
            quote! { pub const fn new(radius: f64, x_offset: f64) -> Self },
            quote! {
                (self.radius as f64) * (self.radius as f64)
                    + (self.x_offset as f64) * (self.x_offset as f64)
            },
        ] {
            let needle = needle.to_string();
            assert!(text.contains(&needle), "missing `{needle}` in:\n{text}");
        }
    }

    #[animatable_testhelpers::test]
    fn scalar_accessor_uses_the_field_type() {
        let radius = field("radius", quote! { f32 });
        let text = synthesize_accessor(
            &format_ident!("Circle"),
            AccessorData::Scalar(&radius),
            &AnimatableConfig::default(),
        )
        .to_string();
        assert!(text.contains(&quote! { type AnimatableData = f32; }.to_string()), "{text}");
        assert!(text.contains(&quote! { self.radius = new_value; }.to_string()), "{text}");
    }

    #[animatable_testhelpers::test]
    fn vector_accessor_builds_and_splits_the_vector() {
        let fields = [field("radius", quote! { f64 }), field("x_offset", quote! { f64 })];
        let vector = format_ident!("CircleAnimatableData");
        let text = synthesize_accessor(
            &format_ident!("Circle"),
            AccessorData::Vector {
                ident: &vector,
                fields: &fields,
            },
            &AnimatableConfig::default(),
        )
        .to_string();

        let getter = quote! {
            CircleAnimatableData { radius: self.radius, x_offset: self.x_offset }
        };
        let setter = quote! {
            self.radius = new_value.radius;
            self.x_offset = new_value.x_offset;
        };
        assert!(text.contains(&getter.to_string()), "{text}");
        assert!(text.contains(&setter.to_string()), "{text}");
        assert!(text.contains(&quote! { impl ::animatable::Animatable for Circle }.to_string()));
    }
}
