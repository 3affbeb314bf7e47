//! Per-field code fragments for the companion vector type.

use proc_macro2::{Span, TokenStream};
use quote::quote;

use crate::{Diagnostic, FieldDescriptor};

/// Parallel fragment sequences, one entry per included field.
///
/// Entry `i` of every sequence belongs to the same field. The builder never
/// validates what it is given; the checks have already run.
#[derive(Debug, Default, Clone)]
pub struct FragmentBuilder {
    struct_fields: Vec<TokenStream>,
    init_params: Vec<TokenStream>,
    init_assignments: Vec<TokenStream>,
    zero_components: Vec<TokenStream>,
    add_components: Vec<TokenStream>,
    sub_components: Vec<TokenStream>,
    add_assign_statements: Vec<TokenStream>,
    sub_assign_statements: Vec<TokenStream>,
    scale_statements: Vec<TokenStream>,
    magnitude_terms: Vec<TokenStream>,
}

/// The finished fragment sequences, all of the same length.
#[derive(Debug, Clone)]
pub struct VectorFragments {
    /// `pub n: t`
    pub struct_fields: Vec<TokenStream>,
    /// `n: t`
    pub init_params: Vec<TokenStream>,
    /// `n`
    pub init_assignments: Vec<TokenStream>,
    /// `n: 0.0`
    pub zero_components: Vec<TokenStream>,
    /// `n: lhs.n + rhs.n`
    pub add_components: Vec<TokenStream>,
    /// `n: lhs.n - rhs.n`
    pub sub_components: Vec<TokenStream>,
    /// `lhs.n += rhs.n;`
    pub add_assign_statements: Vec<TokenStream>,
    /// `lhs.n -= rhs.n;`
    pub sub_assign_statements: Vec<TokenStream>,
    /// `self.n *= rhs as t;`
    pub scale_statements: Vec<TokenStream>,
    /// `(self.n as f64) * (self.n as f64)`
    pub magnitude_terms: Vec<TokenStream>,
}

impl FragmentBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every fragment for `field`.
    pub fn append_field(&mut self, field: &FieldDescriptor) -> &mut Self {
        let name = &field.name;
        let ty = &field.ty;
        self.append_struct_field(quote! { pub #name: #ty })
            .append_init_param(quote! { #name: #ty })
            .append_init_assignment(quote! { #name })
            .append_zero_component(quote! { #name: 0.0 })
            .append_add_component(quote! { #name: lhs.#name + rhs.#name })
            .append_sub_component(quote! { #name: lhs.#name - rhs.#name })
            .append_add_assign(quote! { lhs.#name += rhs.#name; })
            .append_sub_assign(quote! { lhs.#name -= rhs.#name; })
            .append_scale(quote! { self.#name *= rhs as #ty; })
            .append_magnitude_term(quote! { (self.#name as f64) * (self.#name as f64) })
    }

    /// Appends a struct field declaration.
    pub fn append_struct_field(&mut self, fragment: TokenStream) -> &mut Self {
        self.struct_fields.push(fragment);
        self
    }

    /// Appends an initializer parameter.
    pub fn append_init_param(&mut self, fragment: TokenStream) -> &mut Self {
        self.init_params.push(fragment);
        self
    }

    /// Appends an initializer field assignment.
    pub fn append_init_assignment(&mut self, fragment: TokenStream) -> &mut Self {
        self.init_assignments.push(fragment);
        self
    }

    /// Appends a component of the zero value.
    pub fn append_zero_component(&mut self, fragment: TokenStream) -> &mut Self {
        self.zero_components.push(fragment);
        self
    }

    /// Appends a component of the sum.
    pub fn append_add_component(&mut self, fragment: TokenStream) -> &mut Self {
        self.add_components.push(fragment);
        self
    }

    /// Appends a component of the difference.
    pub fn append_sub_component(&mut self, fragment: TokenStream) -> &mut Self {
        self.sub_components.push(fragment);
        self
    }

    /// Appends a compound-add statement.
    pub fn append_add_assign(&mut self, fragment: TokenStream) -> &mut Self {
        self.add_assign_statements.push(fragment);
        self
    }

    /// Appends a compound-subtract statement.
    pub fn append_sub_assign(&mut self, fragment: TokenStream) -> &mut Self {
        self.sub_assign_statements.push(fragment);
        self
    }

    /// Appends a scale statement.
    pub fn append_scale(&mut self, fragment: TokenStream) -> &mut Self {
        self.scale_statements.push(fragment);
        self
    }

    /// Appends a term of the squared magnitude.
    pub fn append_magnitude_term(&mut self, fragment: TokenStream) -> &mut Self {
        self.magnitude_terms.push(fragment);
        self
    }

    /// Hands out the sequences, checking that they line up.
    pub fn finish(self) -> Result<VectorFragments, Diagnostic> {
        let expected = self.struct_fields.len();
        let lengths = [
            self.init_params.len(),
            self.init_assignments.len(),
            self.zero_components.len(),
            self.add_components.len(),
            self.sub_components.len(),
            self.add_assign_statements.len(),
            self.sub_assign_statements.len(),
            self.scale_statements.len(),
            self.magnitude_terms.len(),
        ];
        if lengths.iter().any(|&len| len != expected) {
            return Err(Diagnostic::internal(
                format!("fragment sequences out of step: {expected} fields, {lengths:?}"),
                Span::call_site(),
            ));
        }

        Ok(VectorFragments {
            struct_fields: self.struct_fields,
            init_params: self.init_params,
            init_assignments: self.init_assignments,
            zero_components: self.zero_components,
            add_components: self.add_components,
            sub_components: self.sub_components,
            add_assign_statements: self.add_assign_statements,
            sub_assign_statements: self.sub_assign_statements,
            scale_statements: self.scale_statements,
            magnitude_terms: self.magnitude_terms,
        })
    }
}
