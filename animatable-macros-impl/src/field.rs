//! Field declarations as parsed, and the descriptors the pass works with.

use proc_macro2::{Ident, TokenStream};

use crate::grammar::type_text;
use crate::{AnimatableConfig, trace};

/// One stored field of the host, exactly as the grammar found it.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    /// `None` for tuple-struct fields.
    pub name: Option<Ident>,
    /// The type tokens, if the grammar saw any.
    pub ty: Option<TokenStream>,
    /// Identifiers found inside `#[animatable(...)]` on the field.
    pub markers: Vec<Ident>,
}

/// A named, typed field that takes part in the expansion.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: Ident,
    /// Type tokens, re-emitted in generated code.
    pub ty: TokenStream,
    /// Textual identity of `ty`, see [`type_text`].
    pub type_text: String,
    /// Whether the field carries the ignore marker.
    pub is_excluded: bool,
}

impl FieldDescriptor {
    /// Builds a descriptor from a declaration. Fields without a name or
    /// without a type give `None`.
    pub fn from_decl(decl: &FieldDecl, config: &AnimatableConfig) -> Option<Self> {
        let name = decl.name.clone()?;
        let ty = decl.ty.clone()?;
        let is_excluded = decl
            .markers
            .iter()
            .any(|marker| *marker == config.ignore_marker.as_str());
        Some(Self {
            name,
            type_text: type_text(&ty),
            ty,
            is_excluded,
        })
    }
}

/// Collects the fields that take part in synthesis, in declaration order.
///
/// Unnamed fields are skipped silently. Fields marked with the ignore marker
/// are dropped.
pub fn collect_fields(fields: &[FieldDecl], config: &AnimatableConfig) -> Vec<FieldDescriptor> {
    fields
        .iter()
        .filter_map(|decl| FieldDescriptor::from_decl(decl, config))
        .filter(|field| {
            if field.is_excluded {
                trace!(field = %field.name, "skipping ignored field");
            }
            !field.is_excluded
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::{format_ident, quote};

    fn decl(name: Option<&str>, ty: TokenStream, markers: &[&str]) -> FieldDecl {
        FieldDecl {
            name: name.map(|n| format_ident!("{}", n)),
            ty: Some(ty),
            markers: markers.iter().map(|m| format_ident!("{}", m)).collect(),
        }
    }

    #[animatable_testhelpers::test]
    fn keeps_declaration_order() {
        let config = AnimatableConfig::default();
        let fields = collect_fields(
            &[
                decl(Some("width"), quote! { f64 }, &[]),
                decl(Some("height"), quote! { f32 }, &[]),
                decl(Some("depth"), quote! { f64 }, &[]),
            ],
            &config,
        );
        let names: Vec<_> = fields.iter().map(|f| f.name.to_string()).collect();
        assert_eq!(names, ["width", "height", "depth"]);
        assert_eq!(fields[1].type_text, "f32");
    }

    #[animatable_testhelpers::test]
    fn ignored_fields_are_dropped() {
        let config = AnimatableConfig::default();
        let fields = collect_fields(
            &[
                decl(Some("label"), quote! { String }, &["ignore"]),
                decl(Some("radius"), quote! { f64 }, &[]),
            ],
            &config,
        );
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name.to_string(), "radius");
        assert!(!fields[0].is_excluded);
    }

    #[animatable_testhelpers::test]
    fn unnamed_and_untyped_fields_are_skipped() {
        let config = AnimatableConfig::default();
        let untyped = FieldDecl {
            name: Some(format_ident!("ghost")),
            ty: None,
            markers: Vec::new(),
        };
        let fields = collect_fields(
            &[decl(None, quote! { f64 }, &[]), untyped],
            &config,
        );
        assert!(fields.is_empty());
    }

    #[animatable_testhelpers::test]
    fn descriptor_records_exclusion() {
        let config = AnimatableConfig::default();
        let field =
            FieldDescriptor::from_decl(&decl(Some("tag"), quote! { u8 }, &["ignore"]), &config)
                .unwrap();
        assert!(field.is_excluded);
        assert_eq!(field.type_text, "u8");
    }
}
