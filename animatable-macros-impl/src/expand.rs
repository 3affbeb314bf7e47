//! The `#[animatable]` pass from start to finish.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use crate::grammar::{outer_attribute_args, parse_host, strip_markers};
use crate::synth::{AccessorData, synthesize_accessor, synthesize_vector};
use crate::validate::{FieldCount, check_eligibility, check_types};
use crate::{
    AnimatableConfig, Diagnostic, ExpansionErrorKind, FieldDescriptor, FragmentBuilder, HostDecl,
    collect_fields, debug, trace,
};

/// Result of validating a host. Exactly one per expansion.
#[derive(Debug)]
pub enum Outcome {
    /// Synthesis may proceed with these fields.
    Proceed(Vec<FieldDescriptor>),
    /// Nothing to synthesize, report and move on.
    Warning(Diagnostic),
    /// The host cannot be animated.
    Error(Diagnostic),
}

/// Runs collection and every check against `host`.
pub fn validate_host(host: &HostDecl, config: &AnimatableConfig) -> Outcome {
    let fields = collect_fields(&host.fields, config);

    if let Err(err) = check_eligibility(host, &fields, config) {
        return Outcome::Error(err);
    }
    if let Err(err) = check_types(&fields, config) {
        return Outcome::Error(err);
    }
    if fields.is_empty() {
        return Outcome::Warning(Diagnostic::redundant_usage(config, host.name.span()));
    }

    Outcome::Proceed(fields)
}

/// Generated declarations and at most one diagnostic.
#[derive(Debug, Default)]
pub struct Expansion {
    /// Items to emit after the host.
    pub declarations: Vec<TokenStream>,
    /// Error or warning to emit alongside them.
    pub diagnostic: Option<Diagnostic>,
}

impl Expansion {
    fn diagnostic(diagnostic: Diagnostic) -> Self {
        Self {
            declarations: Vec::new(),
            diagnostic: Some(diagnostic),
        }
    }
}

impl ToTokens for Expansion {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        for declaration in &self.declarations {
            tokens.extend(declaration.clone());
        }
        if let Some(diagnostic) = &self.diagnostic {
            diagnostic.to_tokens(tokens);
        }
    }
}

/// Expands an already parsed host.
pub fn expand(host: &HostDecl, config: &AnimatableConfig) -> Expansion {
    let fields = match validate_host(host, config) {
        Outcome::Proceed(fields) => fields,
        Outcome::Warning(diagnostic) | Outcome::Error(diagnostic) => {
            debug!(host = %host.name, kind = ?diagnostic.kind, "no synthesis");
            return Expansion::diagnostic(diagnostic);
        }
    };

    match FieldCount::of(&fields) {
        FieldCount::Empty => Expansion::diagnostic(Diagnostic::internal(
            "validation passed without any animatable field",
            host.name.span(),
        )),
        FieldCount::Single(field) => {
            trace!(host = %host.name, field = %field.name, "single field, no vector type");
            Expansion {
                declarations: vec![synthesize_accessor(
                    &host.name,
                    AccessorData::Scalar(field),
                    config,
                )],
                diagnostic: None,
            }
        }
        FieldCount::Multiple(fields) => {
            let mut builder = FragmentBuilder::new();
            for field in fields {
                builder.append_field(field);
            }
            let fragments = match builder.finish() {
                Ok(fragments) => fragments,
                Err(err) => return Expansion::diagnostic(err),
            };

            let vector = config.vector_ident(&host.name);
            trace!(
                host = %host.name,
                vector = %vector,
                fields = fields.len(),
                "synthesizing vector type"
            );
            Expansion {
                declarations: vec![
                    synthesize_vector(&vector, &host.vis, &fragments, &config.crate_path),
                    synthesize_accessor(
                        &host.name,
                        AccessorData::Vector {
                            ident: &vector,
                            fields,
                        },
                        config,
                    ),
                ],
                diagnostic: None,
            }
        }
    }
}

/// Entry point of the `#[animatable]` attribute.
///
/// The host item is always re-emitted, without its field markers, so that a
/// failed expansion reports one error instead of a cascade of unresolved names.
pub fn animatable(attr: TokenStream, item: TokenStream) -> TokenStream {
    let config = match AnimatableConfig::from_args(attr) {
        Ok(config) => config,
        Err(err) => {
            let stripped = strip_markers(item, &AnimatableConfig::default().attribute);
            return quote! { #stripped #err };
        }
    };
    let stripped = strip_markers(item.clone(), &config.attribute);

    let host = match parse_host(item, &config) {
        Ok(host) => host,
        Err(err) => return quote! { #stripped #err },
    };

    let expansion = expand(&host, &config);
    quote! {
        #stripped
        #expansion
    }
}

/// Entry point of `#[derive(Shape)]`.
///
/// `#[shape(crate = path)]` on the item points the impl at a re-exported
/// runtime crate, like `#[animatable(crate = path)]` does for the attribute.
pub fn derive_shape(input: TokenStream) -> TokenStream {
    let mut config = AnimatableConfig::default();
    let host = match parse_host(input.clone(), &config) {
        Ok(host) => host,
        Err(err) => return err.into_token_stream(),
    };
    if host.has_generics {
        let message = "#[derive(Shape)] does not support generic parameters";
        return Diagnostic::new(
            ExpansionErrorKind::UnsupportedGenerics,
            message,
            host.name.span(),
        )
        .into_token_stream();
    }

    let helpers = match outer_attribute_args(input, "shape") {
        Ok(helpers) => helpers,
        Err(err) => return err.into_token_stream(),
    };
    for args in helpers {
        if let Err(err) = config.apply_shape_args(args, host.name.span()) {
            return err.into_token_stream();
        }
    }

    let name = &host.name;
    let crate_path = &config.crate_path;
    quote! {
        #[automatically_derived]
        impl #crate_path::Shape for #name {}
    }
}
