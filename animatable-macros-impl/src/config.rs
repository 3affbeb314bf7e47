//! Policy knobs for the `#[animatable]` pass and the grammar of its arguments.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use unsynn::*;
// unsynn exports a one-parameter `Result` alias
use core::result::Result;

use crate::grammar::{PathTokens, type_text};
use crate::{Diagnostic, ExpansionErrorKind, trace};

/// Scalar types the generated arithmetic works with: they take a `0.0`
/// literal and `as` casts to and from `f64`.
const FLOAT_TYPES: [&str; 2] = ["f32", "f64"];

/// Configuration of one `#[animatable]` expansion.
///
/// The defaults describe the `animatable` runtime crate. Individual use sites can
/// override the capability, the allowed scalar types and the runtime crate path
/// through attribute arguments, see [`AnimatableConfig::from_args`].
#[derive(Debug, Clone)]
pub struct AnimatableConfig {
    /// Trait a host must list in one of its `#[derive(...)]` attributes.
    pub required_capability: String,
    /// Name of the attribute, also the namespace of field markers.
    pub attribute: String,
    /// Field marker that removes a field from synthesis.
    pub ignore_marker: String,
    /// Scalar types a field may have to take part in synthesis.
    pub allowed_types: Vec<String>,
    /// Name of the synthesized getter. The setter is `set_` followed by it.
    pub accessor: String,
    /// Appended to the host name to name the companion vector type.
    pub vector_suffix: String,
    /// Path of the crate providing `Animatable` and `VectorArithmetic`.
    pub crate_path: TokenStream,
}

impl Default for AnimatableConfig {
    fn default() -> Self {
        Self {
            required_capability: "Shape".to_string(),
            attribute: "animatable".to_string(),
            ignore_marker: "ignore".to_string(),
            allowed_types: vec!["f32".to_string(), "f64".to_string()],
            accessor: "animatable_data".to_string(),
            vector_suffix: "AnimatableData".to_string(),
            crate_path: quote! { ::animatable },
        }
    }
}

impl AnimatableConfig {
    /// Whether `type_text` names one of the allowed scalar types.
    pub fn allows(&self, type_text: &str) -> bool {
        self.allowed_types.iter().any(|t| t == type_text)
    }

    /// The marker as a user writes it, e.g. `#[animatable(ignore)]`.
    pub fn marker_usage(&self) -> String {
        format!("#[{}({})]", self.attribute, self.ignore_marker)
    }

    /// The attribute as a user writes it, e.g. `#[animatable]`.
    pub fn attribute_usage(&self) -> String {
        format!("#[{}]", self.attribute)
    }

    /// Identifier of the companion vector type for `host`.
    pub fn vector_ident(&self, host: &Ident) -> Ident {
        format_ident!("{}{}", host, self.vector_suffix, span = host.span())
    }

    /// Identifier of the synthesized getter.
    pub fn getter_ident(&self) -> Ident {
        format_ident!("{}", self.accessor)
    }

    /// Identifier of the synthesized setter.
    pub fn setter_ident(&self) -> Ident {
        format_ident!("set_{}", self.accessor)
    }

    /// Builds a configuration from the arguments of `#[animatable(...)]`.
    ///
    /// Accepted arguments, all optional and comma separated:
    ///
    /// - `crate = ::path::to::runtime`
    /// - `capability = TraitName`
    /// - `types(f32, f64, ...)`
    pub fn from_args(args: TokenStream) -> Result<Self, Diagnostic> {
        let mut config = Self::default();
        if args.is_empty() {
            return Ok(config);
        }

        let mut it = args.to_token_iter();
        let parsed = it
            .parse::<Cons<CommaDelimitedVec<AnimatableArg>, EndOfStream>>()
            .map_err(|err| {
                Diagnostic::invalid_arguments(
                    &config,
                    format!(
                        "expected `crate = path`, `capability = Trait` or `types(...)`: {err}"
                    ),
                    Span::call_site(),
                )
            })?;

        for arg in parsed.first.iter() {
            match &arg.value {
                AnimatableArg::Crate(arg) => {
                    config.crate_path = arg.path.to_token_stream();
                }
                AnimatableArg::Capability(arg) => {
                    config.required_capability = arg.name.to_string();
                }
                AnimatableArg::Types(arg) => {
                    let mut types = Vec::new();
                    for ty in arg.list.content.iter() {
                        let tokens = ty.value.to_token_stream();
                        let text = type_text(&tokens);
                        if !FLOAT_TYPES.contains(&text.as_str()) {
                            let span = tokens
                                .into_iter()
                                .next()
                                .map_or_else(Span::call_site, |tt| tt.span());
                            return Err(Diagnostic::invalid_arguments(
                                &config,
                                format!(
                                    "`{text}` is not a floating-point type, \
                                     `types(...)` accepts `f32` and `f64`"
                                ),
                                span,
                            ));
                        }
                        types.push(text);
                    }
                    if types.is_empty() {
                        return Err(Diagnostic::invalid_arguments(
                            &config,
                            "`types(...)` needs at least one type",
                            Span::call_site(),
                        ));
                    }
                    config.allowed_types = types;
                }
            }
        }

        trace!(
            capability = %config.required_capability,
            types = ?config.allowed_types,
            "parsed attribute arguments"
        );
        Ok(config)
    }
}

impl AnimatableConfig {
    /// Applies the arguments of a `#[shape(...)]` helper attribute, which only
    /// accepts `crate = path`.
    pub fn apply_shape_args(&mut self, args: TokenStream, span: Span) -> Result<(), Diagnostic> {
        let mut it = args.to_token_iter();
        let parsed = it
            .parse::<Cons<CommaDelimitedVec<CrateArg>, EndOfStream>>()
            .map_err(|_| {
                Diagnostic::new(
                    ExpansionErrorKind::InvalidArguments,
                    "invalid #[shape] arguments: expected `crate = path`",
                    span,
                )
            })?;
        for arg in parsed.first.iter() {
            self.crate_path = arg.value.path.to_token_stream();
        }
        Ok(())
    }
}

keyword! {
    KCrate = "crate";
    KCapability = "capability";
    KTypes = "types";
}

operator! {
    Equals = "=";
}

unsynn! {
    /// One argument of `#[animatable(...)]`.
    enum AnimatableArg {
        Crate(CrateArg),
        Capability(CapabilityArg),
        Types(TypesArg),
    }

    /// `crate = ::some::path`
    struct CrateArg {
        _kw: KCrate,
        _eq: Equals,
        path: PathTokens,
    }

    /// `capability = Shape`
    struct CapabilityArg {
        _kw: KCapability,
        _eq: Equals,
        name: Ident,
    }

    /// `types(f32, f64)`
    struct TypesArg {
        _kw: KTypes,
        list: ParenthesisGroupContaining<CommaDelimitedVec<PathTokens>>,
    }
}
