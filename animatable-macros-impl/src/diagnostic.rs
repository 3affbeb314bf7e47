//! Errors and warnings raised while expanding `#[animatable]`.
//!
//! Errors become spanned `compile_error!` invocations. Warnings have no stable
//! proc-macro API, so they are surfaced as a use of a `#[deprecated]` constant
//! whose note carries the message.

use core::fmt;

use proc_macro2::{Ident, Span, TokenStream};
use quote::{ToTokens, quote_spanned};

use crate::AnimatableConfig;

/// How a diagnostic affects the expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Aborts the expansion of this host. Nothing is synthesized.
    Error,
    /// Reported alongside the (empty) expansion. Compilation continues.
    Warning,
}

/// Every way an expansion can fail or be flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionErrorKind {
    /// The attribute is on an enum, union, function or any other non-struct item.
    NotAStruct,
    /// The struct declares generic parameters.
    UnsupportedGenerics,
    /// The struct does not derive the required capability.
    MissingCapability,
    /// An included field has the same name as the synthesized accessor.
    ReservedNameCollision,
    /// An included field has a type outside the allowed scalar set.
    UnsupportedType,
    /// No animatable field was found, the attribute does nothing.
    RedundantUsage,
    /// The attribute or a field marker has arguments we do not understand.
    InvalidArguments,
    /// A condition that cannot happen unless the pass itself is broken.
    InternalInvariant,
}

impl ExpansionErrorKind {
    /// Severity of diagnostics of this kind.
    pub fn severity(self) -> Severity {
        match self {
            ExpansionErrorKind::RedundantUsage => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A fully formed diagnostic, anchored at a span of the host declaration.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: ExpansionErrorKind,
    /// The text shown to the user.
    pub message: String,
    /// Where rustc points.
    pub span: Span,
}

impl Diagnostic {
    /// Creates a diagnostic of the given kind.
    pub fn new(kind: ExpansionErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
        }
    }

    /// Severity, derived from the kind.
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// True for errors.
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub(crate) fn not_a_struct(config: &AnimatableConfig, span: Span) -> Self {
        Self::new(
            ExpansionErrorKind::NotAStruct,
            format!("{} can only be applied to a struct", config.attribute_usage()),
            span,
        )
    }

    pub(crate) fn unsupported_generics(config: &AnimatableConfig, span: Span) -> Self {
        Self::new(
            ExpansionErrorKind::UnsupportedGenerics,
            format!(
                "{} can only be applied to structs without generic parameters",
                config.attribute_usage()
            ),
            span,
        )
    }

    pub(crate) fn missing_capability(config: &AnimatableConfig, span: Span) -> Self {
        Self::new(
            ExpansionErrorKind::MissingCapability,
            format!(
                "{} can only be applied to structs that derive the {} trait",
                config.attribute_usage(),
                config.required_capability
            ),
            span,
        )
    }

    pub(crate) fn reserved_name_collision(config: &AnimatableConfig, span: Span) -> Self {
        Self::new(
            ExpansionErrorKind::ReservedNameCollision,
            format!(
                "{attr} synthesizes '{accessor}', which collides with the field '{accessor}'.\n\
                 Rename the field or annotate it with '{marker}'",
                attr = config.attribute_usage(),
                accessor = config.accessor,
                marker = config.marker_usage(),
            ),
            span,
        )
    }

    pub(crate) fn unsupported_type(
        config: &AnimatableConfig,
        field: &Ident,
        type_text: &str,
        span: Span,
    ) -> Self {
        let supported = config
            .allowed_types
            .iter()
            .map(|t| format!("'{t}'"))
            .collect::<Vec<_>>()
            .join(", ");
        let marker = config.marker_usage();
        Self::new(
            ExpansionErrorKind::UnsupportedType,
            format!(
                "{marker} is required to ignore unsupported fields.\n\
                 Currently supported types:\n\
                 {supported}\n\
                 Annotate '{field}' with '{marker}':\n\
                 '{marker} {field}: {type_text}'"
            ),
            span,
        )
    }

    pub(crate) fn redundant_usage(config: &AnimatableConfig, span: Span) -> Self {
        Self::new(
            ExpansionErrorKind::RedundantUsage,
            format!(
                "{} has no effect here because no animatable fields have been found. \
                 Consider adding animatable fields to make the attribute meaningful",
                config.attribute_usage()
            ),
            span,
        )
    }

    pub(crate) fn invalid_arguments(
        config: &AnimatableConfig,
        detail: impl fmt::Display,
        span: Span,
    ) -> Self {
        Self::new(
            ExpansionErrorKind::InvalidArguments,
            format!("invalid {} arguments: {detail}", config.attribute_usage()),
            span,
        )
    }

    pub(crate) fn internal(detail: impl fmt::Display, span: Span) -> Self {
        Self::new(
            ExpansionErrorKind::InternalInvariant,
            format!("something went wrong: {detail}"),
            span,
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Diagnostic {}

impl ToTokens for Diagnostic {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let message = &self.message;
        let span = self.span;
        match self.severity() {
            Severity::Error => tokens.extend(quote_spanned! { span =>
                ::core::compile_error!(#message);
            }),
            Severity::Warning => {
                let warning = Ident::new("animatable_warning", span);
                tokens.extend(quote_spanned! { span =>
                    const _: () = {
                        #[deprecated(note = #message)]
                        #[allow(non_upper_case_globals)]
                        const animatable_warning: () = ();
                        #[allow(clippy::let_unit_value)]
                        let _ = #warning;
                    };
                })
            }
        }
    }
}
