//! Checks that run before anything is synthesized.

use crate::{AnimatableConfig, Diagnostic, FieldDescriptor, HostDecl, HostKind, debug};

/// Whether the host may carry `#[animatable]` at all.
///
/// Checks run in a fixed order and the first failure wins: the item must be a
/// struct, it must not be generic, it must derive the required capability, and
/// no included field may be named like the synthesized getter.
///
/// `fields` is the output of [`crate::collect_fields`], so ignored fields are
/// already gone.
pub fn check_eligibility(
    host: &HostDecl,
    fields: &[FieldDescriptor],
    config: &AnimatableConfig,
) -> Result<(), Diagnostic> {
    if let HostKind::Other(_) = host.kind {
        debug!(host = %host.name, kind = ?host.kind, "rejecting non-struct host");
        return Err(Diagnostic::not_a_struct(config, host.name.span()));
    }

    if host.has_generics {
        return Err(Diagnostic::unsupported_generics(config, host.name.span()));
    }

    if !host
        .capabilities
        .iter()
        .any(|c| *c == config.required_capability)
    {
        debug!(
            host = %host.name,
            capability = %config.required_capability,
            "host does not derive the required capability"
        );
        return Err(Diagnostic::missing_capability(config, host.name.span()));
    }

    if let Some(field) = fields
        .iter()
        .find(|f| f.name == config.accessor.as_str())
    {
        return Err(Diagnostic::reserved_name_collision(config, field.name.span()));
    }

    Ok(())
}

/// Every included field must have one of the allowed scalar types.
///
/// Takes the output of [`crate::collect_fields`]. The first offending field
/// ends the check.
pub fn check_types(
    fields: &[FieldDescriptor],
    config: &AnimatableConfig,
) -> Result<(), Diagnostic> {
    for field in fields {
        if config.allows(&field.type_text) {
            continue;
        }
        debug!(field = %field.name, ty = %field.type_text, "unsupported field type");
        return Err(Diagnostic::unsupported_type(
            config,
            &field.name,
            &field.type_text,
            field.name.span(),
        ));
    }
    Ok(())
}

/// How many fields survived collection, which decides the shape of the output.
#[derive(Debug, Clone, Copy)]
pub enum FieldCount<'a> {
    /// Nothing to animate.
    Empty,
    /// The field itself is the animatable data.
    Single(&'a FieldDescriptor),
    /// A companion vector type is needed.
    Multiple(&'a [FieldDescriptor]),
}

impl<'a> FieldCount<'a> {
    /// Classifies a collected field list.
    pub fn of(fields: &'a [FieldDescriptor]) -> Self {
        match fields {
            [] => FieldCount::Empty,
            [single] => FieldCount::Single(single),
            many => FieldCount::Multiple(many),
        }
    }
}
