//! Unsynn grammar for the items `#[animatable]` is placed on, and the
//! conversion from parsed tokens into a [`HostDecl`].
//!
//! The grammar only recognises what the pass needs: outer attributes, the
//! visibility, the item keyword and, for structs, the field list. Everything
//! else is carried through verbatim.

use proc_macro2::{Delimiter, Spacing, Span, TokenStream, TokenTree};
use unsynn::*;
// unsynn exports a one-parameter `Result` alias
use core::result::Result;

use crate::{AnimatableConfig, Diagnostic, ExpansionErrorKind, FieldDecl, trace};

keyword! {
    KPub = "pub";
    KDerive = "derive";
}

unsynn! {
    /// Visibility: `pub`, `pub(crate)`, `pub(in path)` or nothing
    enum Vis {
        PubIn(Cons<KPub, ParenthesisGroup>),
        Pub(KPub),
    }

    /// An outer attribute: `#[...]`
    struct Attribute {
        _pound: Pound,
        body: BracketGroup,
    }

    /// Any item. Only the keyword decides what happens next.
    struct ItemDecl {
        attributes: Vec<Attribute>,
        vis: Option<Vis>,
        keyword: Ident,
        rest: Vec<TokenTree>,
    }

    /// What follows `struct`: the name, then generics, a where clause or the body
    struct StructTail {
        name: Ident,
        rest: Vec<TokenTree>,
    }

    /// Struct body: braces with named fields, parentheses with tuple fields, or a unit struct
    enum StructBody {
        Named(BraceGroup),
        Tuple(Cons<ParenthesisGroup, Semicolon>),
        Unit(Semicolon),
    }

    /// `#[attrs] pub name: Type`, one entry of a braced body
    struct NamedField {
        attributes: Vec<Attribute>,
        vis: Option<Vis>,
        name: Ident,
        _colon: Colon,
        ty: Vec<TokenTree>,
    }

    /// `#[attrs] pub Type`, one entry of a parenthesized body
    struct TupleField {
        attributes: Vec<Attribute>,
        vis: Option<Vis>,
        ty: Vec<TokenTree>,
    }

    /// A path without generic arguments, up to the next comma
    pub(crate) struct PathTokens {
        tokens: Many<Cons<Except<Comma>, TokenTree>>,
    }

    /// `derive(A, b::C)`
    struct DeriveList {
        _kw: KDerive,
        traits: ParenthesisGroupContaining<CommaDelimitedVec<PathTokens>>,
    }

    /// `shape(...)`, the body of a helper attribute with arguments
    struct HelperArgs {
        name: Ident,
        args: ParenthesisGroup,
    }

    /// `animatable(ignore)` as it appears on a field
    struct MarkerList {
        name: Ident,
        markers: ParenthesisGroupContaining<CommaDelimitedVec<Ident>>,
    }
}

/// What kind of item the attribute was placed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostKind {
    /// A `struct` item.
    Struct,
    /// Anything else, with the keyword that introduced it (`enum`, `fn`, ...).
    Other(String),
}

/// The host declaration as the pass sees it.
#[derive(Debug, Clone)]
pub struct HostDecl {
    /// Struct or not.
    pub kind: HostKind,
    /// Name of the item. Diagnostics about the host point here.
    pub name: Ident,
    /// Visibility tokens, reused for the companion vector type.
    pub vis: TokenStream,
    /// Whether generic parameters follow the name.
    pub has_generics: bool,
    /// Last path segment of every trait named in a `#[derive(...)]` attribute.
    pub capabilities: Vec<String>,
    /// Stored fields in declaration order.
    pub fields: Vec<FieldDecl>,
}

/// Parses the item an `#[animatable]` attribute is attached to.
///
/// Non-struct items and generic structs still produce a [`HostDecl`]; rejecting
/// them is up to the validator. Errors are returned only for tokens the grammar
/// cannot make sense of and for malformed field markers.
pub fn parse_host(item: TokenStream, config: &AnimatableConfig) -> Result<HostDecl, Diagnostic> {
    let item = flatten_transparent_groups(item);
    let mut it = item.to_token_iter();
    let decl = it
        .parse::<Cons<ItemDecl, EndOfStream>>()
        .map_err(|err| {
            Diagnostic::internal(format!("could not parse item: {err}"), Span::call_site())
        })?
        .first;

    let capabilities = derived_traits(&decl.attributes);
    let vis = decl
        .vis
        .as_ref()
        .map(|v| v.to_token_stream())
        .unwrap_or_default();

    if decl.keyword != "struct" {
        let name = decl
            .rest
            .iter()
            .find_map(|tt| match tt {
                TokenTree::Ident(ident) => Some(ident.clone()),
                _ => None,
            })
            .unwrap_or_else(|| decl.keyword.clone());
        trace!(keyword = %decl.keyword, name = %name, "host is not a struct");
        return Ok(HostDecl {
            kind: HostKind::Other(decl.keyword.to_string()),
            name,
            vis,
            has_generics: false,
            capabilities,
            fields: Vec::new(),
        });
    }

    let rest: TokenStream = decl.rest.into_iter().collect();
    let mut it = rest.to_token_iter();
    let tail = it
        .parse::<Cons<StructTail, EndOfStream>>()
        .map_err(|err| {
            Diagnostic::internal(format!("could not parse struct: {err}"), Span::call_site())
        })?
        .first;

    let has_generics = matches!(
        tail.rest.first(),
        Some(TokenTree::Punct(punct)) if punct.as_char() == '<'
    );
    if has_generics {
        return Ok(HostDecl {
            kind: HostKind::Struct,
            name: tail.name,
            vis,
            has_generics: true,
            capabilities,
            fields: Vec::new(),
        });
    }

    let body: TokenStream = tail.rest.into_iter().collect();
    let mut it = body.to_token_iter();
    let body = it
        .parse::<Cons<StructBody, EndOfStream>>()
        .map_err(|err| {
            Diagnostic::internal(
                format!("could not parse the fields of `{}`: {err}", tail.name),
                tail.name.span(),
            )
        })?
        .first;

    let mut fields = Vec::new();
    match body {
        StructBody::Named(group) => {
            for entry in split_top_level(group.0.stream()) {
                let mut it = entry.to_token_iter();
                let field = it
                    .parse::<Cons<NamedField, EndOfStream>>()
                    .map_err(|err| {
                        Diagnostic::internal(
                            format!("could not parse a field of `{}`: {err}", tail.name),
                            tail.name.span(),
                        )
                    })?
                    .first;
                fields.push(FieldDecl {
                    name: Some(field.name.clone()),
                    ty: Some(field.ty.into_iter().collect()),
                    markers: field_markers(&field.attributes, config)?,
                });
            }
        }
        StructBody::Tuple(tuple) => {
            for entry in split_top_level(tuple.first.0.stream()) {
                let mut it = entry.to_token_iter();
                let field = it
                    .parse::<Cons<TupleField, EndOfStream>>()
                    .map_err(|err| {
                        Diagnostic::internal(
                            format!("could not parse a field of `{}`: {err}", tail.name),
                            tail.name.span(),
                        )
                    })?
                    .first;
                fields.push(FieldDecl {
                    name: None,
                    ty: Some(field.ty.into_iter().collect()),
                    markers: field_markers(&field.attributes, config)?,
                });
            }
        }
        StructBody::Unit(_) => {}
    }

    trace!(
        host = %tail.name,
        fields = fields.len(),
        capabilities = ?capabilities,
        "parsed host struct"
    );

    Ok(HostDecl {
        kind: HostKind::Struct,
        name: tail.name,
        vis,
        has_generics: false,
        capabilities,
        fields,
    })
}

/// Splits a field list at the commas that are not nested inside `<...>`.
///
/// Empty entries (a trailing comma) are dropped.
fn split_top_level(stream: TokenStream) -> Vec<TokenStream> {
    let mut entries = Vec::new();
    let mut current = Vec::new();
    let mut depth = 0usize;
    let mut after_dash = false;
    for tt in stream {
        let mut dash = false;
        if let TokenTree::Punct(punct) = &tt {
            match punct.as_char() {
                '<' => depth += 1,
                // `->` in `Fn(u8) -> u8` does not close an angle bracket
                '>' if !after_dash => depth = depth.saturating_sub(1),
                '-' => dash = punct.spacing() == Spacing::Joint,
                ',' if depth == 0 => {
                    if !current.is_empty() {
                        entries.push(current.drain(..).collect());
                    }
                    after_dash = false;
                    continue;
                }
                _ => {}
            }
        }
        after_dash = dash;
        current.push(tt);
    }
    if !current.is_empty() {
        entries.push(current.into_iter().collect());
    }
    entries
}

/// Last path segment of every trait listed in `#[derive(...)]` attributes.
fn derived_traits(attributes: &[Attribute]) -> Vec<String> {
    let mut traits = Vec::new();
    for attr in attributes {
        let mut it = attr.body.0.stream().to_token_iter();
        let Ok(list) = it.parse::<Cons<DeriveList, EndOfStream>>() else {
            continue;
        };
        for path in list.first.traits.content.iter() {
            let last = path
                .value
                .to_token_stream()
                .into_iter()
                .filter_map(|tt| match tt {
                    TokenTree::Ident(ident) => Some(ident.to_string()),
                    _ => None,
                })
                .last();
            if let Some(last) = last {
                traits.push(last);
            }
        }
    }
    traits
}

/// The identifiers inside `#[animatable(...)]` on a field.
fn field_markers(
    attributes: &[Attribute],
    config: &AnimatableConfig,
) -> Result<Vec<Ident>, Diagnostic> {
    let mut markers = Vec::new();
    for attr in attributes {
        let stream = attr.body.0.stream();
        let Some(TokenTree::Ident(first)) = stream.clone().into_iter().next() else {
            continue;
        };
        if first != config.attribute.as_str() {
            continue;
        }

        let mut it = stream.to_token_iter();
        let list = it
            .parse::<Cons<MarkerList, EndOfStream>>()
            .map_err(|_| {
                Diagnostic::invalid_arguments(
                    config,
                    format!("expected `{}` on a field", config.marker_usage()),
                    first.span(),
                )
            })?
            .first;

        for marker in list.markers.content.iter().map(|d| &d.value) {
            if *marker != config.ignore_marker.as_str() {
                return Err(Diagnostic::invalid_arguments(
                    config,
                    format!(
                        "unknown field marker `{marker}` in `{}`, expected `{}`",
                        list.name,
                        config.ignore_marker
                    ),
                    marker.span(),
                ));
            }
            markers.push(marker.clone());
        }
    }
    Ok(markers)
}

/// Removes every `#[animatable(...)]` attribute from `item`, at any depth.
///
/// Field markers are inert for rustc: the attribute macro consumes them, and the
/// host is re-emitted without them.
pub fn strip_markers(item: TokenStream, attribute: &str) -> TokenStream {
    let mut out = Vec::new();
    let mut trees = item.into_iter().peekable();
    while let Some(tt) = trees.next() {
        match tt {
            TokenTree::Punct(pound) if pound.as_char() == '#' => {
                let is_marker = matches!(
                    trees.peek(),
                    Some(TokenTree::Group(group))
                        if group.delimiter() == Delimiter::Bracket
                            && matches!(
                                group.stream().into_iter().next(),
                                Some(TokenTree::Ident(ident)) if ident == attribute
                            )
                );
                if is_marker {
                    trees.next();
                } else {
                    out.push(TokenTree::Punct(pound));
                }
            }
            TokenTree::Group(group) => {
                let inner = strip_markers(group.stream(), attribute);
                let mut stripped = proc_macro2::Group::new(group.delimiter(), inner);
                stripped.set_span(group.span());
                out.push(TokenTree::Group(stripped));
            }
            other => out.push(other),
        }
    }
    out.into_iter().collect()
}

/// Renders type tokens as their textual identity, e.g. `Vec<f64>` or `&'a str`.
///
/// This is the only notion of type equality the pass has: two types are the
/// same if they render to the same text.
pub fn type_text(ty: &TokenStream) -> String {
    let mut out = String::new();
    write_type_text(ty, &mut out);
    out
}

fn write_type_text(ty: &TokenStream, out: &mut String) {
    let mut prev_word = false;
    for tt in ty.clone() {
        match tt {
            TokenTree::Ident(ident) => {
                if prev_word {
                    out.push(' ');
                }
                out.push_str(&ident.to_string());
                prev_word = true;
            }
            TokenTree::Literal(lit) => {
                if prev_word {
                    out.push(' ');
                }
                out.push_str(&lit.to_string());
                prev_word = true;
            }
            TokenTree::Punct(punct) => {
                out.push(punct.as_char());
                if punct.as_char() == ',' {
                    out.push(' ');
                }
                prev_word = false;
            }
            TokenTree::Group(group) => {
                let (open, close) = match group.delimiter() {
                    Delimiter::Parenthesis => ("(", ")"),
                    Delimiter::Bracket => ("[", "]"),
                    Delimiter::Brace => ("{", "}"),
                    Delimiter::None => ("", ""),
                };
                out.push_str(open);
                write_type_text(&group.stream(), out);
                out.push_str(close);
                prev_word = false;
            }
        }
    }
}

/// Replaces every invisible group (`Delimiter::None`) by its contents.
///
/// `macro_rules!` hands captured `$vis:vis` or `$ty:ty` fragments over wrapped
/// in such groups; the grammar wants the tokens a user would have typed.
pub fn flatten_transparent_groups(input: TokenStream) -> TokenStream {
    let mut out = TokenStream::new();
    for tt in input {
        match tt {
            TokenTree::Group(group) => {
                let inner = flatten_transparent_groups(group.stream());
                if group.delimiter() == Delimiter::None {
                    out.extend(inner);
                } else {
                    let mut rebuilt = proc_macro2::Group::new(group.delimiter(), inner);
                    rebuilt.set_span(group.span());
                    out.extend([TokenTree::Group(rebuilt)]);
                }
            }
            other => out.extend([other]),
        }
    }
    out
}

/// Arguments of every outer `#[name(...)]` attribute of `item`, in order.
///
/// `#[name]` or `#[name = ...]` is reported as [`InvalidArguments`].
///
/// [`InvalidArguments`]: crate::ExpansionErrorKind::InvalidArguments
pub fn outer_attribute_args(
    item: TokenStream,
    name: &str,
) -> Result<Vec<TokenStream>, Diagnostic> {
    let item = flatten_transparent_groups(item);
    let mut it = item.to_token_iter();
    let decl = it
        .parse::<Cons<ItemDecl, EndOfStream>>()
        .map_err(|err| {
            Diagnostic::internal(format!("could not parse item: {err}"), Span::call_site())
        })?
        .first;

    let mut found = Vec::new();
    for attr in &decl.attributes {
        let stream = attr.body.0.stream();
        let Some(TokenTree::Ident(first)) = stream.clone().into_iter().next() else {
            continue;
        };
        if first != name {
            continue;
        }
        let mut it = stream.to_token_iter();
        let helper = it.parse::<Cons<HelperArgs, EndOfStream>>().map_err(|_| {
            Diagnostic::new(
                ExpansionErrorKind::InvalidArguments,
                format!("expected `#[{name}(...)]`"),
                first.span(),
            )
        })?;
        found.push(helper.first.args.0.stream());
    }
    Ok(found)
}
