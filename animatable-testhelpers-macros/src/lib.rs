#![doc = include_str!("../README.md")]

use quote::quote;
use unsynn::*;

keyword! {
    KFn = "fn";
}

unsynn! {
    /// Attributes, visibility and qualifiers in front of `fn`
    struct UntilFn {
        items: Any<Cons<Except<KFn>, TokenTree>>,
    }

    /// Parameters and return type
    struct UntilBody {
        items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct TestFn {
        until_fn: UntilFn,
        _fn: KFn,
        name: Ident,
        until_body: UntilBody,
        body: BraceGroup,
    }
}

/// `#[test]` that installs the tracing subscriber first.
///
/// ```ignore
/// #[animatable_testhelpers::test]
/// fn expands() {
///     // tracing output from the test shows up in the test log
/// }
/// ```
///
/// Another test attribute can be named as the argument, e.g.
/// `#[animatable_testhelpers::test(tokio::test)]`.
#[proc_macro_attribute]
pub fn test(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let mut it = item.to_token_iter();
    let decl = match it.parse::<TestFn>() {
        Ok(decl) => decl,
        Err(err) => {
            let message = format!("#[animatable_testhelpers::test] expects a function: {err}");
            return quote! { ::core::compile_error!(#message); }.into();
        }
    };

    let test_attr = if attr.is_empty() {
        quote! { #[::core::prelude::rust_2024::test] }
    } else {
        let attr = TokenStream::from(attr);
        quote! { #[#attr] }
    };

    let until_fn = decl.until_fn.items.to_token_stream();
    let name = &decl.name;
    let until_body = decl.until_body.items.to_token_stream();
    let body = decl.body.0.stream();

    quote! {
        #test_attr
        #until_fn fn #name #until_body {
            ::animatable_testhelpers::setup();

            #body
        }
    }
    .into()
}
