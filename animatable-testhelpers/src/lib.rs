#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use animatable_testhelpers_macros::test;

use proc_macro2::TokenStream;
use quote::ToTokens;
use std::sync::LazyLock;
use std::time::Instant;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the `Targets` filter for test output.
pub const LOG_ENV: &str = "ANIMATABLE_LOG";

/// Crate whose events are shown when [`LOG_ENV`] is unset.
const EXPANSION_TARGET: &str = "animatable_macros_impl";

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

struct Uptime;

impl FormatTime for Uptime {
    fn format_time(&self, w: &mut Writer<'_>) -> core::fmt::Result {
        let elapsed = START_TIME.elapsed();
        write!(w, "{:4}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis())
    }
}

/// The filter used when [`LOG_ENV`] is unset or does not parse: every event
/// from the expansion crate, warnings from everything else.
fn default_filter() -> Targets {
    Targets::new()
        .with_target(EXPANSION_TARGET, LevelFilter::TRACE)
        .with_default(LevelFilter::WARN)
}

fn filter_from(directives: Option<&str>) -> Targets {
    directives
        .and_then(|s| s.parse::<Targets>().ok())
        .unwrap_or_else(default_filter)
}

static SUBSCRIBER_INIT: LazyLock<bool> = LazyLock::new(|| {
    let _ = *START_TIME;

    let filter = filter_from(std::env::var(LOG_ENV).ok().as_deref());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_timer(Uptime)
                .with_target(false)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_test_writer()
                .compact(),
        )
        .with(filter)
        .try_init()
        .is_ok()
});

/// Installs the tracing subscriber for tests, once per process.
///
/// Returns whether this process ended up with our subscriber; `false` means
/// another global subscriber was installed first. Later calls return the same
/// answer without doing anything.
pub fn setup() -> bool {
    *SUBSCRIBER_INIT
}

/// Asserts that two token streams print identically.
///
/// Both sides go through `to_string`, so spacing in the expected `quote!`
/// does not matter.
#[track_caller]
pub fn assert_tokens_eq(actual: &impl ToTokens, expected: TokenStream) {
    let actual = actual.to_token_stream().to_string();
    let expected = expected.to_string();
    assert!(
        actual == expected,
        "generated tokens differ\n  actual: {actual}\nexpected: {expected}"
    );
}

/// Asserts that `needle` appears somewhere in the printed `haystack`.
#[track_caller]
pub fn assert_tokens_contain(haystack: &impl ToTokens, needle: TokenStream) {
    let haystack = haystack.to_token_stream().to_string();
    let needle = needle.to_string();
    assert!(
        haystack.contains(&needle),
        "generated tokens do not contain `{needle}`\n{haystack}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;
    use std::prelude::rust_2024::test;

    #[test]
    fn setup_is_idempotent() {
        let first = setup();
        assert_eq!(setup(), first);
    }

    #[test]
    fn unset_or_garbage_filter_falls_back_to_the_expansion_crate() {
        let expected = default_filter().to_string();
        assert_eq!(filter_from(None).to_string(), expected);
        assert_eq!(filter_from(Some("animatable_macros_impl=loud")).to_string(), expected);
        assert!(expected.contains(EXPANSION_TARGET), "{expected}");
    }

    #[test]
    fn filter_directives_are_honoured() {
        let filter = filter_from(Some("animatable_macros_impl=debug"));
        assert_eq!(filter.to_string(), "animatable_macros_impl=debug");
    }

    #[test]
    fn token_comparison_ignores_quote_spacing() {
        let generated = quote! { impl Shape for Circle {} };
        assert_tokens_eq(&generated, quote! { impl Shape   for Circle { } });
        assert_tokens_contain(&generated, quote! { Shape for Circle });
    }

    #[test]
    #[should_panic(expected = "do not contain")]
    fn missing_tokens_fail() {
        assert_tokens_contain(&quote! { struct Circle; }, quote! { enum });
    }
}
