//! Adapters: bridges from external schema validators into the rule contract.
//!
//! An adapter is any function from a value to an optional error message,
//! sync or async, or a detailed variant returning a full
//! [`ValidationResult`]. Failures inside an adapter (an external library
//! panicking) are caught at this boundary and translated to a generic
//! message; they never propagate into widget code.

use std::fmt::Display;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use super::engine::ValidationResult;
use super::rules::CustomRule;

/// Message substituted when an adapter fails without a structured message.
pub const FALLBACK_MESSAGE: &str = "Invalid value";

// ---------------------------------------------------------------------------
// Sync adapters
// ---------------------------------------------------------------------------

/// Wrap a sync adapter function as a custom rule, catching panics.
pub fn sync_adapter<F>(f: F) -> CustomRule
where
    F: Fn(&str) -> Option<String> + 'static,
{
    Rc::new(move |value: &str| {
        match catch_unwind(AssertUnwindSafe(|| f(value))) {
            Ok(outcome) => outcome,
            Err(_) => Some(FALLBACK_MESSAGE.to_owned()),
        }
    })
}

/// Wrap a `Result`-returning adapter (the common external-library shape) as
/// a custom rule. The error's display form becomes the message; panics fall
/// back to the generic message.
pub fn result_adapter<F, E>(f: F) -> CustomRule
where
    F: Fn(&str) -> Result<(), E> + 'static,
    E: Display,
{
    sync_adapter(move |value| f(value).err().map(|e| e.to_string()))
}

/// Wrap a detailed adapter returning a full result. Panics translate to a
/// single-fallback-message invalid result.
pub fn detailed_adapter<F>(f: F) -> impl Fn(&str) -> ValidationResult
where
    F: Fn(&str) -> ValidationResult + 'static,
{
    move |value: &str| {
        catch_unwind(AssertUnwindSafe(|| f(value)))
            .unwrap_or_else(|_| ValidationResult::invalid(vec![FALLBACK_MESSAGE.to_owned()]))
    }
}

// ---------------------------------------------------------------------------
// Async adapters
// ---------------------------------------------------------------------------

/// An async adapter: resolves to an optional error message. The caller must
/// await the result before reading it.
pub type AsyncRule = Rc<dyn Fn(String) -> Pin<Box<dyn Future<Output = Option<String>>>>>;

/// Wrap an async adapter function.
pub fn async_adapter<F, Fut>(f: F) -> AsyncRule
where
    F: Fn(String) -> Fut + 'static,
    Fut: Future<Output = Option<String>> + 'static,
{
    Rc::new(move |value| Box::pin(f(value)))
}

/// Evaluate a value against an async adapter, translating failures.
pub async fn evaluate_async(value: &str, rule: &AsyncRule) -> ValidationResult {
    let future = match catch_unwind(AssertUnwindSafe(|| rule(value.to_owned()))) {
        Ok(future) => future,
        Err(_) => return ValidationResult::invalid(vec![FALLBACK_MESSAGE.to_owned()]),
    };
    match CatchPanic(future).await {
        Ok(Some(message)) => ValidationResult::invalid(vec![message]),
        Ok(None) => ValidationResult::valid(),
        Err(()) => ValidationResult::invalid(vec![FALLBACK_MESSAGE.to_owned()]),
    }
}

/// Future wrapper that converts a panicking poll into an error outcome. The
/// inner future is already boxed, so the projection stays safe.
struct CatchPanic<F>(F);

impl<F: Future + Unpin> Future for CatchPanic<F> {
    type Output = Result<F::Output, ()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let inner = Pin::new(&mut self.0);
        match catch_unwind(AssertUnwindSafe(|| inner.poll(cx))) {
            Ok(Poll::Pending) => Poll::Pending,
            Ok(Poll::Ready(output)) => Poll::Ready(Ok(output)),
            Err(_) => Poll::Ready(Err(())),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
