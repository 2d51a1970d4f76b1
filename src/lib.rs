//! Volume discount Shopify Function.
//!
//! Applies a percentage discount to cart lines whose product appears in a
//! merchant-configured list and whose quantity meets a configured minimum.
//! The configuration lives in a shop metafield
//! (namespace [`config::METAFIELD_NAMESPACE`], key [`config::METAFIELD_KEY`])
//! and is written by the merchant-facing configuration screen through the
//! [`store::ConfigStore`] contract.
//!
//! The evaluation itself is [`run::cart_lines_discounts_generate_run`]: a
//! pure function from the invocation input to the operations the host
//! applies. It never fails — malformed configuration degrades to "no
//! discount" rather than blocking checkout.

pub mod config;
pub mod run;
pub mod schema;
pub mod store;

pub mod prelude {
    pub use crate::config::*;
    pub use crate::log;
    pub use crate::run::*;
    pub use crate::schema::*;
}

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Runs the given function `f` with the serialized invocation payload,
/// returning its output. This function is provided as a helper when writing
/// tests.
pub fn run_function_with_input<F, P, O>(f: F, payload: &str) -> Result<O>
where
    P: for<'de> serde::Deserialize<'de>,
    F: Fn(P) -> O,
{
    let input: P = serde_json::from_str(payload)?;
    Ok(f(input))
}

/// Writes a line to stderr, the side-channel the host surfaces as function
/// logs. Stdout is reserved for the function result.
#[macro_export]
macro_rules! log {
    ($($args:tt)*) => {
        {
            use std::io::Write;
            let _ = writeln!(std::io::stderr(), $($args)*);
        }
    };
}
