//! Volume discount configuration.
//!
//! The merchant stores a small JSON document in a shop metafield:
//! `{ "products": [...], "minQty": 2, "percentOff": 10 }`. Everything the
//! merchant can break, this module absorbs: an unparsable document becomes
//! "no configuration", and each field falls back to its documented default
//! independently. A broken configuration must degrade to "no discount",
//! never to a failed evaluation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// Metafield namespace the configuration screen writes to.
pub const METAFIELD_NAMESPACE: &str = "volume_discount";
/// Metafield key under [`METAFIELD_NAMESPACE`].
pub const METAFIELD_KEY: &str = "rules";

pub const DEFAULT_MIN_QTY: i64 = 2;
pub const DEFAULT_PERCENT_OFF: f64 = 10.0;

/// The serialized shape stored in the metafield. This is the write-side
/// type: the configuration screen builds one of these and persists it via
/// [`crate::store::ConfigStore`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeDiscountRules {
    pub products: Vec<String>,
    pub min_qty: i64,
    pub percent_off: f64,
}

/// Effective configuration after normalization, as the evaluation sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct VolumeDiscountConfig {
    pub eligible_products: HashSet<String>,
    pub min_quantity: i64,
    pub percent_off: f64,
}

impl VolumeDiscountConfig {
    /// True when this configuration can never produce a discount: nothing
    /// is eligible, or the percentage is zero or negative.
    pub fn is_inert(&self) -> bool {
        self.eligible_products.is_empty() || self.percent_off <= 0.0
    }
}

/// Read-side shape. Fields are kept as raw JSON so that one mistyped field
/// defaults on its own instead of poisoning the whole document.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawRules {
    products: Option<Json>,
    min_qty: Option<Json>,
    percent_off: Option<Json>,
}

/// Parses the raw metafield value into an effective configuration.
///
/// Returns `None` for an absent or unparsable value; this is the
/// "no configuration" sentinel, not an error. Parse failures are reported
/// through [`crate::log!`] and otherwise swallowed.
pub fn parse_config(value: Option<&str>) -> Option<VolumeDiscountConfig> {
    let raw: RawRules = match serde_json::from_str(value?) {
        Ok(raw) => raw,
        Err(err) => {
            crate::log!("failed to parse volume discount config: {err}");
            return None;
        }
    };
    Some(normalize(raw))
}

/// Applies the documented defaults field by field, in one place, decoupled
/// from parsing. A non-positive `minQty` is treated the same as a missing
/// one.
fn normalize(raw: RawRules) -> VolumeDiscountConfig {
    let eligible_products = raw
        .products
        .as_ref()
        .and_then(Json::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Json::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();
    let min_quantity = raw
        .min_qty
        .as_ref()
        .and_then(Json::as_i64)
        .filter(|qty| *qty >= 1)
        .unwrap_or(DEFAULT_MIN_QTY);
    let percent_off = raw
        .percent_off
        .as_ref()
        .and_then(Json::as_f64)
        .unwrap_or(DEFAULT_PERCENT_OFF);

    VolumeDiscountConfig {
        eligible_products,
        min_quantity,
        percent_off,
    }
}
