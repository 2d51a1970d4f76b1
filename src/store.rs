//! Shop-scoped configuration storage contract.
//!
//! Persistence belongs to the host platform (a `json` metafield under
//! [`crate::config::METAFIELD_NAMESPACE`] / [`crate::config::METAFIELD_KEY`],
//! owned by the shop). This module captures the contract the configuration
//! screen relies on: fetch the last stored value, validate a submitted form,
//! and save a new rule set, surfacing the store's field-level errors
//! verbatim. Last write wins; no retry, no staleness guarantee.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::{VolumeDiscountRules, DEFAULT_MIN_QTY, DEFAULT_PERCENT_OFF};
use crate::Result;

/// Practical bounds enforced by the configuration screen. The evaluation
/// side does not assume them.
pub const MIN_QTY_RANGE: std::ops::RangeInclusive<i64> = 2..=100;
pub const PERCENT_OFF_RANGE: std::ops::RangeInclusive<i64> = 1..=100;

/// A field-level save error, displayed to the merchant as-is.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserError {
    pub field: String,
    pub message: String,
}

impl UserError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        UserError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Outcome of a save attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum SaveOutcome {
    Saved(VolumeDiscountRules),
    Rejected(Vec<UserError>),
}

impl SaveOutcome {
    /// The shape the configuration screen's action returns:
    /// `{ success, config }` or `{ success: false, errors }`.
    pub fn to_response(&self) -> serde_json::Value {
        match self {
            SaveOutcome::Saved(rules) => json!({ "success": true, "config": rules }),
            SaveOutcome::Rejected(errors) => json!({ "success": false, "errors": errors }),
        }
    }
}

/// Storage the configuration screen reads and writes through. Implementations
/// talk to the host's metafield API; tests use [`InMemoryConfigStore`].
pub trait ConfigStore {
    /// The raw value last stored for this shop, or `None` if the shop was
    /// never configured.
    fn fetch_config(&self, shop_id: &str) -> Result<Option<String>>;

    /// Atomically replaces the stored rules. Validation failures come back
    /// as [`SaveOutcome::Rejected`]; transport failures as `Err`.
    fn save_config(&mut self, shop_id: &str, rules: &VolumeDiscountRules) -> Result<SaveOutcome>;
}

/// The configuration form as submitted: `productIds` is a JSON-encoded
/// array and the numeric fields arrive as strings. Missing numerics fall
/// back to the screen's defaults.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigForm {
    #[serde(default)]
    pub product_ids: Option<String>,
    #[serde(default)]
    pub percent_off: Option<String>,
    #[serde(default)]
    pub min_qty: Option<String>,
    pub shop_id: String,
}

impl ConfigForm {
    /// Coerces the submitted fields into the stored rules shape, leniently:
    /// an unparsable field takes its default, matching the screen's
    /// behavior.
    pub fn into_rules(self) -> VolumeDiscountRules {
        let products = self
            .product_ids
            .as_deref()
            .and_then(|ids| serde_json::from_str(ids).ok())
            .unwrap_or_default();
        let percent_off = self
            .percent_off
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(|value| value as f64)
            .unwrap_or(DEFAULT_PERCENT_OFF);
        let min_qty = self
            .min_qty
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_MIN_QTY);

        VolumeDiscountRules {
            products,
            min_qty,
            percent_off,
        }
    }
}

/// Checks the screen's bounds before a save. An empty error list means the
/// rules are storable.
pub fn validate_rules(rules: &VolumeDiscountRules) -> Vec<UserError> {
    let mut errors = vec![];

    if rules.products.is_empty() {
        errors.push(UserError::new(
            "products",
            "Select at least one product for the discount",
        ));
    }
    if !MIN_QTY_RANGE.contains(&rules.min_qty) {
        errors.push(UserError::new(
            "minQty",
            format!(
                "Minimum quantity must be between {} and {}",
                MIN_QTY_RANGE.start(),
                MIN_QTY_RANGE.end()
            ),
        ));
    }
    let whole_percent = rules.percent_off.trunc() as i64;
    if rules.percent_off.fract() != 0.0 || !PERCENT_OFF_RANGE.contains(&whole_percent) {
        errors.push(UserError::new(
            "percentOff",
            format!(
                "Discount percentage must be a whole number between {} and {}",
                PERCENT_OFF_RANGE.start(),
                PERCENT_OFF_RANGE.end()
            ),
        ));
    }

    errors
}

/// Last-write-wins map keyed by shop id. Backs the tests and demonstrates
/// the contract without the host's metafield API.
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    values: HashMap<String, String>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn fetch_config(&self, shop_id: &str) -> Result<Option<String>> {
        Ok(self.values.get(shop_id).cloned())
    }

    fn save_config(&mut self, shop_id: &str, rules: &VolumeDiscountRules) -> Result<SaveOutcome> {
        let errors = validate_rules(rules);
        if !errors.is_empty() {
            return Ok(SaveOutcome::Rejected(errors));
        }
        self.values
            .insert(shop_id.to_string(), serde_json::to_string(rules)?);
        Ok(SaveOutcome::Saved(rules.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    const SHOP_ID: &str = "gid://shopify/Shop/1";

    fn form(product_ids: &str, percent_off: &str, min_qty: &str) -> ConfigForm {
        ConfigForm {
            product_ids: Some(product_ids.to_string()),
            percent_off: Some(percent_off.to_string()),
            min_qty: Some(min_qty.to_string()),
            shop_id: SHOP_ID.to_string(),
        }
    }

    #[test]
    fn form_coerces_submitted_fields() {
        let rules = form(r#"["gid://shopify/Product/1"]"#, "15", "3").into_rules();
        assert_eq!(
            rules,
            VolumeDiscountRules {
                products: vec!["gid://shopify/Product/1".to_string()],
                min_qty: 3,
                percent_off: 15.0,
            }
        );
    }

    #[test]
    fn form_falls_back_to_screen_defaults() {
        let rules = ConfigForm {
            product_ids: None,
            percent_off: None,
            min_qty: Some("lots".to_string()),
            shop_id: SHOP_ID.to_string(),
        }
        .into_rules();
        assert!(rules.products.is_empty());
        assert_eq!(rules.min_qty, DEFAULT_MIN_QTY);
        assert_eq!(rules.percent_off, DEFAULT_PERCENT_OFF);
    }

    #[test]
    fn validation_flags_each_field() {
        let rules = VolumeDiscountRules {
            products: vec![],
            min_qty: 1,
            percent_off: 150.0,
        };
        let errors = validate_rules(&rules);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["products", "minQty", "percentOff"]);
    }

    #[test]
    fn valid_rules_pass_validation() {
        let rules = form(r#"["gid://shopify/Product/1"]"#, "100", "2").into_rules();
        assert!(validate_rules(&rules).is_empty());
    }

    #[test]
    fn saved_rules_are_fetchable_and_parsable() {
        let mut store = InMemoryConfigStore::new();
        assert_eq!(store.fetch_config(SHOP_ID).unwrap(), None);

        let rules = form(r#"["gid://shopify/Product/1"]"#, "15", "3").into_rules();
        let outcome = store.save_config(SHOP_ID, &rules).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved(rules.clone()));

        let stored = store.fetch_config(SHOP_ID).unwrap().unwrap();
        let config = parse_config(Some(&stored)).unwrap();
        assert_eq!(config.min_quantity, 3);
        assert_eq!(config.percent_off, 15.0);
        assert!(config.eligible_products.contains("gid://shopify/Product/1"));
    }

    #[test]
    fn rejected_save_leaves_previous_value() {
        let mut store = InMemoryConfigStore::new();
        let good = form(r#"["gid://shopify/Product/1"]"#, "15", "3").into_rules();
        store.save_config(SHOP_ID, &good).unwrap();

        let bad = VolumeDiscountRules {
            products: vec![],
            min_qty: 3,
            percent_off: 15.0,
        };
        let outcome = store.save_config(SHOP_ID, &bad).unwrap();
        assert!(matches!(outcome, SaveOutcome::Rejected(_)));

        let stored = store.fetch_config(SHOP_ID).unwrap().unwrap();
        assert_eq!(stored, serde_json::to_string(&good).unwrap());
    }

    #[test]
    fn save_outcome_response_shapes() {
        let rules = form(r#"["gid://shopify/Product/1"]"#, "15", "3").into_rules();
        let saved = SaveOutcome::Saved(rules).to_response();
        assert_eq!(saved["success"], serde_json::json!(true));
        assert_eq!(saved["config"]["minQty"], serde_json::json!(3));

        let rejected = SaveOutcome::Rejected(vec![UserError::new("minQty", "out of range")])
            .to_response();
        assert_eq!(rejected["success"], serde_json::json!(false));
        assert_eq!(
            rejected["errors"][0],
            serde_json::json!({ "field": "minQty", "message": "out of range" })
        );
    }
}
