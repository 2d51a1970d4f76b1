//! Hand-written wire types for the `cartLinesDiscountsGenerateRun` target.
//!
//! Field names follow the host schema; serde renames keep the Rust side
//! snake_case. The output side carries the full discount-value surface of
//! the target even though only percentages are emitted here.

#![allow(dead_code)]

pub type Boolean = bool;
pub type Float = f64;
pub type Int = i64;
pub type ID = String;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

// ----------------------------------------------------------------------------
// Input
// ----------------------------------------------------------------------------

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CartInput {
    pub cart: Cart,
    #[serde(default)]
    pub shop: Shop,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CartLine {
    pub id: ID,
    pub quantity: Int,
    #[serde(default)]
    pub merchandise: Option<Merchandise>,
}

impl CartLine {
    /// The referenced product id, when the merchandise data is complete.
    pub fn product_id(&self) -> Option<&str> {
        self.merchandise
            .as_ref()?
            .product
            .as_ref()
            .map(|product| product.id.as_str())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Merchandise {
    #[serde(default)]
    pub product: Option<Product>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Product {
    pub id: ID,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Shop {
    #[serde(default)]
    pub metafield: Option<Metafield>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Metafield {
    pub value: Option<String>,
}

// ----------------------------------------------------------------------------
// Output
// ----------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
pub struct CartLinesDiscountsGenerateRunResult {
    pub operations: Vec<CartOperation>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "camelCase"))]
pub enum CartOperation {
    ProductDiscountsAdd(ProductDiscountsAddOperation),
}

#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "camelCase"))]
pub struct ProductDiscountsAddOperation {
    pub candidates: Vec<ProductDiscountCandidate>,
    pub selection_strategy: ProductDiscountSelectionStrategy,
}

/// How the host picks among a line's candidates. Only one candidate is ever
/// produced per line here, so `First` is a formality rather than a tie-break.
#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
#[serde(rename_all(
    serialize = "SCREAMING_SNAKE_CASE",
    deserialize = "SCREAMING_SNAKE_CASE"
))]
pub enum ProductDiscountSelectionStrategy {
    First,
    Maximum,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
pub struct ProductDiscountCandidate {
    pub message: Option<String>,
    pub targets: Vec<Target>,
    pub value: Value,
}

#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "camelCase"))]
pub enum Target {
    CartLine(CartLineTarget),
}

/// A `quantity` of `None` applies the discount to the whole line.
#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "camelCase"))]
pub struct CartLineTarget {
    pub id: ID,
    pub quantity: Option<Int>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "camelCase"))]
pub enum Value {
    Percentage(Percentage),
    FixedAmount(FixedAmount),
}

#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
pub struct Percentage {
    pub value: Float,
}

#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "camelCase"))]
pub struct FixedAmount {
    pub applies_to_each_item: Option<Boolean>,
    pub amount: Float,
}

pub static EMPTY_RUN_RESULT: CartLinesDiscountsGenerateRunResult =
    CartLinesDiscountsGenerateRunResult { operations: vec![] };
