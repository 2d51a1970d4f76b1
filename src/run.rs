//! The `cartLinesDiscountsGenerateRun` target.

use crate::config::{self, VolumeDiscountConfig};
use crate::schema::{
    CartInput, CartLine, CartLinesDiscountsGenerateRunResult, CartLineTarget, CartOperation,
    Percentage, ProductDiscountCandidate, ProductDiscountSelectionStrategy,
    ProductDiscountsAddOperation, Target, Value, EMPTY_RUN_RESULT,
};

/// Only one candidate is ever emitted per line, so the selection policy is
/// fixed to "first candidate wins".
const SELECTION_STRATEGY: ProductDiscountSelectionStrategy =
    ProductDiscountSelectionStrategy::First;

/// Decides which cart lines get the volume discount.
///
/// Pure and total: every input maps to a (possibly empty) operation list.
/// Nothing here can fail the evaluation — a malformed configuration, a
/// missing metafield, or incomplete merchandise data all degrade to "no
/// discount" for the affected scope.
pub fn cart_lines_discounts_generate_run(input: CartInput) -> CartLinesDiscountsGenerateRunResult {
    if input.cart.lines.is_empty() {
        return EMPTY_RUN_RESULT.clone();
    }

    let metafield_value = input
        .shop
        .metafield
        .as_ref()
        .and_then(|metafield| metafield.value.as_deref());
    let Some(config) = config::parse_config(metafield_value) else {
        return EMPTY_RUN_RESULT.clone();
    };
    if config.is_inert() {
        return EMPTY_RUN_RESULT.clone();
    }

    let operations = input
        .cart
        .lines
        .iter()
        .filter_map(|line| discount_for_line(line, &config))
        .collect();

    CartLinesDiscountsGenerateRunResult { operations }
}

/// One qualifying line yields exactly one operation targeting that line.
/// Lines without a resolvable product are skipped, not treated as errors.
fn discount_for_line(line: &CartLine, config: &VolumeDiscountConfig) -> Option<CartOperation> {
    let product_id = line.product_id()?;
    if !config.eligible_products.contains(product_id) {
        return None;
    }
    if line.quantity < config.min_quantity {
        return None;
    }

    Some(CartOperation::ProductDiscountsAdd(
        ProductDiscountsAddOperation {
            candidates: vec![ProductDiscountCandidate {
                message: Some(format!(
                    "Buy {}, get {}% off",
                    config.min_quantity, config.percent_off
                )),
                targets: vec![Target::CartLine(CartLineTarget {
                    id: line.id.clone(),
                    quantity: None,
                })],
                value: Value::Percentage(Percentage {
                    value: config.percent_off,
                }),
            }],
            selection_strategy: SELECTION_STRATEGY,
        },
    ))
}
