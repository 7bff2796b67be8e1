//! Per-row pricing arithmetic. Everything here is pure and total: missing or
//! impossible inputs degrade to `None`, they never become errors.

use crate::round_or_none;

/// One exported result row, with the fixed column set of the pricing table.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Row {
    #[serde(rename = "Descrição")]
    pub description: Option<String>,
    #[serde(rename = "Custo")]
    pub cost: Option<f64>,
    #[serde(rename = "Qtd")]
    pub quantity: f64,
    #[serde(rename = "Preço_base")]
    pub base_price: Option<f64>,
    #[serde(rename = "Preço_final")]
    pub final_price: Option<f64>,
    #[serde(rename = "Lucro_un")]
    pub unit_profit: Option<f64>,
    #[serde(rename = "Lucro_%")]
    pub profit_percent: Option<f64>,
}

/// The intermediate row between base pricing and the global adjustments,
/// the stage that manual edits operate on.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub description: Option<String>,
    pub cost: Option<f64>,
    pub quantity: f64,
    pub base_price: Option<f64>,
}

/// The outcome of pricing a single row from cost and percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Base {
    pub price: Option<f64>,
    pub unit_profit: Option<f64>,
    pub profit_percent: Option<f64>,
}

/// Derive the sale price from the cost, preferring margin over markup.
///
/// Margin is profit as a share of the sale price, so `price = cost / (1 - margin/100)`,
/// which is undefined at a margin of 100. Markup is profit as a share of the cost,
/// `price = cost * (1 + markup/100)`. With neither given the price is the plain cost.
pub fn compute_base(
    cost: Option<f64>,
    margin_percent: Option<f64>,
    markup_percent: Option<f64>,
) -> Base {
    let price = match (margin_percent, markup_percent) {
        (Some(margin), _) => cost.and_then(|cost| {
            let share = 1.0 - margin / 100.0;
            (share != 0.0)
                .then(|| cost / share)
                .filter(|price| price.is_finite())
        }),
        (None, Some(markup)) => cost
            .map(|cost| cost * (1.0 + markup / 100.0))
            .filter(|price| price.is_finite()),
        (None, None) => cost,
    };
    let unit_profit = unit_profit(price, cost);
    Base {
        price,
        unit_profit,
        profit_percent: profit_percent(unit_profit, cost),
    }
}

/// Apply the process-wide tax percentage and per-item freight to a sale price.
pub fn apply_adjustments(price: Option<f64>, tax_percent: f64, freight_per_item: f64) -> Option<f64> {
    Some(price? * (1.0 + tax_percent / 100.0) + freight_per_item)
}

fn unit_profit(price: Option<f64>, cost: Option<f64>) -> Option<f64> {
    Some(price? - cost?)
}

fn profit_percent(unit_profit: Option<f64>, cost: Option<f64>) -> Option<f64> {
    let cost = cost.filter(|cost| *cost != 0.0)?;
    Some(unit_profit? / cost * 100.0)
}

/// Turn a draft into the final exported row: fall back to a plain cost passthrough
/// if an edit cleared the derived price, apply tax and freight, recompute the profit
/// fields against the final price and round everything to two decimals.
pub fn finalize(draft: Draft, tax_percent: f64, freight_per_item: f64) -> Row {
    let Draft {
        description,
        cost,
        quantity,
        base_price,
    } = draft;
    let base_price = base_price.or(cost);
    let final_price = apply_adjustments(base_price, tax_percent, freight_per_item);
    let unit_profit = unit_profit(final_price, cost);
    let profit_percent = profit_percent(unit_profit, cost);
    Row {
        description,
        cost: round_or_none(cost, 2),
        quantity: round_or_none(Some(quantity), 2).unwrap_or(1.0),
        base_price: round_or_none(base_price, 2),
        final_price: round_or_none(final_price, 2),
        unit_profit: round_or_none(unit_profit, 2),
        profit_percent: round_or_none(profit_percent, 2),
    }
}

/// Sums over the whole table, weighted by quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub cost: f64,
    pub revenue: f64,
    pub profit: f64,
}

/// Sum cost and revenue over all rows. Unlike the per-row computations, absence
/// does not propagate here: a row with no cost or no final price contributes
/// zero to the corresponding sum instead of blanking the total.
pub fn aggregate(rows: &[Row]) -> Totals {
    let mut cost = 0.0;
    let mut revenue = 0.0;
    for row in rows {
        if let Some(row_cost) = row.cost {
            cost += row_cost * row.quantity;
        }
        if let Some(row_price) = row.final_price {
            revenue += row_price * row.quantity;
        }
    }
    Totals {
        cost,
        revenue,
        profit: revenue - cost,
    }
}
