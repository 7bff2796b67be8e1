use std::path::PathBuf;

use crate::export::Format;
use crate::mapping;
use crate::pricing::Totals;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Mapping(#[from] mapping::Error),
    #[error(transparent)]
    Export(#[from] crate::export::Error),
    #[error("Failed to open the edits file for reading")]
    OpenEdits(#[from] std::io::Error),
    #[error("Could not decode the edits overlay")]
    DecodeEdits(#[from] ron::de::SpannedError),
}

#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Column choices for the five roles, guessed from the header when unset.
    pub columns: mapping::Overrides,
    /// Tax in percent, applied on top of every derived sale price.
    pub tax_percent: f64,
    /// Freight added to every item after tax, in currency units.
    pub freight_per_item: f64,
    /// A RON file with manual cell edits to apply before tax and freight.
    pub edits: Option<PathBuf>,
    pub format: Format,
}

pub struct Outcome {
    /// The column mapping that was actually used.
    pub mapping: mapping::Mapping,
    /// Quantity-weighted sums over the exported rows.
    pub totals: Totals,
    /// The number of priced rows.
    pub rows: usize,
}

pub(crate) mod function {
    use crate::load::{cell, Table};
    use crate::overlay::Overlay;
    use crate::price::{Error, Options, Outcome};
    use crate::pricing::{aggregate, compute_base, finalize, Draft};
    use crate::{mapping, parse_number};

    /// Price every row of `table` and write the result table to `out`.
    ///
    /// Each row goes through number coercion for its mapped cells, the
    /// margin-over-markup base price, the edit overlay if one was given, and
    /// finally the global tax/freight adjustments.
    pub fn price(
        table: &Table,
        out: impl std::io::Write,
        Options {
            columns,
            tax_percent,
            freight_per_item,
            edits,
            format,
        }: Options,
    ) -> Result<Outcome, Error> {
        let mapping = mapping::resolve(&table.headers, &columns)?;

        let mut drafts: Vec<_> = table
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let cost = parse_number(cell(row, mapping.cost));
                let quantity = parse_number(cell(row, mapping.quantity)).unwrap_or(1.0);
                let margin = parse_number(cell(row, mapping.margin));
                let markup = parse_number(cell(row, mapping.markup));
                let description = match mapping.description {
                    Some(column) => cell(row, Some(column)).text(),
                    None => Some(index.to_string()),
                };
                Draft {
                    description,
                    cost,
                    quantity,
                    base_price: compute_base(cost, margin, markup).price,
                }
            })
            .collect();

        if let Some(path) = edits {
            let overlay: Overlay = ron::de::from_reader(std::fs::File::open(path)?)?;
            overlay.apply(&mut drafts);
        }

        let rows: Vec<_> = drafts
            .into_iter()
            .map(|draft| finalize(draft, tax_percent, freight_per_item))
            .collect();
        let totals = aggregate(&rows);
        crate::export::write(&rows, format, out)?;

        Ok(Outcome {
            mapping,
            totals,
            rows: rows.len(),
        })
    }
}
