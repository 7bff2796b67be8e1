//! A sparse overlay of manual cell edits over the drafted table, so that the
//! base table stays immutable and a recomputation pass can replay the edits.
//!
//! The overlay is kept in a RON file next to the data, for example:
//!
//! ```ron
//! Overlay(edits: [
//!     Edit(row: 0, field: Cost, value: "R$ 12,50"),
//!     Edit(row: 2, field: BasePrice, value: ""),
//! ])
//! ```

use crate::load::Cell;
use crate::parse_number;
use crate::pricing::Draft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Field {
    Description,
    Cost,
    Quantity,
    BasePrice,
}

/// One edited cell. The value is kept as entered and re-enters number coercion,
/// so `"R$ 2,50"` works the same in an edit as it does in the uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Edit {
    pub row: usize,
    pub field: Field,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Overlay {
    pub edits: Vec<Edit>,
}

impl Overlay {
    /// Apply every edit to the drafts, later edits winning over earlier ones.
    /// Edits pointing past the end of the table are ignored.
    pub fn apply(&self, drafts: &mut [Draft]) {
        for edit in &self.edits {
            let Some(draft) = drafts.get_mut(edit.row) else {
                continue;
            };
            let cell = Cell::Text(edit.value.clone());
            match edit.field {
                Field::Description => {
                    let trimmed = edit.value.trim();
                    draft.description =
                        (!trimmed.is_empty()).then(|| trimmed.to_string());
                }
                Field::Cost => draft.cost = parse_number(&cell),
                Field::Quantity => draft.quantity = parse_number(&cell).unwrap_or(1.0),
                Field::BasePrice => draft.base_price = parse_number(&cell),
            }
        }
    }
}
