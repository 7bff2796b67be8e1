#![deny(rust_2018_idioms)]

pub mod price;

pub use price::function::price;

pub mod export;
pub mod load;
pub mod mapping;
pub mod overlay;
pub mod pricing;

use crate::load::Cell;

/// Coerce a spreadsheet cell into a number, tolerating currency markers and both
/// Brazilian (`1.234,56`) and international (`1234.56`) separator conventions.
///
/// Blank cells and cells that cannot be coerced yield `None` - this never fails.
/// A thousands-separated integer without decimals like `1,234` is ambiguous and
/// lands on the decimal reading `1.234`.
pub fn parse_number(value: &Cell) -> Option<f64> {
    match value {
        Cell::Empty => None,
        Cell::Number(n) => Some(*n).filter(|n| n.is_finite()),
        Cell::Text(s) => parse_text(s),
    }
}

fn parse_text(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<f64>() {
        return Some(n).filter(|n| n.is_finite());
    }
    let s = s.replace("R$", "").replace(' ', "");
    let s = if s.matches(',').count() == 1 && s.contains('.') {
        s.replace('.', "").replace(',', ".")
    } else {
        s.replace(',', ".")
    };
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Round to `decimals` places, or `None` when the value is absent or not a finite number.
pub fn round_or_none(value: Option<f64>, decimals: i32) -> Option<f64> {
    let value = value.filter(|v| v.is_finite())?;
    let scale = 10f64.powi(decimals);
    Some((value * scale).round() / scale)
}
