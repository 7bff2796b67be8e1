//! Assign the semantic roles of the pricing table to columns of the input,
//! either guessed from the header or forced by the caller.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("A {kind} column of index or name '{name}' could not be found in the table header")]
    MissingColumn { name: String, kind: &'static str },
}

/// Caller-supplied column choices, each a column name or zero-based index.
///
/// `None` means guess from the header; an empty string disables the role.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub cost: Option<String>,
    pub quantity: Option<String>,
    pub margin: Option<String>,
    pub markup: Option<String>,
    pub description: Option<String>,
}

/// The resolved column index for each role, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mapping {
    pub cost: Option<usize>,
    pub quantity: Option<usize>,
    pub margin: Option<usize>,
    pub markup: Option<usize>,
    pub description: Option<usize>,
}

const COST_KEYWORDS: &[&str] = &["custo", "cost", "valor"];
const QUANTITY_KEYWORDS: &[&str] = &["qtd", "quantidade", "quant", "qty"];
const MARGIN_KEYWORDS: &[&str] = &["margem", "margin", "marg"];
const MARKUP_KEYWORDS: &[&str] = &["markup"];
const DESCRIPTION_KEYWORDS: &[&str] = &["desc", "produto", "nome", "name"];

/// Guess a mapping from the header alone by ranked keyword match:
/// an earlier keyword beats a later one, then the leftmost column wins.
pub fn guess(headers: &[String]) -> Mapping {
    Mapping {
        cost: guess_column(headers, COST_KEYWORDS),
        quantity: guess_column(headers, QUANTITY_KEYWORDS),
        margin: guess_column(headers, MARGIN_KEYWORDS),
        markup: guess_column(headers, MARKUP_KEYWORDS),
        description: guess_column(headers, DESCRIPTION_KEYWORDS),
    }
}

fn guess_column(headers: &[String], keywords: &[&str]) -> Option<usize> {
    keywords.iter().find_map(|keyword| {
        headers
            .iter()
            .position(|header| header.to_lowercase().contains(keyword))
    })
}

/// Combine the guessed mapping with the caller's overrides. Unknown override
/// names are an error; guesses that find nothing leave the role unmapped.
pub fn resolve(headers: &[String], overrides: &Overrides) -> Result<Mapping, Error> {
    let guessed = guess(headers);
    Ok(Mapping {
        cost: resolve_column(headers, overrides.cost.as_deref(), guessed.cost, "cost")?,
        quantity: resolve_column(
            headers,
            overrides.quantity.as_deref(),
            guessed.quantity,
            "quantity",
        )?,
        margin: resolve_column(headers, overrides.margin.as_deref(), guessed.margin, "margin")?,
        markup: resolve_column(headers, overrides.markup.as_deref(), guessed.markup, "markup")?,
        description: resolve_column(
            headers,
            overrides.description.as_deref(),
            guessed.description,
            "description",
        )?,
    })
}

fn resolve_column(
    headers: &[String],
    name_or_index: Option<&str>,
    guessed: Option<usize>,
    kind: &'static str,
) -> Result<Option<usize>, Error> {
    match name_or_index {
        None => Ok(guessed),
        Some("") => Ok(None),
        Some(name) => header_idx(name, headers)
            .ok_or_else(|| Error::MissingColumn {
                name: name.to_string(),
                kind,
            })
            .map(Some),
    }
}

/// Return the position of `name_or_index` in `headers` or `None` if it wasn't found.
/// If `name_or_index` is a number, it will be used as number and not as name.
fn header_idx(name_or_index: &str, headers: &[String]) -> Option<usize> {
    if let Ok(index) = name_or_index.parse::<usize>() {
        headers.get(index).map(|_| index)
    } else {
        headers.iter().position(|name| name == name_or_index)
    }
}
