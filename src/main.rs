use crate::options::Args;
use anyhow::Context;
use clap::Parser;
use std::path::Path;

mod options {
    use std::path::PathBuf;

    #[derive(Debug, clap::Parser)]
    #[clap(name = "ptool", about = "A tool to price product spreadsheets")]
    pub enum Args {
        /// Compute sale price and profit for every row of a product cost table and print it in the chosen format.
        Price {
            /// The column holding the unit cost, as name or zero-based index. Guessed from the header when absent,
            /// disabled when set to the empty string; the same goes for the other column options.
            #[clap(long)]
            cost: Option<String>,
            /// The column holding the quantity per item, defaulting to 1 per row.
            #[clap(long)]
            quantity: Option<String>,
            /// The column holding the margin in percent. Margin wins over markup when both are present.
            #[clap(long)]
            margin: Option<String>,
            /// The column holding the markup in percent.
            #[clap(long)]
            markup: Option<String>,
            /// The column holding the product description.
            #[clap(long)]
            description: Option<String>,
            /// Tax in percent to apply on top of the sale price.
            #[clap(long, default_value_t = 0.0)]
            tax: f64,
            /// Freight to add per item after tax, in currency units.
            #[clap(long, default_value_t = 0.0)]
            freight: f64,
            /// A RON file with manual cell edits to apply before tax and freight.
            #[clap(long, short = 'e')]
            edits: Option<PathBuf>,
            /// The output format: csv, xlsx or json.
            #[clap(long, short = 'f', default_value = "csv")]
            format: ptool::export::Format,
            /// The product table to price (.csv, .xlsx, .xls or .ods).
            spreadsheet: PathBuf,
        },
        /// Print the column mapping that would be guessed from the table header.
        Columns {
            /// The product table to inspect (.csv, .xlsx, .xls or .ods).
            spreadsheet: PathBuf,
        },
    }
}

fn main() -> anyhow::Result<()> {
    let args = options::Args::parse();
    match args {
        Args::Price {
            cost,
            quantity,
            margin,
            markup,
            description,
            tax,
            freight,
            edits,
            format,
            spreadsheet,
        } => {
            let outcome = ptool::price(
                &read_table(&spreadsheet)?,
                std::io::BufWriter::new(std::io::stdout()),
                ptool::price::Options {
                    columns: ptool::mapping::Overrides {
                        cost,
                        quantity,
                        margin,
                        markup,
                        description,
                    },
                    tax_percent: tax,
                    freight_per_item: freight,
                    edits,
                    format,
                },
            )?;
            eprintln!(
                "Totais: Custo = {:.2} | Receita = {:.2} | Lucro = {:.2}",
                outcome.totals.cost, outcome.totals.revenue, outcome.totals.profit
            );
        }
        Args::Columns { spreadsheet } => {
            let table = read_table(&spreadsheet)?;
            let mapping = ptool::mapping::guess(&table.headers);
            for (role, column) in [
                ("cost", mapping.cost),
                ("quantity", mapping.quantity),
                ("margin", mapping.margin),
                ("markup", mapping.markup),
                ("description", mapping.description),
            ] {
                match column {
                    Some(index) => println!("{role}: {} ({index})", table.headers[index]),
                    None => println!("{role}: -"),
                }
            }
        }
    };
    Ok(())
}

fn read_table(path: &Path) -> anyhow::Result<ptool::load::Table> {
    let data = std::fs::read(path)
        .with_context(|| format!("Could not read spreadsheet at '{}'", path.display()))?;
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    Ok(ptool::load::read_table(&name, std::io::Cursor::new(data))?)
}
