//! Listing records and their rendering.
//!
//! Listings arrive as a CSV file written by the upstream scraper. Only three
//! columns matter; anything else in the file is ignored. A missing column or
//! cell renders as empty text rather than an error, so a schema drift upstream
//! degrades the output instead of aborting the run.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::Result;

/// CSV column holding the display name.
pub const NAME_COLUMN: &str = "物件名";
/// CSV column holding the price text.
pub const PRICE_COLUMN: &str = "価格";
/// CSV column holding the canonical URL.
pub const URL_COLUMN: &str = "URL";

/// Substring of the price text marking the broadcast tier (hundred-million yen).
pub const PRICE_TIER_MARKER: &str = "億";

/// One newly listed property, as read from the input CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub name: String,
    pub price: String,
    pub url: String,
}

impl Listing {
    /// True when the price text carries the tier marker. An empty price never
    /// matches.
    pub fn matches_price_tier(&self) -> bool {
        self.price.contains(PRICE_TIER_MARKER)
    }

    /// Renders the two display rows for this listing.
    pub fn format_line(&self) -> String {
        format!("・{} / {}\n{}", self.name, self.price, self.url)
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    name: Option<usize>,
    price: Option<usize>,
    url: Option<usize>,
}

impl ColumnIndices {
    fn from_headers(headers: &StringRecord) -> Self {
        let lookup = |column: &str| headers.iter().position(|header| header == column);
        Self {
            name: lookup(NAME_COLUMN),
            price: lookup(PRICE_COLUMN),
            url: lookup(URL_COLUMN),
        }
    }
}

/// Reads listings from a CSV file on disk.
pub fn read_listings(path: &Path) -> Result<Vec<Listing>> {
    let file = File::open(path)?;
    read_listings_from(file)
}

/// Reads listings from any CSV source, preserving row order.
pub fn read_listings_from<R: Read>(reader: R) -> Result<Vec<Listing>> {
    let mut csv = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv.headers()?.clone();
    let indices = ColumnIndices::from_headers(&headers);

    let mut listings = Vec::new();
    for record in csv.records() {
        let record = record?;
        listings.push(Listing {
            name: field(&record, indices.name),
            price: field(&record, indices.price),
            url: field(&record, indices.url),
        });
    }
    Ok(listings)
}

fn field(record: &StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|index| record.get(index))
        .unwrap_or_default()
        .to_string()
}

/// Keeps the listings matching `predicate` and renders each into one line,
/// preserving input order.
pub fn filter_and_format<P>(listings: &[Listing], predicate: P) -> Vec<String>
where
    P: Fn(&Listing) -> bool,
{
    listings
        .iter()
        .filter(|&listing| predicate(listing))
        .map(Listing::format_line)
        .collect()
}
