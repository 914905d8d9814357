//! Bulk CSV import parsing.
//!
//! Parsing is pure: it turns the uploaded bytes into per-row outcomes and
//! never touches the store. Dispatching accepted rows is the service's job.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::product::NewProduct;
use crate::domain::types::{ProductCid, ProductPrice, ProductState, ShippingType};

/// Column order of the downloadable template.
pub const TEMPLATE_HEADERS: [&str; 10] = [
    "name",
    "price",
    "category",
    "subcategory",
    "description",
    "shippingType",
    "state",
    "imageUrl",
    "finalPrice",
    "cid",
];

const REQUIRED_HEADERS: [&str; 3] = ["name", "price", "category"];

/// File-level failures. Any of these aborts the whole import.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImportParseError {
    #[error("CSV file must contain a header row and at least one data row")]
    Empty,
    #[error("missing required headers: {}", .0.join(", "))]
    MissingHeaders(Vec<String>),
    #[error("failed to read CSV file")]
    MalformedFile,
}

impl From<csv::Error> for ImportParseError {
    fn from(_: csv::Error) -> Self {
        Self::MalformedFile
    }
}

/// Why a data row was left out of the import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingName,
    MissingCategory,
    /// Not a finite number.
    InvalidPrice(String),
    /// A number below zero.
    NegativePrice(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingName => write!(f, "name is empty"),
            SkipReason::MissingCategory => write!(f, "category is empty"),
            SkipReason::InvalidPrice(raw) => write!(f, "invalid price '{raw}'"),
            SkipReason::NegativePrice(raw) => write!(f, "negative price '{raw}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Accepted(NewProduct),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedImportRow {
    /// 1-based line number among the non-empty lines, header included.
    pub row_number: usize,
    pub outcome: RowOutcome,
}

/// Aggregated parse report used for UI feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub accepted: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedImport {
    /// Normalized (trimmed, lowercased) header names in file order.
    pub headers: Vec<String>,
    pub rows: Vec<ParsedImportRow>,
}

impl ParsedImport {
    pub fn summary(&self) -> ImportSummary {
        let accepted = self
            .rows
            .iter()
            .filter(|row| matches!(row.outcome, RowOutcome::Accepted(_)))
            .count();
        ImportSummary {
            total_rows: self.rows.len(),
            accepted,
            skipped: self.rows.len() - accepted,
        }
    }

    /// Accepted payloads in file order.
    pub fn into_accepted(self) -> Vec<NewProduct> {
        self.rows
            .into_iter()
            .filter_map(|row| match row.outcome {
                RowOutcome::Accepted(product) => Some(product),
                RowOutcome::Skipped(_) => None,
            })
            .collect()
    }
}

/// Parse raw upload bytes. Non UTF-8 content is a malformed file.
pub fn parse_bulk_import(bytes: &[u8]) -> Result<ParsedImport, ImportParseError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ImportParseError::MalformedFile)?;
    parse_bulk_import_str(text)
}

/// Parse CSV text.
///
/// Blank lines are dropped, fields are split on commas with no quote handling
/// and trimmed. Header names match case-insensitively.
pub fn parse_bulk_import_str(text: &str) -> Result<ParsedImport, ImportParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();

    if lines.len() < 2 {
        return Err(ImportParseError::Empty);
    }

    let content = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let mut records = reader.records();

    let header_record = records.next().ok_or(ImportParseError::Empty)??;
    let headers = header_record
        .iter()
        .map(|header| header.trim().to_ascii_lowercase())
        .collect::<Vec<_>>();
    let columns = index_headers(&headers)?;

    let mut rows = Vec::with_capacity(lines.len() - 1);
    for (idx, record) in records.enumerate() {
        let record = record?;
        rows.push(ParsedImportRow {
            row_number: idx + 2,
            outcome: parse_row(&columns, &record),
        });
    }

    Ok(ParsedImport { headers, rows })
}

fn index_headers(headers: &[String]) -> Result<HashMap<String, usize>, ImportParseError> {
    let mut columns = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        columns.entry(header.clone()).or_insert(idx);
    }

    let missing = REQUIRED_HEADERS
        .iter()
        .filter(|required| !columns.contains_key(**required))
        .map(|required| required.to_string())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(ImportParseError::MissingHeaders(missing));
    }

    Ok(columns)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_price(raw: &str) -> Option<ProductPrice> {
    raw.parse::<f64>()
        .ok()
        .and_then(|price| ProductPrice::new(price).ok())
}

fn field<'r>(
    columns: &HashMap<String, usize>,
    record: &'r csv::StringRecord,
    name: &str,
) -> &'r str {
    columns
        .get(name)
        .and_then(|col| record.get(*col))
        .map(str::trim)
        .unwrap_or("")
}

fn parse_row(columns: &HashMap<String, usize>, record: &csv::StringRecord) -> RowOutcome {
    let value = |name: &str| field(columns, record, name);
    let name = value("name");
    if name.is_empty() {
        return RowOutcome::Skipped(SkipReason::MissingName);
    }
    let category = value("category");
    if category.is_empty() {
        return RowOutcome::Skipped(SkipReason::MissingCategory);
    }
    let raw_price = value("price");
    let price = match raw_price.parse::<f64>() {
        Ok(price) if price.is_finite() && price < 0.0 => {
            return RowOutcome::Skipped(SkipReason::NegativePrice(raw_price.to_string()));
        }
        Ok(price) => ProductPrice::new(price).ok(),
        Err(_) => None,
    };
    let Some(price) = price else {
        return RowOutcome::Skipped(SkipReason::InvalidPrice(raw_price.to_string()));
    };

    let mut product = NewProduct::new(name, value("description"), price, category);
    product.subcategory = non_empty(value("subcategory"));
    product.image_url = non_empty(value("imageurl"));
    product.final_price = parse_price(value("finalprice"));
    product.cid = ProductCid::new(value("cid")).ok();

    let shipping = value("shippingtype");
    product.shipping_type = ShippingType::try_from(shipping).ok();
    if product.shipping_type.is_none() && !shipping.is_empty() {
        log::debug!("Ignoring unknown shipping type '{shipping}' in import row");
    }

    let state = value("state");
    product.state = ProductState::try_from(state).ok();
    if product.state.is_none() && !state.is_empty() {
        log::debug!("Ignoring unknown state '{state}' in import row");
    }

    RowOutcome::Accepted(product)
}
