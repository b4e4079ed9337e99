//! Output formatting for price lists (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::models::{PriceRecord, Resolution, SearchResponse};

/// Formats price records for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a resolved list, naming its data source where the format allows.
    pub fn format_resolution(&self, resolution: &Resolution) -> String {
        let body = self.format_records(&resolution.results);
        if resolution.results.is_empty() {
            return body;
        }

        match self.format {
            OutputFormat::Table => {
                let mut out = body;
                out.push_str(&format!("\nSource: {}", resolution.tier.label()));
                if let Some(best) = resolution.lowest() {
                    out.push_str(&format!(
                        "\nLowest: {} {} at {}",
                        best.currency, best.price, best.website
                    ));
                }
                out
            }
            OutputFormat::Markdown => {
                format!("{}\n\n_Source: {}_", body, resolution.tier.label())
            }
            OutputFormat::Json | OutputFormat::Csv => body,
        }
    }

    /// Formats a list of records.
    pub fn format_records(&self, records: &[PriceRecord]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => self.json_records(records),
                OutputFormat::Csv => self.csv_header(),
                _ => "No prices found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_records(records),
            OutputFormat::Table => self.table_records(records),
            OutputFormat::Markdown => self.markdown_records(records),
            OutputFormat::Csv => self.csv_records(records),
        }
    }

    // JSON formatting

    fn json_records(&self, records: &[PriceRecord]) -> String {
        let response = SearchResponse { results: records.to_vec() };
        serde_json::to_string_pretty(&response)
            .unwrap_or_else(|_| "{\"results\": []}".to_string())
    }

    // Table formatting

    fn table_records(&self, records: &[PriceRecord]) -> String {
        let site_width = 22;
        let price_width = 14;
        let rating_width = 6;
        let reviews_width = 8;
        let name_width = 48;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<site_width$}  {:>price_width$}  {:>rating_width$}  {:>reviews_width$}  {}",
            "Website", "Price", "Rating", "Reviews", "Product"
        ));
        lines.push(format!(
            "{:-<site_width$}  {:-<price_width$}  {:-<rating_width$}  {:-<reviews_width$}  {:-<name_width$}",
            "", "", "", "", ""
        ));

        for record in records {
            let price = format!("{} {}", record.currency, record.price);
            let rating = record.rating.as_deref().unwrap_or("N/A");
            let reviews = record.reviews.as_deref().unwrap_or("-");

            lines.push(format!(
                "{:<site_width$}  {:>price_width$}  {:>rating_width$}  {:>reviews_width$}  {}",
                truncate(&record.website, site_width),
                price,
                rating,
                reviews,
                truncate(&record.product_name, name_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} prices", records.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_records(&self, records: &[PriceRecord]) -> String {
        let mut lines = Vec::new();

        lines.push("| Website | Price | Rating | Shipping | Product |".to_string());
        lines.push("|---------|-------|--------|----------|---------|".to_string());

        for record in records {
            let mut price = format!("{} {}", record.currency, record.price);
            if let Some(discount) = &record.discount {
                price.push_str(&format!(" ({})", discount));
            }

            lines.push(format!(
                "| {} | {} | {} | {} | [{}]({}) |",
                record.website,
                price,
                record.rating.as_deref().unwrap_or("N/A"),
                record.shipping.as_deref().unwrap_or(""),
                truncate(&record.product_name, 40).replace('|', "\\|"),
                record.link
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} prices found*", records.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "website,price,currency,product_name,availability,rating,reviews,shipping,discount,link"
            .to_string()
    }

    fn csv_records(&self, records: &[PriceRecord]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for record in records {
            let optional = |v: &Option<String>| v.as_deref().map(Self::csv_escape).unwrap_or_default();

            lines.push(format!(
                "{},{},{},{},{},{},{},{},{},{}",
                Self::csv_escape(&record.website),
                Self::csv_escape(&record.price),
                record.currency,
                Self::csv_escape(&record.product_name),
                Self::csv_escape(&record.availability),
                optional(&record.rating),
                optional(&record.reviews),
                optional(&record.shipping),
                optional(&record.discount),
                Self::csv_escape(&record.link)
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Shortens `s` to at most `width` characters, marking the cut with "...".
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
