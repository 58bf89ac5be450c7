//! Summary formatting for terminal output

use crate::store::Summary;

/// Format overall and per-category totals
pub fn format_summary(summary: &Summary, currency: &str) -> String {
    let summary = match summary {
        Summary::Empty => return "No expenses to summarize.\n".to_string(),
        Summary::NonEmpty(summary) => summary,
    };

    let mut output = String::new();
    output.push_str(&format!(
        "Overall total: {}\n",
        summary.total.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Overall average (per entry): {}\n",
        summary.average.format_with_symbol(currency)
    ));
    output.push_str("\nBy category:\n");

    for category in &summary.categories {
        let noun = if category.count == 1 { "item" } else { "items" };
        output.push_str(&format!(
            " - {:12}: total {:>10} | avg {:>10} ({} {})\n",
            category.category,
            category.subtotal.format_with_symbol(currency),
            category.average.format_with_symbol(currency),
            category.count,
            noun
        ));
    }

    output
}
