use crate::metrics::MetricsTable;

const NAME_HEADER: &str = "Metric";
const VALUE_HEADER: &str = "Value";

/// Aligned two-column table: names left-aligned, values right-aligned.
pub fn format_table(table: &MetricsTable) -> String {
    let values: Vec<String> = table.rows.iter().map(|r| r.value.to_string()).collect();
    let name_w = table
        .rows
        .iter()
        .map(|r| r.name.len())
        .chain(std::iter::once(NAME_HEADER.len()))
        .max()
        .unwrap_or_default();
    let value_w = values
        .iter()
        .map(String::len)
        .chain(std::iter::once(VALUE_HEADER.len()))
        .max()
        .unwrap_or_default();

    let mut out = format!("{:<name_w$}  {:>value_w$}\n", NAME_HEADER, VALUE_HEADER);
    out.push_str(&format!("{}  {}\n", "-".repeat(name_w), "-".repeat(value_w)));
    for (row, value) in table.rows.iter().zip(&values) {
        out.push_str(&format!("{:<name_w$}  {:>value_w$}\n", row.name, value));
    }
    out
}

pub fn print_table(table: &MetricsTable) {
    print!("{}", format_table(table));
}
