use crate::domain::model::Contact;
use crate::utils::error::Result;
use std::path::Path;

/// Reads the contact CSV into an ordered list of `Contact` records.
///
/// Header matching tolerates surrounding whitespace; the `number` column also
/// matches a header left with a stray trailing comma. Rows missing either
/// field after trimming are dropped silently, so an empty result is valid
/// here. Open and mid-stream errors abort the read.
pub fn read_contacts(path: &Path) -> Result<Vec<Contact>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers = reader.headers()?.clone();
    let name_col = resolve_column(&headers, "name", false);
    let number_col = resolve_column(&headers, "number", true);

    let mut contacts = Vec::new();
    let (Some(name_col), Some(number_col)) = (name_col, number_col) else {
        return Ok(contacts);
    };

    for record in reader.records() {
        let record = record?;

        let name = record.get(name_col).unwrap_or("").trim();
        let number = record.get(number_col).unwrap_or("").trim();
        let number = number.strip_suffix(',').unwrap_or(number).trim();

        if name.is_empty() || number.is_empty() {
            continue;
        }

        contacts.push(Contact {
            name: name.to_string(),
            number: number.to_string(),
        });
    }

    Ok(contacts)
}

fn resolve_column(
    headers: &csv::StringRecord,
    field: &str,
    allow_trailing_separator: bool,
) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.trim();
        header == field
            || (allow_trailing_separator
                && header.strip_suffix(',').map(str::trim) == Some(field))
    })
}
