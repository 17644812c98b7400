use crate::models::{Lead, Result};
use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

const CSV_HEADER: &str = "name,address,website,email,phone,place_id";

/// Write the result artifact: a header row plus one row per lead. Zero
/// leads produces a header-only file.
pub fn write_leads_csv(leads: &[Lead], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{}", CSV_HEADER)?;

    for lead in leads {
        writeln!(
            file,
            "{},{},{},{},{},{}",
            csv_field(&lead.name),
            csv_field(lead.address.as_deref().unwrap_or("")),
            csv_field(lead.website.as_deref().unwrap_or("")),
            csv_field(lead.email.as_deref().unwrap_or("")),
            csv_field(lead.phone.as_deref().unwrap_or("")),
            csv_field(lead.place_id.as_deref().unwrap_or("")),
        )?;
    }

    Ok(())
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
