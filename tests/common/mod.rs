#![allow(dead_code)]

use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

/// Writes `rows` valid import lines with due dates cycling through January.
pub fn generate_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    for i in 1..=rows {
        let day = (i % 28 + 1).to_string();
        wtr.write_record([
            format!("2024-01-{day:0>2}"),
            String::new(),
            format!("{i}.50"),
            format!("Bill {i}"),
            "Pending".to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the given lines verbatim, one per line.
pub fn write_lines(path: &Path, lines: &[&str]) -> Result<(), Error> {
    let mut file = File::create(path)?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    Ok(())
}
