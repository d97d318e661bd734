use crate::domain::model::PostalRange;
use crate::utils::error::Result;
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

/// 讀取含 `start,end` 標頭的 CSV 範圍清單，欄位值會去除前後空白
pub fn read_ranges<R: Read>(reader: R) -> Result<Vec<PostalRange>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut ranges = Vec::new();
    for record in reader.deserialize::<PostalRange>() {
        ranges.push(record?);
    }

    tracing::debug!("Read {} postcode ranges", ranges.len());
    Ok(ranges)
}

pub fn read_ranges_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<PostalRange>> {
    let file = std::fs::File::open(path)?;
    read_ranges(file)
}
