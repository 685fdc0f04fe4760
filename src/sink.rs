//! Durable persistence of surviving phrases

use crate::error::Result;
use crate::generator::Candidate;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes the accepted phrases as a JSON ordered list of ordered word lists.
///
/// The writer is flushed before returning so the file is durable on every
/// successful exit path.
pub fn write_results(path: &Path, mnemonics: &[Candidate]) -> Result<()> {
    let word_lists: Vec<&[String]> = mnemonics.iter().map(|c| c.words.as_slice()).collect();

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &word_lists)?;
    writer.flush()?;

    info!("Wrote {} phrases to {}", mnemonics.len(), path.display());
    Ok(())
}

/// Reads back a result file, word-for-word in written order.
pub fn read_results(path: &Path) -> Result<Vec<Vec<String>>> {
    let file = File::open(path)?;
    let word_lists = serde_json::from_reader(BufReader::new(file))?;
    Ok(word_lists)
}
