//! Plain-text output for terminals and pipes.

use std::io::{self, Write};

use crate::duplicates::DuplicateGroups;
use crate::scanner::FileRecord;

/// Print each group as a numbered block of paths, blocks separated by a
/// blank line.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_groups<W: Write>(groups: &DuplicateGroups, writer: &mut W) -> io::Result<()> {
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "Duplicates group # {}", i + 1)?;
        for path in &group.paths {
            writeln!(writer, "{}", path.display())?;
        }
    }
    Ok(())
}

/// Print one copy per line.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_copies<W: Write>(copies: &[FileRecord], writer: &mut W) -> io::Result<()> {
    for record in copies {
        writeln!(writer, "{}", record.path.display())?;
    }
    Ok(())
}
