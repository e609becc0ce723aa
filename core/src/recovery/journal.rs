//! Append-only journal of acknowledged pages.
//!
//! One line per page the registry acknowledged:
//!
//! ```text
//! PAGE|<category>|<page_no>|<start>|<end>|<crc32 of compressed>|<checksum8>
//! ```
//!
//! `checksum8` is the first 8 hex chars of BLAKE3 over everything before
//! it. Lines that fail the check are skipped on replay.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::constants::JOURNAL_PAGE_TAG;
use crate::utils::line_checksum;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub category: String,
    pub page_no: usize,
    /// Registry index range `start..end` the page landed on.
    pub start: u64,
    pub end: u64,
    pub crc32: u32,
}

impl JournalEntry {
    fn format_line(&self) -> String {
        let raw = format!(
            "{}|{}|{}|{}|{}|{:08x}",
            JOURNAL_PAGE_TAG, self.category, self.page_no, self.start, self.end, self.crc32
        );
        let checksum = line_checksum(&raw);
        format!("{}|{}", raw, checksum)
    }

    /// Parse one journal line; `None` for foreign or damaged lines.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (data, provided) = line.trim_end().rsplit_once('|')?;
        if line_checksum(data) != provided {
            warn!(line, "journal line failed checksum, skipping");
            return None;
        }

        let parts: Vec<&str> = data.split('|').collect();
        if parts.len() != 6 || parts[0] != JOURNAL_PAGE_TAG {
            return None;
        }
        Some(Self {
            category: parts[1].to_string(),
            page_no: parts[2].parse().ok()?,
            start: parts[3].parse().ok()?,
            end: parts[4].parse().ok()?,
            crc32: u32::from_str_radix(parts[5], 16).ok()?,
        })
    }
}

#[derive(Debug)]
pub struct SubmissionJournal {
    path: PathBuf,
    entries: Vec<JournalEntry>,
    writer: BufWriter<File>,
}

impl SubmissionJournal {
    /// Open (or create) a journal, loading whatever is already in it.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let entries = Self::replay(&path)?;
        Ok(Self { path, entries, writer: BufWriter::new(file) })
    }

    /// Read every valid entry from `path`.
    pub fn replay(path: impl AsRef<Path>) -> io::Result<Vec<JournalEntry>> {
        let file = File::open(path)?;
        let mut out = Vec::new();
        for line in BufReader::new(file).lines() {
            if let Some(entry) = JournalEntry::parse_line(&line?) {
                out.push(entry);
            }
        }
        Ok(out)
    }

    /// A category must not contain the field or line separator.
    pub fn check_category(category: &str) -> io::Result<()> {
        if category.contains(['|', '\n', '\r']) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("category {:?} cannot be journaled", category),
            ));
        }
        Ok(())
    }

    /// Append and flush one entry.
    pub fn record(&mut self, entry: JournalEntry) -> io::Result<()> {
        Self::check_category(&entry.category)?;
        let line = entry.format_line();
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        // Acknowledged pages must be on disk before the next submission.
        self.writer.flush()?;

        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Highest acknowledged end index for `category`.
    pub fn last_acknowledged(&self, category: &str) -> Option<u64> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.end)
            .max()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
