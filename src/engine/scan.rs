//! Token scanning: find the smallest number in a whitespace-delimited text file.

use anyhow::{Context, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::FileScan;
use crate::utils::config::ScanConsts;

/// Incremental minimum over the numeric tokens of a byte stream.
///
/// Tokens are separated by any Unicode whitespace (`char::is_whitespace`), decoded from UTF-8.
/// Bytes may arrive in chunks of any size; a token cut by a chunk boundary is carried over and
/// parsed once its end is seen (or on [`TokenMin::finish`]). A multi-byte character cut by a
/// boundary is held in `pending` until its remaining bytes arrive.
#[derive(Clone, Debug)]
pub struct TokenMin {
    min: f64,
    numbers: u64,
    skipped: u64,
    carry: Vec<u8>,
    pending: Vec<u8>,
}

impl Default for TokenMin {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            numbers: 0,
            skipped: 0,
            carry: Vec::new(),
            pending: Vec::with_capacity(4),
        }
    }
}

/// Encoded length of a UTF-8 sequence from its lead byte; 0 for continuation or invalid bytes.
fn utf8_len(lead: u8) -> usize {
    match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

fn is_whitespace_seq(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.chars().next())
        .is_some_and(char::is_whitespace)
}

impl TokenMin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next chunk of the stream.
    pub fn feed(&mut self, chunk: &[u8]) {
        let mut i = self.complete_pending(chunk);
        if !self.pending.is_empty() {
            return;
        }
        let mut start = i;
        let mut cut_at = None;
        while i < chunk.len() {
            let b = chunk[i];
            let (is_space, width) = if b.is_ascii() {
                (char::from(b).is_whitespace(), 1)
            } else {
                match utf8_len(b) {
                    0 => (false, 1),
                    n if i + n > chunk.len() => {
                        if chunk[i + 1..].iter().all(|&c| is_continuation(c)) {
                            cut_at = Some(i);
                            break;
                        }
                        (false, 1)
                    }
                    n if std::str::from_utf8(&chunk[i..i + n]).is_ok() => {
                        (is_whitespace_seq(&chunk[i..i + n]), n)
                    }
                    _ => (false, 1),
                }
            };
            if is_space {
                self.end_token(&chunk[start..i]);
                start = i + width;
            }
            i += width;
        }
        let end = cut_at.unwrap_or(chunk.len());
        if start < end {
            self.carry.extend_from_slice(&chunk[start..end]);
        }
        if let Some(cut) = cut_at {
            self.pending.extend_from_slice(&chunk[cut..]);
        }
    }

    /// Parse any trailing token and return the totals.
    pub fn finish(mut self) -> FileScan {
        if !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            self.carry.extend_from_slice(&pending);
        }
        if !self.carry.is_empty() {
            self.flush_carry();
        }
        FileScan {
            min: self.min,
            numbers: self.numbers,
            skipped: self.skipped,
        }
    }

    /// Finish a character cut by the previous chunk. Returns where scanning of `chunk` resumes;
    /// `pending` stays non-empty when `chunk` ran out before the character was complete.
    fn complete_pending(&mut self, chunk: &[u8]) -> usize {
        if self.pending.is_empty() {
            return 0;
        }
        let need = utf8_len(self.pending[0]).saturating_sub(self.pending.len());
        let mut taken = 0;
        while taken < need && taken < chunk.len() && is_continuation(chunk[taken]) {
            taken += 1;
        }
        self.pending.extend_from_slice(&chunk[..taken]);
        if taken < need && taken == chunk.len() {
            return taken;
        }
        let pending = std::mem::take(&mut self.pending);
        if taken == need && is_whitespace_seq(&pending) {
            self.end_token(&[]);
        } else {
            self.carry.extend_from_slice(&pending);
        }
        taken
    }

    /// A delimiter was seen: `tail` is the part of the current token inside this chunk.
    fn end_token(&mut self, tail: &[u8]) {
        if !self.carry.is_empty() {
            self.carry.extend_from_slice(tail);
            self.flush_carry();
        } else if !tail.is_empty() {
            self.consume(tail);
        }
    }

    fn flush_carry(&mut self) {
        let mut token = std::mem::take(&mut self.carry);
        self.consume(&token);
        token.clear();
        self.carry = token;
    }

    fn consume(&mut self, token: &[u8]) {
        match parse_number(token) {
            Some(n) => {
                self.numbers += 1;
                // NaN tokens count as numbers but never compare lower.
                if n < self.min {
                    self.min = n;
                }
            }
            None => self.skipped += 1,
        }
    }
}

/// Parse one token as `f64`. Non-UTF-8 tokens are not numbers.
pub fn parse_number(token: &[u8]) -> Option<f64> {
    std::str::from_utf8(token).ok()?.parse::<f64>().ok()
}

/// Smallest number in `text`, or `+inf` if there is none.
pub fn min_in_str(text: &str) -> f64 {
    let mut acc = TokenMin::new();
    acc.feed(text.as_bytes());
    acc.finish().min
}

/// Scan a file for its smallest number. Uses memory-mapped I/O above `mmap_threshold`, chunked
/// reading otherwise.
pub fn scan_file(path: &Path, mmap_threshold: u64) -> Result<FileScan> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let size = file
        .metadata()
        .with_context(|| format!("stat {}", path.display()))?
        .len();
    let mut acc = TokenMin::new();

    if size > mmap_threshold {
        let mmap =
            unsafe { Mmap::map(&file) }.with_context(|| format!("mmap {}", path.display()))?;
        acc.feed(&mmap);
    } else {
        let mut reader = std::io::BufReader::with_capacity(ScanConsts::READ_CHUNK_SIZE, file);
        let mut buffer = vec![0u8; ScanConsts::READ_CHUNK_SIZE];
        loop {
            let n = match reader.read(&mut buffer) {
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
            };
            if n == 0 {
                break;
            }
            acc.feed(&buffer[..n]);
        }
    }

    Ok(acc.finish())
}
