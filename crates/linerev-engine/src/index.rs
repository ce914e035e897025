//! Index phase: one sequential pass over the source file producing the
//! ordered table of line spans that the reverse writer replays.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ReverseError;
use crate::options::ReverseOptions;

/// Half-open byte range `[start, end)` of one line in the source file,
/// terminator bytes included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: u64,
    pub end: u64,
}

impl LineSpan {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Ordered line spans for one source file, produced by a single index pass
/// and consumed once, in reverse, by the writer.
///
/// Span boundaries are strictly increasing and spans never overlap. With
/// `retain_empty_lines` the spans are contiguous and cover the file exactly;
/// without it, a dropped blank line leaves a hole no span covers, so its
/// bytes do not appear in the reversed output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineOffsetTable {
    spans: Vec<LineSpan>,
}

impl LineOffsetTable {
    pub fn spans(&self) -> &[LineSpan] {
        &self.spans
    }

    pub fn line_count(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Total bytes covered by spans. Equals the file length unless blank
    /// lines were dropped.
    pub fn span_bytes(&self) -> u64 {
        self.spans.iter().map(LineSpan::len).sum()
    }

    /// Boundary offsets in ascending order, deduplicated where adjacent
    /// spans touch.
    pub fn offsets(&self) -> Vec<u64> {
        let mut offsets = Vec::with_capacity(self.spans.len() + 1);
        for span in &self.spans {
            if offsets.last() != Some(&span.start) {
                offsets.push(span.start);
            }
            if offsets.last() != Some(&span.end) {
                offsets.push(span.end);
            }
        }
        offsets
    }
}

/// Streaming line-boundary scanner. Feed the file through [`scan_chunk`] in
/// chunks of any size >= 1 and call [`finish`] after the last one; the
/// resulting table is identical for every chunking because all boundary
/// state (the pending `\r` and the content flag for the current line) lives
/// here rather than in the chunk loop.
///
/// [`scan_chunk`]: LineOffsetIndexer::scan_chunk
/// [`finish`]: LineOffsetIndexer::finish
#[derive(Debug)]
pub struct LineOffsetIndexer {
    spans: Vec<LineSpan>,
    /// Bytes consumed so far; equals the file length once scanning is done.
    pos: u64,
    /// Where the line currently being scanned begins.
    span_start: u64,
    /// The previous byte was `\r` and its line is not closed yet: a
    /// following `\n` merges into one terminator, anything else means the
    /// `\r` stood alone.
    pending_cr: bool,
    /// A non-terminator byte has been seen since `span_start`.
    has_content: bool,
    retain_empty_lines: bool,
}

impl LineOffsetIndexer {
    pub fn new(retain_empty_lines: bool) -> Self {
        Self {
            spans: Vec::new(),
            pos: 0,
            span_start: 0,
            pending_cr: false,
            has_content: false,
            retain_empty_lines,
        }
    }

    pub fn bytes_scanned(&self) -> u64 {
        self.pos
    }

    /// Classifies each byte of `chunk` and records line boundaries.
    ///
    /// `\n` always closes a line. `\r` closes one unless the next byte,
    /// which may arrive in the next chunk, is `\n`. Any byte with the high
    /// bit set belongs to a multi-byte character and is plain content, never
    /// a terminator. Bytes are consumed strictly one at a time, so
    /// characters wider than two bytes and terminators split across chunks
    /// need no special handling.
    pub fn scan_chunk(&mut self, chunk: &[u8]) {
        for &byte in chunk {
            if self.pending_cr {
                self.pending_cr = false;
                if byte == b'\n' {
                    self.pos += 1;
                    self.close_line();
                    continue;
                }
                // The \r stood alone; its line ended right after it.
                self.close_line();
            }
            self.pos += 1;
            match byte {
                b'\n' => self.close_line(),
                b'\r' => self.pending_cr = true,
                // Plain ASCII content or any byte of a multi-byte character.
                _ => self.has_content = true,
            }
        }
    }

    /// Consumes the scanner after the last chunk, closing a still-pending
    /// `\r` and the final, possibly unterminated, line.
    pub fn finish(mut self) -> LineOffsetTable {
        if self.pending_cr {
            self.pending_cr = false;
            self.close_line();
        }
        if self.span_start < self.pos {
            // Last line carries no terminator.
            self.close_line();
        } else if self.retain_empty_lines {
            // The file ends on a terminator (or is empty): the one
            // zero-length span the model admits.
            self.spans.push(LineSpan {
                start: self.pos,
                end: self.pos,
            });
        }
        LineOffsetTable { spans: self.spans }
    }

    fn close_line(&mut self) {
        let end = self.pos;
        if self.has_content || self.retain_empty_lines {
            self.spans.push(LineSpan {
                start: self.span_start,
                end,
            });
        }
        self.span_start = end;
        self.has_content = false;
    }
}

/// Scans `path` once, in `options.read_chunk_size` chunks, and returns its
/// line offset table. Any I/O failure aborts the scan; no partial table is
/// returned.
pub fn index_file(path: &Path, options: &ReverseOptions) -> Result<LineOffsetTable, ReverseError> {
    if options.read_chunk_size == 0 {
        return Err(ReverseError::InvalidChunkSize);
    }
    let mut file = File::open(path).map_err(|source| ReverseError::SourceRead {
        path: path.to_path_buf(),
        offset: 0,
        source,
    })?;
    index_reader(&mut file, path, options)
}

fn index_reader<R: Read>(
    reader: &mut R,
    path: &Path,
    options: &ReverseOptions,
) -> Result<LineOffsetTable, ReverseError> {
    let mut indexer = LineOffsetIndexer::new(options.retain_empty_lines);
    let mut buffer = vec![0u8; options.read_chunk_size];
    loop {
        let read = reader
            .read(&mut buffer)
            .map_err(|source| ReverseError::SourceRead {
                path: path.to_path_buf(),
                offset: indexer.bytes_scanned(),
                source,
            })?;
        if read == 0 {
            break;
        }
        indexer.scan_chunk(&buffer[..read]);
    }
    Ok(indexer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn scan(content: &[u8], chunk_size: usize, retain_empty_lines: bool) -> LineOffsetTable {
        let mut indexer = LineOffsetIndexer::new(retain_empty_lines);
        for chunk in content.chunks(chunk_size) {
            indexer.scan_chunk(chunk);
        }
        indexer.finish()
    }

    fn spans(table: &LineOffsetTable) -> Vec<(u64, u64)> {
        table.spans().iter().map(|s| (s.start, s.end)).collect()
    }

    #[test]
    fn lf_terminated_lines() {
        let table = scan(b"line 1\nline 2\nline 3\n", 64, false);
        assert_eq!(spans(&table), vec![(0, 7), (7, 14), (14, 21)]);
    }

    #[test]
    fn crlf_with_unterminated_last_line() {
        // Spans are ["a\r\n", "b\r\n", "c"]; "c" keeps having no terminator.
        let table = scan(b"a\r\nb\r\nc", 64, false);
        assert_eq!(spans(&table), vec![(0, 3), (3, 6), (6, 7)]);
    }

    #[test]
    fn lone_cr_closes_a_line() {
        let table = scan(b"a\rb", 64, false);
        assert_eq!(spans(&table), vec![(0, 2), (2, 3)]);
    }

    #[test]
    fn trailing_cr_closes_the_last_line() {
        let table = scan(b"a\r", 64, false);
        assert_eq!(spans(&table), vec![(0, 2)]);
    }

    #[test]
    fn blank_line_dropped_by_default() {
        let table = scan(b"a\n\nb\n", 64, false);
        assert_eq!(spans(&table), vec![(0, 2), (3, 5)]);
    }

    #[test]
    fn blank_line_retained_on_request() {
        let table = scan(b"a\n\nb\n", 64, true);
        // Blank line keeps its terminator byte; the trailing empty span
        // marks that the file ends on a terminator.
        assert_eq!(spans(&table), vec![(0, 2), (2, 3), (3, 5), (5, 5)]);
    }

    #[test]
    fn blank_crlf_line_dropped_by_default() {
        let table = scan(b"a\r\n\r\nb\r\n", 64, false);
        assert_eq!(spans(&table), vec![(0, 3), (5, 8)]);
    }

    #[test]
    fn leading_blank_line_follows_policy() {
        assert_eq!(spans(&scan(b"\na", 64, false)), vec![(1, 2)]);
        assert_eq!(spans(&scan(b"\na", 64, true)), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn no_terminators_yields_single_span() {
        let table = scan(b"no newline here", 64, false);
        assert_eq!(spans(&table), vec![(0, 15)]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(spans(&scan(b"", 64, false)), vec![]);
        assert_eq!(spans(&scan(b"", 64, true)), vec![(0, 0)]);
    }

    #[test]
    fn high_bit_bytes_are_never_terminators() {
        // "€10\n¥20\n" — every byte of € (e2 82 ac) and ¥ (c2 a5) has the
        // high bit set and must be treated as plain content.
        let content = "€10\n¥20\n".as_bytes();
        let table = scan(content, 64, false);
        assert_eq!(spans(&table), vec![(0, 6), (6, 10)]);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(7)]
    #[case(65536)]
    fn chunk_size_does_not_change_the_table(#[case] chunk_size: usize) {
        // \r\n pairs and three-byte characters land on every chunk boundary
        // for sizes 1, 2 and 7 somewhere in this fixture.
        let content = "first €₡₢ line\r\nsecond\nthird ¥\r\n\r\nlast".as_bytes();
        for retain in [false, true] {
            let reference = scan(content, content.len(), retain);
            assert_eq!(scan(content, chunk_size, retain), reference);
        }
    }

    #[test]
    fn retained_table_conserves_length_and_order() {
        let content = "a\r\n\nbb\ncc\r\nno-terminator".as_bytes();
        let table = scan(content, 3, true);
        assert_eq!(table.span_bytes(), content.len() as u64);

        let offsets = table.offsets();
        assert_eq!(offsets[0], 0);
        assert_eq!(*offsets.last().unwrap(), content.len() as u64);
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn index_file_reads_from_disk() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "input.txt", b"one\ntwo\n");

        let table = index_file(&path, &ReverseOptions::default()).unwrap();
        assert_eq!(spans(&table), vec![(0, 4), (4, 8)]);
    }

    #[test]
    fn index_file_rejects_zero_chunk_size() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "input.txt", b"one\n");

        let options = ReverseOptions {
            read_chunk_size: 0,
            ..ReverseOptions::default()
        };
        let result = index_file(&path, &options);
        assert!(matches!(result, Err(ReverseError::InvalidChunkSize)));
    }

    #[test]
    fn index_file_surfaces_missing_source() {
        let dir = create_test_dir();
        let path = dir.path().join("missing.txt");

        let result = index_file(&path, &ReverseOptions::default());
        assert!(matches!(
            result,
            Err(ReverseError::SourceRead { offset: 0, .. })
        ));
    }
}
