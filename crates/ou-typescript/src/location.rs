/// Converter from byte offsets to line and column numbers.
///
/// Call-site line numbers are derived from swc spans, which count bytes, so
/// each parsed file keeps one of these around.
pub struct LocationConverter {
    source_len: usize,
    line_starts: Vec<usize>,
}

impl LocationConverter {
    /// Creates a new LocationConverter from source code
    pub fn new(source: &str) -> Self {
        Self {
            source_len: source.len(),
            line_starts: Self::calculate_line_starts(source),
        }
    }

    /// Converts a byte offset to a (line, column) pair, both 1-based
    pub fn byte_offset_to_location(&self, offset: usize) -> (usize, usize) {
        if offset > self.source_len {
            // Out-of-bounds offsets clamp to the last line
            let last_line = self.line_starts.len().max(1);
            let last_col = self
                .source_len
                .saturating_sub(*self.line_starts.last().unwrap_or(&0))
                .max(1);
            return (last_line, last_col);
        }

        let (line, line_start) = match self.line_starts.binary_search(&offset) {
            Ok(idx) => (idx + 1, self.line_starts[idx]),
            Err(idx) => {
                let line_num = idx.max(1);
                let line_start = if idx == 0 { 0 } else { self.line_starts[idx - 1] };
                (line_num, line_start)
            }
        };

        (line, offset.saturating_sub(line_start) + 1)
    }

    fn calculate_line_starts(source: &str) -> Vec<usize> {
        let mut line_starts = vec![0];
        let mut pos = 0;

        for byte in source.bytes() {
            pos += 1;
            if byte == b'\n' {
                line_starts.push(pos);
            }
        }

        line_starts
    }
}
