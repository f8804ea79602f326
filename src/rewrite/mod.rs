mod columns;
mod splice;

pub use columns::{ColumnLocator, ColumnPositions};
pub use splice::{fields, replace_fields, replace_first, Field, SubstitutionMode};

use crate::format::format_bytes;
use crate::{HrpsError, Result};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteConfig {
    /// Header name of the virtual-size column
    pub vsz_column: String,

    /// Header name of the resident-size column
    pub rss_column: String,

    pub substitution: SubstitutionMode,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            vsz_column: "VSZ".to_string(),
            rss_column: "RSS".to_string(),
            substitution: SubstitutionMode::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteStats {
    pub rewritten_lines: usize,
    pub repeated_headers: usize,
    /// Bytes of an unterminated final line that were dropped
    pub dropped_tail: usize,
}

/// Rewrites a captured listing so the size columns read as binary prefixes.
pub struct LineRewriter {
    config: RewriteConfig,
}

impl LineRewriter {
    pub fn new(config: RewriteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Rewrites the whole listing. Any failure discards all output.
    pub fn rewrite(&self, input: &str) -> Result<String> {
        self.rewrite_with_stats(input).map(|(out, _)| out)
    }

    pub fn rewrite_with_stats(&self, input: &str) -> Result<(String, RewriteStats)> {
        let mut lines = input.split_inclusive('\n');
        let mut stats = RewriteStats::default();

        let header = match lines.next() {
            Some(line) if line.ends_with('\n') => line,
            _ => return Err(HrpsError::MissingHeader),
        };

        let positions =
            ColumnLocator::locate(header, &self.config.vsz_column, &self.config.rss_column);

        let mut out = String::with_capacity(input.len());
        out.push_str(header);

        for (offset, line) in lines.enumerate() {
            // line 1 is the header
            let line_number = offset + 2;

            if !line.ends_with('\n') {
                warn!(
                    "Dropping unterminated trailing line {} ({} bytes)",
                    line_number,
                    line.len()
                );
                stats.dropped_tail = line.len();
                break;
            }

            if line == header {
                trace!("Repeated header at line {}", line_number);
                stats.repeated_headers += 1;
                out.push_str(line);
                continue;
            }

            let rewritten = self.rewrite_line(line, line_number, &positions)?;
            trace!("Line {}: {}", line_number, rewritten.trim_end());
            out.push_str(&rewritten);
            stats.rewritten_lines += 1;
        }

        debug!(
            "Rewrote {} lines, {} repeated headers",
            stats.rewritten_lines, stats.repeated_headers
        );
        Ok((out, stats))
    }

    /// Formats the size fields of a single data line.
    pub fn rewrite_line(
        &self,
        line: &str,
        line_number: usize,
        positions: &ColumnPositions,
    ) -> Result<String> {
        let vsz_pos = positions
            .vsz
            .ok_or_else(|| HrpsError::MissingColumn(self.config.vsz_column.clone()))?;
        let rss_pos = positions
            .rss
            .ok_or_else(|| HrpsError::MissingColumn(self.config.rss_column.clone()))?;

        let tokens = fields(line);
        let field_at = |position: usize, column: &str| {
            tokens
                .get(position)
                .copied()
                .ok_or_else(|| HrpsError::ShortLine {
                    line: line_number,
                    column: column.to_string(),
                    position,
                    fields: tokens.len(),
                })
        };
        let vsz_raw = field_at(vsz_pos, &self.config.vsz_column)?;
        let rss_raw = field_at(rss_pos, &self.config.rss_column)?;

        let vsz_fmt = format_bytes(vsz_raw.text);
        let rss_fmt = format_bytes(rss_raw.text);

        let rewritten = match self.config.substitution {
            SubstitutionMode::FirstMatch => {
                let line = replace_first(line, vsz_raw.text, &vsz_fmt);
                replace_first(&line, rss_raw.text, &rss_fmt)
            }
            SubstitutionMode::ByField => replace_fields(
                line,
                &tokens,
                &[(vsz_pos, vsz_fmt.as_str()), (rss_pos, rss_fmt.as_str())],
            ),
        };
        Ok(rewritten)
    }
}
