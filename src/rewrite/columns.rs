use tracing::debug;

/// Where the virtual-size and resident-size columns sit in a header,
/// counted in whitespace-delimited tokens from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnPositions {
    pub vsz: Option<usize>,
    pub rss: Option<usize>,
}

pub struct ColumnLocator;

impl ColumnLocator {
    /// Scans `header` for tokens exactly equal to `vsz_name` and `rss_name`.
    /// A name that appears more than once resolves to its last occurrence.
    pub fn locate(header: &str, vsz_name: &str, rss_name: &str) -> ColumnPositions {
        let mut positions = ColumnPositions::default();

        for (index, name) in header.split_whitespace().enumerate() {
            if name == vsz_name {
                positions.vsz = Some(index);
            } else if name == rss_name {
                positions.rss = Some(index);
            }
        }

        debug!(
            "Located {} at {:?} and {} at {:?}",
            vsz_name, positions.vsz, rss_name, positions.rss
        );
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PS_HEADER: &str = "USER PID %CPU %MEM VSZ RSS TTY STAT START TIME COMMAND\n";

    #[test]
    fn test_locate_standard_header() {
        let positions = ColumnLocator::locate(PS_HEADER, "VSZ", "RSS");
        assert_eq!(positions.vsz, Some(4));
        assert_eq!(positions.rss, Some(5));
    }

    #[test]
    fn test_locate_ignores_padding() {
        let header = "  PID   RSS      VSZ COMMAND\n";
        let positions = ColumnLocator::locate(header, "VSZ", "RSS");
        assert_eq!(positions.vsz, Some(2));
        assert_eq!(positions.rss, Some(1));
    }

    #[test]
    fn test_locate_is_case_sensitive() {
        let positions = ColumnLocator::locate("USER PID vsz Rss\n", "VSZ", "RSS");
        assert_eq!(positions, ColumnPositions::default());
    }

    #[test]
    fn test_locate_missing_one_column() {
        let positions = ColumnLocator::locate("PID TTY TIME CMD VSZ\n", "VSZ", "RSS");
        assert_eq!(positions.vsz, Some(4));
        assert_eq!(positions.rss, None);
    }

    #[test]
    fn test_locate_prefers_last_duplicate() {
        let positions = ColumnLocator::locate("VSZ RSS VSZ\n", "VSZ", "RSS");
        assert_eq!(positions.vsz, Some(2));
        assert_eq!(positions.rss, Some(1));
    }
}
