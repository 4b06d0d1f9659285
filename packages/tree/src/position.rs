//! Offset ↔ line/column conversion for reporting ranges to people

/// Convert a byte offset to a 0-indexed (line, column) pair
///
/// Columns count characters, not bytes.
pub fn byte_offset_to_line_col(source: &str, offset: usize) -> (u32, u32) {
    let mut line = 0;
    let mut col = 0;
    let mut byte_pos = 0;

    for ch in source.chars() {
        if byte_pos >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
        byte_pos += ch.len_utf8();
    }

    (line, col)
}

/// Convert a 0-indexed line and column to a byte offset
///
/// Returns `source.len()` when the position is past the end.
pub fn line_col_to_byte_offset(source: &str, target_line: u32, target_col: u32) -> usize {
    let mut line = 0;
    let mut col = 0;
    let mut byte_pos = 0;

    for ch in source.chars() {
        if line == target_line && col == target_col {
            return byte_pos;
        }

        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
        byte_pos += ch.len_utf8();
    }

    source.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_across_lines() {
        let source = "{\n  \"a\": 1\n}";
        assert_eq!(byte_offset_to_line_col(source, 0), (0, 0));
        assert_eq!(byte_offset_to_line_col(source, 4), (1, 2));
        assert_eq!(line_col_to_byte_offset(source, 1, 2), 4);
        assert_eq!(line_col_to_byte_offset(source, 9, 0), source.len());
    }

    #[test]
    fn test_columns_count_characters() {
        let source = "\"é\": 1";
        // 'é' is two bytes wide
        assert_eq!(byte_offset_to_line_col(source, 4), (0, 3));
    }
}
