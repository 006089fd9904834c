//! Message chunker.
//!
//! Sinks cap the size of a single message. [`chunk_lines`] packs whole lines
//! into as few messages as fit under a character limit.

/// Separator placed between lines inside one chunk
pub const LINE_SEPARATOR: char = '\n';

/// Pack `lines` greedily into chunks of at most `limit` characters.
///
/// Lines are joined with `\n` and never split: a line longer than `limit` on
/// its own becomes a chunk of its own. A chunk is closed as soon as adding the
/// next line would push its length past `limit`. The final chunk is emitted
/// whenever it has content. Joining the result with `\n` gives back the joined
/// input.
///
/// Length is counted in characters, not bytes.
pub fn chunk_lines<S: AsRef<str>>(lines: &[S], limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buffer = String::new();
    let mut buffer_len = 0usize;
    let mut buffered_lines = 0usize;

    for line in lines {
        let line = line.as_ref();
        let line_len = line.chars().count();

        if buffered_lines > 0 && buffer_len + 1 + line_len > limit {
            chunks.push(std::mem::take(&mut buffer));
            buffer_len = 0;
            buffered_lines = 0;
        }

        if buffered_lines > 0 {
            buffer.push(LINE_SEPARATOR);
            buffer_len += 1;
        }
        buffer.push_str(line);
        buffer_len += line_len;
        buffered_lines += 1;
    }

    if !buffer.is_empty() {
        chunks.push(buffer);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_fits_in_one_chunk() {
        let chunks = chunk_lines(&["a", "b", "c"], 100);
        assert_eq!(chunks, vec!["a\nb\nc".to_string()]);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        // "ab\ncd" is exactly 5 characters
        let chunks = chunk_lines(&["ab", "cd", "ef"], 5);
        assert_eq!(chunks, vec!["ab\ncd".to_string(), "ef".to_string()]);
    }

    #[test]
    fn test_oversized_line_is_emitted_whole() {
        let chunks = chunk_lines(&["a", "0123456789", "b"], 4);
        assert_eq!(
            chunks,
            vec!["a".to_string(), "0123456789".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_no_lines_no_chunks() {
        let lines: Vec<String> = Vec::new();
        assert!(chunk_lines(&lines, 10).is_empty());
    }

    #[test]
    fn test_length_counts_characters() {
        // Three 2-byte characters per line
        let chunks = chunk_lines(&["ééé", "ééé"], 7);
        assert_eq!(chunks.len(), 1);
    }
}
