/// # Line Index Module.
///
/// Line-start bookkeeping over the original, memory-mapped file.
/// Built once at open by a parallel chunked scan, then queried read-only.
///
/// A line ends at `\n`, at `\r\n`, or at a lone `\r`.
pub mod builder;
pub mod index;
pub mod line_summary;

pub const SEPARATOR: u8 = b'\n';
pub const CARRIAGE_RETURN: u8 = b'\r';

/// Offsets just past every line terminator that ends inside `bytes[range]`.
///
/// Peeks one byte past `range`, so a `\r\n` straddling its end is reported
/// once, by the range holding the `\n`. A `\r` on the last byte of `bytes`
/// counts as a lone terminator.
pub fn line_ends(bytes: &[u8], range: std::ops::Range<usize>) -> impl Iterator<Item = usize> + '_ {
    let base = range.start;

    memchr::memchr2_iter(SEPARATOR, CARRIAGE_RETURN, &bytes[range]).filter_map(move |rel| {
        let pos = base + rel;
        let half_of_crlf = bytes[pos] == CARRIAGE_RETURN && bytes.get(pos + 1) == Some(&SEPARATOR);

        (!half_of_crlf).then_some(pos + 1)
    })
}

/// Number of line terminators in `bytes`.
#[inline]
#[must_use]
pub fn count_terminators(bytes: &[u8]) -> usize {
    line_ends(bytes, 0..bytes.len()).count()
}

/// Whether `bytes` ends with a line terminator.
#[inline]
#[must_use]
pub fn is_terminated(bytes: &[u8]) -> bool {
    matches!(bytes.last(), Some(&(SEPARATOR | CARRIAGE_RETURN)))
}

/// Whether a line starts at `offset` of `bytes`.
#[inline]
#[must_use]
pub fn is_line_start(bytes: &[u8], offset: usize) -> bool {
    match offset.checked_sub(1).map(|prev| bytes[prev]) {
        None | Some(SEPARATOR) => true,
        Some(CARRIAGE_RETURN) => bytes.get(offset) != Some(&SEPARATOR),
        Some(_) => false,
    }
}

/// Whether a canonical `\n` has to be emitted after `line_bytes` so that the
/// next byte, `next`, still starts a new line.
///
/// An unterminated line always needs one. A lone `\r` needs one only when
/// `\n` follows, since the pair would otherwise read back as one `\r\n`.
#[inline]
#[must_use]
pub fn needs_separator(line_bytes: &[u8], next: Option<u8>) -> bool {
    match line_bytes.last() {
        None | Some(&SEPARATOR) => false,
        Some(&CARRIAGE_RETURN) => next == Some(SEPARATOR),
        Some(_) => true,
    }
}

#[cfg(test)]
mod terminator_tests {
    fn ends(bytes: &[u8], range: std::ops::Range<usize>) -> Vec<usize> {
        super::line_ends(bytes, range).collect()
    }

    #[test]
    fn all_three_terminators() {
        assert_eq!(ends(b"a\nb\r\nc\rd", 0..8), [2, 5, 7]);
        assert_eq!(super::count_terminators(b"a\rb\rc\n"), 3);
        assert_eq!(super::count_terminators(b"\r\r\n\n"), 3);
        assert_eq!(super::count_terminators(b"x\r"), 1);
    }

    #[test]
    fn crlf_split_across_ranges_counts_once() {
        let text = b"ab\r\ncd";

        assert_eq!(ends(text, 0..3), Vec::<usize>::new());
        assert_eq!(ends(text, 3..6), [4]);
    }

    #[test]
    fn line_start_positions() {
        let text = b"a\r\nb\rc";

        assert!(super::is_line_start(text, 0));
        assert!(!super::is_line_start(text, 1));
        assert!(!super::is_line_start(text, 2));
        assert!(super::is_line_start(text, 3));
        assert!(super::is_line_start(text, 5));
        assert!(!super::is_line_start(text, 6));
    }

    #[test]
    fn separator_needed_between_lone_cr_and_newline() {
        assert!(super::needs_separator(b"a\r", Some(b'\n')));
        assert!(!super::needs_separator(b"a\r", Some(b'b')));
        assert!(!super::needs_separator(b"a\r", None));
        assert!(!super::needs_separator(b"a\r\n", Some(b'\n')));
        assert!(super::needs_separator(b"tail", None));
        assert!(!super::needs_separator(b"", Some(b'\n')));
    }
}
