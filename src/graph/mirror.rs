//! Mirror transform for bottom-up (reversed) display

/// Swap left- and right-move glyphs so a graph read bottom-up slants the
/// right way. Every other character, escape sequences included, is kept, so
/// the result has the same length as the input.
pub fn mirror(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            '/' => '\\',
            '\\' => '/',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_swaps_moves() {
        assert_eq!(mirror("|\\ \\ "), "|/ / ");
        assert_eq!(mirror("|/  "), "|\\  ");
        assert_eq!(mirror("*-. |"), "*-. |");
    }

    #[test]
    fn test_mirror_is_an_involution() {
        let line = "| |_|/ \\ ";
        assert_eq!(mirror(&mirror(line)), line);
    }

    #[test]
    fn test_mirror_keeps_escape_sequences() {
        let line = "\x1b[31m/\x1b[0m \x1b[32m|\x1b[0m";
        let mirrored = mirror(line);
        assert_eq!(mirrored.len(), line.len());
        assert_eq!(mirrored, "\x1b[31m\\\x1b[0m \x1b[32m|\x1b[0m");
    }
}
