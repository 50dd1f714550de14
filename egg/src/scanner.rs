// Whitespace (and optionally comment) skipping over string slices.
//
// Both functions are total: they never fail and always return a suffix of
// their input, the empty suffix if nothing significant is left.

pub fn skip_space(text: &str) -> &str {
    text.trim_start_matches(char::is_whitespace)
}

// Same as skip_space, but a '#' starts a comment running to end of line
pub fn skip_space_and_comments(mut text: &str) -> &str {
    loop {
        text = skip_space(text);
        match text.strip_prefix('#') {
            Some(comment) => match comment.find('\n') {
                Some(eol) => text = &comment[eol + 1..],
                None => return "",
            },
            None => return text,
        }
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_leading_whitespace() {
        let tests = vec![
            ("abc", "abc"),
            ("   abc", "abc"),
            ("\n\t\r abc  ", "abc  "),
            ("\u{00a0}\u{2003}x", "x"),
            ("a b", "a b"),
        ];
        for (input, expected) in tests {
            assert_eq!(skip_space(input), expected);
        }
    }

    #[test]
    fn all_whitespace_is_empty() {
        assert_eq!(skip_space(""), "");
        assert_eq!(skip_space(" \n\t "), "");
    }

    #[test]
    fn comments_are_whitespace() {
        let tests = vec![
            ("# a comment\nx", "x"),
            ("  # one\n  # two\n  y(1)", "y(1)"),
            ("#trailing", ""),
            ("#\n#\n", ""),
            ("z # after", "z # after"),
        ];
        for (input, expected) in tests {
            assert_eq!(skip_space_and_comments(input), expected);
        }
    }

    #[test]
    fn plain_skip_keeps_comments() {
        assert_eq!(skip_space("  # not skipped"), "# not skipped");
    }
}
