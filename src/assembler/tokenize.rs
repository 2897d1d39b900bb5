//! Splits one already label-stripped source line into whitespace-free
//! operand tokens.

/// Tokenize a single line. `,`, `(` and `)` are treated as separators
/// alongside whitespace; there is no comment syntax. An empty (or
/// whitespace-only) line yields no tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    line.replace([',', '(', ')'], " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_commas_and_parens() {
        assert_eq!(
            tokenize("add a0, a1, a2"),
            vec!["add", "a0", "a1", "a2"]
        );
        assert_eq!(
            tokenize("lw t1, 0(zero)"),
            vec!["lw", "t1", "0", "zero"]
        );
        assert_eq!(
            tokenize("sw a1,8(sp)"),
            vec!["sw", "a1", "8", "sp"]
        );
    }

    #[test]
    fn blank_line_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }
}
