//! Statement splitting for schema-only scoring of SQL scripts.

/// Split a SQL script into its non-empty statements.
///
/// Semicolons inside quoted strings, quoted identifiers and comments do not
/// end a statement. Comments stay with the statement they appear in, so a
/// script holding only comments is one statement.
pub fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut chars = script.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(ch) = chars.next() {
        if let Some(q) = quote {
            current.push(ch);
            if ch == q {
                // A doubled quote is an escaped quote.
                if chars.peek() == Some(&q) {
                    current.push(q);
                    chars.next();
                } else {
                    quote = None;
                }
            }
            continue;
        }

        match ch {
            '\'' | '"' | '`' => {
                quote = Some(ch);
                current.push(ch);
            }
            '-' if chars.peek() == Some(&'-') => {
                current.push(ch);
                for c in chars.by_ref() {
                    current.push(c);
                    if c == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                current.push(ch);
                // Consume the opening '*' so it cannot also close the comment.
                if let Some(star) = chars.next() {
                    current.push(star);
                }
                let mut prev = '\0';
                for c in chars.by_ref() {
                    current.push(c);
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            ';' => {
                push_statement(&mut statements, &mut current);
            }
            _ => current.push(ch),
        }
    }
    push_statement(&mut statements, &mut current);

    statements
}

fn push_statement(statements: &mut Vec<String>, current: &mut String) {
    let statement = current.trim();
    if !statement.is_empty() {
        statements.push(statement.to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_respects_quotes() {
        let statements = split_statements(
            "CREATE TABLE t (a TEXT);\nINSERT INTO t VALUES ('x;y'), ('it''s');\n",
        );
        assert_eq!(statements.len(), 2);
        assert!(statements[1].contains("'x;y'"));
    }

    #[test]
    fn test_comments_and_blanks() {
        assert!(split_statements("").is_empty());
        assert!(split_statements("  ;; \n").is_empty());
        assert_eq!(
            split_statements("-- just a note; nothing else\n/* x; y */"),
            vec!["-- just a note; nothing else\n/* x; y */"]
        );
        assert_eq!(split_statements("SELECT 1 -- trailing; comment\n").len(), 1);
        assert_eq!(split_statements("/*/ a; b */ SELECT 1; SELECT 2").len(), 2);
    }
}
