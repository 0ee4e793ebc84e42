use parserlib_shared::location::Location;

/// Lines shown before and after the line with the problem
const CONTEXT_LINES: usize = 2;

/// Renders the lines around `loc` with a caret under the column, followed by the message.
///
/// ```text
/// 1    |a {
/// 2    |  colr: red;
///      |  ^
/// Unknown property "colr".
/// ```
pub fn render(source: &str, loc: Location, message: &str) -> String {
    let lines = source.split('\n').collect::<Vec<_>>();
    let line_nr = loc.line.saturating_sub(1).min(lines.len().saturating_sub(1));

    let mut out = String::new();
    for (n, line) in lines
        .iter()
        .enumerate()
        .skip(line_nr.saturating_sub(CONTEXT_LINES))
        .take(line_nr.min(CONTEXT_LINES) + 1)
    {
        out.push_str(&format!("{:<5}|{}\n", n + 1, line.trim_end_matches('\r')));
    }
    let col_nr = loc.column.saturating_sub(1);
    out.push_str(&format!("     |{}^\n", " ".repeat(col_nr)));
    for (n, line) in lines.iter().enumerate().skip(line_nr + 1).take(CONTEXT_LINES) {
        out.push_str(&format!("{:<5}|{}\n", n + 1, line.trim_end_matches('\r')));
    }
    out.push_str(message);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_under_column() {
        let text = render("a {\n  colr: red;\n}", Location::new(2, 3, 6), "Unknown property \"colr\".");
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "1    |a {");
        assert_eq!(lines[1], "2    |  colr: red;");
        assert_eq!(lines[2], "     |  ^");
        assert_eq!(lines[3], "3    |}");
        assert_eq!(lines[4], "Unknown property \"colr\".");
    }

    #[test]
    fn location_past_the_end() {
        let text = render("a{", Location::new(3, 1, 9), "Expected \"}\" but found end of input.");
        assert!(text.starts_with("1    |a{\n     |^\n"));
    }
}
