use crate::theme::Theme;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Scalars that read as booleans or null
const YAML_KEYWORDS: &[&str] = &["true", "false", "null", "~", "yes", "no", "on", "off"];

/// Token types for YAML syntax
#[derive(Debug, PartialEq, Clone)]
enum Token {
    Key(String),
    String(String),
    Number(String),
    Keyword(String),
    Comment(String),
    Plain(String),
    Whitespace(String),
    Punctuation(String),
}

/// Byte index of the `:` that ends a mapping key, if the line has one
fn find_mapping_colon(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, ch) in s.char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' if i == 0 => quote = Some(ch),
            '{' | '[' if i == 0 => return None,
            '#' if i == 0 || s[..i].ends_with(' ') => return None,
            ':' => {
                let next = s[i + 1..].chars().next();
                if next.is_none() || next == Some(' ') {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split a trailing `# comment` off a value, ignoring `#` inside quotes
fn split_comment(s: &str) -> (&str, Option<&str>) {
    let mut quote: Option<char> = None;
    for (i, ch) in s.char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '#' if i == 0 || s[..i].ends_with(' ') => return (&s[..i], Some(&s[i..])),
            _ => {}
        }
    }
    (s, None)
}

/// Classify a scalar value
fn classify_value(value: &str) -> Token {
    let lower = value.to_lowercase();
    if value.starts_with('"') || value.starts_with('\'') {
        Token::String(value.to_string())
    } else if YAML_KEYWORDS.contains(&lower.as_str()) {
        Token::Keyword(value.to_string())
    } else if !value.is_empty()
        && value
            .trim_start_matches('-')
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.')
        && value.chars().any(|c| c.is_ascii_digit())
    {
        Token::Number(value.to_string())
    } else if is_block_indicator(value) {
        Token::Punctuation(value.to_string())
    } else {
        Token::Plain(value.to_string())
    }
}

/// `|`, `>`, and their chomping variants
fn is_block_indicator(value: &str) -> bool {
    matches!(value, "|" | ">" | "|-" | ">-" | "|+" | ">+")
}

fn push_value(tokens: &mut Vec<Token>, rest: &str) {
    let (value, comment) = split_comment(rest);
    let trimmed = value.trim_end();
    if !trimmed.is_empty() {
        tokens.push(classify_value(trimmed));
    }
    let trailing = &value[trimmed.len()..];
    if !trailing.is_empty() {
        tokens.push(Token::Whitespace(trailing.to_string()));
    }
    if let Some(comment) = comment {
        tokens.push(Token::Comment(comment.to_string()));
    }
}

/// Tokenize one line outside any block scalar
fn tokenize_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let indent_len = line.len() - line.trim_start().len();
    if indent_len > 0 {
        tokens.push(Token::Whitespace(line[..indent_len].to_string()));
    }
    let mut rest = &line[indent_len..];

    if rest.starts_with('#') {
        tokens.push(Token::Comment(rest.to_string()));
        return tokens;
    }
    if rest == "---" || rest == "..." {
        tokens.push(Token::Punctuation(rest.to_string()));
        return tokens;
    }

    // Sequence markers, possibly nested: "- - value"
    while rest == "-" || rest.starts_with("- ") {
        tokens.push(Token::Punctuation("-".to_string()));
        let after = &rest[1..];
        let spaces = after.len() - after.trim_start().len();
        if spaces > 0 {
            tokens.push(Token::Whitespace(after[..spaces].to_string()));
        }
        rest = &after[spaces..];
    }

    if let Some(colon) = find_mapping_colon(rest) {
        tokens.push(Token::Key(rest[..colon].to_string()));
        tokens.push(Token::Punctuation(":".to_string()));
        let after = &rest[colon + 1..];
        let spaces = after.len() - after.trim_start().len();
        if spaces > 0 {
            tokens.push(Token::Whitespace(after[..spaces].to_string()));
        }
        rest = &after[spaces..];
    }

    if !rest.is_empty() {
        push_value(&mut tokens, rest);
    }
    tokens
}

fn token_span(token: Token, theme: Theme) -> Span<'static> {
    let (style, text) = match token {
        Token::Key(s) => (
            Style::default()
                .fg(theme.accent())
                .add_modifier(Modifier::BOLD),
            s,
        ),
        Token::String(s) => (Style::default().fg(theme.success()), s),
        Token::Number(s) => (Style::default().fg(Color::Magenta), s),
        Token::Keyword(s) => (Style::default().fg(theme.highlight()), s),
        Token::Comment(s) => (
            Style::default()
                .fg(theme.muted())
                .add_modifier(Modifier::ITALIC),
            s,
        ),
        Token::Plain(s) => (Style::default().fg(theme.text()), s),
        Token::Whitespace(s) => (Style::default(), s),
        Token::Punctuation(s) => (Style::default().fg(theme.muted()), s),
    };
    Span::styled(text, style)
}

/// Convert a YAML document into highlighted ratatui Lines
///
/// Lines inside a `|` or `>` block scalar are shown as string content.
pub fn highlight_yaml(yaml: &str, theme: Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    // Indent of the line that opened the current block scalar
    let mut block_indent: Option<usize> = None;

    for raw in yaml.lines() {
        let indent = raw.len() - raw.trim_start().len();
        if let Some(opener) = block_indent {
            if raw.trim().is_empty() || indent > opener {
                let mut spans = Vec::new();
                if indent > 0 {
                    spans.push(token_span(Token::Whitespace(raw[..indent].to_string()), theme));
                }
                if indent < raw.len() {
                    spans.push(token_span(Token::String(raw[indent..].to_string()), theme));
                }
                lines.push(Line::from(spans));
                continue;
            }
            block_indent = None;
        }

        let tokens = tokenize_line(raw);
        let opens_block = tokens
            .iter()
            .rev()
            .find(|t| !matches!(t, Token::Whitespace(_) | Token::Comment(_)))
            .is_some_and(|t| matches!(t, Token::Punctuation(s) if is_block_indicator(s)));
        if opens_block {
            block_indent = Some(indent);
        }
        lines.push(Line::from(
            tokens
                .into_iter()
                .map(|t| token_span(t, theme))
                .collect::<Vec<_>>(),
        ));
    }

    if lines.is_empty() {
        lines.push(Line::from(""));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_tokenize_key_value() {
        let tokens = tokenize_line("kind: Deployment");
        assert_eq!(tokens[0], Token::Key("kind".to_string()));
        assert_eq!(tokens[1], Token::Punctuation(":".to_string()));
        assert_eq!(tokens[2], Token::Whitespace(" ".to_string()));
        assert_eq!(tokens[3], Token::Plain("Deployment".to_string()));
    }

    #[test]
    fn test_colon_inside_value_is_not_a_key() {
        let tokens = tokenize_line("    image: nginx:1.27");
        assert_eq!(tokens[1], Token::Key("image".to_string()));
        assert_eq!(tokens.last(), Some(&Token::Plain("nginx:1.27".to_string())));

        let tokens = tokenize_line("url: http://example.com");
        assert_eq!(tokens.last(), Some(&Token::Plain("http://example.com".to_string())));
    }

    #[test]
    fn test_sequence_item_with_key() {
        let tokens = tokenize_line("  - containerPort: 80");
        assert_eq!(tokens[1], Token::Punctuation("-".to_string()));
        assert_eq!(tokens[3], Token::Key("containerPort".to_string()));
        assert_eq!(tokens.last(), Some(&Token::Number("80".to_string())));
    }

    #[test]
    fn test_scalars() {
        assert!(matches!(classify_value("\"3\""), Token::String(_)));
        assert!(matches!(classify_value("true"), Token::Keyword(_)));
        assert!(matches!(classify_value("0.5"), Token::Number(_)));
        assert!(matches!(classify_value("-1"), Token::Number(_)));
        assert!(matches!(classify_value("500m"), Token::Plain(_)));
        assert!(matches!(classify_value("-"), Token::Plain(_)));
    }

    #[test]
    fn test_comments() {
        let tokens = tokenize_line("replicas: 3 # scale out");
        assert_eq!(tokens.last(), Some(&Token::Comment("# scale out".to_string())));

        let tokens = tokenize_line("# whole line");
        assert_eq!(tokens, vec![Token::Comment("# whole line".to_string())]);

        let tokens = tokenize_line("name: \"a # b\"");
        assert_eq!(tokens.last(), Some(&Token::String("\"a # b\"".to_string())));
    }

    #[test]
    fn test_document_marker() {
        assert_eq!(tokenize_line("---"), vec![Token::Punctuation("---".to_string())]);
    }

    #[test]
    fn test_block_scalar_body_is_string() {
        let yaml = "data:\n  script: |\n    echo key: value\n    exit 0\nkind: Pod";
        let lines = highlight_yaml(yaml, Theme::Dark);
        assert_eq!(lines.len(), 5);
        assert_eq!(line_text(&lines[2]), "    echo key: value");

        let body = &lines[2].spans[1];
        assert_eq!(body.style.fg, Some(Theme::Dark.success()));

        // Block ends when indentation returns
        let key = &lines[4].spans[0];
        assert_eq!(key.content, "kind");
        assert_eq!(key.style.fg, Some(Theme::Dark.accent()));
    }

    #[test]
    fn test_highlight_preserves_text() {
        let yaml = "apiVersion: v1\nkind: Service\nspec:\n  ports:\n    - port: 80 # http";
        let lines = highlight_yaml(yaml, Theme::Light);
        let rebuilt: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(rebuilt.join("\n"), yaml);
    }

    #[test]
    fn test_empty_input_yields_one_line() {
        assert_eq!(highlight_yaml("", Theme::Dark).len(), 1);
    }
}
