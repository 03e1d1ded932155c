use std::borrow::Cow;

use super::cursor::Cursor;

/// Elements whose content is never treated as note text.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// Value with character references already decoded.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Raw text between tags; character references are still encoded.
    Text(&'a str),
    StartTag(StartTag),
    EndTag(String),
}

/// Splits HTML into tokens.
///
/// Never fails: anything that does not form a complete tag (a stray `<`,
/// an unterminated tag or quote) is emitted as text. Comments, doctypes
/// and processing instructions are dropped, as is the content of raw text
/// elements such as `<script>`.
pub fn tokenize(s: &str) -> Vec<Token<'_>> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text<'a>(out: &mut Vec<Token<'a>>, cur: &Cursor<'a>, start: usize, end: usize) {
        if end > start {
            out.push(Token::Text(cur.slice(start, end)));
        }
    }

    while !cur.eof() {
        if cur.peek() != Some(b'<') {
            cur.bump();
            continue;
        }
        let tag_start = cur.pos();

        if skip_comment(&mut cur) {
            flush_text(&mut out, &cur, text_start, tag_start);
            text_start = cur.pos();
            continue;
        }
        if let Some(name) = try_end_tag(&mut cur) {
            flush_text(&mut out, &cur, text_start, tag_start);
            out.push(Token::EndTag(name));
            text_start = cur.pos();
            continue;
        }
        if let Some(tag) = try_start_tag(&mut cur) {
            flush_text(&mut out, &cur, text_start, tag_start);
            let raw = RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) && !tag.self_closing;
            let name = tag.name.clone();
            out.push(Token::StartTag(tag));
            if raw {
                skip_raw_text(&mut cur, &name);
            }
            text_start = cur.pos();
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, &cur, text_start, cur.pos());
    out
}

/// Decodes character references in a text or attribute value.
pub fn decode(raw: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(raw)
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

fn is_tag_name_char(b: u8) -> bool {
    !b.is_ascii_whitespace() && b != b'/' && b != b'>'
}

fn is_attr_name_char(b: u8) -> bool {
    !b.is_ascii_whitespace() && b != b'/' && b != b'>' && b != b'='
}

/// Skips `<!-- ... -->`, `<!...>` and `<?...>`. An unterminated comment
/// runs to end of input.
fn skip_comment(cur: &mut Cursor<'_>) -> bool {
    if cur.starts_with(b"<!--") {
        cur.bump_n(4);
        if cur.advance_to_ignore_case(b"-->") {
            cur.bump_n(3);
        }
        return true;
    }
    if cur.starts_with(b"<!") || cur.starts_with(b"<?") {
        cur.bump_n(2);
        if cur.advance_to_ignore_case(b">") {
            cur.bump();
        }
        return true;
    }
    false
}

fn try_end_tag(cur: &mut Cursor<'_>) -> Option<String> {
    if !cur.starts_with(b"</") || !cur.peek_at(2).is_some_and(is_name_start) {
        return None;
    }
    let saved = cur.clone();
    cur.bump_n(2);
    let name = cur.eat_while(is_tag_name_char).to_ascii_lowercase();
    if !cur.advance_to_ignore_case(b">") {
        *cur = saved;
        return None;
    }
    cur.bump();
    Some(name)
}

fn try_start_tag(cur: &mut Cursor<'_>) -> Option<StartTag> {
    if !cur.peek_at(1).is_some_and(is_name_start) {
        return None;
    }
    let saved = cur.clone();
    cur.bump();
    let name = cur.eat_while(is_tag_name_char).to_ascii_lowercase();
    let mut attrs: Vec<Attribute> = vec![];

    loop {
        cur.skip_whitespace();
        match cur.peek() {
            None => {
                // Unterminated tag, restore and let it be text
                *cur = saved;
                return None;
            }
            Some(b'>') => {
                cur.bump();
                return Some(StartTag {
                    name,
                    attrs,
                    self_closing: false,
                });
            }
            Some(b'/') if cur.peek_at(1) == Some(b'>') => {
                cur.bump_n(2);
                return Some(StartTag {
                    name,
                    attrs,
                    self_closing: true,
                });
            }
            Some(b'/') | Some(b'=') => {
                cur.bump();
            }
            Some(_) => {
                let attr_name = cur.eat_while(is_attr_name_char).to_ascii_lowercase();
                cur.skip_whitespace();
                let value = if cur.peek() == Some(b'=') {
                    cur.bump();
                    cur.skip_whitespace();
                    match read_attr_value(cur) {
                        Some(v) => v,
                        None => {
                            *cur = saved;
                            return None;
                        }
                    }
                } else {
                    String::new()
                };
                // First occurrence wins, as in browsers
                if !attrs.iter().any(|a| a.name == attr_name) {
                    attrs.push(Attribute {
                        name: attr_name,
                        value,
                    });
                }
            }
        }
    }
}

/// Reads a quoted or unquoted attribute value. `None` means an unclosed quote.
fn read_attr_value(cur: &mut Cursor<'_>) -> Option<String> {
    match cur.peek() {
        Some(quote @ (b'"' | b'\'')) => {
            cur.bump();
            let start = cur.pos();
            while let Some(b) = cur.peek() {
                if b == quote {
                    let raw = cur.slice(start, cur.pos());
                    cur.bump();
                    return Some(decode(raw).into_owned());
                }
                cur.bump();
            }
            None
        }
        _ => {
            let raw = cur.eat_while(|b| !b.is_ascii_whitespace() && b != b'>');
            Some(decode(raw).into_owned())
        }
    }
}

fn skip_raw_text(cur: &mut Cursor<'_>, name: &str) {
    let close = format!("</{name}");
    cur.advance_to_ignore_case(close.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn start(name: &str, attrs: &[(&str, &str)]) -> Token<'static> {
        Token::StartTag(StartTag {
            name: name.to_string(),
            attrs: attrs
                .iter()
                .map(|(n, v)| Attribute {
                    name: n.to_string(),
                    value: v.to_string(),
                })
                .collect(),
            self_closing: false,
        })
    }

    #[test]
    fn tokenizes_simple_paragraph() {
        assert_eq!(
            tokenize("<p>Hello</p>"),
            vec![
                start("p", &[]),
                Token::Text("Hello"),
                Token::EndTag("p".to_string())
            ]
        );
    }

    #[test]
    fn attributes_in_all_quote_styles_are_decoded() {
        let tokens = tokenize(r#"<span class="widget tag" data-tag=a&amp;b data-values='["x"]'>"#);
        assert_eq!(
            tokens,
            vec![start(
                "span",
                &[
                    ("class", "widget tag"),
                    ("data-tag", "a&b"),
                    ("data-values", r#"["x"]"#)
                ]
            )]
        );
    }

    #[test]
    fn gt_inside_quoted_attribute_does_not_end_tag() {
        let tokens = tokenize(r#"<span data-operator=">">x</span>"#);
        assert_eq!(tokens[0], start("span", &[("data-operator", ">")]));
        assert_eq!(tokens[1], Token::Text("x"));
    }

    #[test]
    fn tag_and_attribute_names_are_lowercased() {
        let tokens = tokenize(r#"<SPAN CLASS="x"></SPAN>"#);
        assert_eq!(
            tokens,
            vec![start("span", &[("class", "x")]), Token::EndTag("span".to_string())]
        );
    }

    #[test]
    fn duplicate_attribute_keeps_first() {
        let tokens = tokenize(r#"<b id="one" id="two">"#);
        assert_eq!(tokens, vec![start("b", &[("id", "one")])]);
    }

    #[test]
    fn stray_angle_bracket_is_text() {
        assert_eq!(tokenize("a < b"), vec![Token::Text("a < b")]);
        assert_eq!(tokenize("1 <2"), vec![Token::Text("1 <2")]);
    }

    #[test]
    fn unterminated_tag_is_text() {
        assert_eq!(tokenize("x <span class"), vec![Token::Text("x <span class")]);
        assert_eq!(
            tokenize(r#"<span class="open>"#),
            vec![Token::Text(r#"<span class="open>"#)]
        );
    }

    #[test]
    fn comments_and_doctype_are_dropped() {
        assert_eq!(
            tokenize("<!DOCTYPE html>a<!-- hidden -->b"),
            vec![Token::Text("a"), Token::Text("b")]
        );
    }

    #[test]
    fn script_content_is_skipped() {
        let tokens = tokenize("<script>if (a < b) {}</script>after");
        assert_eq!(
            tokens,
            vec![
                start("script", &[]),
                Token::EndTag("script".to_string()),
                Token::Text("after")
            ]
        );
    }

    #[test]
    fn self_closing_tag() {
        let tokens = tokenize("a<br/>b");
        assert_eq!(
            tokens[1],
            Token::StartTag(StartTag {
                name: "br".to_string(),
                attrs: vec![],
                self_closing: true
            })
        );
    }
}
