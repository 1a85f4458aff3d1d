use markup5ever::data::NAMED_ENTITIES;
use std::borrow::Cow;

/// A template literal under construction: static segments around holes.
/// There is always exactly one more segment than there are holes.
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    parts: Vec<String>,
    holes: Vec<String>,
}

impl Default for TemplateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self {
            parts: vec![String::new()],
            holes: Vec::new(),
        }
    }

    /// Appends raw markup text; escaping happens in `build`.
    pub fn add_static(&mut self, text: &str) -> &mut Self {
        if let Some(last) = self.parts.last_mut() {
            last.push_str(text);
        }
        self
    }

    /// Appends a hole holding already compiled JS.
    pub fn add_hole(&mut self, expression: String) -> &mut Self {
        self.holes.push(expression);
        self.parts.push(String::new());
        self
    }

    /// The template literal, backticks included.
    pub fn build(&self) -> String {
        let mut out = String::from("`");
        for (i, part) in self.parts.iter().enumerate() {
            out.push_str(&escape_template_text(part));
            if let Some(hole) = self.holes.get(i) {
                out.push_str("${");
                out.push_str(hole);
                out.push('}');
            }
        }
        out.push('`');
        out
    }

    pub fn build_tagged(&self, tag: &str) -> String {
        format!("{}{}", tag, self.build())
    }
}

/// Longest entity name in the HTML table.
const MAX_ENTITY_NAME: usize = 32;

/// Resolves `&name;`, `&#ddd;` and `&#xhh;` references the way JSX text and
/// attribute strings are read. Anything unrecognized stays as written.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let decoded = tail
            .find(';')
            .filter(|end| *end <= MAX_ENTITY_NAME)
            .and_then(|end| decode_reference(&tail[..end]).map(|c| (c, end + 1)));
        match decoded {
            Some((replacement, consumed)) => {
                out.push_str(&replacement);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_reference(name: &str) -> Option<String> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    // Keys carry their `;`; prefix-only entries map to (0, 0).
    let key = format!("{};", name);
    let &(first, second) = NAMED_ENTITIES.get(key.as_str())?;
    if first == 0 {
        return None;
    }
    let mut decoded = String::new();
    decoded.push(char::from_u32(first)?);
    if second != 0 {
        decoded.push(char::from_u32(second)?);
    }
    Some(decoded)
}

/// Escapes text for the static part of a template literal.
pub fn escape_template_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes an attribute value written inside double quotes.
pub fn escape_attribute_value(value: &str) -> String {
    value.replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_surround_holes() {
        let mut builder = TemplateBuilder::new();
        builder
            .add_static("<div class=")
            .add_hole("cls".to_string())
            .add_static(">")
            .add_hole("count()".to_string())
            .add_static("</div>");
        assert_eq!(builder.build(), "`<div class=${cls}>${count()}</div>`");
    }

    #[test]
    fn test_empty_and_hole_only_templates() {
        let mut builder = TemplateBuilder::new();
        assert_eq!(builder.build_tagged("html"), "html``");
        builder.add_hole("x".to_string());
        assert_eq!(builder.build_tagged("html"), "html`${x}`");
    }

    #[test]
    fn test_static_text_is_escaped() {
        assert_eq!(escape_template_text("a`b"), "a\\`b");
        assert_eq!(escape_template_text("C:\\dir"), "C:\\\\dir");
        assert_eq!(escape_template_text("cost ${x} $5"), "cost \\${x} $5");
        assert_eq!(escape_attribute_value("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;p&gt; &copy; &nbsp;"), "<p> \u{a9} \u{a0}");
        assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
        assert!(matches!(decode_entities("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_unknown_references_stay_as_written() {
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("&bogus; & &;"), "&bogus; & &;");
        assert_eq!(decode_entities("&#xZZ; &amp"), "&#xZZ; &amp");
    }
}
