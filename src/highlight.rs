use regex::Regex;
use std::sync::OnceLock;

/// Renders the overlay drawn underneath the transparent textarea. Only spans
/// are added, so the overlay's text content stays identical to `text`.
pub fn highlight_markdown(text: &str) -> String {
    static RE_H1: OnceLock<Regex> = OnceLock::new();
    static RE_H2: OnceLock<Regex> = OnceLock::new();
    static RE_H3: OnceLock<Regex> = OnceLock::new();
    static RE_H4: OnceLock<Regex> = OnceLock::new();
    static RE_WIKILINK: OnceLock<Regex> = OnceLock::new();
    static RE_BOLD: OnceLock<Regex> = OnceLock::new();
    static RE_ITALIC: OnceLock<Regex> = OnceLock::new();
    static RE_CODE: OnceLock<Regex> = OnceLock::new();
    static RE_QUOTE: OnceLock<Regex> = OnceLock::new();

    let re_h1 = RE_H1.get_or_init(|| Regex::new(r"(?m)^(#[^\S\n]+.*)$").unwrap());
    let re_h2 = RE_H2.get_or_init(|| Regex::new(r"(?m)^(##[^\S\n]+.*)$").unwrap());
    let re_h3 = RE_H3.get_or_init(|| Regex::new(r"(?m)^(###[^\S\n]+.*)$").unwrap());
    let re_h4 = RE_H4.get_or_init(|| Regex::new(r"(?m)^(####[^\S\n]+.*)$").unwrap());
    let re_wikilink = RE_WIKILINK.get_or_init(|| Regex::new(r"(\[\[[^\]\n]+\]\])").unwrap());
    let re_bold = RE_BOLD.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
    let re_italic = RE_ITALIC.get_or_init(|| Regex::new(r"\*([^*\n]+)\*").unwrap());
    let re_code = RE_CODE.get_or_init(|| Regex::new(r"`([^`\n]+)`").unwrap());
    let re_quote = RE_QUOTE.get_or_init(|| Regex::new(r"(?m)^(&gt;.*)$").unwrap());

    let mut html = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");

    html = re_h1.replace_all(&html, "<span class=\"hl-h1\">$1</span>").to_string();
    html = re_h2.replace_all(&html, "<span class=\"hl-h2\">$1</span>").to_string();
    html = re_h3.replace_all(&html, "<span class=\"hl-h3\">$1</span>").to_string();
    html = re_h4.replace_all(&html, "<span class=\"hl-h4\">$1</span>").to_string();
    html = re_wikilink
        .replace_all(&html, "<span class=\"hl-wikilink\">$1</span>")
        .to_string();
    // Markers stay in the output: dropping them would shift caret offsets.
    html = re_bold
        .replace_all(&html, "<span class=\"hl-bold\">**$1**</span>")
        .to_string();
    html = re_italic
        .replace_all(&html, "<span class=\"hl-italic\">*$1*</span>")
        .to_string();
    html = re_code
        .replace_all(&html, "<span class=\"hl-code\">`$1`</span>")
        .to_string();
    html = re_quote.replace_all(&html, "<span class=\"hl-quote\">$1</span>").to_string();

    // Trailing newline would otherwise collapse and desync the overlay height.
    html.push_str("\n ");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_tags(html: &str) -> String {
        let tags = Regex::new(r"<[^>]+>").unwrap();
        tags.replace_all(html, "")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }

    #[test]
    fn wraps_wiki_links() {
        let html = highlight_markdown("see [[Other|alias]] here");
        assert!(html.contains("<span class=\"hl-wikilink\">[[Other|alias]]</span>"));
    }

    #[test]
    fn escapes_markup() {
        let html = highlight_markdown("a <b> & c");
        assert!(html.starts_with("a &lt;b&gt; &amp; c"));
    }

    #[test]
    fn visible_text_matches_source() {
        let source = "# Title\n\n**bold** and *it* with `code`\n> quote [[Link]]\n<tag> & more";
        let html = highlight_markdown(source);
        assert_eq!(strip_tags(&html), format!("{source}\n "));
    }
}
