#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChangeOrigin {
    /// Typed into the surface by the user.
    Input,
    /// Written by the owner of the document value.
    #[default]
    External,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub text_changed: bool,
    pub revision: u64,
    pub origin: ChangeOrigin,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line<'a> {
    /// Byte offset of the first character of the line.
    pub from: usize,
    pub text: &'a str,
}

/// Mirror of the text held by an editing surface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditorDocument {
    text: String,
    revision: u64,
}

impl EditorDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            revision: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Replaces the whole document in one step.
    pub fn replace_all(&mut self, new_text: String, origin: ChangeOrigin) -> ApplyOutcome {
        let text_changed = self.text != new_text;
        if text_changed {
            self.text = new_text;
            self.revision += 1;
        }
        ApplyOutcome {
            text_changed,
            revision: self.revision,
            origin,
        }
    }
}

/// The line containing `pos`; positions past the end land on the last line.
pub fn line_at(text: &str, pos: usize) -> Line<'_> {
    let from = line_start(text, pos);
    let to = line_end(text, pos);
    Line {
        from,
        text: &text[from..to],
    }
}

fn clamp_to_boundary(text: &str, pos: usize) -> usize {
    let mut clamped = pos.min(text.len());
    while clamped > 0 && !text.is_char_boundary(clamped) {
        clamped -= 1;
    }
    clamped
}

fn line_start(text: &str, pos: usize) -> usize {
    let clamped = clamp_to_boundary(text, pos);
    text[..clamped].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

fn line_end(text: &str, pos: usize) -> usize {
    let clamped = clamp_to_boundary(text, pos);
    text[clamped..]
        .find('\n')
        .map(|i| clamped + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_bumps_revision_only_on_change() {
        let mut doc = EditorDocument::new("hello");
        let same = doc.replace_all("hello".to_string(), ChangeOrigin::External);
        assert!(!same.text_changed);
        assert_eq!(same.revision, 0);

        let changed = doc.replace_all("hello world".to_string(), ChangeOrigin::Input);
        assert!(changed.text_changed);
        assert_eq!(changed.revision, 1);
        assert_eq!(changed.origin, ChangeOrigin::Input);
        assert_eq!(doc.text(), "hello world");
    }

    #[test]
    fn finds_containing_line() {
        let text = "first\nsecond [[Link]]\nthird";
        let line = line_at(text, 10);
        assert_eq!(line.from, 6);
        assert_eq!(line.text, "second [[Link]]");

        let first = line_at(text, 0);
        assert_eq!(first.from, 0);
        assert_eq!(first.text, "first");

        let last = line_at(text, 999);
        assert_eq!(last.text, "third");
    }

    #[test]
    fn position_on_newline_belongs_to_preceding_line() {
        let line = line_at("ab\ncd", 2);
        assert_eq!(line.from, 0);
        assert_eq!(line.text, "ab");
    }

    #[test]
    fn line_lookup_tolerates_mid_character_positions() {
        let line = line_at("é\nü", 4);
        assert_eq!(line.from, 3);
        assert_eq!(line.text, "ü");
    }
}
