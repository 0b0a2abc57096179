//! Inline emphasis markup.
//!
//! Greeting text is a small subset of HTML. Tags are never counted as
//! characters; `<strong>`, `<b>`, `<em>`, `<i>` and `<u>` change the
//! emphasis of the glyphs between them and any other element is dropped.
//! Common character references (`&amp;`, `&lt;`, `&nbsp;`, numeric) count
//! as one glyph.

/// Emphasis flags carried by a glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Emphasis {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Emphasis {
    /// Emphasis with no flags set.
    pub const PLAIN: Self = Self {
        bold: false,
        italic: false,
        underline: false,
    };

    pub fn is_plain(self) -> bool {
        self == Self::PLAIN
    }
}

/// One visible character and its emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub emphasis: Emphasis,
}

impl Glyph {
    pub fn new(ch: char, emphasis: Emphasis) -> Self {
        Self { ch, emphasis }
    }

    pub fn plain(ch: char) -> Self {
        Self::new(ch, Emphasis::PLAIN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Bold,
    Italic,
    Underline,
}

#[derive(Debug, Clone, Copy)]
struct Tag {
    /// `None` for elements that carry no emphasis.
    kind: Option<TagKind>,
    closing: bool,
}

impl Tag {
    /// Try to read a tag at the start of `s`.
    ///
    /// A tag is `<name ...>` or `</name ...>` with the name starting right
    /// after the `<` or `</`, so `a < b > c` stays text. Returns the tag and
    /// the number of bytes it spans.
    fn parse(s: &str) -> Option<(Self, usize)> {
        let body = s.strip_prefix('<')?;
        let (closing, body) = match body.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        if !body.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }

        let name_len = body
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
            .unwrap_or(body.len());
        let (name, rest) = body.split_at(name_len);
        if !rest.starts_with(|c: char| c == '>' || c == '/' || c.is_ascii_whitespace()) {
            return None;
        }
        let end = tag_end(rest)?;

        let kind = match name.to_ascii_lowercase().as_str() {
            "strong" | "b" => Some(TagKind::Bold),
            "em" | "i" => Some(TagKind::Italic),
            "u" => Some(TagKind::Underline),
            _ => None,
        };
        let consumed = s.len() - rest.len() + end + 1;
        Some((Self { kind, closing }, consumed))
    }
}

/// Byte offset of the `>` that closes a tag, skipping quoted attribute
/// values.
fn tag_end(s: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in s.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return Some(i),
            None => {}
        }
    }
    None
}

/// Longest entity body we look for, e.g. `#x10FFFF`.
const MAX_ENTITY: usize = 8;

/// Decode a character reference at the start of `s`.
///
/// Returns the character and the number of bytes it spans. Unknown names
/// are left as text.
fn entity(s: &str) -> Option<(char, usize)> {
    let body = s.strip_prefix('&')?;
    let end = body.get(..=MAX_ENTITY).unwrap_or(body).find(';')?;
    let name = &body[..end];

    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code)?
        }
    };
    Some((ch, end + 2))
}

/// Open tag counts; a flag is set while its count is non-zero.
#[derive(Debug, Default)]
struct Depth {
    bold: usize,
    italic: usize,
    underline: usize,
}

impl Depth {
    fn apply(&mut self, tag: Tag) {
        let slot = match tag.kind {
            Some(TagKind::Bold) => &mut self.bold,
            Some(TagKind::Italic) => &mut self.italic,
            Some(TagKind::Underline) => &mut self.underline,
            None => return,
        };
        if tag.closing {
            // Stray closing tags are ignored.
            *slot = slot.saturating_sub(1);
        } else {
            *slot += 1;
        }
    }

    fn emphasis(&self) -> Emphasis {
        Emphasis {
            bold: self.bold > 0,
            italic: self.italic > 0,
            underline: self.underline > 0,
        }
    }
}

/// Split text into glyphs, resolving emphasis tags and character
/// references.
///
/// Every tag is zero width; only the emphasis tags change styling. A `<`
/// that does not start a tag is literal text. Tags left open end with the
/// text.
pub fn parse_markup(text: &str) -> Vec<Glyph> {
    let mut glyphs = Vec::with_capacity(text.len());
    let mut depth = Depth::default();
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if ch == '<'
            && let Some((tag, consumed)) = Tag::parse(rest)
        {
            depth.apply(tag);
            rest = &rest[consumed..];
            continue;
        }
        if ch == '&'
            && let Some((decoded, consumed)) = entity(rest)
        {
            glyphs.push(Glyph::new(decoded, depth.emphasis()));
            rest = &rest[consumed..];
            continue;
        }
        glyphs.push(Glyph::new(ch, depth.emphasis()));
        rest = &rest[ch.len_utf8()..];
    }

    glyphs
}

/// Number of visible glyphs in `text`.
pub fn glyph_count(text: &str) -> usize {
    parse_markup(text).len()
}
