use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Structured metadata the index and autocomplete read for a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub frontmatter: Option<serde_json::Value>,
    /// Inline tags, in document order, including their leading `#`.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub headings: Vec<HeadingInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingInfo {
    pub text: String,
    pub level: u8,
    /// 0-based source line.
    pub line: usize,
}

impl DocumentMetadata {
    /// Tags declared in front matter: either a single string or a list.
    #[must_use]
    pub fn frontmatter_tags(&self) -> Vec<String> {
        let Some(tags) = self
            .frontmatter
            .as_ref()
            .and_then(|frontmatter| frontmatter.get("tags"))
        else {
            return Vec::new();
        };
        match tags {
            serde_json::Value::String(tag) => vec![tag.clone()],
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str().map(ToString::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[must_use]
pub fn parse_markdown_metadata(raw: &str) -> DocumentMetadata {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let frontmatter = split_frontmatter(text).and_then(parse_frontmatter);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let line_starts = line_start_offsets(text);
    let mut headings = Vec::new();
    let mut tags = Vec::new();
    let mut open_heading: Option<(u8, usize, String)> = None;
    let mut verbatim = false;

    for (event, range) in Parser::new_ext(text, options).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::MetadataBlock(_)) => verbatim = true,
            Event::End(TagEnd::CodeBlock | TagEnd::MetadataBlock(_)) => verbatim = false,
            Event::Start(Tag::Heading { level, .. }) => {
                let line = line_of_offset(&line_starts, range.start);
                open_heading = Some((heading_level(level), line, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, line, heading)) = open_heading.take() {
                    headings.push(HeadingInfo {
                        text: heading.trim().to_string(),
                        level,
                        line,
                    });
                }
            }
            Event::Text(value) if !verbatim => {
                collect_inline_tags(&value, &mut tags);
                if let Some((_, _, heading)) = open_heading.as_mut() {
                    heading.push_str(&value);
                }
            }
            Event::Code(value) => {
                if let Some((_, _, heading)) = open_heading.as_mut() {
                    heading.push_str(&value);
                }
            }
            _ => {}
        }
    }

    DocumentMetadata {
        frontmatter,
        tags,
        headings,
    }
}

fn split_frontmatter(text: &str) -> Option<&str> {
    let rest = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))?;
    let mut offset = 0usize;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}

fn parse_frontmatter(raw: &str) -> Option<serde_json::Value> {
    match serde_norway::from_str::<serde_json::Value>(raw) {
        Ok(value) if value.is_object() => Some(value),
        Ok(_) => None,
        Err(err) => {
            debug!(error = %err, "ignoring unparsable front matter");
            None
        }
    }
}

fn collect_inline_tags(text: &str, out: &mut Vec<String>) {
    let mut previous: Option<char> = None;
    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        let boundary = previous.is_none_or(char::is_whitespace);
        previous = Some(ch);
        if ch != '#' || !boundary {
            continue;
        }
        let body_start = idx + ch.len_utf8();
        let mut body_end = body_start;
        while let Some(&(next_idx, next)) = chars.peek() {
            if !is_tag_char(next) {
                break;
            }
            body_end = next_idx + next.len_utf8();
            previous = Some(next);
            chars.next();
        }
        let body = &text[body_start..body_end];
        if !body.is_empty() && !body.chars().all(|c| c.is_ascii_digit()) {
            out.push(format!("#{body}"));
        }
    }
}

fn is_tag_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '-' | '/')
}

const fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn line_start_offsets(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
        .collect()
}

fn line_of_offset(line_starts: &[usize], offset: usize) -> usize {
    line_starts.partition_point(|start| *start <= offset).saturating_sub(1)
}
