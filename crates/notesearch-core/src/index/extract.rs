use crate::corpus::DocumentHandle;
use crate::parse::DocumentMetadata;

use super::{DocumentRecord, HeadingBuckets, HeadingEntry};

const QUOTE_MARKER: char = '>';

#[must_use]
pub fn build_record(
    doc: &DocumentHandle,
    content: String,
    metadata: Option<&DocumentMetadata>,
) -> DocumentRecord {
    let quotes = extract_quotes(&content);
    DocumentRecord {
        path: doc.path.clone(),
        file_name: doc.name.clone(),
        directory: doc.directory().to_string(),
        tags: metadata.map(collect_tags).unwrap_or_default(),
        headings: metadata.map(bucket_headings).unwrap_or_default(),
        quotes,
        content,
    }
}

/// Lines whose first character is the quote marker, in document order.
#[must_use]
pub fn extract_quotes(content: &str) -> Vec<String> {
    content
        .split('\n')
        .filter(|line| line.starts_with(QUOTE_MARKER))
        .map(ToString::to_string)
        .collect()
}

fn collect_tags(metadata: &DocumentMetadata) -> Vec<String> {
    let mut tags = metadata.frontmatter_tags();
    tags.extend(metadata.tags.iter().cloned());
    tags
}

fn bucket_headings(metadata: &DocumentMetadata) -> HeadingBuckets {
    let mut buckets = HeadingBuckets::default();
    for heading in &metadata.headings {
        buckets.push(
            heading.level,
            HeadingEntry {
                text: heading.text.clone(),
                line: heading.line,
            },
        );
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_markdown_metadata;

    #[test]
    fn quotes_require_marker_in_first_column() {
        let quotes = extract_quotes("> first\n  > indented\ntext\n>second");
        assert_eq!(quotes, vec!["> first", ">second"]);
    }

    #[test]
    fn record_combines_frontmatter_and_inline_tags() {
        let content = "---\ntags: [alpha]\n---\n# Title\nbody #beta\n#### Deep\n".to_string();
        let metadata = parse_markdown_metadata(&content);
        let doc = DocumentHandle::from_path("Notes/idea.md");
        let record = build_record(&doc, content, Some(&metadata));

        assert_eq!(record.file_name, "idea.md");
        assert_eq!(record.directory, "Notes");
        assert_eq!(record.tags, vec!["alpha", "#beta"]);
        assert_eq!(record.headings.h1[0].text, "Title");
        assert_eq!(record.headings.h1[0].line, 3);
        assert_eq!(record.headings.h4[0].text, "Deep");
    }

    #[test]
    fn missing_metadata_leaves_structured_fields_empty() {
        let doc = DocumentHandle::from_path("loose.md");
        let record = build_record(&doc, "> quoted".to_string(), None);
        assert!(record.tags.is_empty());
        assert!(record.headings.is_empty());
        assert_eq!(record.quotes, vec!["> quoted"]);
        assert_eq!(record.directory, "/");
    }
}
