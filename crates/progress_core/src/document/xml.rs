//! XML implementation of `DocumentParser` on top of `quick-xml`.
//!
//! Declarations, comments, processing instructions and whitespace between
//! elements are skipped. Any other character data is rejected because board
//! documents carry everything in attributes.

use super::{DocumentError, DocumentNode, DocumentParser, DocumentResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parser for board XML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDocumentParser;

impl XmlDocumentParser {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentParser for XmlDocumentParser {
    fn parse(&self, text: &str) -> DocumentResult<DocumentNode> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut open: Vec<DocumentNode> = Vec::new();
        let mut root: Option<DocumentNode> = None;

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    return Err(DocumentError::Malformed {
                        position: reader.buffer_position() as u64,
                        message: err.to_string(),
                    })
                }
            };
            let position = reader.buffer_position() as u64;

            match event {
                Event::Start(start) => open.push(element_from(&start, position)?),
                Event::Empty(start) => {
                    let node = element_from(&start, position)?;
                    attach(node, &mut open, &mut root)?;
                }
                Event::End(_) => {
                    let node = open.pop().ok_or_else(|| DocumentError::Malformed {
                        position,
                        message: "closing tag without matching opening tag".to_string(),
                    })?;
                    attach(node, &mut open, &mut root)?;
                }
                Event::Text(_) | Event::CData(_) => {
                    return Err(DocumentError::UnexpectedText { position });
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(unclosed) = open.pop() {
            return Err(DocumentError::Unclosed(unclosed.tag));
        }
        root.ok_or(DocumentError::Empty)
    }
}

fn element_from(start: &BytesStart<'_>, position: u64) -> DocumentResult<DocumentNode> {
    let malformed = |message: String| DocumentError::Malformed { position, message };

    let mut node = DocumentNode::new(String::from_utf8_lossy(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| malformed(err.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|err| malformed(err.to_string()))?
            .into_owned();
        node.attributes.push((key, value));
    }
    Ok(node)
}

fn attach(
    node: DocumentNode,
    open: &mut [DocumentNode],
    root: &mut Option<DocumentNode>,
) -> DocumentResult<()> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(DocumentError::MultipleRoots);
    }
    *root = Some(node);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::XmlDocumentParser;
    use crate::document::{DocumentError, DocumentParser};

    fn parse(text: &str) -> Result<crate::document::DocumentNode, DocumentError> {
        XmlDocumentParser::new().parse(text)
    }

    #[test]
    fn builds_nested_tree_with_unescaped_attributes() {
        let root = parse(
            "<?xml version=\"1.0\"?>\n<!-- saved -->\n<board name=\"a &amp; b\">\n\t<cardlist id=\"1\">\n\t\t<item id=\"2\"></item>\n\t\t<item id=\"3\"/>\n\t</cardlist>\n</board>\n",
        )
        .unwrap();

        assert_eq!(root.tag, "board");
        assert_eq!(root.attribute("name"), Some("a & b"));
        assert_eq!(root.children().len(), 1);
        let cardlist = &root.children()[0];
        assert_eq!(cardlist.tag, "cardlist");
        let item_ids: Vec<_> = cardlist
            .children()
            .iter()
            .map(|item| item.attribute("id").unwrap())
            .collect();
        assert_eq!(item_ids, vec!["2", "3"]);
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse("").unwrap_err(), DocumentError::Empty);
        assert_eq!(parse("  \n<!-- only -->").unwrap_err(), DocumentError::Empty);
    }

    #[test]
    fn rejects_multiple_roots() {
        assert_eq!(
            parse("<board/><board/>").unwrap_err(),
            DocumentError::MultipleRoots
        );
    }

    #[test]
    fn rejects_text_content() {
        assert!(matches!(
            parse("<board>hello</board>").unwrap_err(),
            DocumentError::UnexpectedText { .. }
        ));
    }

    #[test]
    fn rejects_mismatched_and_unclosed_tags() {
        assert!(parse("<board><cardlist></board>").is_err());
        assert!(parse("<board><cardlist>").is_err());
    }

    #[test]
    fn rejects_broken_attributes() {
        assert!(matches!(
            parse("<board name=\"x\" name=\"y\"/>").unwrap_err(),
            DocumentError::Malformed { .. }
        ));
        assert!(parse("<board name=\"a &bogus; b\"/>").is_err());
    }
}
