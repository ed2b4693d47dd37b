use crate::translator::TranslateError;
use std::io::Cursor;
use xmltree::Element;

pub fn parse_document(source: &str) -> Result<Element, TranslateError> {
    Element::parse(Cursor::new(source.as_bytes())).map_err(|e| TranslateError::Xml {
        message: e.to_string(),
    })
}

/// Element children of `node`, in document order. Text, comments and
/// processing instructions are skipped.
pub fn child_elements(node: &Element) -> impl Iterator<Item = &Element> {
    node.children.iter().filter_map(|child| child.as_element())
}

pub fn attr<'a>(node: &'a Element, name: &str) -> Option<&'a str> {
    node.attributes.get(name).map(String::as_str)
}

pub fn text(node: &Element) -> String {
    node.get_text()
        .map(|value| value.into_owned())
        .unwrap_or_default()
}

/// Descendants of `node` reached by following `path` one element name per
/// segment, starting at the children of `node`. Results are in document order.
pub fn find<'a>(node: &'a Element, path: &str) -> Vec<&'a Element> {
    let mut current = vec![node];
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        current = current
            .into_iter()
            .flat_map(|parent| child_elements(parent).filter(move |c| c.name == segment))
            .collect();
        if current.is_empty() {
            break;
        }
    }
    current
}

/// Like [`find`], but the first segment names the document root itself.
pub fn find_from_root<'a>(root: &'a Element, path: &str) -> Vec<&'a Element> {
    let trimmed = path.trim_start_matches('/');
    let (head, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));
    if head != root.name {
        return Vec::new();
    }
    find(root, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<project name="demo">
  <stage>
    <sprites>
      <sprite name="A"><scripts><script/><script/></scripts></sprite>
      <sprite name="B"/>
    </sprites>
  </stage>
</project>"#;

    #[test]
    fn find_walks_paths_in_document_order() {
        let root = parse_document(DOC).expect("document should parse");
        let sprites = find_from_root(&root, "project/stage/sprites/sprite");
        let names = sprites
            .iter()
            .map(|s| attr(s, "name").unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(find(sprites[0], "scripts/script").len(), 2);
        assert!(find(sprites[1], "scripts/script").is_empty());
    }

    #[test]
    fn find_from_root_requires_matching_root_name() {
        let root = parse_document(DOC).expect("document should parse");
        assert!(find_from_root(&root, "snapdata/project/stage").is_empty());
    }

    #[test]
    fn malformed_document_is_an_error() {
        let err = parse_document("<project><stage>").expect_err("unterminated document");
        assert!(matches!(err, TranslateError::Xml { .. }));
    }
}
