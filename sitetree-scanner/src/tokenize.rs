use scraper::{ElementRef, Html};

/// A start tag as seen in the markup, with its attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub name: String,
    pub attrs: Vec<(String, String)>,
}

/// What a start tag points at, if anything worth following.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// `href` of an `<a>` or `<link>`; a candidate child page.
    Link(String),
    /// `src` of an `<img>`, `<image>` or `<script>`; a static asset.
    Asset(String),
}

impl Reference {
    pub fn raw(&self) -> &str {
        match self {
            Reference::Link(raw) | Reference::Asset(raw) => raw,
        }
    }
}

impl StartTag {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn reference(&self) -> Option<Reference> {
        match self.name.as_str() {
            "a" | "link" => self.attr("href").map(|v| Reference::Link(v.to_string())),
            "img" | "image" | "script" => self.attr("src").map(|v| Reference::Asset(v.to_string())),
            _ => None,
        }
    }
}

/// Tokenize an HTML body into its start tags, in document order.
///
/// Parsing is lenient: malformed markup yields whatever tags html5ever
/// recovers, and the sequence simply ends with the document.
pub fn start_tags(body: &str) -> std::vec::IntoIter<StartTag> {
    let document = Html::parse_document(body);
    let tags: Vec<StartTag> = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .map(|element| {
            let element = element.value();
            StartTag {
                name: element.name().to_string(),
                attrs: element
                    .attrs()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            }
        })
        .collect();
    tags.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn references(body: &str) -> Vec<Reference> {
        start_tags(body).filter_map(|tag| tag.reference()).collect()
    }

    #[test]
    fn test_start_tags_document_order() {
        let names: Vec<String> = start_tags("<html><body><p><a href='/x'>x</a></p></body></html>")
            .map(|tag| tag.name)
            .collect();
        assert_eq!(names, vec!["html", "head", "body", "p", "a"]);
    }

    #[test]
    fn test_references_links_and_assets() {
        let refs = references(
            r#"<html><head>
                <link rel="stylesheet" href="/style.css">
                <script src="/app.js"></script>
            </head><body>
                <a href="/about">About</a>
                <img src="/logo.png">
            </body></html>"#,
        );
        assert_eq!(
            refs,
            vec![
                Reference::Link("/style.css".into()),
                Reference::Asset("/app.js".into()),
                Reference::Link("/about".into()),
                Reference::Asset("/logo.png".into()),
            ]
        );
    }

    #[test]
    fn test_image_tag_is_an_asset() {
        let refs = references(r#"<body><image src="/legacy.gif"></body>"#);
        assert_eq!(refs, vec![Reference::Asset("/legacy.gif".into())]);
    }

    #[test]
    fn test_tags_without_reference_attribute_are_ignored() {
        let refs = references(r#"<body><a name="anchor">x</a><script>var a;</script><img alt="x"></body>"#);
        assert!(refs.is_empty());
    }

    #[test]
    fn test_wrong_attribute_for_tag_is_ignored() {
        let refs = references(r#"<body><a src="/nope">x</a><img href="/nope"></body>"#);
        assert!(refs.is_empty());
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let refs = references(r#"<body><a href="/dup">1</a><a href="/dup">2</a></body>"#);
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn test_malformed_markup_still_yields_tags() {
        let refs = references(r#"<body><div><a href="/ok">unclosed <img src="/i.png"#);
        assert_eq!(refs.first(), Some(&Reference::Link("/ok".into())));
    }

    #[test]
    fn test_empty_body() {
        assert!(references("").is_empty());
    }
}
