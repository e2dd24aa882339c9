//! Owned XML tree used by the XLIFF 1.2, XLIFF 2.0 and XTB formats.
//!
//! Documents are small enough to be held entirely in memory, so the tree is a
//! plain recursive structure: every element owns its attributes (in document
//! order) and its children. Lookups by tag name are linear scans.
//!
//! Indentation between elements (whitespace-only text containing a line
//! break) is dropped while parsing and regenerated as 2-space indentation
//! when writing. Elements that carry text
//! (e.g. `<source>Hello <x id="0"/></source>`) are written back inline so
//! that their content is not altered.

use std::borrow::Cow;

use indexmap::IndexMap;
use quick_xml::{
    Reader, Writer,
    escape::partial_escape,
    events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event},
};

use crate::error::Error;

const INDENT: &str = "  ";

/// A parsed XML document: prolog, root element and trailing misc nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub declaration: Option<XmlDeclaration>,
    /// Comments, processing instructions and the doctype preceding the root.
    pub prolog: Vec<XmlNode>,
    pub root: XmlElement,
    /// Comments and processing instructions following the root.
    pub epilog: Vec<XmlNode>,
}

/// The `<?xml ...?>` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDeclaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
    /// Raw content of a `<!DOCTYPE ...>`; only found in a document prolog.
    DocType(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<XmlNode>,
}

impl XmlDeclaration {
    /// `<?xml version="1.0" encoding="UTF-8"?>`
    pub fn utf8() -> Self {
        XmlDeclaration {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: None,
        }
    }
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        XmlElement {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Sets an attribute, keeping its position when it already exists.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Direct child elements, in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Concatenated text content of this element and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                XmlNode::Text(text) | XmlNode::CData(text) => out.push_str(text),
                XmlNode::Element(element) => out.push_str(&element.text()),
                _ => {}
            }
        }
        out
    }

    /// Elements named `name` in depth-first order, this element included.
    /// The search does not descend into a match.
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        if self.name == name {
            found.push(self);
            return;
        }
        for child in self.child_elements() {
            child.collect_named(name, found);
        }
    }

    /// Calls `f` on every element named `name`, with the same traversal rules
    /// as [`XmlElement::descendants_named`].
    pub fn for_each_named_mut<F>(&mut self, name: &str, f: &mut F)
    where
        F: FnMut(&mut XmlElement),
    {
        if self.name == name {
            f(self);
            return;
        }
        for child in self.child_elements_mut() {
            child.for_each_named_mut(name, f);
        }
    }

    /// Consumes the element and returns every element named `name`.
    pub fn into_descendants_named(self, name: &str) -> Vec<XmlElement> {
        let mut found = Vec::new();
        self.move_named(name, &mut found);
        found
    }

    fn move_named(self, name: &str, found: &mut Vec<XmlElement>) {
        if self.name == name {
            found.push(self);
            return;
        }
        for child in self.children {
            if let XmlNode::Element(element) = child {
                element.move_named(name, found);
            }
        }
    }

    /// Drops indentation between child elements. Only whitespace runs that
    /// contain a line break count as indentation; a run such as the single
    /// space in `<x/> <x/>` is message content and stays.
    fn drop_layout_whitespace(&mut self) {
        let mut has_markup = false;
        for node in &self.children {
            match node {
                XmlNode::Text(text) if !is_layout_whitespace(text) => return,
                XmlNode::CData(_) => return,
                XmlNode::Text(_) => {}
                _ => has_markup = true,
            }
        }
        if has_markup {
            self.children
                .retain(|node| !matches!(node, XmlNode::Text(text) if is_layout_whitespace(text)));
        }
    }
}

fn is_layout_whitespace(text: &str) -> bool {
    text.contains('\n') && text.trim().is_empty()
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        XmlDocument {
            declaration: Some(XmlDeclaration::utf8()),
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }

    pub fn with_doctype(mut self, doctype: impl Into<String>) -> Self {
        self.prolog.push(XmlNode::DocType(doctype.into()));
        self
    }

    /// Parses a complete document. Exactly one root element is required.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let mut reader = Reader::from_str(content);

        let mut declaration = None;
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut stack: Vec<XmlElement> = Vec::new();

        loop {
            let event = reader.read_event()?;
            let node = match event {
                Event::Decl(decl) => {
                    declaration = Some(parse_declaration(&decl)?);
                    continue;
                }
                Event::Start(start) => {
                    stack.push(parse_start(&start)?);
                    continue;
                }
                Event::End(_) => match stack.pop() {
                    Some(mut element) => {
                        element.drop_layout_whitespace();
                        XmlNode::Element(element)
                    }
                    None => {
                        return Err(Error::InvalidDocument(
                            "closing tag without a matching opening tag".to_string(),
                        ));
                    }
                },
                Event::Empty(start) => XmlNode::Element(parse_start(&start)?),
                Event::Text(text) => XmlNode::Text(text.unescape()?.into_owned()),
                Event::CData(cdata) => XmlNode::CData(raw_text(&cdata)),
                Event::Comment(comment) => XmlNode::Comment(raw_text(&comment)),
                Event::PI(pi) => XmlNode::ProcessingInstruction(raw_text(&pi)),
                Event::DocType(doctype) => XmlNode::DocType(raw_text(&doctype)),
                Event::Eof => break,
            };

            if let Some(parent) = stack.last_mut() {
                parent.children.push(node);
                continue;
            }

            match node {
                XmlNode::Element(element) => {
                    if root.is_some() {
                        return Err(Error::InvalidDocument(format!(
                            "unexpected second root element <{}>",
                            element.name
                        )));
                    }
                    root = Some(element);
                }
                XmlNode::Text(text) | XmlNode::CData(text) => {
                    if !text.trim().is_empty() {
                        return Err(Error::InvalidDocument(
                            "text content outside of the root element".to_string(),
                        ));
                    }
                }
                other if root.is_some() => epilog.push(other),
                other => prolog.push(other),
            }
        }

        if let Some(unclosed) = stack.last() {
            return Err(Error::InvalidDocument(format!(
                "element <{}> is never closed",
                unclosed.name
            )));
        }
        let root = root
            .ok_or_else(|| Error::InvalidDocument("document has no root element".to_string()))?;

        Ok(XmlDocument {
            declaration,
            prolog,
            root,
            epilog,
        })
    }

    /// Serializes the document with 2-space indentation.
    pub fn to_xml_string(&self) -> Result<String, Error> {
        let mut writer = Writer::new(Vec::new());
        let mut first = true;

        if let Some(decl) = &self.declaration {
            writer.write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )))?;
            first = false;
        }
        for node in &self.prolog {
            if !first {
                write_raw(&mut writer, "\n")?;
            }
            write_node(&mut writer, node, 0, true)?;
            first = false;
        }
        if !first {
            write_raw(&mut writer, "\n")?;
        }
        write_element(&mut writer, &self.root, 0, true)?;
        for node in &self.epilog {
            write_raw(&mut writer, "\n")?;
            write_node(&mut writer, node, 0, true)?;
        }

        String::from_utf8(writer.into_inner())
            .map_err(|e| Error::InvalidDocument(format!("serialized XML is not UTF-8: {}", e)))
    }
}

fn raw_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn decoded(bytes: Cow<'_, [u8]>) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}

fn parse_declaration(decl: &BytesDecl<'_>) -> Result<XmlDeclaration, Error> {
    Ok(XmlDeclaration {
        version: decoded(decl.version()?),
        encoding: decl.encoding().transpose()?.map(decoded),
        standalone: decl.standalone().transpose()?.map(decoded),
    })
}

fn parse_start(start: &BytesStart<'_>) -> Result<XmlElement, Error> {
    let mut element = XmlElement::new(raw_text(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr?;
        let key = raw_text(attr.key.as_ref());
        let value = attr.unescape_value()?.into_owned();
        element.attributes.insert(key, value);
    }
    Ok(element)
}

fn write_raw<W: std::io::Write>(writer: &mut Writer<W>, raw: &str) -> Result<(), Error> {
    writer.write_event(Event::Text(BytesText::from_escaped(raw)))?;
    Ok(())
}

fn write_indent<W: std::io::Write>(writer: &mut Writer<W>, depth: usize) -> Result<(), Error> {
    write_raw(writer, &format!("\n{}", INDENT.repeat(depth)))
}

fn write_node<W: std::io::Write>(
    writer: &mut Writer<W>,
    node: &XmlNode,
    depth: usize,
    pretty: bool,
) -> Result<(), Error> {
    match node {
        XmlNode::Element(element) => write_element(writer, element, depth, pretty)?,
        XmlNode::Text(text) => {
            writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?
        }
        XmlNode::CData(text) => writer.write_event(Event::CData(BytesCData::new(text.as_str())))?,
        XmlNode::Comment(text) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?
        }
        XmlNode::ProcessingInstruction(text) => {
            writer.write_event(Event::PI(BytesPI::new(text.as_str())))?
        }
        XmlNode::DocType(text) => {
            writer.write_event(Event::DocType(BytesText::from_escaped(text.as_str())))?
        }
    }
    Ok(())
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    element: &XmlElement,
    depth: usize,
    pretty: bool,
) -> Result<(), Error> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;

    // Text-bearing elements are written verbatim, everything below included.
    let indent_children = pretty
        && element
            .children
            .iter()
            .all(|node| !matches!(node, XmlNode::Text(_) | XmlNode::CData(_)));

    for child in &element.children {
        if indent_children {
            write_indent(writer, depth + 1)?;
        }
        write_node(writer, child, depth + 1, indent_children)?;
    }
    if indent_children {
        write_indent(writer, depth)?;
    }

    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_nested_elements() {
        let xml = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <xliff version="1.2">
              <file source-language="en">
                <body>
                  <trans-unit id="a"><source>A</source></trans-unit>
                  <trans-unit id="b"><source>B</source></trans-unit>
                </body>
              </file>
            </xliff>
        "#};
        let doc = XmlDocument::parse(xml).unwrap();

        assert_eq!(doc.declaration, Some(XmlDeclaration::utf8()));
        assert_eq!(doc.root.name, "xliff");
        assert_eq!(doc.root.attribute("version"), Some("1.2"));

        let bodies = doc.root.descendants_named("body");
        assert_eq!(bodies.len(), 1);
        let ids: Vec<_> = bodies[0]
            .child_elements()
            .filter_map(|unit| unit.attribute("id"))
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(bodies[0].children.len(), 2); // layout whitespace dropped
    }

    #[test]
    fn test_attributes_keep_document_order() {
        let doc = XmlDocument::parse(r#"<unit z="1" a="2" m="3"/>"#).unwrap();
        let keys: Vec<_> = doc.root.attributes.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_mixed_content_is_preserved() {
        let xml = r#"<root><source>Hello <x id="INTERPOLATION"/> and  <b>you</b></source></root>"#;
        let doc = XmlDocument::parse(xml).unwrap();
        let out = doc.to_xml_string().unwrap();
        assert!(out.contains(r#"<source>Hello <x id="INTERPOLATION"/> and  <b>you</b></source>"#));
    }

    #[test]
    fn test_whitespace_only_text_element_is_kept() {
        let doc = XmlDocument::parse("<root><target> </target></root>").unwrap();
        let target = doc.root.child_elements().next().unwrap();
        assert_eq!(target.text(), " ");
    }

    #[test]
    fn test_inline_space_between_elements_is_kept() {
        let xml = r#"<root><source><x id="A"/> <x id="B"/></source></root>"#;
        let doc = XmlDocument::parse(xml).unwrap();
        let source = doc.root.child_elements().next().unwrap();
        assert_eq!(source.children.len(), 3);
        assert_eq!(source.children[1], XmlNode::Text(" ".to_string()));

        let out = doc.to_xml_string().unwrap();
        assert!(out.contains(r#"<source><x id="A"/> <x id="B"/></source>"#));
    }

    #[test]
    fn test_indentation_between_elements_is_dropped() {
        let doc = XmlDocument::parse("<root>\n  <a/>\n  <b/>\n</root>").unwrap();
        assert_eq!(doc.root.children.len(), 2);
    }

    #[test]
    fn test_entities_are_unescaped_and_escaped_back() {
        let xml = r#"<root><source title="a &quot;b&quot;">Tom &amp; Jerry &lt;3</source></root>"#;
        let doc = XmlDocument::parse(xml).unwrap();
        let source = doc.root.child_elements().next().unwrap();
        assert_eq!(source.text(), "Tom & Jerry <3");
        assert_eq!(source.attribute("title"), Some("a \"b\""));

        let out = doc.to_xml_string().unwrap();
        assert!(out.contains("Tom &amp; Jerry &lt;3"));
        assert!(out.contains("title=\"a &quot;b&quot;\""));
    }

    #[test]
    fn test_serialize_indents_element_only_content() {
        let root = XmlElement::new("translationbundle")
            .with_attribute("lang", "fr")
            .with_child(XmlElement::new("translation").with_attribute("id", "1"));
        let out = XmlDocument::new(root).to_xml_string().unwrap();
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <translationbundle lang=\"fr\">\n  \
             <translation id=\"1\"/>\n\
             </translationbundle>"
        );
    }

    #[test]
    fn test_doctype_and_comments_round_trip() {
        let xml = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <!DOCTYPE translationbundle [<!ELEMENT ex (#PCDATA)>]>
            <translationbundle lang="de">
              <!-- generated -->
              <translation id="1"><![CDATA[a < b]]></translation>
            </translationbundle>
        "#};
        let doc = XmlDocument::parse(xml).unwrap();
        assert_eq!(
            doc.prolog,
            vec![XmlNode::DocType(
                "translationbundle [<!ELEMENT ex (#PCDATA)>]".to_string()
            )]
        );

        let out = doc.to_xml_string().unwrap();
        assert!(out.contains("<!DOCTYPE translationbundle [<!ELEMENT ex (#PCDATA)>]>"));
        assert!(out.contains("<!-- generated -->"));
        assert!(out.contains("<![CDATA[a < b]]>"));

        let reparsed = XmlDocument::parse(&out).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn test_for_each_named_mut_reaches_every_container() {
        let xml = r#"<xliff><file><body><u id="1"/></body></file><file><body><u id="2"/></body></file></xliff>"#;
        let mut doc = XmlDocument::parse(xml).unwrap();
        let mut seen = 0;
        doc.root.for_each_named_mut("body", &mut |body| {
            seen += 1;
            body.set_attribute("visited", "yes");
        });
        assert_eq!(seen, 2);
        assert!(
            doc.root
                .descendants_named("body")
                .iter()
                .all(|body| body.attribute("visited") == Some("yes"))
        );
    }

    #[test]
    fn test_into_descendants_named() {
        let xml = r#"<a><b><c/></b><c/><d><c/></d></a>"#;
        let doc = XmlDocument::parse(xml).unwrap();
        assert_eq!(doc.root.into_descendants_named("c").len(), 3);
    }

    #[test]
    fn test_malformed_xml_is_rejected() {
        let err = XmlDocument::parse("<a><b></a>").unwrap_err();
        assert!(matches!(err, Error::XmlParse(_)));
    }

    #[test]
    fn test_unclosed_element_is_rejected() {
        let err = XmlDocument::parse("<a><b>").unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_) | Error::XmlParse(_)));
    }

    #[test]
    fn test_missing_root_is_rejected() {
        let err = XmlDocument::parse("<?xml version=\"1.0\"?>").unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
    }

    #[test]
    fn test_second_root_is_rejected() {
        let err = XmlDocument::parse("<a/><b/>").unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
    }

    #[test]
    fn test_text_outside_root_is_rejected() {
        let err = XmlDocument::parse("<a/>trailing").unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
    }
}
