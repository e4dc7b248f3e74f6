//! ClaML XML reader.
//!
//! Reads a ClaML document into a [`ClamlDocument`] with a pull parser. Only
//! the elements the transformation uses are kept; everything else (authors,
//! variants, usage kinds, modifier declarations, history, ...) is skipped.
//! Malformed XML aborts the read.

use claml_types::{
    ClamlDocument, Class, ClassKind, Identifier, Label, LabelNode, Meta, ModifiedBy,
    ModifierClass, Rubric, RubricKind, TermClass, Title,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::types::{ClamlError, ClamlResult};

/// Parses a complete ClaML document from a string.
///
/// # Errors
/// Returns an error if the XML is malformed, the root element is not `ClaML`,
/// or a required attribute (such as a class code) is missing.
pub fn parse_document(xml: &str) -> ClamlResult<ClamlDocument> {
    let mut parser = ClamlParser {
        reader: Reader::from_str(xml),
    };

    loop {
        match parser.reader.read_event()? {
            Event::Start(start) => {
                let element = Element { start, empty: false };
                parser.expect_root(&element)?;
                return parser.read_root(&element);
            }
            Event::Empty(start) => {
                let element = Element { start, empty: true };
                parser.expect_root(&element)?;
                return Ok(ClamlDocument::new());
            }
            Event::Eof => {
                return Err(ClamlError::UnexpectedEof {
                    element: "document".to_string(),
                })
            }
            // Declaration, doctype, comments, whitespace
            _ => continue,
        }
    }
}

/// An element whose start tag has been read.
struct Element<'a> {
    start: BytesStart<'a>,
    empty: bool,
}

impl Element<'_> {
    fn name(&self) -> String {
        String::from_utf8_lossy(self.start.local_name().as_ref()).into_owned()
    }

    fn is(&self, name: &str) -> bool {
        self.start.local_name().as_ref() == name.as_bytes()
    }

    fn attr(&self, name: &str) -> ClamlResult<Option<String>> {
        for attr in self.start.attributes() {
            let attr = attr?;
            if attr.key.as_ref() == name.as_bytes() {
                return Ok(Some(attr.unescape_value()?.into_owned()));
            }
        }
        Ok(None)
    }

    fn required_attr(&self, name: &str) -> ClamlResult<String> {
        self.attr(name)?.ok_or_else(|| ClamlError::MissingAttribute {
            element: self.name(),
            attribute: name.to_string(),
        })
    }

    fn bool_attr(&self, name: &str, default: bool) -> ClamlResult<bool> {
        Ok(match self.attr(name)?.as_deref() {
            Some("true") => true,
            Some("false") => false,
            _ => default,
        })
    }
}

/// A child of the element being read.
enum Node<'a> {
    Element(Element<'a>),
    Text(String),
}

struct ClamlParser<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> ClamlParser<'a> {
    fn expect_root(&self, element: &Element<'a>) -> ClamlResult<()> {
        if element.is("ClaML") {
            Ok(())
        } else {
            Err(ClamlError::NotClaml {
                found: element.name(),
            })
        }
    }

    /// Returns the next child of `parent`, or `None` once its end tag is read.
    fn next_child(&mut self, parent: &Element<'a>) -> ClamlResult<Option<Node<'a>>> {
        if parent.empty {
            return Ok(None);
        }
        loop {
            match self.reader.read_event()? {
                Event::Start(start) => {
                    return Ok(Some(Node::Element(Element { start, empty: false })))
                }
                Event::Empty(start) => {
                    return Ok(Some(Node::Element(Element { start, empty: true })))
                }
                Event::Text(text) => return Ok(Some(Node::Text(text.unescape()?.into_owned()))),
                Event::CData(data) => {
                    return Ok(Some(Node::Text(String::from_utf8_lossy(&data).into_owned())))
                }
                Event::End(_) => return Ok(None),
                Event::Eof => {
                    return Err(ClamlError::UnexpectedEof {
                        element: parent.name(),
                    })
                }
                _ => continue,
            }
        }
    }

    fn skip(&mut self, element: &Element<'a>) -> ClamlResult<()> {
        if !element.empty {
            self.reader.read_to_end(element.start.name())?;
        }
        Ok(())
    }

    /// Collects all character data below an element, ignoring markup.
    fn text_content(&mut self, element: &Element<'a>) -> ClamlResult<String> {
        let mut text = String::new();
        while let Some(node) = self.next_child(element)? {
            match node {
                Node::Text(t) => text.push_str(&t),
                Node::Element(child) => text.push_str(&self.text_content(&child)?),
            }
        }
        Ok(text)
    }

    fn read_root(&mut self, root: &Element<'a>) -> ClamlResult<ClamlDocument> {
        let mut doc = ClamlDocument::new();

        while let Some(node) = self.next_child(root)? {
            let Node::Element(element) = node else {
                continue;
            };
            match element.start.local_name().as_ref() {
                b"Identifier" => {
                    doc.identifiers.push(Identifier {
                        authority: element.attr("authority")?,
                        uid: element.required_attr("uid")?,
                    });
                    self.skip(&element)?;
                }
                b"Title" => {
                    doc.title = Some(Title {
                        name: element.attr("name")?,
                        version: element.attr("version")?,
                        date: element.attr("date")?,
                        content: self.text_content(&element)?.trim().to_string(),
                    });
                }
                b"ClassKinds" => {
                    doc.class_kinds = self.read_class_kinds(&element)?;
                }
                b"RubricKinds" => {
                    doc.rubric_kinds = self.read_rubric_kinds(&element)?;
                }
                b"ModifierClass" => {
                    doc.modifier_classes.push(self.read_modifier_class(&element)?);
                }
                b"Class" => {
                    doc.classes.push(self.read_class(&element)?);
                }
                _ => self.skip(&element)?,
            }
        }

        Ok(doc)
    }

    fn read_meta(&mut self, element: &Element<'a>) -> ClamlResult<Meta> {
        let meta = Meta {
            name: element.required_attr("name")?,
            value: element.attr("value")?.unwrap_or_default(),
        };
        self.skip(element)?;
        Ok(meta)
    }

    fn read_displays(&mut self, element: &Element<'a>) -> ClamlResult<Vec<String>> {
        let mut displays = Vec::new();
        while let Some(node) = self.next_child(element)? {
            if let Node::Element(child) = node {
                if child.is("Display") {
                    displays.push(self.text_content(&child)?.trim().to_string());
                } else {
                    self.skip(&child)?;
                }
            }
        }
        Ok(displays)
    }

    fn read_class_kinds(&mut self, element: &Element<'a>) -> ClamlResult<Vec<ClassKind>> {
        let mut kinds = Vec::new();
        while let Some(node) = self.next_child(element)? {
            if let Node::Element(child) = node {
                if child.is("ClassKind") {
                    let name = child.required_attr("name")?;
                    let displays = self.read_displays(&child)?;
                    kinds.push(ClassKind { name, displays });
                } else {
                    self.skip(&child)?;
                }
            }
        }
        Ok(kinds)
    }

    fn read_rubric_kinds(&mut self, element: &Element<'a>) -> ClamlResult<Vec<RubricKind>> {
        let mut kinds = Vec::new();
        while let Some(node) = self.next_child(element)? {
            if let Node::Element(child) = node {
                if child.is("RubricKind") {
                    let name = child.required_attr("name")?;
                    // ClaML declares rubric kinds inherited unless stated otherwise
                    let inherited = child.bool_attr("inherited", true)?;
                    let displays = self.read_displays(&child)?;
                    kinds.push(RubricKind {
                        name,
                        displays,
                        inherited,
                    });
                } else {
                    self.skip(&child)?;
                }
            }
        }
        Ok(kinds)
    }

    fn read_modifier_class(&mut self, element: &Element<'a>) -> ClamlResult<ModifierClass> {
        let mut mc = ModifierClass {
            modifier: element.required_attr("modifier")?,
            code: element.required_attr("code")?,
            ..Default::default()
        };

        while let Some(node) = self.next_child(element)? {
            let Node::Element(child) = node else {
                continue;
            };
            match child.start.local_name().as_ref() {
                b"Meta" => mc.meta.push(self.read_meta(&child)?),
                b"Rubric" => mc.rubrics.push(self.read_rubric(&child)?),
                _ => self.skip(&child)?,
            }
        }

        Ok(mc)
    }

    fn read_class(&mut self, element: &Element<'a>) -> ClamlResult<Class> {
        let mut class = Class {
            code: element.required_attr("code")?,
            kind: element.attr("kind")?,
            ..Default::default()
        };

        while let Some(node) = self.next_child(element)? {
            let Node::Element(child) = node else {
                continue;
            };
            match child.start.local_name().as_ref() {
                b"SuperClass" => {
                    class.super_classes.push(child.required_attr("code")?);
                    self.skip(&child)?;
                }
                b"SubClass" => {
                    class.sub_classes.push(child.required_attr("code")?);
                    self.skip(&child)?;
                }
                b"ModifiedBy" => class.modified_by.push(self.read_modified_by(&child)?),
                b"ExcludeModifier" => {
                    class.exclude_modifiers.push(child.required_attr("code")?);
                    self.skip(&child)?;
                }
                b"Rubric" => class.rubrics.push(self.read_rubric(&child)?),
                _ => self.skip(&child)?,
            }
        }

        Ok(class)
    }

    fn read_modified_by(&mut self, element: &Element<'a>) -> ClamlResult<ModifiedBy> {
        let mut modified_by = ModifiedBy {
            code: element.required_attr("code")?,
            all: element.bool_attr("all", true)?,
            valid_modifier_classes: Vec::new(),
        };

        while let Some(node) = self.next_child(element)? {
            if let Node::Element(child) = node {
                if child.is("ValidModifierClass") {
                    modified_by
                        .valid_modifier_classes
                        .push(child.required_attr("code")?);
                }
                self.skip(&child)?;
            }
        }

        Ok(modified_by)
    }

    fn read_rubric(&mut self, element: &Element<'a>) -> ClamlResult<Rubric> {
        let mut rubric = Rubric {
            id: element.attr("id")?,
            kind: element.required_attr("kind")?,
            labels: Vec::new(),
        };

        while let Some(node) = self.next_child(element)? {
            if let Node::Element(child) = node {
                if child.is("Label") {
                    let lang = child.attr("xml:lang")?;
                    let content = self.read_mixed(&child)?;
                    rubric.labels.push(Label::new(lang, content));
                } else {
                    self.skip(&child)?;
                }
            }
        }

        Ok(rubric)
    }

    /// Reads Label-style mixed content.
    fn read_mixed(&mut self, element: &Element<'a>) -> ClamlResult<Vec<LabelNode>> {
        let mut content = Vec::new();

        while let Some(node) = self.next_child(element)? {
            let child = match node {
                Node::Text(text) => {
                    content.push(LabelNode::Text(text));
                    continue;
                }
                Node::Element(child) => child,
            };

            let label_node = match child.start.local_name().as_ref() {
                b"Para" => LabelNode::Para(self.read_mixed(&child)?),
                b"Fragment" => {
                    let list = child.attr("type")?.as_deref() == Some("list");
                    LabelNode::Fragment {
                        list,
                        content: self.read_mixed(&child)?,
                    }
                }
                b"Reference" => LabelNode::Reference(self.text_content(&child)?),
                b"Term" => {
                    let class = TermClass::from_attribute(&child.attr("class")?.unwrap_or_default());
                    LabelNode::Term {
                        class,
                        content: self.text_content(&child)?,
                    }
                }
                b"List" => LabelNode::List(self.read_list(&child)?),
                _ => {
                    let name = child.name();
                    self.skip(&child)?;
                    LabelNode::Unknown(name)
                }
            };
            content.push(label_node);
        }

        Ok(content)
    }

    fn read_list(&mut self, element: &Element<'a>) -> ClamlResult<Vec<Vec<LabelNode>>> {
        let mut items = Vec::new();
        while let Some(node) = self.next_child(element)? {
            if let Node::Element(child) = node {
                if child.is("ListItem") {
                    items.push(self.read_mixed(&child)?);
                } else {
                    self.skip(&child)?;
                }
            }
        }
        Ok(items)
    }
}
