use std::collections::BTreeMap;

/// In-memory OWPML document node.
///
/// Attributes live in a `BTreeMap` so serialization is always ascending by
/// attribute name, independent of insertion order. Child order is preserved.
/// This is what makes converter output byte-reproducible for identical input.
#[derive(Debug, Clone)]
pub struct XmlElement {
    name: String,
    attrs: BTreeMap<String, String>,
    children: Vec<XmlNode>,
}

#[derive(Debug, Clone)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builder-style attribute setter.
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attrs.insert(name.to_string(), value.into());
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|s| s.as_str())
    }

    /// Builder-style child append.
    pub fn child(mut self, el: XmlElement) -> Self {
        self.children.push(XmlNode::Element(el));
        self
    }

    pub fn push(&mut self, el: XmlElement) {
        self.children.push(XmlNode::Element(el));
    }

    pub fn push_front(&mut self, el: XmlElement) {
        self.children.insert(0, XmlNode::Element(el));
    }

    /// Builder-style text append. Empty strings are dropped so childless
    /// elements serialize self-closed.
    pub fn text(mut self, s: impl Into<String>) -> Self {
        self.push_text(s);
        self
    }

    pub fn push_text(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.is_empty() {
            self.children.push(XmlNode::Text(s));
        }
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Serialize this element into `out`, attributes sorted ascending.
    pub fn write_into(&self, out: &mut String) {
        self.write_with(out, None);
    }

    /// Serialize as a standalone XML 1.0 document. `namespaces` is spliced
    /// verbatim between the root element name and its first attribute; root
    /// elements of header/section/package documents carry the OWPML
    /// namespace block this way.
    pub fn serialize_document(&self, namespaces: &str) -> String {
        let mut out =
            String::from(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        self.write_with(&mut out, Some(namespaces));
        out
    }

    fn write_with(&self, out: &mut String, namespaces: Option<&str>) {
        out.push('<');
        out.push_str(&self.name);
        if let Some(ns) = namespaces {
            if !ns.is_empty() {
                out.push(' ');
                out.push_str(ns);
            }
        }
        for (k, v) in &self.attrs {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            escape_into(v, out);
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                XmlNode::Element(el) => el.write_into(out),
                XmlNode::Text(t) => escape_into(t, out),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

fn escape_into(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_into(s, &mut out);
    out
}
