//! Minimal structured document tree.
//!
//! Markup is built as nodes, never as string templates, and every text and
//! attribute value is escaped when serialized. Elements are addressed by
//! paths: the child indices walked from some root element.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.write_html(out),
            Node::Text(text) => out.push_str(&encode_text(text)),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add a class; builder form of [`Element::add_class`]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Read a `data-*` attribute by its short name
    pub fn data(&self, name: &str) -> Option<&str> {
        self.get_attr(&format!("data-{}", name))
    }

    /// Show or hide through the inline `display` style
    pub fn set_visible(&mut self, visible: bool) {
        let display = if visible { "block" } else { "none" };
        self.set_attr("style", format!("display: {}", display));
    }

    pub fn is_visible(&self) -> bool {
        self.get_attr("style") != Some("display: none")
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Replace all children with a single text node
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    /// Concatenated text of this element and all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => el.collect_text(out),
            }
        }
    }

    pub fn replace_children<I>(&mut self, children: I)
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children = children.into_iter().map(Into::into).collect();
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Element reached by walking `path` from here. The empty path is `self`.
    pub fn node_at(&self, path: &[usize]) -> Option<&Element> {
        match path.split_first() {
            None => Some(self),
            Some((&first, rest)) => self.children.get(first)?.as_element()?.node_at(rest),
        }
    }

    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        match path.split_first() {
            None => Some(self),
            Some((&first, rest)) => self
                .children
                .get_mut(first)?
                .as_element_mut()?
                .node_at_mut(rest),
        }
    }

    /// Path of the nearest element at or above `path` matching `pred`.
    ///
    /// Mirrors `Element.closest()`: the search starts at the target itself
    /// and climbs towards `self`.
    pub fn closest<F>(&self, path: &[usize], pred: F) -> Option<Vec<usize>>
    where
        F: Fn(&Element) -> bool,
    {
        (0..=path.len())
            .rev()
            .map(|len| &path[..len])
            .find(|prefix| self.node_at(prefix).is_some_and(&pred))
            .map(<[usize]>::to_vec)
    }

    /// Path of the first element (depth-first, `self` included) matching `pred`
    pub fn find_path<F>(&self, pred: F) -> Option<Vec<usize>>
    where
        F: Fn(&Element) -> bool,
    {
        let mut path = Vec::new();
        self.find_path_inner(&pred, &mut path).then_some(path)
    }

    fn find_path_inner<F>(&self, pred: &F, path: &mut Vec<usize>) -> bool
    where
        F: Fn(&Element) -> bool,
    {
        if pred(self) {
            return true;
        }
        for (idx, child) in self.children.iter().enumerate() {
            if let Node::Element(el) = child {
                path.push(idx);
                if el.find_path_inner(pred, path) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }

    /// First element (depth-first, `self` included) matching `pred`
    pub fn find<F>(&self, pred: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        let path = self.find_path(pred)?;
        self.node_at(&path)
    }

    pub fn find_mut<F>(&mut self, pred: F) -> Option<&mut Element>
    where
        F: Fn(&Element) -> bool,
    {
        let path = self.find_path(pred)?;
        self.node_at_mut(&path)
    }

    /// All elements (depth-first, `self` included) matching `pred`
    pub fn find_all<F>(&self, pred: F) -> Vec<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        let mut found = Vec::new();
        self.collect_matching(&pred, &mut found);
        found
    }

    fn collect_matching<'a, F>(&'a self, pred: &F, found: &mut Vec<&'a Element>)
    where
        F: Fn(&Element) -> bool,
    {
        if pred(self) {
            found.push(self);
        }
        for el in self.child_elements() {
            el.collect_matching(pred, found);
        }
    }

    /// Apply `f` to every element (depth-first, `self` included) matching `pred`
    pub fn for_each_matching_mut<P, F>(&mut self, pred: &P, f: &mut F)
    where
        P: Fn(&Element) -> bool,
        F: FnMut(&mut Element),
    {
        if pred(self) {
            f(self);
        }
        for child in &mut self.children {
            if let Node::Element(el) = child {
                el.for_each_matching_mut(pred, f);
            }
        }
    }

    /// Serialize to HTML, escaping all text and attribute values
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            let _ = write!(
                out,
                " class=\"{}\"",
                encode_double_quoted_attribute(&self.classes.join(" "))
            );
        }
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, encode_double_quoted_attribute(value));
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Matches elements carrying `class`
pub fn has_class(class: &str) -> impl Fn(&Element) -> bool + '_ {
    move |el: &Element| el.has_class(class)
}

/// Matches the element whose `id` attribute is `id`
pub fn has_id(id: &str) -> impl Fn(&Element) -> bool + '_ {
    move |el: &Element| el.id() == Some(id)
}
