use crate::domain::SelectOption;

#[derive(Clone, Debug)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text_content: Option<String>,
}

impl Element {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            text_content: None,
        }
    }

    /// Sets an attribute, replacing an earlier value for the same key.
    pub fn attr(mut self, key: &str, value: &str) -> Self {
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text_content = Some(text.to_string());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn render(&self) -> String {
        let mut html = format!("<{}", self.tag);

        for (key, value) in &self.attributes {
            html.push_str(&format!(" {}=\"{}\"", key, html_escape(value)));
        }

        html.push('>');
        if let Some(text) = &self.text_content {
            html.push_str(&html_escape(text));
        }

        for child in &self.children {
            html.push_str(&child.render());
        }

        html.push_str(&format!("</{}>", self.tag));
        html
    }
}

pub fn select() -> Element {
    Element::new("select")
}

pub fn option() -> Element {
    Element::new("option")
}

pub fn option_element(opt: &SelectOption) -> Element {
    option().attr("value", &opt.value).text(&opt.label)
}

/// Full `<select>` markup for a control id and its options.
pub fn select_markup(id: &str, options: &[SelectOption]) -> String {
    select()
        .attr("id", id)
        .attr("name", id.strip_prefix("id_").unwrap_or(id))
        .children(options.iter().map(option_element))
        .render()
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
