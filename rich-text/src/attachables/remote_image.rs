use super::Attachable;
use crate::attributes::Attributes;
use crate::fragment::serializer::html_escape;
use std::any::Any;
use url::Url;

/// An image hosted elsewhere, referenced by URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteImage {
    pub url: String,
    pub content_type: String,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl RemoteImage {
    /// Build from wire attributes; needs both `url` and `content-type`
    pub fn from_attributes(attributes: &Attributes) -> Option<Self> {
        Some(Self {
            url: attributes.get("url")?.to_string(),
            content_type: attributes.get("content-type")?.to_string(),
            width: attributes.get("width").map(str::to_string),
            height: attributes.get("height").map(str::to_string),
        })
    }

    /// Last path segment of the URL, when the URL parses
    pub fn filename(&self) -> Option<String> {
        let url = Url::parse(&self.url).ok()?;
        let segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
        Some(segment.to_string())
    }
}

impl Attachable for RemoteImage {
    fn kind(&self) -> &str {
        "remote-image"
    }

    fn to_rich_text_attributes(&self, mut attributes: Attributes) -> Attributes {
        attributes.insert("url", &self.url);
        attributes.insert("content-type", &self.content_type);
        if let Some(width) = &self.width {
            attributes.insert("width", width);
        }
        if let Some(height) = &self.height {
            attributes.insert("height", height);
        }
        attributes
    }

    fn rich_text_render(&self) -> String {
        let mut html = format!("<img src=\"{}\"", html_escape(&self.url));
        if let Some(width) = &self.width {
            html.push_str(&format!(" width=\"{}\"", html_escape(width)));
        }
        if let Some(height) = &self.height {
            html.push_str(&format!(" height=\"{}\"", html_escape(height)));
        }
        html.push('>');
        html
    }

    fn invoke(&self, capability: &str, _args: &[&str]) -> Option<String> {
        match capability {
            "url" => Some(self.url.clone()),
            "content-type" => Some(self.content_type.clone()),
            "width" => self.width.clone(),
            "height" => self.height.clone(),
            "filename" => self.filename(),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
