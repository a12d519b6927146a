//! Class-name hooks and the overlay's inner markup.
//!
//! Stylesheets key on these class names, so their spelling is part of the
//! public surface.
//!
//! Captions are rendered as text: any markup in the caption attribute is
//! escaped and shows up literally rather than being interpreted as HTML.

use std::fmt::Write;

use crate::media::{Embed, Media};

/// Toggled on the overlay root to run the open/close transition.
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    prefix: String,
}

impl ClassNames {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn hook(&self, suffix: &str) -> String {
        format!("{}-{suffix}", self.prefix)
    }

    pub fn modal(&self) -> String {
        self.hook("modal")
    }

    pub fn container(&self) -> String {
        self.hook("container")
    }

    pub fn table(&self) -> String {
        self.hook("table")
    }

    pub fn row(&self) -> String {
        self.hook("tr")
    }

    pub fn media_cell(&self) -> String {
        self.hook("image")
    }

    pub fn image(&self) -> String {
        self.hook("img")
    }

    pub fn frame(&self) -> String {
        self.hook("iframe")
    }

    pub fn caption(&self) -> String {
        self.hook("caption")
    }

    pub fn button(&self) -> String {
        self.hook("button")
    }

    pub fn button_close(&self) -> String {
        self.hook("button-close")
    }

    pub fn button_prev(&self) -> String {
        self.hook("button-prev")
    }

    pub fn button_next(&self) -> String {
        self.hook("button-next")
    }
}

/// Everything needed to fill the overlay for one trigger element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub media: Media,
    pub caption: Option<String>,
    pub show_previous: bool,
    pub show_next: bool,
}

/// Escape text for use inside element content or a double-quoted attribute.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn push_frame(html: &mut String, classes: &ClassNames, embed: &Embed) {
    let _ = write!(
        html,
        r#"<div class="{}"><iframe src="{}""#,
        classes.frame(),
        escape(&embed.src)
    );
    if let Some(border) = embed.host.frameborder() {
        let _ = write!(html, r#" frameborder="{border}""#);
    }
    let _ = write!(
        html,
        r#" allow="{}" allowfullscreen></iframe></div>"#,
        embed.host.allow()
    );
}

fn push_button(html: &mut String, classes: &ClassNames, kind: String) {
    let _ = write!(html, r#"<span class="{} {kind}"></span>"#, classes.button());
}

/// Render the overlay body: media, optional caption, then the controls.
pub fn render(classes: &ClassNames, slide: &Slide) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="{}"><table class="{}"><tr class="{}"><td class="{}">"#,
        classes.container(),
        classes.table(),
        classes.row(),
        classes.media_cell()
    );

    match &slide.media {
        Media::Image { src } => {
            let _ = write!(
                html,
                r#"<img class="{}" src="{}">"#,
                classes.image(),
                escape(src)
            );
        }
        Media::Frame(embed) => push_frame(&mut html, classes, embed),
    }
    html.push_str("</td>");

    if let Some(caption) = slide.caption.as_deref().filter(|c| !c.is_empty()) {
        let _ = write!(
            html,
            r#"<td class="{}">{}</td>"#,
            classes.caption(),
            escape(caption)
        );
    }
    html.push_str("</tr></table></div>");

    push_button(&mut html, classes, classes.button_close());
    if slide.show_previous {
        push_button(&mut html, classes, classes.button_prev());
    }
    if slide.show_next {
        push_button(&mut html, classes, classes.button_next());
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{classify, EmbedHost};

    fn slide(media: Media) -> Slide {
        Slide {
            media,
            caption: None,
            show_previous: false,
            show_next: false,
        }
    }

    #[test]
    fn class_hooks_use_prefix() {
        let classes = ClassNames::new("lb");
        assert_eq!(classes.modal(), "lb-modal");
        assert_eq!(classes.media_cell(), "lb-image");
        assert_eq!(classes.image(), "lb-img");
        assert_eq!(classes.button_next(), "lb-button-next");
    }

    #[test]
    fn image_slide() {
        let html = render(
            &ClassNames::new("lightbox"),
            &slide(classify("photos/cat.jpg", None)),
        );
        assert!(html.contains(r#"<img class="lightbox-img" src="photos/cat.jpg">"#));
        assert!(!html.contains("<iframe"));
        assert!(html.contains(r#"<span class="lightbox-button lightbox-button-close"></span>"#));
        assert!(!html.contains("lightbox-caption"));
    }

    #[test]
    fn youtube_frame_attributes() {
        let html = render(
            &ClassNames::new("lightbox"),
            &slide(classify("https://youtu.be/dQw4w9WgXcQ", None)),
        );
        assert!(html.contains(
            r#"<iframe src="https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ?modestbranding=1&amp;rel=0&amp;autoplay=1" frameborder="0""#
        ));
        assert!(html.contains(r#"class="lightbox-iframe""#));
        assert!(html.contains("allowfullscreen></iframe>"));
    }

    #[test]
    fn generic_frame_has_full_allow_list() {
        let html = render(
            &ClassNames::new("lightbox"),
            &slide(Media::Frame(Embed {
                host: EmbedHost::Generic,
                src: "doc.html".to_string(),
            })),
        );
        assert!(html.contains(&format!(r#"allow="{}""#, EmbedHost::Generic.allow())));
        assert!(!html.contains("frameborder"));
    }

    #[test]
    fn caption_and_navigation_buttons() {
        let html = render(
            &ClassNames::new("lightbox"),
            &Slide {
                media: classify("a.png", None),
                caption: Some("Tom & <Jerry>".to_string()),
                show_previous: true,
                show_next: true,
            },
        );
        assert!(html.contains(r#"<td class="lightbox-caption">Tom &amp; &lt;Jerry&gt;</td>"#));
        let close = html.find("lightbox-button-close").unwrap();
        let prev = html.find("lightbox-button-prev").unwrap();
        let next = html.find("lightbox-button-next").unwrap();
        assert!(close < prev && prev < next);
    }

    #[test]
    fn empty_caption_is_omitted() {
        let html = render(
            &ClassNames::new("lightbox"),
            &Slide {
                caption: Some(String::new()),
                ..slide(classify("a.png", None))
            },
        );
        assert!(!html.contains("lightbox-caption"));
    }

    #[test]
    fn attribute_values_are_escaped() {
        assert_eq!(escape(r#"a"b'c"#), "a&quot;b&#39;c");
    }
}
