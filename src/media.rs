//! Decides how a link target is shown: as an image, as a known video host's
//! player, or as a plain embedded frame.

use once_cell::sync::Lazy;
use regex::Regex;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "svg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedHost {
    Vimeo,
    YouTube,
    Generic,
}

impl EmbedHost {
    /// Value of the frame's `allow` attribute.
    pub fn allow(self) -> &'static str {
        match self {
            EmbedHost::Vimeo => "autoplay; fullscreen",
            EmbedHost::YouTube => {
                "accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture"
            }
            EmbedHost::Generic => {
                "accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture; fullscreen"
            }
        }
    }

    pub fn frameborder(self) -> Option<&'static str> {
        match self {
            EmbedHost::YouTube => Some("0"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub host: EmbedHost,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    Image { src: String },
    Frame(Embed),
}

struct EmbedProvider {
    host: EmbedHost,
    pattern: Regex,
    id_group: usize,
    player_url: fn(&str) -> String,
}

impl EmbedProvider {
    fn embed(&self, href: &str) -> Option<Embed> {
        let id = self.pattern.captures(href)?.get(self.id_group)?.as_str();
        Some(Embed {
            host: self.host,
            src: (self.player_url)(id),
        })
    }
}

fn vimeo_player_url(id: &str) -> String {
    format!(
        "https://player.vimeo.com/video/{id}?dnt=1&autoplay=1&title=0&byline=0&portrait=0&playsinline=0"
    )
}

fn youtube_player_url(id: &str) -> String {
    format!("https://www.youtube-nocookie.com/embed/{id}?modestbranding=1&rel=0&autoplay=1")
}

fn provider(
    host: EmbedHost,
    pattern: &str,
    id_group: usize,
    player_url: fn(&str) -> String,
) -> EmbedProvider {
    EmbedProvider {
        host,
        pattern: Regex::new(pattern).expect("embed provider pattern"),
        id_group,
        player_url,
    }
}

// Evaluated in order; the first match wins. Name segments accept the ASCII
// `A`..`z` range, underscore and brackets included.
static EMBED_PROVIDERS: Lazy<Vec<EmbedProvider>> = Lazy::new(|| {
    vec![
        provider(
            EmbedHost::Vimeo,
            r"^.*(vimeo\.com/)((channels/[A-Z\[\\\]^_`a-z]+/)|(groups/[A-Z\[\\\]^_`a-z]+/videos/))?([0-9]+)",
            5,
            vimeo_player_url,
        ),
        provider(
            EmbedHost::YouTube,
            r"^.*(youtu\.be/|youtube(-nocookie)?\.com/(v/|.*u/[0-9A-Za-z_]/|embed/|.*v=))([0-9A-Za-z_-]{11}).*",
            4,
            youtube_player_url,
        ),
    ]
});

/// True when the last dot-separated segment of `href` is an image extension.
pub fn is_image(href: &str) -> bool {
    let extension = href.rsplit('.').next().unwrap_or_default().to_lowercase();
    IMAGE_EXTENSIONS.contains(&extension.as_str())
}

/// Classify a link target. Recognised video hosts take precedence over
/// `iframe_src`, which only replaces the raw URL in the generic frame.
pub fn classify(href: &str, iframe_src: Option<&str>) -> Media {
    if is_image(href) {
        return Media::Image {
            src: href.to_string(),
        };
    }

    if let Some(embed) = EMBED_PROVIDERS
        .iter()
        .find_map(|provider| provider.embed(href))
    {
        return Media::Frame(embed);
    }

    let src = iframe_src
        .filter(|src| !src.is_empty())
        .unwrap_or(href)
        .to_string();
    Media::Frame(Embed {
        host: EmbedHost::Generic,
        src,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(media: Media) -> Embed {
        match media {
            Media::Frame(embed) => embed,
            Media::Image { src } => panic!("expected a frame, got image {src}"),
        }
    }

    #[test]
    fn image_extensions_are_case_insensitive() {
        assert!(is_image("photos/cat.JPG"));
        assert!(is_image("https://example.com/a/b.svg"));
        assert!(is_image("x.jpeg"));
        assert!(!is_image("https://example.com/doc.pdf"));
        // Query strings end up in the last segment.
        assert!(!is_image("https://example.com/cat.png?size=2"));
    }

    #[test]
    fn image_ignores_iframe_override() {
        assert_eq!(
            classify("cat.png", Some("https://example.com/embed")),
            Media::Image {
                src: "cat.png".to_string()
            }
        );
    }

    #[test]
    fn vimeo_shapes() {
        for href in [
            "https://vimeo.com/76979871",
            "https://vimeo.com/channels/staffpicks/76979871",
            "https://vimeo.com/groups/shortfilms/videos/76979871",
        ] {
            let embed = frame(classify(href, None));
            assert_eq!(embed.host, EmbedHost::Vimeo, "{href}");
            assert!(
                embed
                    .src
                    .starts_with("https://player.vimeo.com/video/76979871?dnt=1"),
                "{href} -> {}",
                embed.src
            );
        }
    }

    #[test]
    fn youtube_shapes() {
        for href in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ?start=3",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
        ] {
            let embed = frame(classify(href, None));
            assert_eq!(embed.host, EmbedHost::YouTube, "{href}");
            assert_eq!(
                embed.src,
                "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ?modestbranding=1&rel=0&autoplay=1"
            );
        }
    }

    #[test]
    fn vimeo_channel_names_with_underscores() {
        let embed = frame(classify(
            "https://vimeo.com/channels/staff_picks/76979871",
            None,
        ));
        assert_eq!(embed.host, EmbedHost::Vimeo);
        assert!(embed.src.starts_with("https://player.vimeo.com/video/76979871?"));

        let embed = frame(classify("https://vimeo.com/groups/short_films/videos/42", None));
        assert_eq!(embed.host, EmbedHost::Vimeo);
        assert!(embed.src.contains("/video/42?"));
    }

    #[test]
    fn youtube_ids_are_ascii_only() {
        let embed = frame(classify("https://youtu.be/dQw4w9WgXcé", None));
        assert_eq!(embed.host, EmbedHost::Generic);
    }

    #[test]
    fn known_host_wins_over_iframe_override() {
        let embed = frame(classify(
            "https://vimeo.com/123",
            Some("https://example.com/custom"),
        ));
        assert_eq!(embed.host, EmbedHost::Vimeo);
        assert!(embed.src.contains("/video/123?"));
    }

    #[test]
    fn generic_frame_prefers_override() {
        let embed = frame(classify("page.html", Some("https://example.com/embed")));
        assert_eq!(embed.host, EmbedHost::Generic);
        assert_eq!(embed.src, "https://example.com/embed");

        let embed = frame(classify("page.html", Some("")));
        assert_eq!(embed.src, "page.html");
    }

    #[test]
    fn empty_target_is_a_generic_frame() {
        let embed = frame(classify("", None));
        assert_eq!(embed.host, EmbedHost::Generic);
        assert!(embed.src.is_empty());
    }
}
