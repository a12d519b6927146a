use dioxus::prelude::*;

const LIGHTBOX_CSS: Asset = asset!("/assets/lightbox.css");

struct GalleryItem {
    label: &'static str,
    href: &'static str,
    caption: Option<&'static str>,
    iframe_src: Option<&'static str>,
}

const GALLERY: &[GalleryItem] = &[
    GalleryItem {
        label: "Harbour at dusk",
        href: "https://picsum.photos/id/1011/1600/1000.jpg",
        caption: Some("Harbour at dusk"),
        iframe_src: None,
    },
    GalleryItem {
        label: "Mountain lake",
        href: "https://picsum.photos/id/1015/1600/1000.jpg",
        caption: Some("Mountain lake"),
        iframe_src: None,
    },
    GalleryItem {
        label: "Vimeo clip",
        href: "https://vimeo.com/76979871",
        caption: None,
        iframe_src: None,
    },
    GalleryItem {
        label: "YouTube clip",
        href: "https://www.youtube.com/watch?v=aqz-KE-bpKQ",
        caption: Some("Big Buck Bunny"),
        iframe_src: None,
    },
    GalleryItem {
        label: "Map",
        href: "https://www.openstreetmap.org/#map=12/52.3731/4.8922",
        caption: None,
        iframe_src: Some(
            "https://www.openstreetmap.org/export/embed.html?bbox=4.80,52.33,4.98,52.41&layer=mapnik",
        ),
    },
];

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Trigger links must be in the DOM before the lightbox queries for them.
    #[cfg(target_arch = "wasm32")]
    {
        use std::cell::RefCell;
        use std::rc::Rc;

        let slot = use_hook(|| Rc::new(RefCell::new(None::<lightbox::Lightbox>)));
        let attach_slot = slot.clone();
        use_effect(move || {
            if attach_slot.borrow().is_some() {
                return;
            }
            match lightbox::Lightbox::attach(lightbox::LightboxConfig::default()) {
                Ok(attached) => {
                    tracing::info!(triggers = attached.trigger_count(), "lightbox ready");
                    *attach_slot.borrow_mut() = Some(attached);
                }
                Err(err) => tracing::warn!("lightbox unavailable: {err}"),
            }
        });
        use_drop(move || {
            slot.borrow_mut().take();
        });
    }

    rsx! {
        document::Stylesheet { href: LIGHTBOX_CSS }

        main { class: "gallery",
            h1 { "Lightbox" }
            p { "Click a link to open it in the overlay. Use the arrow keys to move between entries and Escape to close." }
            ul { class: "gallery-list",
                for item in GALLERY {
                    li { key: "{item.href}",
                        a {
                            class: "lightbox",
                            href: item.href,
                            "data-lightbox-caption": item.caption,
                            "data-lightbox-iframesrc": item.iframe_src,
                            "{item.label}"
                        }
                    }
                }
            }
        }
    }
}
