//! Overlay lightbox for links pointing at images, video hosts and documents.
//!
//! The state machine lives in [`Controller`] and drives any [`Surface`]; on
//! `wasm32` the [`Lightbox`] handle binds it to the browser DOM.
//!
//! Caption attributes are treated as plain text and HTML-escaped, so a
//! caption like `<em>Dusk</em>` displays its tags instead of emphasis.

mod config;
mod controller;
mod error;
pub mod markup;
pub mod media;
pub mod navigation;

#[cfg(target_arch = "wasm32")]
mod dom;

pub use config::LightboxConfig;
pub use controller::{CloseOrigin, Controller, Key, OverlayClick, OverlayState, Surface};
pub use error::LightboxError;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomSurface, Lightbox};
