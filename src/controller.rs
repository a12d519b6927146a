//! The lightbox state machine, independent of any particular visual tree.

use tracing::{debug, trace, warn};

use crate::config::LightboxConfig;
use crate::markup::{self, ClassNames, Slide};
use crate::media;
use crate::navigation::{has_next, has_previous, normalize_index};
use crate::LightboxError;

/// The host visual tree a [`Controller`] drives.
///
/// `Timer` is a cancellable one-shot task: dropping it must cancel it. When it
/// fires the host calls [`Controller::finish_removal`] with the generation it
/// was scheduled for.
pub trait Surface {
    type Trigger;
    type Overlay;
    type Timer;

    /// Elements matching `selector`, in document order.
    fn query(&mut self, selector: &str) -> Result<Vec<Self::Trigger>, LightboxError>;
    fn attribute(&self, trigger: &Self::Trigger, name: &str) -> Option<String>;
    fn set_attribute(&mut self, trigger: &Self::Trigger, name: &str, value: &str);

    /// Create the overlay root with class `class_name` and attach it to the
    /// document. Clicks inside it must be routed to [`Controller::overlay_click`].
    fn create_overlay(&mut self, class_name: &str) -> Option<Self::Overlay>;
    fn set_content(&mut self, overlay: &Self::Overlay, markup: &str);
    /// Flush pending style so the next class change transitions.
    fn force_layout(&mut self, overlay: &Self::Overlay);
    fn set_active(&mut self, overlay: &Self::Overlay, active: bool);
    fn remove_overlay(&mut self, overlay: Self::Overlay);
    fn schedule_removal(&mut self, delay_ms: u32, generation: u64) -> Self::Timer;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    Open { index: i64 },
    /// Active flag cleared, overlay still attached until the removal fires.
    Closing { generation: u64 },
}

/// Where a close request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOrigin {
    CloseButton,
    Background,
    NavigationButton,
    Keyboard,
    Api,
}

/// A click inside the overlay, resolved from the target's class list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClick {
    Previous,
    Next,
    Close,
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

pub struct Controller<S: Surface> {
    config: LightboxConfig,
    classes: ClassNames,
    surface: S,
    triggers: Vec<S::Trigger>,
    state: OverlayState,
    overlay: Option<S::Overlay>,
    pending_removal: Option<S::Timer>,
    generation: u64,
}

impl<S: Surface> Controller<S> {
    /// Collect the trigger elements once and number the ones without an index.
    /// Matching nothing is fine; the controller just never opens.
    pub fn new(config: LightboxConfig, mut surface: S) -> Result<Self, LightboxError> {
        let triggers = surface.query(&config.selector)?;
        let index_attribute = config.index_attribute();
        for (position, trigger) in triggers.iter().enumerate() {
            let existing = surface.attribute(trigger, &index_attribute);
            if existing.as_deref().map_or(true, str::is_empty) {
                surface.set_attribute(trigger, &index_attribute, &position.to_string());
            }
        }
        debug!(
            selector = %config.selector,
            triggers = triggers.len(),
            "lightbox attached"
        );

        Ok(Self {
            classes: ClassNames::new(config.class_name.clone()),
            config,
            surface,
            triggers,
            state: OverlayState::Closed,
            overlay: None,
            pending_removal: None,
            generation: 0,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn triggers(&self) -> &[S::Trigger] {
        &self.triggers
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn overlay(&self) -> Option<&S::Overlay> {
        self.overlay.as_ref()
    }

    /// Index of the displayed element, or -1 when nothing is open.
    pub fn current_index(&self) -> i64 {
        match self.state {
            OverlayState::Open { index } => index,
            _ => -1,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Open { .. })
    }

    /// Show the trigger at `position` in the matched set.
    pub fn open(&mut self, position: usize) {
        let Some(trigger) = self.triggers.get(position) else {
            return;
        };
        let index = self
            .surface
            .attribute(trigger, &self.config.index_attribute())
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(position as i64);
        let href = self.surface.attribute(trigger, "href").unwrap_or_default();
        let caption = self
            .surface
            .attribute(trigger, &self.config.caption_attribute());
        let iframe_src = self
            .surface
            .attribute(trigger, &self.config.iframe_src_attribute());

        if self.pending_removal.take().is_some() {
            debug!("reopened while closing, removal cancelled");
        }
        if self.overlay.is_none() {
            self.overlay = self.surface.create_overlay(&self.classes.modal());
        }
        let Some(overlay) = self.overlay.as_ref() else {
            warn!("lightbox overlay could not be created");
            self.state = OverlayState::Closed;
            return;
        };

        let len = self.triggers.len();
        let slide = Slide {
            media: media::classify(&href, iframe_src.as_deref()),
            caption,
            show_previous: has_previous(index, len, self.config.looping),
            show_next: has_next(index, len, self.config.looping),
        };
        self.surface
            .set_content(overlay, &markup::render(&self.classes, &slide));
        self.surface.force_layout(overlay);
        self.surface.set_active(overlay, true);
        self.state = OverlayState::Open { index };
        debug!(index, href = %href, "lightbox opened");
    }

    /// Navigate while open. Does nothing when closed or when the normalised
    /// target is already showing.
    pub fn open_by_index(&mut self, target: i64) {
        let OverlayState::Open { index: current } = self.state else {
            return;
        };
        if self.overlay.is_none() {
            return;
        }
        let Some(position) = normalize_index(target, self.triggers.len(), self.config.looping)
        else {
            return;
        };
        if position as i64 == current {
            trace!(index = current, "already showing");
            return;
        }
        self.open(position);
    }

    /// Start the close transition. Returns whether anything happened.
    pub fn close(&mut self, origin: CloseOrigin) -> bool {
        if origin == CloseOrigin::NavigationButton || !self.is_open() {
            return false;
        }
        let Some(overlay) = self.overlay.as_ref() else {
            return false;
        };
        self.surface.set_active(overlay, false);
        self.generation += 1;
        let generation = self.generation;
        self.state = OverlayState::Closing { generation };
        self.pending_removal = Some(
            self.surface
                .schedule_removal(self.config.close_delay, generation),
        );
        debug!(?origin, generation, "lightbox closing");
        true
    }

    /// Called by the host when a scheduled removal fires. A removal that was
    /// superseded by a reopen or teardown is ignored.
    pub fn finish_removal(&mut self, generation: u64) -> bool {
        match self.state {
            OverlayState::Closing { generation: pending } if pending == generation => {}
            _ => {
                trace!(generation, "stale removal ignored");
                return false;
            }
        }
        self.pending_removal = None;
        if let Some(overlay) = self.overlay.take() {
            self.surface.remove_overlay(overlay);
        }
        self.state = OverlayState::Closed;
        debug!(generation, "lightbox removed");
        true
    }

    /// Resolve a click target's `class` attribute inside the overlay.
    pub fn classify_click(&self, class_attr: &str) -> OverlayClick {
        let has = |class: String| class_attr.split_whitespace().any(|c| c == class);
        if has(self.classes.button_prev()) {
            OverlayClick::Previous
        } else if has(self.classes.button_next()) {
            OverlayClick::Next
        } else if has(self.classes.button_close()) {
            OverlayClick::Close
        } else {
            OverlayClick::Background
        }
    }

    pub fn overlay_click(&mut self, click: OverlayClick) {
        let current = self.current_index();
        match click {
            OverlayClick::Previous => self.open_by_index(current.saturating_sub(1)),
            OverlayClick::Next => self.open_by_index(current.saturating_add(1)),
            OverlayClick::Close => {
                self.close(CloseOrigin::CloseButton);
            }
            OverlayClick::Background => {
                self.close(CloseOrigin::Background);
            }
        }
    }

    pub fn key_down(&mut self, key: Key) {
        let current = self.current_index();
        match key {
            Key::Escape => {
                self.close(CloseOrigin::Keyboard);
            }
            Key::ArrowLeft => self.open_by_index(current.saturating_sub(1)),
            Key::ArrowRight => self.open_by_index(current.saturating_add(1)),
            Key::Other => {}
        }
    }

    /// Cancel any pending removal and detach the overlay right away.
    pub fn teardown(&mut self) {
        self.pending_removal = None;
        if let Some(overlay) = self.overlay.take() {
            self.surface.remove_overlay(overlay);
        }
        self.state = OverlayState::Closed;
    }
}
