//! Host settings: how long to wait, where to fetch from, how to paint marks.

use std::time::Duration;

use sidediff::{DEFAULT_HIGHLIGHT_CLASS, SerializeOptions};

/// Bounded wait for one document.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Scroll mirroring debounce window (one frame at 60 Hz).
pub const DEFAULT_SCROLL_DEBOUNCE: Duration = Duration::from_millis(16);

/// One of the two views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Which views get the highlight stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyledSides {
    #[default]
    Right,
    Both,
}

impl StyledSides {
    pub fn includes(self, side: Side) -> bool {
        match self {
            StyledSides::Right => side == Side::Right,
            StyledSides::Both => true,
        }
    }
}

/// Presentation of marked elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightStyle {
    pub class_name: String,
    pub color: String,
    pub background: String,
    pub outline: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            class_name: DEFAULT_HIGHLIGHT_CLASS.to_owned(),
            color: "red".to_owned(),
            background: "yellow".to_owned(),
            outline: "1px solid orange".to_owned(),
        }
    }
}

impl HighlightStyle {
    /// `<style>` element painting every marked element.
    ///
    /// Rules are `!important` so they win over the page's own styles.
    pub fn stylesheet(&self) -> String {
        format!(
            "<style>.{} {{ color: {} !important; background-color: {} !important; outline: {} !important; }}</style>",
            self.class_name, self.color, self.background, self.outline
        )
    }

    /// Serializer options that tag marked elements with this style's class.
    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            highlight_class: Some(self.class_name.clone()),
        }
    }
}

/// Everything a comparison session and its report need.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub load_timeout: Duration,

    /// Fetch through this endpoint; the target goes in its `url` query parameter.
    pub proxy_endpoint: Option<String>,

    pub scroll_debounce: Duration,

    /// Mirror scrolling between the two views of the report.
    pub scroll_mirroring: bool,

    pub highlight: HighlightStyle,
    pub styled_sides: StyledSides,
    pub user_agent: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            proxy_endpoint: None,
            scroll_debounce: DEFAULT_SCROLL_DEBOUNCE,
            scroll_mirroring: true,
            highlight: HighlightStyle::default(),
            styled_sides: StyledSides::default(),
            user_agent: concat!("sidediff/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}
