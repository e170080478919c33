//! Component state for the popup composer.
//!
//! The composer is a state machine over three screens: an initial loading
//! spinner while the stored popups are fetched, the configuration form with
//! its live preview, and the list of active/recent popups. All runtime data
//! lives in one struct; `view` and `update` read and mutate it.

use common::model::popup::{Frequency, PopupConfig, Weekday};

/// Which screen the composer is showing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Form,
    List,
}

/// Horizontal text alignment; clicking the toolbar button cycles through the
/// fixed option list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlignment {
    Center,
    Left,
    Right,
}

impl TextAlignment {
    pub fn next(self) -> Self {
        match self {
            TextAlignment::Center => TextAlignment::Left,
            TextAlignment::Left => TextAlignment::Right,
            TextAlignment::Right => TextAlignment::Center,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            TextAlignment::Center => "center",
            TextAlignment::Left => "left",
            TextAlignment::Right => "right",
        }
    }
}

/// Where the uploaded image sits relative to the text half; cycles on click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImagePosition {
    Left,
    Right,
    Top,
    Bottom,
}

impl ImagePosition {
    pub fn next(self) -> Self {
        match self {
            ImagePosition::Left => ImagePosition::Right,
            ImagePosition::Right => ImagePosition::Top,
            ImagePosition::Top => ImagePosition::Bottom,
            ImagePosition::Bottom => ImagePosition::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ImagePosition::Left => "Left",
            ImagePosition::Right => "Right",
            ImagePosition::Top => "Top",
            ImagePosition::Bottom => "Bottom",
        }
    }
}

/// Geometry of the preview, in CSS pixels. Both the DOM preview and the
/// canvas rasterizer derive their regions from this, so the exported PNG
/// matches what the operator sees.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PreviewLayout {
    /// No image uploaded: a compact text-only card.
    TextOnly,
    /// Image fills the whole preview, no text blocks.
    ImageOnly,
    ImageLeft,
    ImageRight,
    ImageTop,
    ImageBottom,
}

impl PreviewLayout {
    pub fn canvas_size(self) -> (f64, f64) {
        match self {
            PreviewLayout::TextOnly => (384.0, 144.0),
            PreviewLayout::ImageOnly => (600.0, 400.0),
            PreviewLayout::ImageLeft | PreviewLayout::ImageRight => (600.0, 350.0),
            PreviewLayout::ImageTop | PreviewLayout::ImageBottom => (280.0, 400.0),
        }
    }

    /// Rectangle covered by the image, if any: (x, y, w, h).
    pub fn image_region(self) -> Option<(f64, f64, f64, f64)> {
        match self {
            PreviewLayout::TextOnly => None,
            PreviewLayout::ImageOnly => Some((0.0, 0.0, 600.0, 400.0)),
            PreviewLayout::ImageLeft => Some((0.0, 0.0, 300.0, 350.0)),
            PreviewLayout::ImageRight => Some((300.0, 0.0, 300.0, 350.0)),
            PreviewLayout::ImageTop => Some((0.0, 0.0, 280.0, 200.0)),
            PreviewLayout::ImageBottom => Some((0.0, 200.0, 280.0, 200.0)),
        }
    }

    /// Rectangle holding the text blocks, if any: (x, y, w, h).
    pub fn text_region(self) -> Option<(f64, f64, f64, f64)> {
        match self {
            PreviewLayout::TextOnly => Some((0.0, 0.0, 384.0, 144.0)),
            PreviewLayout::ImageOnly => None,
            PreviewLayout::ImageLeft => Some((300.0, 0.0, 300.0, 350.0)),
            PreviewLayout::ImageRight => Some((0.0, 0.0, 300.0, 350.0)),
            PreviewLayout::ImageTop => Some((0.0, 200.0, 280.0, 200.0)),
            PreviewLayout::ImageBottom => Some((0.0, 0.0, 280.0, 200.0)),
        }
    }

    /// Width and height of the drag bounds for the text blocks.
    pub fn text_region_size(self) -> (f64, f64) {
        match self.text_region() {
            Some((_, _, w, h)) => (w, h),
            None => {
                let (w, h) = self.canvas_size();
                (w, h)
            }
        }
    }
}

/// The three positionable text blocks of the preview.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TextBlock {
    Heading,
    Body,
    Footer,
}

impl TextBlock {
    pub const ALL: [TextBlock; 3] = [TextBlock::Heading, TextBlock::Body, TextBlock::Footer];

    /// (font size in px, bold) used both in the DOM preview and on canvas.
    pub fn font(self) -> (f64, bool) {
        match self {
            TextBlock::Heading => (22.0, true),
            TextBlock::Body => (16.0, false),
            TextBlock::Footer => (12.0, false),
        }
    }
}

/// Position and size of a text block, relative to the text region.
#[derive(Clone, Copy, PartialEq)]
pub struct BlockRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BlockRect {
    /// Keeps the rect inside the given bounds, shrinking first if it is
    /// larger than the bounds themselves.
    pub fn clamped(self, bounds_w: f64, bounds_h: f64) -> Self {
        let width = self.width.min(bounds_w);
        let height = self.height.min(bounds_h);
        BlockRect {
            x: self.x.clamp(0.0, bounds_w - width),
            y: self.y.clamp(0.0, bounds_h - height),
            width,
            height,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    Resize,
}

/// An in-progress drag or resize of one text block.
#[derive(Clone, Copy)]
pub struct DragState {
    pub block: TextBlock,
    pub kind: DragKind,
    /// Pointer position at drag start, in client coordinates.
    pub pointer_x: f64,
    pub pointer_y: f64,
    /// Block rect at drag start; deltas apply against this.
    pub origin: BlockRect,
}

/// Main state container for the `PopupComposer` component.
pub struct PopupComposer {
    pub screen: Screen,

    // Form fields.
    pub heading: String,
    pub body_text: String,
    pub footer_text: String,
    /// Uploaded image as a data URL, if any.
    pub image: Option<String>,
    pub only_image: bool,
    pub frequency: Frequency,
    pub time_frequency: Option<u32>,
    pub on_day: Weekday,

    // Preview styling.
    pub text_alignment: TextAlignment,
    pub image_position: ImagePosition,
    pub bg_color: String,
    pub heading_color: String,
    pub body_color: String,
    pub footer_color: String,

    // Text block geometry, relative to the text region.
    pub heading_rect: BlockRect,
    pub body_rect: BlockRect,
    pub footer_rect: BlockRect,
    pub drag: Option<DragState>,

    // Stored popups, partitioned by activation flag.
    pub active_popups: Vec<PopupConfig>,
    pub recent_popups: Vec<PopupConfig>,

    /// True while a create request (including rasterization) is in flight;
    /// disables the submit control. UI-level guard only.
    pub submitting: bool,
    /// Guard to avoid re-running the first-render fetch.
    pub loaded: bool,
}

impl PopupComposer {
    pub fn new() -> Self {
        Self {
            screen: Screen::Loading,
            heading: String::new(),
            body_text: String::new(),
            footer_text: String::new(),
            image: None,
            only_image: false,
            frequency: Frequency::Once,
            time_frequency: None,
            on_day: Weekday::Sunday,
            text_alignment: TextAlignment::Center,
            image_position: ImagePosition::Left,
            bg_color: "#e1ded5".to_string(),
            heading_color: "#000000".to_string(),
            body_color: "#000000".to_string(),
            footer_color: "#000000".to_string(),
            heading_rect: BlockRect { x: 20.0, y: 20.0, width: 240.0, height: 60.0 },
            body_rect: BlockRect { x: 20.0, y: 90.0, width: 240.0, height: 60.0 },
            footer_rect: BlockRect { x: 20.0, y: 160.0, width: 240.0, height: 40.0 },
            drag: None,
            active_popups: Vec::new(),
            recent_popups: Vec::new(),
            submitting: false,
            loaded: false,
        }
    }

    /// Clears the form back to defaults; the fetched lists are kept.
    pub fn reset_form(&mut self) {
        let lists = (
            std::mem::take(&mut self.active_popups),
            std::mem::take(&mut self.recent_popups),
        );
        let loaded = self.loaded;
        let screen = self.screen;
        *self = PopupComposer::new();
        self.active_popups = lists.0;
        self.recent_popups = lists.1;
        self.loaded = loaded;
        self.screen = screen;
    }

    /// Abandons an in-flight submission attempt, whatever stage it failed
    /// at: the guard is released so the submit control works again, and the
    /// list shows what stands.
    pub fn abandon_submission(&mut self) {
        self.submitting = false;
        self.screen = Screen::List;
    }

    /// Current preview layout, derived from the image state.
    pub fn layout(&self) -> PreviewLayout {
        match (&self.image, self.only_image, self.image_position) {
            (None, _, _) => PreviewLayout::TextOnly,
            (Some(_), true, _) => PreviewLayout::ImageOnly,
            (Some(_), false, ImagePosition::Left) => PreviewLayout::ImageLeft,
            (Some(_), false, ImagePosition::Right) => PreviewLayout::ImageRight,
            (Some(_), false, ImagePosition::Top) => PreviewLayout::ImageTop,
            (Some(_), false, ImagePosition::Bottom) => PreviewLayout::ImageBottom,
        }
    }

    pub fn rect(&self, block: TextBlock) -> BlockRect {
        match block {
            TextBlock::Heading => self.heading_rect,
            TextBlock::Body => self.body_rect,
            TextBlock::Footer => self.footer_rect,
        }
    }

    pub fn rect_mut(&mut self, block: TextBlock) -> &mut BlockRect {
        match block {
            TextBlock::Heading => &mut self.heading_rect,
            TextBlock::Body => &mut self.body_rect,
            TextBlock::Footer => &mut self.footer_rect,
        }
    }

    pub fn block_text(&self, block: TextBlock) -> &str {
        match block {
            TextBlock::Heading => &self.heading,
            TextBlock::Body => &self.body_text,
            TextBlock::Footer => &self.footer_text,
        }
    }

    pub fn block_color(&self, block: TextBlock) -> &str {
        match block {
            TextBlock::Heading => &self.heading_color,
            TextBlock::Body => &self.body_color,
            TextBlock::Footer => &self.footer_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_cycles_through_the_fixed_option_list() {
        let mut alignment = TextAlignment::Center;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(alignment.as_css());
            alignment = alignment.next();
        }
        assert_eq!(seen, ["center", "left", "right"]);
        assert_eq!(alignment, TextAlignment::Center);
    }

    #[test]
    fn image_position_cycles_through_all_four_options() {
        let mut position = ImagePosition::Left;
        for _ in 0..4 {
            position = position.next();
        }
        assert_eq!(position, ImagePosition::Left);
    }

    #[test]
    fn block_rects_are_clamped_to_their_region() {
        let rect = BlockRect { x: 500.0, y: -30.0, width: 100.0, height: 50.0 };
        let clamped = rect.clamped(300.0, 350.0);
        assert_eq!(clamped.x, 200.0);
        assert_eq!(clamped.y, 0.0);

        // Oversized blocks shrink to the region first.
        let wide = BlockRect { x: 0.0, y: 0.0, width: 900.0, height: 40.0 };
        assert_eq!(wide.clamped(300.0, 350.0).width, 300.0);
    }

    #[test]
    fn layout_follows_image_state() {
        let mut composer = PopupComposer::new();
        assert!(matches!(composer.layout(), PreviewLayout::TextOnly));

        composer.image = Some("data:image/png;base64,x".into());
        assert!(matches!(composer.layout(), PreviewLayout::ImageLeft));

        composer.only_image = true;
        assert!(matches!(composer.layout(), PreviewLayout::ImageOnly));

        composer.only_image = false;
        composer.image_position = ImagePosition::Bottom;
        assert!(matches!(composer.layout(), PreviewLayout::ImageBottom));
    }

    #[test]
    fn abandoned_submission_releases_the_submit_guard() {
        let mut composer = PopupComposer::new();
        composer.screen = Screen::Form;
        composer.submitting = true;

        composer.abandon_submission();
        assert!(!composer.submitting);
        assert!(matches!(composer.screen, Screen::List));
    }

    #[test]
    fn image_and_text_regions_tile_the_split_layouts() {
        for layout in [
            PreviewLayout::ImageLeft,
            PreviewLayout::ImageRight,
            PreviewLayout::ImageTop,
            PreviewLayout::ImageBottom,
        ] {
            let (w, h) = layout.canvas_size();
            let (_, _, iw, ih) = layout.image_region().unwrap();
            let (_, _, tw, th) = layout.text_region().unwrap();
            let covered = iw * ih + tw * th;
            assert_eq!(covered, w * h);
        }
    }
}
