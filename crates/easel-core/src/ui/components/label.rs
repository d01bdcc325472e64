// src/ui/components/label.rs
//! Text label content
//!
//! A label is a leaf element that also draws one line of text using
//! fixed-cell glyphs: every character advances the pen by the cell width of
//! its [`FontSize`] class. There is no wrapping or shaping.

use crate::font::FontSize;
use crate::ui::UiError;
use crate::ui::geometry::Size;
use crate::ui::layouts::{HorizontalAlignment, VerticalAlignment};
use crate::ui::styling::{BLACK, Color};

/// Maximum label text length in bytes.
pub const LABEL_CAPACITY: usize = 64;

/// Text content and font settings of a label element.
///
/// # Examples
/// ```ignore
/// let id = ui.create_label("7")?;
/// let label = ui.label_mut(id)?;
/// label.font_size = FontSize::Large;
/// label.font_color = WHITE;
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    text: heapless::String<LABEL_CAPACITY>,
    pub font_color: Color,
    pub font_size: FontSize,
    pub font_vertical_alignment: VerticalAlignment,
    pub font_horizontal_alignment: HorizontalAlignment,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            text: heapless::String::new(),
            font_color: BLACK,
            font_size: FontSize::default(),
            font_vertical_alignment: VerticalAlignment::Center,
            font_horizontal_alignment: HorizontalAlignment::Center,
        }
    }
}

impl Label {
    pub fn new(text: &str) -> Result<Self, UiError> {
        let mut label = Self::default();
        label.set_text(text)?;
        Ok(label)
    }

    /// Replace the text. Fails without modifying the label when `text` is
    /// longer than [`LABEL_CAPACITY`] bytes.
    pub fn set_text(&mut self, text: &str) -> Result<(), UiError> {
        let mut new_text = heapless::String::new();
        new_text.push_str(text).map_err(|_| UiError::TextTooLong {
            capacity: LABEL_CAPACITY,
        })?;
        self.text = new_text;
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of glyph cells the text occupies.
    pub fn glyph_count(&self) -> i32 {
        self.text.chars().count() as i32
    }

    /// Width and height of the rendered text line.
    pub fn text_extent(&self) -> Size {
        let cell = self.font_size.cell_size();
        Size::new(cell.width * self.glyph_count(), cell.height)
    }

    /// Size the label wants: `requested` where non-zero, otherwise the text
    /// extent.
    pub fn intrinsic_size(&self, requested: Size) -> Size {
        let text = self.text_extent();
        Size::new(
            if requested.width == 0 { text.width } else { requested.width },
            if requested.height == 0 { text.height } else { requested.height },
        )
    }
}
