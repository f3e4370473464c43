//! Semantic drawing requests on top of a color display.
//!
//! The screen is split into a title bar and equally tall rows below it.
//! Every request addresses rows, so screens can be described without any
//! pixel arithmetic:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │            TITLE             │  ← TITLE_HEIGHT
//! ├──────────────────────────────┤
//! │  row 0                       │  ← LIST_TOP
//! │  row 1                       │  ← LIST_TOP + ROW_HEIGHT
//! │  ...                         │
//! └──────────────────────────────┘
//! ```

pub mod cache;

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10, FONT_9X15},
        MonoTextStyle,
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle, Triangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use expr2midi_dsp::curve::{apply_curve, Curve};
use expr2midi_dsp::NORMALIZED_MAX;
use heapless::String;

pub use self::cache::{Region, RenderCache};

pub const TITLE_HEIGHT: u32 = 40;
pub const LIST_TOP: u32 = 50;
pub const ROW_HEIGHT: u32 = 32;

const MARGIN: i32 = 20;
const PREVIEW_SEGMENTS: u32 = 64;

const BACKGROUND: Rgb565 = Rgb565::BLACK;
const FOREGROUND: Rgb565 = Rgb565::WHITE;
const ACCENT: Rgb565 = Rgb565::CYAN;
const HIGHLIGHT: Rgb565 = Rgb565::new(4, 12, 8);
const MARKER: Rgb565 = Rgb565::YELLOW;

/// Issuer of semantic drawing requests.
///
/// Besides the draw target it owns the [`RenderCache`] of the screen
/// currently shown, which is reset together with the display.
pub struct Painter<D> {
    target: D,
    width: u32,
    height: u32,
    cache: RenderCache,
}

impl<D> Painter<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        let size = target.bounding_box().size;
        Self {
            target,
            width: size.width,
            height: size.height,
            cache: RenderCache::new(),
        }
    }

    /// Number of full rows fitting under the title bar.
    #[must_use]
    pub fn visible_rows(&self) -> usize {
        (self.height.saturating_sub(LIST_TOP) / ROW_HEIGHT).max(1) as usize
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn release(self) -> D {
        self.target
    }

    /// See [`RenderCache::changed`].
    pub fn changed(&mut self, region: Region, value: u32) -> bool {
        self.cache.changed(region, value)
    }

    /// Forget what is on the display, so every region gets drawn again.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    /// Blank the whole display and forget what was on it.
    pub fn clear(&mut self) -> Result<(), D::Error> {
        self.cache.clear();
        self.target.clear(BACKGROUND)
    }

    pub fn title(&mut self, title: &str) -> Result<(), D::Error> {
        Rectangle::new(Point::zero(), Size::new(self.width, TITLE_HEIGHT))
            .into_styled(PrimitiveStyle::with_fill(ACCENT))
            .draw(&mut self.target)?;
        let style = MonoTextStyle::new(&FONT_10X20, BACKGROUND);
        Text::with_text_style(
            title,
            Point::new(self.width as i32 / 2, TITLE_HEIGHT as i32 / 2),
            style,
            centered(),
        )
        .draw(&mut self.target)?;
        Ok(())
    }

    /// Draw a window of a list, starting with the item `top`.
    ///
    /// The `selected` item gets highlighted with a pointer, the `marked`
    /// one gets a dot on the right side.
    pub fn options<'a>(
        &mut self,
        count: usize,
        label: impl Fn(usize) -> &'a str,
        selected: usize,
        top: usize,
        marked: Option<usize>,
    ) -> Result<(), D::Error> {
        let shown = count.saturating_sub(top).min(self.visible_rows());
        for row in 0..shown {
            let index = top + row;
            self.option(
                row,
                label(index),
                index == selected,
                marked == Some(index),
            )?;
        }
        Ok(())
    }

    fn option(
        &mut self,
        row: usize,
        label: &str,
        highlighted: bool,
        marked: bool,
    ) -> Result<(), D::Error> {
        let band = self.band(row, 1);
        let background = if highlighted { HIGHLIGHT } else { BACKGROUND };
        band.into_styled(PrimitiveStyle::with_fill(background))
            .draw(&mut self.target)?;

        let middle = band.top_left.y + ROW_HEIGHT as i32 / 2;
        if highlighted {
            Triangle::new(
                Point::new(6, middle - 7),
                Point::new(6, middle + 7),
                Point::new(14, middle),
            )
            .into_styled(PrimitiveStyle::with_fill(ACCENT))
            .draw(&mut self.target)?;
        }

        let style = MonoTextStyle::new(&FONT_10X20, FOREGROUND);
        Text::with_baseline(label, Point::new(MARGIN + 4, middle), style, Baseline::Middle)
            .draw(&mut self.target)?;

        if marked {
            Circle::new(Point::new(self.width as i32 - MARGIN - 10, middle - 5), 10)
                .into_styled(PrimitiveStyle::with_fill(MARKER))
                .draw(&mut self.target)?;
        }

        Ok(())
    }

    /// Replace the content of the row with a line of text.
    pub fn text(&mut self, row: usize, text: &str) -> Result<(), D::Error> {
        let band = self.blank(row, 1)?;
        let style = MonoTextStyle::new(&FONT_9X15, FOREGROUND);
        Text::with_baseline(
            text,
            Point::new(MARGIN, band.top_left.y + ROW_HEIGHT as i32 / 2),
            style,
            Baseline::Middle,
        )
        .draw(&mut self.target)?;
        Ok(())
    }

    /// Replace the content of the row with a centered numeric readout.
    pub fn big_number(&mut self, row: usize, value: u32) -> Result<(), D::Error> {
        let band = self.blank(row, 1)?;
        let mut buffer: String<12> = String::new();
        // Ten digits always fit
        let _ = write!(buffer, "{value}");
        let style = MonoTextStyle::new(&FONT_10X20, ACCENT);
        Text::with_text_style(
            buffer.as_str(),
            Point::new(self.width as i32 / 2, band.top_left.y + ROW_HEIGHT as i32 / 2),
            style,
            centered(),
        )
        .draw(&mut self.target)?;
        Ok(())
    }

    /// Replace the content of the row with a bar filled to `value / max`.
    pub fn progress_bar(&mut self, row: usize, value: u32, max: u32) -> Result<(), D::Error> {
        let band = self.blank(row, 1)?;
        let outline = Rectangle::new(
            Point::new(MARGIN, band.top_left.y + 8),
            Size::new(self.inner_width(), ROW_HEIGHT - 16),
        );
        outline
            .into_styled(PrimitiveStyle::with_stroke(FOREGROUND, 1))
            .draw(&mut self.target)?;

        let filled = if max == 0 {
            0
        } else {
            let inner = u64::from(outline.size.width.saturating_sub(4));
            (inner * u64::from(value.min(max)) / u64::from(max)) as u32
        };
        if filled > 0 {
            Rectangle::new(
                outline.top_left + Point::new(2, 2),
                Size::new(filled, outline.size.height.saturating_sub(4)),
            )
            .into_styled(PrimitiveStyle::with_fill(ACCENT))
            .draw(&mut self.target)?;
        }
        Ok(())
    }

    /// Plot the response of the curve into the given span of rows.
    pub fn curve_preview(
        &mut self,
        row: usize,
        rows: usize,
        curve: Curve,
        inverted: bool,
        label: &str,
    ) -> Result<(), D::Error> {
        let band = self.blank(row, rows)?;
        let frame = Rectangle::new(
            Point::new(MARGIN, band.top_left.y + 4),
            Size::new(self.inner_width(), band.size.height.saturating_sub(8)),
        );
        frame
            .into_styled(PrimitiveStyle::with_stroke(FOREGROUND, 1))
            .draw(&mut self.target)?;

        let plot_width = frame.size.width.saturating_sub(1);
        let plot_height = frame.size.height.saturating_sub(1);
        let point = |i: u32| {
            let linear = (i * u32::from(NORMALIZED_MAX) / PREVIEW_SEGMENTS) as u16;
            let curved = u32::from(apply_curve(curve, inverted, linear));
            let x = frame.top_left.x + (i * plot_width / PREVIEW_SEGMENTS) as i32;
            let y = frame.top_left.y + plot_height as i32
                - (curved * plot_height / u32::from(NORMALIZED_MAX)) as i32;
            Point::new(x, y)
        };

        let style = PrimitiveStyle::with_stroke(ACCENT, 2);
        let mut previous = point(0);
        for i in 1..=PREVIEW_SEGMENTS {
            let current = point(i);
            Line::new(previous, current)
                .into_styled(style)
                .draw(&mut self.target)?;
            previous = current;
        }

        let label_style = MonoTextStyle::new(&FONT_6X10, FOREGROUND);
        Text::with_baseline(
            label,
            frame.top_left + Point::new(4, 4),
            label_style,
            Baseline::Top,
        )
        .draw(&mut self.target)?;
        Ok(())
    }

    fn inner_width(&self) -> u32 {
        self.width.saturating_sub(2 * MARGIN as u32)
    }

    fn band(&self, row: usize, rows: usize) -> Rectangle {
        Rectangle::new(
            Point::new(0, (LIST_TOP + row as u32 * ROW_HEIGHT) as i32),
            Size::new(self.width, rows as u32 * ROW_HEIGHT),
        )
    }

    fn blank(&mut self, row: usize, rows: usize) -> Result<Rectangle, D::Error> {
        let band = self.band(row, rows);
        band.into_styled(PrimitiveStyle::with_fill(BACKGROUND))
            .draw(&mut self.target)?;
        Ok(band)
    }
}

fn centered() -> embedded_graphics::text::TextStyle {
    TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build()
}
