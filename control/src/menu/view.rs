//! Drawing of menu screens.
//!
//! Static parts of a screen are drawn only when the screen is entered.
//! Dynamic parts are gated by the render cache, so an update redraws only
//! the regions whose value changed.

use core::fmt::Write as _;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::DrawTarget;
use expr2midi_dsp::curve::Curve;
use heapless::String;

use super::{Menu, Redraw, Saved, Screen, MAIN_OPTIONS};
use crate::calibration::{Endpoint, ADC_MAX};
use crate::instrument;
use crate::render::{Painter, Region};
use expr2midi_dsp::NORMALIZED_MAX;

const PREVIEW_ROWS: usize = 6;
const INVERT_OPTIONS: [&str; 2] = ["Normal", "Inverted"];

type Line = String<40>;

/// Bring the display in sync with the menu.
///
/// When drawing fails, the render cache is invalidated, since it is not
/// known which regions made it to the display.
pub fn draw<D>(menu: &Menu, painter: &mut Painter<D>, redraw: Redraw) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let result = draw_requested(menu, painter, redraw);
    if result.is_err() {
        painter.invalidate();
    }
    result
}

fn draw_requested<D>(menu: &Menu, painter: &mut Painter<D>, redraw: Redraw) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    match redraw {
        Redraw::None => Ok(()),
        Redraw::Screen => {
            painter.clear()?;
            draw_static(menu, painter)?;
            draw_dynamic(menu, painter)
        }
        Redraw::Update => draw_dynamic(menu, painter),
    }
}

fn draw_static<D>(menu: &Menu, painter: &mut Painter<D>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    painter.title(title(menu.screen()))?;
    let configuration = menu.configuration();
    match menu.screen() {
        Screen::Monitor => {
            painter.text(0, "Raw")?;
            painter.text(2, "MIDI")?;
            let mut footer = Line::new();
            let _ = write!(
                footer,
                "Ch {}  CC {}",
                configuration.channel, configuration.cc
            );
            painter.text(5, &footer)?;
            if let Some(label) = configuration.label_for_cc(configuration.cc) {
                painter.text(6, label)?;
            }
        }
        Screen::MidiChannel => painter.text(0, "Channel")?,
        Screen::MidiCC => painter.text(0, "Controller")?,
        Screen::Calibration => painter.text(4, "Live")?,
        Screen::Main | Screen::Invert | Screen::Curve | Screen::Instruments => (),
    }
    Ok(())
}

fn draw_dynamic<D>(menu: &Menu, painter: &mut Painter<D>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    match menu.screen() {
        Screen::Main => draw_main(menu, painter),
        Screen::Monitor => draw_monitor(menu, painter),
        Screen::MidiChannel => draw_midi_channel(menu, painter),
        Screen::MidiCC => draw_midi_cc(menu, painter),
        Screen::Calibration => draw_calibration(menu, painter),
        Screen::Invert => draw_invert(menu, painter),
        Screen::Curve => draw_curve(menu, painter),
        Screen::Instruments => draw_instruments(menu, painter),
    }
}

fn title(screen: Screen) -> &'static str {
    match screen {
        Screen::Main => "Expr2MIDI",
        Screen::Monitor => "Monitor",
        Screen::MidiChannel => "MIDI Channel",
        Screen::MidiCC => "MIDI CC",
        Screen::Calibration => "Calibration",
        Screen::Invert => "Invert",
        Screen::Curve => "Curve",
        Screen::Instruments => "Instruments",
    }
}

fn draw_main<D>(menu: &Menu, painter: &mut Painter<D>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let selected = menu.main_selected();
    let top = menu.main_top();
    if painter.changed(Region::List, selected as u32 | (top as u32) << 8) {
        painter.options(MAIN_OPTIONS.len(), |i| MAIN_OPTIONS[i].0, selected, top, None)?;
    }
    Ok(())
}

fn draw_monitor<D>(menu: &Menu, painter: &mut Painter<D>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let monitor = menu.monitor();
    if painter.changed(Region::Raw, u32::from(monitor.raw)) {
        painter.big_number(1, u32::from(monitor.raw))?;
    }
    if painter.changed(Region::Midi, u32::from(monitor.midi)) {
        painter.big_number(3, u32::from(monitor.midi))?;
    }
    if painter.changed(Region::Bar, u32::from(monitor.normalized)) {
        painter.progress_bar(4, u32::from(monitor.normalized), u32::from(NORMALIZED_MAX))?;
    }
    Ok(())
}

fn draw_midi_channel<D>(menu: &Menu, painter: &mut Painter<D>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let channel = menu.configuration().channel;
    if painter.changed(Region::Value, u32::from(channel)) {
        painter.big_number(1, u32::from(channel))?;
    }
    draw_badge(menu, painter, 3)
}

fn draw_midi_cc<D>(menu: &Menu, painter: &mut Painter<D>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let cc = menu.selected_cc();
    if painter.changed(Region::Value, u32::from(cc)) {
        painter.big_number(1, u32::from(cc))?;
    }

    let instrument = menu.configuration().instrument;
    if painter.changed(Region::Label, u32::from(cc) | u32::from(instrument) << 8) {
        painter.text(2, menu.selected_cc_label().unwrap_or(""))?;
    }

    let active = menu.selected_cc_is_active();
    if painter.changed(Region::Marker, u32::from(active)) {
        painter.text(3, if active { "[active]" } else { "" })?;
    }

    draw_badge(menu, painter, 4)
}

fn draw_calibration<D>(menu: &Menu, painter: &mut Painter<D>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let calibration = menu.configuration().calibration;
    if painter.changed(Region::Min, u32::from(calibration.min)) {
        let mut line = Line::new();
        let _ = write!(line, "Min: {}", calibration.min);
        painter.text(0, &line)?;
    }
    if painter.changed(Region::Max, u32::from(calibration.max)) {
        let mut line = Line::new();
        let _ = write!(line, "Max: {}", calibration.max);
        painter.text(1, &line)?;
    }

    let setting_max = menu.setting_max();
    if painter.changed(Region::Endpoint, u32::from(setting_max)) {
        painter.text(
            2,
            if setting_max {
                "Press to set max"
            } else {
                "Press to set min"
            },
        )?;
    }

    let input = menu.monitor().input;
    if painter.changed(Region::Raw, u32::from(input)) {
        painter.big_number(5, u32::from(input))?;
    }
    if painter.changed(Region::Bar, u32::from(input)) {
        painter.progress_bar(6, u32::from(input), u32::from(ADC_MAX))?;
    }

    draw_badge(menu, painter, 7)
}

fn draw_invert<D>(menu: &Menu, painter: &mut Painter<D>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let inverted = menu.staged_invert();
    if painter.changed(Region::List, u32::from(inverted)) {
        painter.options(
            INVERT_OPTIONS.len(),
            |i| INVERT_OPTIONS[i],
            usize::from(inverted),
            0,
            None,
        )?;
    }
    if painter.changed(Region::Preview, u32::from(inverted)) {
        let curve = menu.configuration().curve;
        painter.curve_preview(3, PREVIEW_ROWS, curve, inverted, curve.name())?;
    }
    Ok(())
}

fn draw_curve<D>(menu: &Menu, painter: &mut Painter<D>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let curve = menu.staged_curve();
    let index = curve.index();
    if painter.changed(Region::List, index as u32) {
        painter.options(Curve::ALL.len(), |i| Curve::ALL[i].name(), index, 0, None)?;
    }
    if painter.changed(Region::Preview, index as u32) {
        let inverted = menu.configuration().inverted;
        painter.curve_preview(
            Curve::ALL.len() + 1,
            PREVIEW_ROWS,
            curve,
            inverted,
            curve.name(),
        )?;
    }
    Ok(())
}

fn draw_instruments<D>(menu: &Menu, painter: &mut Painter<D>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let highlighted = menu.highlighted_instrument();
    let top = menu.instrument_top();
    let active = menu.configuration().instrument;
    let fingerprint = u32::from(highlighted) | (top as u32) << 8 | u32::from(active) << 16;
    if painter.changed(Region::List, fingerprint) {
        painter.options(
            instrument::count(),
            |i| instrument::CATALOG[i].name,
            usize::from(highlighted),
            top,
            Some(usize::from(active)),
        )?;
    }
    Ok(())
}

fn draw_badge<D>(menu: &Menu, painter: &mut Painter<D>, row: usize) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let (fingerprint, text) = match menu.saved() {
        None => (0, ""),
        Some(Saved::Setting) => (1, "Saved"),
        Some(Saved::Endpoint(Endpoint::Min)) => (2, "Saved min"),
        Some(Saved::Endpoint(Endpoint::Max)) => (3, "Saved max"),
    };
    if painter.changed(Region::Badge, fingerprint) {
        painter.text(row, text)?;
    }
    Ok(())
}
