//! Fakes of the collaborators, for tests only.

use core::cell::Cell;
use core::convert::Infallible;
use std::rc::Rc;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use wmidi::MidiMessage;

use crate::midi::MidiOut;
use crate::storage::{Flash, SECTOR_SIZE};

/// Display counting the requests it received.
pub struct RecordingDisplay {
    size: Size,
    pub draws: usize,
    pub clears: usize,
}

impl RecordingDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            draws: 0,
            clears: 0,
        }
    }
}

impl OriginDimensions for RecordingDisplay {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for RecordingDisplay {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.draws += 1;
        pixels.into_iter().for_each(drop);
        Ok(())
    }

    fn clear(&mut self, _color: Self::Color) -> Result<(), Self::Error> {
        self.clears += 1;
        Ok(())
    }
}

/// Display rejecting every request.
pub struct FailingDisplay {
    size: Size,
}

impl FailingDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }
}

impl OriginDimensions for FailingDisplay {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for FailingDisplay {
    type Color = Rgb565;
    type Error = ();

    fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        Err(())
    }
}

/// Display failing a given number of requests, then recovering.
///
/// The number of pending failures is shared, so it can be changed while
/// the display is owned by someone else.
pub struct FlakyDisplay {
    size: Size,
    failures: Rc<Cell<usize>>,
    pub draws: usize,
    pub clears: usize,
}

impl FlakyDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            failures: Rc::new(Cell::new(0)),
            draws: 0,
            clears: 0,
        }
    }

    pub fn failures(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.failures)
    }

    fn fail(&self) -> bool {
        let failures = self.failures.get();
        if failures > 0 {
            self.failures.set(failures - 1);
        }
        failures > 0
    }
}

impl OriginDimensions for FlakyDisplay {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for FlakyDisplay {
    type Color = Rgb565;
    type Error = ();

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        if self.fail() {
            return Err(());
        }
        self.draws += 1;
        pixels.into_iter().for_each(drop);
        Ok(())
    }

    fn clear(&mut self, _color: Self::Color) -> Result<(), Self::Error> {
        if self.fail() {
            return Err(());
        }
        self.clears += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingMidi {
    pub sent: Vec<MidiMessage<'static>>,
}

impl MidiOut for RecordingMidi {
    fn send(&mut self, message: MidiMessage<'static>) {
        self.sent.push(message);
    }
}

/// Flash memory kept in RAM, starting erased.
pub struct MemoryFlash {
    data: Vec<u8>,
    written: Vec<bool>,
}

impl MemoryFlash {
    pub fn new(sectors: usize) -> Self {
        Self {
            data: vec![0xFF; sectors * SECTOR_SIZE as usize],
            written: vec![false; sectors],
        }
    }

    pub fn written_sectors(&self) -> usize {
        self.written.iter().filter(|w| **w).count()
    }

    pub fn corrupt(&mut self, address: u32) {
        self.data[address as usize] ^= 0xFF;
    }
}

impl Flash for MemoryFlash {
    fn read(&mut self, address: u32, buffer: &mut [u8]) {
        let start = address as usize;
        buffer.copy_from_slice(&self.data[start..start + buffer.len()]);
    }

    fn write(&mut self, address: u32, data: &[u8]) {
        let sector = (address / SECTOR_SIZE) as usize;
        let sector_start = sector * SECTOR_SIZE as usize;
        self.data[sector_start..sector_start + SECTOR_SIZE as usize].fill(0xFF);
        let start = address as usize;
        self.data[start..start + data.len()].copy_from_slice(data);
        self.written[sector] = true;
    }
}
