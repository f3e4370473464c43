//! Memory of what is currently shown on the screen.

use heapless::LinearMap;

/// Independently redrawn part of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    List,
    Value,
    Label,
    Marker,
    Badge,
    Min,
    Max,
    Endpoint,
    Raw,
    Midi,
    Bar,
    Preview,
}

const CAPACITY: usize = 16;

/// Fingerprints of values last drawn into each region.
///
/// It lets the screen skip redrawing of regions whose value stayed the
/// same, preventing flicker and needless traffic to the display.
#[derive(Debug, Default)]
pub struct RenderCache {
    values: LinearMap<Region, u32, CAPACITY>,
}

impl RenderCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the value and tell whether it differs from the previous one.
    ///
    /// A region that was never drawn is always reported as changed.
    pub fn changed(&mut self, region: Region, value: u32) -> bool {
        match self.values.insert(region, value) {
            Ok(Some(previous)) => previous != value,
            Ok(None) | Err(_) => true,
        }
    }

    /// Forget everything, so all regions get drawn again.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}
