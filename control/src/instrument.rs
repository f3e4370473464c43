//! Catalog of known instruments and names of their controllers.
//!
//! Selecting an instrument does not change what is sent, it only helps the
//! performer by showing what the selected CC number controls on the
//! receiving side.

/// Instrument profile with CC number to label lookup.
#[derive(Debug)]
pub struct Instrument {
    pub name: &'static str,
    labels: &'static [(u8, &'static str)],
}

/// Index of the "None" instrument, without any labels.
pub const NONE: u8 = 0;

pub static CATALOG: [Instrument; 17] = [
    Instrument::new("None", &[]),
    Instrument::new("Arturia MicroFreak", &[]),
    Instrument::new("ASM Hydrasynth", &[]),
    Instrument::new("AudioThingies MicroMonsta 2", &[]),
    Instrument::new("Behringer Neutron", &[]),
    Instrument::new("Korg volca beats", VOLCA_BEATS),
    Instrument::new("Korg volca fm", VOLCA_FM),
    Instrument::new("Korg volca keys", VOLCA_KEYS),
    Instrument::new("Novation Circuit", &[]),
    Instrument::new("Polyend Synth ACD", &[]),
    Instrument::new("Polyend Synth FAT", &[]),
    Instrument::new("Polyend Synth GRAIN", &[]),
    Instrument::new("Polyend Synth PHZ", &[]),
    Instrument::new("Polyend Synth PMD", &[]),
    Instrument::new("Polyend Synth VAP", &[]),
    Instrument::new("Polyend Synth WAVS", &[]),
    Instrument::new("Polyend Synth WTFM", &[]),
];

const VOLCA_BEATS: &[(u8, &str)] = &[
    (40, "Kick Level"),
    (41, "Snare Level"),
    (42, "Lo Tom Level"),
    (43, "Hi Tom Level"),
    (44, "Cl Hat Level"),
    (45, "Op Hat Level"),
    (46, "Clap Level"),
    (47, "Claves Level"),
    (48, "Agogo Level"),
    (49, "Crash Level"),
    (50, "Clap Speed"),
    (51, "Claves Speed"),
    (52, "Agogo Speed"),
    (53, "Crash Speed"),
    (54, "Stutter Time"),
    (55, "Stutter Depth"),
    (56, "Tom Decay"),
    (57, "Cl Hat Decay"),
    (58, "Op Hat Decay"),
    (59, "Hat Grain"),
];

const VOLCA_FM: &[(u8, &str)] = &[
    (40, "Transpose"),
    (41, "Velocity"),
    (42, "Mod Attack"),
    (43, "Mod Decay"),
    (44, "Carrier Attack"),
    (45, "Carrier Decay"),
    (46, "LFO Rate"),
    (47, "LFO Pitch Depth"),
    (48, "Algorithm"),
    (49, "Arp Type"),
    (50, "Arp Div"),
];

const VOLCA_KEYS: &[(u8, &str)] = &[
    (5, "Portamento"),
    (11, "Expression"),
    (40, "Voice"),
    (41, "Octave"),
    (42, "Detune"),
    (43, "VCO EG Int"),
    (44, "Cutoff"),
    (45, "VCF EG Int"),
    (46, "LFO Rate"),
    (47, "LFO Pitch Int"),
    (48, "LFO Cutoff Int"),
    (49, "EG Attack"),
    (50, "EG Decay/Release"),
    (51, "EG Sustain"),
    (52, "Delay Time"),
    (53, "Delay Feedback"),
];

impl Instrument {
    const fn new(name: &'static str, labels: &'static [(u8, &'static str)]) -> Self {
        Self { name, labels }
    }

    /// Human readable name of the given controller, if the instrument
    /// defines one.
    #[must_use]
    pub fn label_for_cc(&self, cc: u8) -> Option<&'static str> {
        self.labels
            .iter()
            .find(|(number, label)| *number == cc && !label.is_empty())
            .map(|(_, label)| *label)
    }
}

#[must_use]
pub fn count() -> usize {
    CATALOG.len()
}

#[must_use]
pub fn get(index: u8) -> Option<&'static Instrument> {
    CATALOG.get(index as usize)
}

/// Look up the controller label on the instrument under the given index.
///
/// Unknown instruments and the "None" instrument never return a label.
#[must_use]
pub fn label_for_cc(index: u8, cc: u8) -> Option<&'static str> {
    get(index).and_then(|instrument| instrument.label_for_cc(cc))
}
