//! Node kinds and their parameter sets.
//!
//! Each kind is a tagged variant carrying its own parameter-spec list as
//! data, so rebuilding a node's controls is a pure function of the variant.
//! Kinds round-trip through a stable lowercase string tag for snapshots.

use serde::{Deserialize, Serialize};

use super::params::ParamSpec;

/// The kinds of engine node a patch can contain.
///
/// `Keyboard` is declared but not implemented by the engine; asking the
/// factory for one fails with `UnsupportedKind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Keyboard,
    Analyser,
    BiquadFilter,
    Constant,
    Convolver,
    Delay,
    DynamicsCompressor,
    Gain,
    Oscillator,
    Panner,
    StereoPanner,
    WaveShaper,
    Destination,
}

const BIQUAD_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("q", 1.0, 0.0001, 1000.0),
    ParamSpec::new("detune", 0.0, -1200.0, 1200.0),
    ParamSpec::new("frequency", 350.0, 20.0, 20000.0),
    ParamSpec::new("gain", 0.0, -40.0, 40.0),
];

const CONSTANT_PARAMS: &[ParamSpec] = &[ParamSpec::new("offset", 1.0, -10.0, 10.0)];

const DELAY_PARAMS: &[ParamSpec] = &[ParamSpec::new("delaytime", 0.0, 0.0, 1.0)];

const COMPRESSOR_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("attack", 0.003, 0.0, 1.0),
    ParamSpec::new("knee", 30.0, 0.0, 40.0),
    ParamSpec::new("ratio", 12.0, 1.0, 20.0),
    ParamSpec::new("release", 0.25, 0.0, 1.0),
    ParamSpec::new("threshold", -24.0, -100.0, 0.0),
];

const GAIN_PARAMS: &[ParamSpec] = &[ParamSpec::new("gain", 1.0, 0.0, 10.0)];

const OSCILLATOR_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("detune", 0.0, -1200.0, 1200.0),
    ParamSpec::new("frequency", 440.0, 20.0, 20000.0),
];

const PANNER_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("orientationx", 1.0, -100.0, 100.0),
    ParamSpec::new("orientationy", 0.0, -100.0, 100.0),
    ParamSpec::new("orientationz", 0.0, -100.0, 100.0),
    ParamSpec::new("positionx", 0.0, -100.0, 100.0),
    ParamSpec::new("positiony", 0.0, -100.0, 100.0),
    ParamSpec::new("positionz", 0.0, -100.0, 100.0),
];

const STEREO_PANNER_PARAMS: &[ParamSpec] = &[ParamSpec::new("pan", 0.0, -1.0, 1.0)];

impl NodeKind {
    /// Every kind, in menu display order.
    pub fn all() -> &'static [NodeKind] {
        &[
            NodeKind::Oscillator,
            NodeKind::Gain,
            NodeKind::BiquadFilter,
            NodeKind::Delay,
            NodeKind::DynamicsCompressor,
            NodeKind::Constant,
            NodeKind::Panner,
            NodeKind::StereoPanner,
            NodeKind::WaveShaper,
            NodeKind::Convolver,
            NodeKind::Analyser,
            NodeKind::Keyboard,
            NodeKind::Destination,
        ]
    }

    /// Stable string tag used in snapshots.
    pub fn as_tag(&self) -> &'static str {
        match self {
            NodeKind::Keyboard => "keyboard",
            NodeKind::Analyser => "analyser",
            NodeKind::BiquadFilter => "biquadfilter",
            NodeKind::Constant => "constant",
            NodeKind::Convolver => "convolver",
            NodeKind::Delay => "delay",
            NodeKind::DynamicsCompressor => "dynamicscompressor",
            NodeKind::Gain => "gain",
            NodeKind::Oscillator => "oscillator",
            NodeKind::Panner => "panner",
            NodeKind::StereoPanner => "stereopanner",
            NodeKind::WaveShaper => "waveshaper",
            NodeKind::Destination => "destination",
        }
    }

    /// Parses a snapshot tag back into a kind.
    pub fn from_tag(tag: &str) -> Option<NodeKind> {
        NodeKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_tag() == tag)
    }

    /// Human-readable name shown in menus and as the default node label.
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeKind::Keyboard => "Keyboard",
            NodeKind::Analyser => "Analyser",
            NodeKind::BiquadFilter => "Biquad Filter",
            NodeKind::Constant => "Constant",
            NodeKind::Convolver => "Convolver",
            NodeKind::Delay => "Delay",
            NodeKind::DynamicsCompressor => "Compressor",
            NodeKind::Gain => "Gain",
            NodeKind::Oscillator => "Oscillator",
            NodeKind::Panner => "Panner",
            NodeKind::StereoPanner => "Stereo Panner",
            NodeKind::WaveShaper => "Wave Shaper",
            NodeKind::Destination => "Destination",
        }
    }

    /// The parameter-spec list this kind exposes. May be empty.
    pub fn param_specs(&self) -> &'static [ParamSpec] {
        match self {
            NodeKind::BiquadFilter => BIQUAD_PARAMS,
            NodeKind::Constant => CONSTANT_PARAMS,
            NodeKind::Delay => DELAY_PARAMS,
            NodeKind::DynamicsCompressor => COMPRESSOR_PARAMS,
            NodeKind::Gain => GAIN_PARAMS,
            NodeKind::Oscillator => OSCILLATOR_PARAMS,
            NodeKind::Panner => PANNER_PARAMS,
            NodeKind::StereoPanner => STEREO_PANNER_PARAMS,
            NodeKind::Keyboard
            | NodeKind::Analyser
            | NodeKind::Convolver
            | NodeKind::WaveShaper
            | NodeKind::Destination => &[],
        }
    }
}
