//! Sound playback records

/// Envelope point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundEnvelope {
    /// Position in 44 kHz samples
    pub pos44: u32,
    pub left_level: u16,
    pub right_level: u16,
}

/// Playback parameters for StartSound, StartSound2 and DefineButtonSound
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SoundInfo {
    pub sync_stop: bool,
    pub sync_no_multiple: bool,
    pub in_point: Option<u32>,
    pub out_point: Option<u32>,
    pub loop_count: Option<u16>,
    pub envelope: Option<Vec<SoundEnvelope>>,
}

/// Stream compression code that carries a latency seek field
pub const SOUND_COMPRESSION_MP3: u8 = 2;

/// Format fields shared by DefineSound and SoundStreamHead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SoundFormat {
    /// UB4 codec (0 raw, 1 ADPCM, 2 MP3, 3 raw LE, 4-6 Nellymoser, 11 Speex)
    pub compression: u8,
    /// UB2 rate (0 = 5.5 kHz ... 3 = 44 kHz)
    pub rate: u8,
    /// 16-bit samples when set
    pub is_16bit: bool,
    /// Stereo when set
    pub is_stereo: bool,
}
