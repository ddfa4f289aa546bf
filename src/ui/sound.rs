/// Sound engine: procedural 8-bit style audio via rodio.
///
/// All sounds are generated as in-memory WAV buffers at init time.
/// Effects are fire-and-forget via detached Sinks; the background theme
/// holds its Sink so it can loop until game over stops it.
///
/// Compile with `--no-default-features` or without the "sound" feature
/// to disable audio entirely (the stub SoundEngine does nothing).

#[cfg(feature = "sound")]
mod inner {
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

    const SAMPLE_RATE: u32 = 22050;

    /// Pre-generated WAV buffers for each cue.
    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        music: RefCell<Option<Sink>>,
        theme: Arc<Vec<u8>>,
        sfx_pickup: Arc<Vec<u8>>,
        sfx_life_lost: Arc<Vec<u8>>,
        sfx_level_clear: Arc<Vec<u8>>,
        sfx_game_over: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;

            Some(SoundEngine {
                _stream: stream,
                handle,
                music: RefCell::new(None),
                theme: Arc::new(make_wav(&gen_theme())),
                sfx_pickup: Arc::new(make_wav(&gen_pickup())),
                sfx_life_lost: Arc::new(make_wav(&gen_life_lost())),
                sfx_level_clear: Arc::new(make_wav(&gen_level_clear())),
                sfx_game_over: Arc::new(make_wav(&gen_game_over())),
            })
        }

        fn play(&self, buf: &Arc<Vec<u8>>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach(); // fire-and-forget
                }
            }
        }

        /// Loop the background theme. Replaces any theme already playing.
        pub fn start_theme(&self) {
            self.stop_theme();
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(self.theme.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src.repeat_infinite());
                    sink.set_volume(0.5);
                    *self.music.borrow_mut() = Some(sink);
                }
            }
        }

        pub fn stop_theme(&self) {
            if let Some(sink) = self.music.borrow_mut().take() {
                sink.stop();
            }
        }

        pub fn play_pickup(&self) { self.play(&self.sfx_pickup); }
        pub fn play_life_lost(&self) { self.play(&self.sfx_life_lost); }
        pub fn play_level_clear(&self) { self.play(&self.sfx_level_clear); }
        pub fn play_game_over(&self) { self.play(&self.sfx_game_over); }
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators — all produce Vec<f32> mono samples
    // ════════════════════════════════════════════════════════════

    fn push_note(samples: &mut Vec<f32>, freq: f32, dur: f32, volume: f32) {
        let n = (SAMPLE_RATE as f32 * dur) as usize;
        for i in 0..n {
            let t = i as f32 / SAMPLE_RATE as f32;
            let env = 1.0 - (i as f32 / n as f32) * 0.4;
            // Square-ish wave (sine + 3rd harmonic) for retro feel
            let wave = (t * freq * 2.0 * std::f32::consts::PI).sin() * 0.7
                + (t * freq * 3.0 * 2.0 * std::f32::consts::PI).sin() * 0.3;
            samples.push(wave * env * volume);
        }
    }

    /// Background theme: a bouncy eight-note loop.
    fn gen_theme() -> Vec<f32> {
        let notes = [
            (523.0_f32, 0.14), // C5
            (659.0, 0.14),     // E5
            (784.0, 0.14),     // G5
            (659.0, 0.14),     // E5
            (587.0, 0.14),     // D5
            (698.0, 0.14),     // F5
            (784.0, 0.14),     // G5
            (523.0, 0.20),     // C5
        ];
        let mut samples = Vec::new();
        for &(freq, dur) in &notes {
            push_note(&mut samples, freq, dur, 0.18);
        }
        samples
    }

    /// Pickup: quick ascending arpeggio C6→E6→G6
    fn gen_pickup() -> Vec<f32> {
        let notes = [1047.0_f32, 1319.0, 1568.0];
        let mut samples = Vec::new();
        for &freq in &notes {
            push_note(&mut samples, freq, 0.04, 0.25);
        }
        samples
    }

    /// Life lost: sad descending tone
    fn gen_life_lost() -> Vec<f32> {
        let notes = [440.0_f32, 370.0, 311.0, 261.0]; // A4→F#4→Eb4→C4
        let mut samples = Vec::new();
        for &freq in &notes {
            push_note(&mut samples, freq, 0.12, 0.3);
        }
        samples
    }

    /// Level clear: ascending fanfare
    fn gen_level_clear() -> Vec<f32> {
        let notes = [523.0_f32, 659.0, 784.0, 1047.0]; // C5→E5→G5→C6
        let mut samples = Vec::new();
        for &freq in &notes {
            push_note(&mut samples, freq, 0.1, 0.3);
        }
        // Sustain the last note
        push_note(&mut samples, 1047.0, 0.25, 0.3);
        samples
    }

    /// Game over: long falling sweep
    fn gen_game_over() -> Vec<f32> {
        let duration = 0.9;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 500.0 - t * 380.0; // 500Hz → 120Hz
                let ti = i as f32 / SAMPLE_RATE as f32;
                let env = (1.0 - t).powf(0.7);
                (ti * freq * 2.0 * std::f32::consts::PI).sin() * env * 0.3
            })
            .collect()
    }

    // ════════════════════════════════════════════════════════════
    //  WAV encoder — wraps f32 samples into a valid WAV buffer
    // ════════════════════════════════════════════════════════════

    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let num_channels: u16 = 1;
        let bits_per_sample: u16 = 16;
        let byte_rate = SAMPLE_RATE * (num_channels as u32) * (bits_per_sample as u32) / 8;
        let block_align = num_channels * bits_per_sample / 8;
        let data_size = samples.len() as u32 * 2; // 16-bit = 2 bytes per sample
        let file_size = 36 + data_size;

        let mut buf = Vec::with_capacity(44 + data_size as usize);

        // RIFF header
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&file_size.to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        // fmt chunk
        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
        buf.extend_from_slice(&num_channels.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&bits_per_sample.to_le_bytes());

        // data chunk
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());

        for &s in samples {
            let clamped = s.max(-1.0).min(1.0);
            let val = (clamped * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }

        buf
    }
}

// ════════════════════════════════════════════════════════════
//  Public API — compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> {
        Some(SoundEngine)
    }
    pub fn start_theme(&self) {}
    pub fn stop_theme(&self) {}
    pub fn play_pickup(&self) {}
    pub fn play_life_lost(&self) {}
    pub fn play_level_clear(&self) {}
    pub fn play_game_over(&self) {}
}
