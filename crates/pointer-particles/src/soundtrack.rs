use std::io::Cursor;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rodio::source::Buffered;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use thiserror::Error;

/// The companion sound started while particles are being emitted.
pub trait Soundtrack {
    fn play(&mut self);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

#[derive(Error, Debug)]
pub enum SoundtrackError {
    #[error("failed to read audio asset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode audio asset: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    #[error("no audio output device: {0}")]
    Stream(#[from] rodio::StreamError),
}

type PreloadedSource = Buffered<Decoder<Cursor<Vec<u8>>>>;

/// Plays a decoded-once asset through the default output device.
pub struct RodioSoundtrack {
    // dropping the stream silences every sink created from it
    _stream: OutputStream,
    handle: OutputStreamHandle,
    source: PreloadedSource,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioSoundtrack {
    /// Reads and decodes the asset at `path`, then opens the default output
    /// device.
    ///
    /// # Errors
    ///
    /// [`SoundtrackError::Io`] if the file cannot be read,
    /// [`SoundtrackError::Decode`] if it is not a supported audio format and
    /// [`SoundtrackError::Stream`] if no output device is available.
    pub fn open(path: &Path, volume: f32) -> Result<Self, SoundtrackError> {
        let bytes = std::fs::read(path).map_err(|source| SoundtrackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(Cursor::new(bytes))?.buffered();
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            source,
            sink: None,
            volume,
        })
    }
}

impl Soundtrack for RodioSoundtrack {
    fn play(&mut self) {
        if self.is_playing() {
            return;
        }
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(self.volume);
                sink.append(self.source.clone());
                self.sink = Some(sink);
                debug!("soundtrack started");
            }
            Err(e) => warn!("could not start soundtrack: {e}"),
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
            debug!("soundtrack stopped");
        }
    }

    fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.empty())
    }
}

/// Stand-in used when there is no asset or no output device. Tracks
/// play/stop so the rest of the sketch behaves the same.
#[derive(Default)]
pub struct SilentSoundtrack {
    playing: bool,
}

impl Soundtrack for SilentSoundtrack {
    fn play(&mut self) {
        self.playing = true;
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

pub fn load_soundtrack(path: &Path, volume: f32) -> Box<dyn Soundtrack> {
    match RodioSoundtrack::open(path, volume) {
        Ok(track) => {
            info!("loaded soundtrack {}", path.display());
            Box::new(track)
        }
        Err(e) => {
            warn!("{e}; running without sound");
            Box::new(SilentSoundtrack::default())
        }
    }
}
