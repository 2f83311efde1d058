//! Looping background music.
//!
//! With the `audio` feature the track is decoded and played through rodio
//! (WAV, OGG Vorbis, MP3 and FLAC). Without it, playback requests still check
//! that the file exists and then report [`AssetError::AudioUnavailable`], which
//! callers treat like any other skipped asset.

use std::path::{Path, PathBuf};

use log::info;

use crate::error::AssetError;

#[cfg(feature = "audio")]
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

/// Background music player. Holds at most one looping track.
#[derive(Default)]
pub struct MusicPlayer {
    #[cfg(feature = "audio")]
    output: Option<(OutputStream, OutputStreamHandle)>,
    #[cfg(feature = "audio")]
    sink: Option<Sink>,
    current: Option<PathBuf>,
}

impl MusicPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The track currently looping, if any.
    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    /// Start looping `path`, replacing any previous track.
    pub fn play_looped(&mut self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AssetError::NotFound {
                path: path.to_path_buf(),
            });
        }

        self.start(path)?;
        info!("background music started: {}", path.display());
        self.current = Some(path.to_path_buf());
        Ok(())
    }

    pub fn stop(&mut self) {
        #[cfg(feature = "audio")]
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.current = None;
    }

    #[cfg(feature = "audio")]
    fn start(&mut self, path: &Path) -> Result<(), AssetError> {
        use std::fs::File;
        use std::io::BufReader;

        if self.output.is_none() {
            let output = OutputStream::try_default()
                .map_err(|e| AssetError::AudioUnavailable(e.to_string()))?;
            self.output = Some(output);
        }
        let handle = match &self.output {
            Some((_, handle)) => handle,
            None => return Err(AssetError::AudioUnavailable("no output stream".into())),
        };

        let file = File::open(path).map_err(|_| AssetError::NotFound {
            path: path.to_path_buf(),
        })?;
        let source = Decoder::new_looped(BufReader::new(file)).map_err(|e| {
            AssetError::UnsupportedFormat {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        let sink =
            Sink::try_new(handle).map_err(|e| AssetError::AudioUnavailable(e.to_string()))?;
        sink.append(source);

        if let Some(previous) = self.sink.replace(sink) {
            previous.stop();
        }
        Ok(())
    }

    #[cfg(not(feature = "audio"))]
    fn start(&mut self, _path: &Path) -> Result<(), AssetError> {
        Err(AssetError::AudioUnavailable(
            "built without the `audio` feature".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_track_is_not_found() {
        let mut player = MusicPlayer::new();
        let err = player.play_looped("no/such/track.ogg").unwrap_err();
        assert!(matches!(err, AssetError::NotFound { .. }));
        assert!(player.current().is_none());
    }

    #[test]
    fn test_undecodable_track_leaves_player_idle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track.mp3");
        std::fs::write(&path, b"id3 cover art and nothing else").unwrap();

        let mut player = MusicPlayer::new();
        // Either no audio device, no audio feature, or a decode failure.
        assert!(player.play_looped(&path).is_err());
        assert!(player.current().is_none());

        player.stop();
        assert!(player.current().is_none());
    }
}
