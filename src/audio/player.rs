//! rodio-backed audio output
//!
//! The whole episode is buffered in memory before the ready notification
//! fires, so playback never stalls on the network once it starts. Each load
//! gets a fresh `Sink` on the same output stream; the previous buffering task
//! is aborted. The buffered bytes are kept so a drained episode can be
//! queued again.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use tokio::task::JoinHandle;

use super::engine::AudioBackend;
use super::events::ReadyNotifier;

/// Audio backend playing through the default output device
pub struct RodioBackend {
    stream: OutputStream,
    sink: Arc<Sink>,
    client: reqwest::Client,
    loader: Option<JoinHandle<()>>,
    /// Bytes of the current resource, filled by its loader
    buffered: Arc<Mutex<Option<Arc<[u8]>>>>,
    volume: f32,
}

impl RodioBackend {
    /// Open the default output device
    pub fn open_default(volume: f32) -> Result<Self, String> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| format!("Failed to create audio output: {}", e))?;
        stream.log_on_drop(false);

        let volume = volume.clamp(0.0, 1.0);
        let sink = Sink::connect_new(stream.mixer());
        sink.pause();
        sink.set_volume(volume);

        Ok(Self {
            stream,
            sink: Arc::new(sink),
            client: reqwest::Client::new(),
            loader: None,
            buffered: Arc::new(Mutex::new(None)),
            volume,
        })
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        if let Some(loader) = self.loader.take() {
            loader.abort();
        }
        self.sink.stop();
    }
}

impl AudioBackend for RodioBackend {
    fn load(&mut self, source: &str, notifier: ReadyNotifier) {
        if let Some(loader) = self.loader.take() {
            loader.abort();
        }
        self.sink.stop();

        let sink = Arc::new(Sink::connect_new(self.stream.mixer()));
        sink.pause();
        sink.set_volume(self.volume);
        self.sink = sink.clone();

        // A fresh slot per load so an aborted loader can't fill the new one
        let buffered = Arc::new(Mutex::new(None));
        self.buffered = buffered.clone();

        let client = self.client.clone();
        let source = source.to_string();
        self.loader = Some(tokio::spawn(async move {
            let bytes = match fetch_media(&client, &source).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::error!("Failed to fetch {}: {}", source, e);
                    notifier.failed(e);
                    return;
                }
            };

            tracing::debug!("Buffered {} bytes from {}", bytes.len(), source);
            let bytes: Arc<[u8]> = bytes.into();
            match decode(bytes.clone()) {
                Ok(decoder) => {
                    *buffered.lock() = Some(bytes);
                    sink.append(decoder);
                    notifier.ready();
                }
                Err(error) => {
                    tracing::error!("{}: {}", source, error);
                    notifier.failed(error);
                }
            }
        }));
    }

    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn seek(&mut self, position: Duration) -> Result<(), String> {
        self.sink
            .try_seek(position)
            .map_err(|e| format!("Seek failed: {}", e))
    }

    fn is_drained(&self) -> bool {
        self.sink.empty()
    }

    fn rewind(&mut self, position: Duration) -> Result<(), String> {
        let bytes = self
            .buffered
            .lock()
            .clone()
            .ok_or_else(|| "Nothing buffered to replay".to_string())?;

        self.sink.pause();
        self.sink.append(decode(bytes)?);
        if !position.is_zero() {
            self.seek(position)?;
        }
        Ok(())
    }
}

fn decode(bytes: Arc<[u8]>) -> Result<Decoder<Cursor<Arc<[u8]>>>, String> {
    let byte_len = bytes.len() as u64;
    Decoder::builder()
        .with_data(Cursor::new(bytes))
        .with_byte_len(byte_len)
        .with_seekable(true)
        .build()
        .map_err(|e| format!("Failed to decode audio: {}", e))
}

/// Read the whole resource, from the network or a local path
async fn fetch_media(client: &reqwest::Client, source: &str) -> Result<Vec<u8>, String> {
    if is_remote(source) {
        let response = client
            .get(source)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| format!("Request failed: {}", e))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| format!("Download interrupted: {}", e))?;
        Ok(bytes.to_vec())
    } else {
        tokio::fs::read(source)
            .await
            .map_err(|e| format!("Failed to open file: {}", e))
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
