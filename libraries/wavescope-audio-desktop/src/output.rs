//! cpal playback sink (audio thread owns the stream)
use crate::device::{self, NegotiatedOutput, OutputFormat};
use crate::error::{DeviceError, Result};
use crate::volume::Volume;
use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{Device, FromSample, SizedSample, Stream};
use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender, TryRecvError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use wavescope_core::{PlaybackSink, StreamDescriptor};

/// Chunks the pipeline may run ahead of the device
pub const DEFAULT_QUEUE_DEPTH: usize = 2;

/// Poll interval while waiting for queued audio to play out
const DRAIN_POLL: Duration = Duration::from_millis(5);

/// Divisor taking device samples to [-1.0, 1.0)
const I16_FULL_SCALE: f32 = 32_768.0;

/// Slack added to the expected drain time before giving up
const DRAIN_SLACK: Duration = Duration::from_millis(500);

/// Commands sent to the audio thread
enum AudioCommand {
    /// Drop the stream and exit
    Shutdown,
}

/// Sample feed consumed by the device callback
///
/// Holds the chunk being played and pulls the next one from the queue when it
/// runs out. An empty queue plays silence.
struct Playout {
    queue: Receiver<Vec<i16>>,
    current: Vec<i16>,
    position: usize,
    gain: f32,
    pending: Arc<AtomicUsize>,
}

impl Playout {
    fn new(queue: Receiver<Vec<i16>>, gain: f32, pending: Arc<AtomicUsize>) -> Self {
        Self {
            queue,
            current: Vec::new(),
            position: 0,
            gain,
            pending,
        }
    }

    /// Fill a device buffer (runs in the real-time callback)
    fn fill<T>(&mut self, output: &mut [T])
    where
        T: SizedSample + FromSample<f32>,
    {
        let mut consumed = 0;
        for out in output.iter_mut() {
            if self.position >= self.current.len() && !self.advance() {
                *out = T::EQUILIBRIUM;
                continue;
            }
            let sample = f32::from(self.current[self.position]) / I16_FULL_SCALE * self.gain;
            *out = T::from_sample(sample);
            self.position += 1;
            consumed += 1;
        }
        if consumed > 0 {
            self.pending.fetch_sub(consumed, Ordering::AcqRel);
        }
    }

    // Load the next queued chunk; false when none is waiting
    fn advance(&mut self) -> bool {
        match self.queue.try_recv() {
            Ok(chunk) => {
                self.current = chunk;
                self.position = 0;
                !self.current.is_empty()
            }
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => false,
        }
    }
}

/// Stream errors forwarded from the device's error callback
///
/// The first error is latched; every later check reports it again.
struct FailureWatch {
    rx: Receiver<String>,
    failure: Option<String>,
}

impl FailureWatch {
    fn new(rx: Receiver<String>) -> Self {
        Self { rx, failure: None }
    }

    fn check(&mut self) -> Result<()> {
        if self.failure.is_none() {
            self.failure = self.rx.try_recv().ok();
        }
        match &self.failure {
            Some(message) => Err(DeviceError::Stream(message.clone())),
            None => Ok(()),
        }
    }
}

/// Queue one chunk for the device, blocking while the queue is full
///
/// `pending` is raised by the chunk's sample count up front and lowered again
/// if the chunk never makes it onto the queue. Between attempts, spaced
/// `poll` apart, the device is checked for failures.
fn send_paced(
    data_tx: &Sender<Vec<i16>>,
    mut samples: Vec<i16>,
    poll: Duration,
    failures: &mut FailureWatch,
    pending: &AtomicUsize,
) -> Result<()> {
    let count = samples.len();
    pending.fetch_add(count, Ordering::AcqRel);
    loop {
        match data_tx.send_timeout(samples, poll) {
            Ok(()) => return Ok(()),
            Err(SendTimeoutError::Timeout(unsent)) => {
                samples = unsent;
                if let Err(e) = failures.check() {
                    pending.fetch_sub(count, Ordering::AcqRel);
                    return Err(e);
                }
            }
            Err(SendTimeoutError::Disconnected(_)) => {
                pending.fetch_sub(count, Ordering::AcqRel);
                return Err(DeviceError::Thread("audio callback is gone".to_string()));
            }
        }
    }
}

/// Playback sink writing to the default cpal output device
///
/// **Architecture**: a dedicated audio thread owns the cpal `Stream`, which is
/// not `Send` on every platform. Chunks travel to the device callback through
/// a bounded channel; `write` blocks while the channel is full, which paces
/// the caller to the device's playback rate.
pub struct CpalSink {
    output: NegotiatedOutput,
    chunk_duration: Duration,
    queue_depth: usize,
    data_tx: Option<Sender<Vec<i16>>>,
    command_tx: Sender<AudioCommand>,
    failures: FailureWatch,
    pending: Arc<AtomicUsize>,
    audio_thread: Option<JoinHandle<()>>,
}

impl CpalSink {
    /// Open the default output device for `descriptor`
    ///
    /// # Errors
    /// Returns an error if there is no device, no matching configuration, or
    /// the stream cannot be built and started
    pub fn open(descriptor: &StreamDescriptor, volume: Volume, queue_depth: usize) -> Result<Self> {
        if queue_depth == 0 {
            return Err(DeviceError::InvalidQueueDepth(queue_depth));
        }

        let (data_tx, data_rx) = bounded::<Vec<i16>>(queue_depth);
        let (command_tx, command_rx) = bounded::<AudioCommand>(1);
        let (ready_tx, ready_rx) = bounded::<Result<NegotiatedOutput>>(1);
        let (failure_tx, failure_rx) = bounded::<String>(1);
        let pending = Arc::new(AtomicUsize::new(0));

        let playout = Playout::new(data_rx, volume.gain(), Arc::clone(&pending));
        let descriptor_for_thread = *descriptor;
        let audio_thread = thread::Builder::new()
            .name("wavescope-audio".to_string())
            .spawn(move || {
                Self::audio_thread_run(
                    descriptor_for_thread,
                    playout,
                    ready_tx,
                    failure_tx,
                    command_rx,
                );
            })
            .map_err(|e| DeviceError::Thread(e.to_string()))?;

        let output = ready_rx
            .recv()
            .map_err(|_| DeviceError::Thread("audio thread exited during setup".to_string()))??;

        tracing::info!(
            "Audio output opened: {} at volume {} ({:.1} dB)",
            output,
            volume.level(),
            volume.to_db()
        );

        Ok(Self {
            output,
            chunk_duration: Duration::from_secs(1) / wavescope_core::CHUNKS_PER_SECOND,
            queue_depth,
            data_tx: Some(data_tx),
            command_tx,
            failures: FailureWatch::new(failure_rx),
            pending,
            audio_thread: Some(audio_thread),
        })
    }

    /// Configuration the device is running with
    pub fn output(&self) -> &NegotiatedOutput {
        &self.output
    }

    /// Audio thread main loop
    ///
    /// Opens the device, reports the outcome, then holds the stream until
    /// told to shut down or the sink is dropped.
    fn audio_thread_run(
        descriptor: StreamDescriptor,
        playout: Playout,
        ready_tx: Sender<Result<NegotiatedOutput>>,
        failure_tx: Sender<String>,
        command_rx: Receiver<AudioCommand>,
    ) {
        let stream = match Self::start_stream(&descriptor, playout, failure_tx) {
            Ok((stream, output)) => {
                let _ = ready_tx.send(Ok(output));
                stream
            }
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return;
            }
        };

        // Shutdown command or sink dropped
        let _ = command_rx.recv();
        drop(stream);
        tracing::debug!("Audio thread stopped");
    }

    fn start_stream(
        descriptor: &StreamDescriptor,
        playout: Playout,
        failure_tx: Sender<String>,
    ) -> Result<(Stream, NegotiatedOutput)> {
        let device = device::default_output_device()?;
        let output = device::negotiate(&device, descriptor)?;

        let stream = match output.format {
            OutputFormat::I16 => Self::build_stream::<i16>(&device, &output, playout, failure_tx)?,
            OutputFormat::F32 => Self::build_stream::<f32>(&device, &output, playout, failure_tx)?,
        };
        stream.play()?;
        Ok((stream, output))
    }

    fn build_stream<T>(
        device: &Device,
        output: &NegotiatedOutput,
        mut playout: Playout,
        failure_tx: Sender<String>,
    ) -> std::result::Result<Stream, cpal::BuildStreamError>
    where
        T: SizedSample + FromSample<f32>,
    {
        device.build_output_stream(
            &output.stream_config(),
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| playout.fill(data),
            move |err| {
                tracing::warn!("Audio stream error: {}", err);
                let _ = failure_tx.try_send(err.to_string());
            },
            None,
        )
    }

    /// Decode little-endian 16-bit samples
    fn decode(bytes: &[u8]) -> Vec<i16> {
        bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect()
    }
}

impl PlaybackSink for CpalSink {
    fn write(&mut self, bytes: &[u8]) -> wavescope_core::Result<usize> {
        self.failures.check()?;

        let samples = Self::decode(bytes);
        let accepted = samples.len() * 2;
        let data_tx = self
            .data_tx
            .as_ref()
            .ok_or_else(|| DeviceError::Thread("audio output already finished".to_string()))?;

        send_paced(
            data_tx,
            samples,
            self.chunk_duration,
            &mut self.failures,
            &self.pending,
        )?;
        Ok(accepted)
    }

    fn finish(&mut self) -> wavescope_core::Result<()> {
        // No more chunks; the callback keeps draining what is queued
        self.data_tx = None;

        let expected = self.chunk_duration * (self.queue_depth as u32 + 1);
        let deadline = Instant::now() + expected + DRAIN_SLACK;
        while self.pending.load(Ordering::Acquire) > 0 {
            self.failures.check()?;
            if Instant::now() >= deadline {
                tracing::warn!(
                    "Gave up waiting for {} queued samples to play",
                    self.pending.load(Ordering::Acquire)
                );
                break;
            }
            thread::sleep(DRAIN_POLL);
        }
        Ok(())
    }
}

impl Drop for CpalSink {
    fn drop(&mut self) {
        self.data_tx = None;
        let _ = self.command_tx.send(AudioCommand::Shutdown);
        if let Some(handle) = self.audio_thread.take() {
            let _ = handle.join();
        }
    }
}
