//! Animation playback into a canvas.
//!
//! Two threads share the work. The calling thread paces: it hands each frame to a
//! bounded queue and then sleeps for the frame's delay. A scoped drawing thread takes
//! frames off the queue, composites them into the canvas and flushes. The queue holds at
//! most [`QUEUE_DEPTH`] frames, so a slow panel holds the pacing thread back instead of
//! frames piling up in memory.
//!
//! A [`CancelToken`] ends playback early, either explicitly or when its deadline passes.
//! Cancellation is checked between frames. A transfer already on the bus completes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, Weak};
use std::thread;
use std::time::{Duration, Instant};

use image::RgbaImage;

use crate::canvas::{Canvas, Panel};
use crate::error::{Error, Result};

/// Frames the pacing thread may run ahead of the drawing thread
pub const QUEUE_DEPTH: usize = 3;

/// Unit of [`Frame::delay`]
pub const DELAY_UNIT: Duration = Duration::from_millis(10);

/// One decoded animation frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// Pixels, drawn at the canvas origin
    pub image: RgbaImage,
    /// Time to show the frame, in 10 ms units
    pub delay: u16,
}

impl Frame {
    /// Frame shown for `delay * 10` ms
    pub fn new(image: RgbaImage, delay: u16) -> Self {
        Frame { image, delay }
    }

    /// Display time as a [`Duration`]
    pub fn duration(&self) -> Duration {
        DELAY_UNIT * u32::from(self.delay)
    }
}

impl From<image::Frame> for Frame {
    fn from(frame: image::Frame) -> Self {
        let (numer, denom) = frame.delay().numer_denom_ms();
        let millis = numer.checked_div(denom).unwrap_or(0);
        let delay = u16::try_from(millis / 10).unwrap_or(u16::MAX);
        Frame {
            image: frame.into_buffer(),
            delay,
        }
    }
}

/// Frames plus how often to repeat them
#[derive(Debug, Clone, Default)]
pub struct FrameSequence {
    /// Frames in display order
    pub frames: Vec<Frame>,
    /// Extra passes after the first. Negative repeats until cancelled, 0 plays once.
    pub loop_count: i32,
}

impl FrameSequence {
    /// Sequence from already converted frames
    pub fn new(frames: Vec<Frame>, loop_count: i32) -> Self {
        FrameSequence { frames, loop_count }
    }

    /// Sequence from decoder output, e.g. `GifDecoder::into_frames().collect_frames()?`
    pub fn from_image_frames<I>(frames: I, loop_count: i32) -> Self
    where
        I: IntoIterator<Item = image::Frame>,
    {
        Self::new(frames.into_iter().map(Frame::from).collect(), loop_count)
    }

    /// Time one pass takes when drawing keeps up
    pub fn pass_duration(&self) -> Duration {
        self.frames.iter().map(Frame::duration).sum()
    }
}

struct CancelState {
    cancelled: Mutex<bool>,
    wake: Condvar,
    deadline: Option<Instant>,
    children: Mutex<Vec<Weak<CancelState>>>,
}

impl CancelState {
    fn new(cancelled: bool, deadline: Option<Instant>) -> Self {
        CancelState {
            cancelled: Mutex::new(cancelled),
            wake: Condvar::new(),
            deadline,
            children: Mutex::new(Vec::new()),
        }
    }

    fn flag(&self) -> MutexGuard<'_, bool> {
        self.cancelled.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cancel(&self) {
        *self.flag() = true;
        self.wake.notify_all();

        let children = std::mem::take(&mut *self.children());
        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel();
        }
    }

    fn children(&self) -> MutexGuard<'_, Vec<Weak<CancelState>>> {
        self.children.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared stop signal with an optional deadline. Clones observe the same signal.
#[derive(Clone)]
pub struct CancelToken {
    state: Arc<CancelState>,
}

impl CancelToken {
    /// Token that only ends on [`CancelToken::cancel`]
    pub fn new() -> Self {
        Self::from_state(CancelState::new(false, None))
    }

    /// Token that also ends `timeout` from now
    pub fn with_deadline(timeout: Duration) -> Self {
        Self::from_state(CancelState::new(false, Some(Instant::now() + timeout)))
    }

    fn from_state(state: CancelState) -> Self {
        CancelToken {
            state: Arc::new(state),
        }
    }

    /// Token that is cancelled together with this one, and can also be cancelled on
    /// its own without affecting this one. It shares this token's deadline.
    pub fn child(&self) -> CancelToken {
        let mut children = self.state.children();
        children.retain(|child| child.strong_count() > 0);

        // A parent cancelled before registration is seen here; one cancelled after it
        // reaches the child through the list.
        let cancelled = *self.state.flag();
        let child = Self::from_state(CancelState::new(cancelled, self.state.deadline));
        children.push(Arc::downgrade(&child.state));
        child
    }

    /// Cancel now and wake every sleeper, children included
    pub fn cancel(&self) {
        self.state.cancel();
    }

    /// True after [`CancelToken::cancel`] or once the deadline has passed
    pub fn is_cancelled(&self) -> bool {
        *self.state.flag() || self.deadline_passed(Instant::now())
    }

    /// Sleep for `duration` unless cancelled first. Returns whether the token is
    /// cancelled.
    pub fn sleep(&self, duration: Duration) -> bool {
        let until = Instant::now() + duration;
        let mut cancelled = self.state.flag();
        loop {
            let now = Instant::now();
            if *cancelled || self.deadline_passed(now) {
                return true;
            }
            if now >= until {
                return false;
            }

            let wake_at = self.state.deadline.map_or(until, |deadline| deadline.min(until));
            let (guard, _) = self
                .state
                .wake
                .wait_timeout(cancelled, wake_at - now)
                .unwrap_or_else(PoisonError::into_inner);
            cancelled = guard;
        }
    }

    fn deadline_passed(&self, now: Instant) -> bool {
        self.state.deadline.is_some_and(|deadline| now >= deadline)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .field("deadline", &self.state.deadline)
            .finish()
    }
}

/// How playback ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Every pass was paced out
    Completed,
    /// The token was cancelled or its deadline passed
    Cancelled,
}

/// Counters collected during one [`play`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackReport {
    /// How playback ended
    pub outcome: PlaybackOutcome,
    /// Frames handed to the queue
    pub frames_queued: usize,
    /// Frames drawn and flushed
    pub frames_drawn: usize,
    /// Passes paced out completely
    pub passes: usize,
    /// Most frames seen handed over but not yet taken up by the drawer. At most
    /// [`QUEUE_DEPTH`] wait in the queue, plus one the drawer may be taking.
    pub max_queued: usize,
}

impl PlaybackReport {
    fn empty(outcome: PlaybackOutcome) -> Self {
        PlaybackReport {
            outcome,
            frames_queued: 0,
            frames_drawn: 0,
            passes: 0,
            max_queued: 0,
        }
    }
}

/// Play `sequence` into `canvas` until it completes or `token` is cancelled.
///
/// Returns only after the drawing thread has stopped, so the canvas is idle again.
/// Frames still queued when pacing ends are dropped. A drawing error stops playback and
/// is returned.
pub fn play<P>(
    canvas: &mut Canvas<'_, P>,
    sequence: &FrameSequence,
    token: &CancelToken,
) -> Result<PlaybackReport>
where
    P: Panel + Sync + ?Sized,
{
    if sequence.frames.is_empty() {
        log::info!("Nothing to play");
        return Ok(PlaybackReport::empty(PlaybackOutcome::Completed));
    }

    log::info!(
        "Playing {} frames, loop count {}, {:?} per pass",
        sequence.frames.len(),
        sequence.loop_count,
        sequence.pass_duration()
    );

    // Cancelled by the caller's token, by the drawer on a flush error, and by pacing
    // when it is done.
    let session = token.child();
    let received = AtomicUsize::new(0);

    let report = thread::scope(|s| -> Result<PlaybackReport> {
        let (tx, rx) = mpsc::sync_channel(QUEUE_DEPTH);
        let (drawer_session, received) = (session.clone(), &received);
        let drawer = s.spawn(move || draw_frames(canvas, rx, &drawer_session, received));

        let pacing = pace_frames(sequence, tx, &session, received, token);
        session.cancel();

        let frames_drawn = match drawer.join() {
            Ok(drawn) => drawn?,
            Err(_) => {
                log::error!("Drawing thread panicked");
                return Err(Error::DrawTaskPanicked);
            }
        };

        Ok(PlaybackReport {
            frames_drawn,
            ..pacing
        })
    })?;

    log::info!(
        "Playback {:?}: {} passes, {} of {} frames drawn",
        report.outcome,
        report.passes,
        report.frames_drawn,
        report.frames_queued
    );
    Ok(report)
}

fn pace_frames<'f>(
    sequence: &'f FrameSequence,
    frames: SyncSender<&'f Frame>,
    session: &CancelToken,
    received: &AtomicUsize,
    token: &CancelToken,
) -> PlaybackReport {
    let mut report = PlaybackReport::empty(PlaybackOutcome::Completed);
    let mut loops_left = sequence.loop_count;

    let interrupted = 'passes: loop {
        for frame in &sequence.frames {
            if session.is_cancelled() || frames.send(frame).is_err() {
                break 'passes true;
            }
            report.frames_queued += 1;

            // Counts a frame the drawer has taken but not yet recorded, so this can
            // read one above the queue capacity.
            let waiting = report
                .frames_queued
                .saturating_sub(received.load(Ordering::SeqCst));
            report.max_queued = report.max_queued.max(waiting);

            if session.sleep(frame.duration()) {
                break 'passes true;
            }
        }
        report.passes += 1;

        match loops_left {
            0 => break false,
            n if n > 0 => loops_left -= 1,
            _ => {}
        }
    };

    if interrupted && token.is_cancelled() {
        report.outcome = PlaybackOutcome::Cancelled;
    }
    report
}

fn draw_frames<P>(
    canvas: &mut Canvas<'_, P>,
    frames: Receiver<&Frame>,
    session: &CancelToken,
    received: &AtomicUsize,
) -> Result<usize>
where
    P: Panel + ?Sized,
{
    let mut drawn = 0;
    for frame in frames.iter() {
        received.fetch_add(1, Ordering::SeqCst);
        if session.is_cancelled() {
            break;
        }

        canvas.draw_image(&frame.image);
        if let Err(e) = canvas.flush() {
            log::error!("Frame {} could not be flushed: {}", drawn, e);
            session.cancel();
            return Err(e);
        }
        drawn += 1;
        log::debug!("Frame {} drawn", drawn);
    }
    Ok(drawn)
}
