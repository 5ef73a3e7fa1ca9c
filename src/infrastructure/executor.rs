//! Runs the effects the controller asks for.
//!
//! Slow work (file reads, HTTP requests) goes to short-lived worker threads
//! which report back over a channel. The event loop collects those reports,
//! together with any due timers, through [`EffectExecutor::poll_ready`].

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::clipboard::ClipboardSink;
use super::file_reader::ImageReader;
use super::recognition::RecognitionService;
use super::timers::Timers;
use crate::application::{Effect, Event};

/// Longest the event loop waits for terminal input before checking workers.
pub const IDLE_POLL: Duration = Duration::from_millis(100);

pub struct EffectExecutor<S, C> {
    service: Arc<S>,
    clipboard: C,
    sender: Sender<Event>,
    receiver: Receiver<Event>,
    timers: Timers,
}

impl<S, C> EffectExecutor<S, C>
where
    S: RecognitionService + 'static,
    C: ClipboardSink,
{
    pub fn new(service: S, clipboard: C) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            service: Arc::new(service),
            clipboard,
            sender,
            receiver,
            timers: Timers::new(),
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>, now: Instant) {
        for effect in effects {
            self.apply(effect, now);
        }
    }

    fn apply(&mut self, effect: Effect, now: Instant) {
        match effect {
            Effect::ReadFile { ticket, path } => {
                let sender = self.sender.clone();
                thread::spawn(move || {
                    let result = ImageReader::read_selected(&path);
                    let _ = sender.send(Event::FileRead { ticket, result });
                });
            }
            Effect::Dispatch(file) => {
                let sender = self.sender.clone();
                let service = Arc::clone(&self.service);
                thread::spawn(move || {
                    let outcome = service.predict(&file);
                    let _ = sender.send(Event::RecognitionSettled(outcome));
                });
            }
            Effect::WriteClipboard(text) => {
                // The confirmation label is shown whether or not this works.
                if let Err(err) = self.clipboard.write_text(&text) {
                    warn!(error = %err, "clipboard write failed");
                }
            }
            Effect::Schedule { timer, after } => {
                debug!(?timer, ?after, "timer armed");
                self.timers.schedule(timer, now + after);
            }
            Effect::RequestHealth => {
                let sender = self.sender.clone();
                let service = Arc::clone(&self.service);
                thread::spawn(move || {
                    let _ = sender.send(Event::HealthChecked(service.health()));
                });
            }
        }
    }

    /// Completed work and due timers, in that order. Never blocks.
    pub fn poll_ready(&mut self, now: Instant) -> Vec<Event> {
        let mut events: Vec<Event> = self.receiver.try_iter().collect();
        events.extend(self.timers.due(now).into_iter().map(Event::TimerFired));
        events
    }

    /// How long the event loop may wait for input without missing a timer.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.timers
            .next_in(now)
            .map_or(IDLE_POLL, |next| next.min(IDLE_POLL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{App, TimerKind, COPIED_LABEL, COPY_LABEL, RECOGNIZE_LABEL};
    use crate::domain::{HealthStatus, PredictResponse, RecognizeError, RecognizeResult, SelectedFile};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockService {
        outcome: RecognizeResult<PredictResponse>,
        calls: Arc<AtomicUsize>,
    }

    impl RecognitionService for MockService {
        fn predict(&self, _file: &SelectedFile) -> RecognizeResult<PredictResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }

        fn health(&self) -> RecognizeResult<HealthStatus> {
            Ok(HealthStatus { status: "ok".into(), model_loaded: true })
        }
    }

    #[derive(Clone, Default)]
    struct MockClipboard {
        written: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl ClipboardSink for MockClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), String> {
            if self.fail {
                return Err("no display".into());
            }
            self.written.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn executor(
        outcome: RecognizeResult<PredictResponse>,
        clipboard: MockClipboard,
    ) -> (EffectExecutor<MockService, MockClipboard>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = MockService { outcome, calls: Arc::clone(&calls) };
        (EffectExecutor::new(service, clipboard), calls)
    }

    fn next_event(executor: &EffectExecutor<MockService, MockClipboard>) -> Event {
        executor.receiver.recv_timeout(Duration::from_secs(5)).unwrap()
    }

    fn app_with_file() -> App {
        let mut app = App::default();
        app.update(Event::FileChosen(PathBuf::from("/scans/a.png")));
        app.update(Event::FileRead {
            ticket: 0,
            result: Ok(crate::domain::LoadedFile {
                file: SelectedFile::new(PathBuf::from("/scans/a.png"), vec![1]),
                preview: crate::domain::Preview::Undecodable("test".into()),
            }),
        });
        app
    }

    #[test]
    fn test_dispatch_round_trip_success() {
        let (mut executor, calls) =
            executor(Ok(PredictResponse::recognized("HELLO")), MockClipboard::default());
        let mut app = app_with_file();

        let effects = app.update(Event::Recognize);
        executor.run(effects, Instant::now());
        assert_eq!(app.recognize_label, "Processing...");

        let event = next_event(&executor);
        app.update(event);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(app.result_visible);
        assert_eq!(app.result_text, "HELLO");
        assert_eq!(app.recognize_label, RECOGNIZE_LABEL);
        assert!(app.recognize_enabled());
    }

    #[test]
    fn test_dispatch_round_trip_network_error() {
        let (mut executor, _) = executor(
            Err(RecognizeError::Transport("connection reset".into())),
            MockClipboard::default(),
        );
        let mut app = app_with_file();

        let effects = app.update(Event::Recognize);
        executor.run(effects, Instant::now());
        let event = next_event(&executor);
        app.update(event);

        assert!(app.current_alert().unwrap().contains("connection reset"));
        assert!(app.recognize_enabled());
        assert_eq!(app.recognize_label, RECOGNIZE_LABEL);
    }

    #[test]
    fn test_no_dispatch_without_file() {
        let (mut executor, calls) =
            executor(Ok(PredictResponse::recognized("X")), MockClipboard::default());
        let mut app = App::default();

        let effects = app.update(Event::Recognize);
        executor.run(effects, Instant::now());
        assert!(executor.receiver.recv_timeout(Duration::from_millis(100)).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_read_file_reports_back() {
        let (mut executor, _) = executor(Ok(PredictResponse::recognized("X")), MockClipboard::default());
        executor.run(
            vec![Effect::ReadFile { ticket: 7, path: PathBuf::from("/definitely/not/here.png") }],
            Instant::now(),
        );
        match next_event(&executor) {
            Event::FileRead { ticket, result } => {
                assert_eq!(ticket, 7);
                assert!(result.is_err());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_health_check_reports_back() {
        let (mut executor, _) = executor(Ok(PredictResponse::recognized("X")), MockClipboard::default());
        executor.run(vec![Effect::RequestHealth], Instant::now());
        assert_eq!(
            next_event(&executor),
            Event::HealthChecked(Ok(HealthStatus { status: "ok".into(), model_loaded: true }))
        );
    }

    #[test]
    fn test_copy_writes_clipboard_and_reverts_after_last_click() {
        let clipboard = MockClipboard::default();
        let (mut executor, _) = executor(Ok(PredictResponse::recognized("HELLO")), clipboard.clone());
        let mut app = app_with_file();
        app.update(Event::Recognize);
        app.update(Event::RecognitionSettled(Ok(PredictResponse::recognized("HELLO"))));

        let start = Instant::now();
        executor.run(app.update(Event::Copy), start);
        assert_eq!(app.copy_label, COPIED_LABEL);

        let second = start + Duration::from_millis(500);
        executor.run(app.update(Event::Copy), second);
        assert_eq!(*clipboard.written.lock().unwrap(), vec!["HELLO", "HELLO"]);

        // The first click's deadline has passed, but the second replaced it.
        for event in executor.poll_ready(start + Duration::from_millis(2000)) {
            app.update(event);
        }
        assert_eq!(app.copy_label, COPIED_LABEL);

        let events = executor.poll_ready(second + Duration::from_millis(2000));
        assert_eq!(events, vec![Event::TimerFired(TimerKind::CopyRevert)]);
        for event in events {
            app.update(event);
        }
        assert_eq!(app.copy_label, COPY_LABEL);
    }

    #[test]
    fn test_clipboard_failure_keeps_confirmation() {
        let clipboard = MockClipboard { fail: true, ..MockClipboard::default() };
        let (mut executor, _) = executor(Ok(PredictResponse::recognized("HELLO")), clipboard.clone());
        let mut app = app_with_file();
        app.update(Event::Recognize);
        app.update(Event::RecognitionSettled(Ok(PredictResponse::recognized("HELLO"))));

        executor.run(app.update(Event::Copy), Instant::now());
        assert_eq!(app.copy_label, COPIED_LABEL);
        assert!(clipboard.written.lock().unwrap().is_empty());
        assert!(app.alerts.is_empty());
    }

    #[test]
    fn test_poll_timeout_tracks_timers() {
        let (mut executor, _) = executor(Ok(PredictResponse::recognized("X")), MockClipboard::default());
        let now = Instant::now();
        assert_eq!(executor.poll_timeout(now), IDLE_POLL);

        executor.run(
            vec![Effect::Schedule { timer: TimerKind::CopyRevert, after: Duration::from_millis(30) }],
            now,
        );
        assert_eq!(executor.poll_timeout(now), Duration::from_millis(30));
    }
}
