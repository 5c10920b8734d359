//! Fake ports for exercising the core without a desktop

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::application::ports::{
    DeferredTask, FontSpec, KeyStatePort, OverlayCloser, OverlayNotifier, OverlaySpec,
    OverlaySurface, Scheduler, TextExtent, ThreadId, WindowPort,
};
use crate::domain::entities::OverlayId;
use crate::domain::errors::QuickSwitchError;
use crate::domain::value_objects::{ModifierKey, WindowRef};

struct FakeWindow {
    title: String,
    thread: ThreadId,
    minimized: bool,
}

#[derive(Default)]
struct DesktopState {
    windows: BTreeMap<isize, FakeWindow>,
    foreground: Option<WindowRef>,
    held: HashSet<ModifierKey>,
    current_thread: ThreadId,
    attached: Vec<(ThreadId, ThreadId)>,
    attach_calls: Vec<(ThreadId, ThreadId, bool)>,
    raised: Vec<WindowRef>,
    foreground_requests: Vec<WindowRef>,
    refuse_foreground: bool,
}

/// In-memory desktop implementing the window and key-state ports
#[derive(Clone)]
pub struct FakeDesktop {
    state: Rc<RefCell<DesktopState>>,
}

impl FakeDesktop {
    pub fn new() -> Self {
        let state = DesktopState {
            current_thread: 1,
            ..Default::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn open_window(&self, raw: isize, title: &str, thread: ThreadId) -> WindowRef {
        let window = WindowRef::new(raw).expect("fake windows are never null");
        self.state.borrow_mut().windows.insert(
            raw,
            FakeWindow {
                title: title.to_string(),
                thread,
                minimized: false,
            },
        );
        window
    }

    pub fn close_window(&self, window: WindowRef) {
        let mut state = self.state.borrow_mut();
        state.windows.remove(&window.raw());
        if state.foreground == Some(window) {
            state.foreground = None;
        }
    }

    pub fn focus(&self, window: WindowRef) {
        self.state.borrow_mut().foreground = Some(window);
    }

    pub fn minimize(&self, window: WindowRef) {
        if let Some(w) = self.state.borrow_mut().windows.get_mut(&window.raw()) {
            w.minimized = true;
        }
    }

    pub fn hold(&self, keys: &[ModifierKey]) {
        self.state.borrow_mut().held = keys.iter().copied().collect();
    }

    pub fn set_current_thread(&self, thread: ThreadId) {
        self.state.borrow_mut().current_thread = thread;
    }

    pub fn set_refuse_foreground(&self, refuse: bool) {
        self.state.borrow_mut().refuse_foreground = refuse;
    }

    pub fn foreground(&self) -> Option<WindowRef> {
        self.state.borrow().foreground
    }

    pub fn is_minimized_window(&self, window: WindowRef) -> bool {
        self.state
            .borrow()
            .windows
            .get(&window.raw())
            .map_or(false, |w| w.minimized)
    }

    pub fn attach_calls(&self) -> Vec<(ThreadId, ThreadId, bool)> {
        self.state.borrow().attach_calls.clone()
    }

    pub fn is_attached(&self) -> bool {
        !self.state.borrow().attached.is_empty()
    }

    pub fn raised(&self) -> Vec<WindowRef> {
        self.state.borrow().raised.clone()
    }

    pub fn foreground_requests(&self) -> Vec<WindowRef> {
        self.state.borrow().foreground_requests.clone()
    }
}

impl WindowPort for FakeDesktop {
    fn foreground_window(&self) -> Option<WindowRef> {
        self.state.borrow().foreground
    }

    fn is_window(&self, window: WindowRef) -> bool {
        self.state.borrow().windows.contains_key(&window.raw())
    }

    fn is_minimized(&self, window: WindowRef) -> bool {
        self.is_minimized_window(window)
    }

    fn restore(&self, window: WindowRef) {
        if let Some(w) = self.state.borrow_mut().windows.get_mut(&window.raw()) {
            w.minimized = false;
        }
    }

    fn window_thread(&self, window: Option<WindowRef>) -> ThreadId {
        let state = self.state.borrow();
        window
            .and_then(|w| state.windows.get(&w.raw()))
            .map_or(0, |w| w.thread)
    }

    fn current_thread(&self) -> ThreadId {
        self.state.borrow().current_thread
    }

    fn attach_thread_input(&self, from: ThreadId, to: ThreadId, attach: bool) -> bool {
        let mut state = self.state.borrow_mut();
        state.attach_calls.push((from, to, attach));
        if attach {
            state.attached.push((from, to));
        } else {
            state.attached.retain(|&pair| pair != (from, to));
        }
        true
    }

    fn bring_to_top(&self, window: WindowRef) -> bool {
        self.state.borrow_mut().raised.push(window);
        true
    }

    fn set_foreground(&self, window: WindowRef) -> bool {
        let mut state = self.state.borrow_mut();
        state.foreground_requests.push(window);
        if state.refuse_foreground {
            return false;
        }
        state.foreground = Some(window);
        true
    }

    fn window_text(&self, window: WindowRef) -> Option<String> {
        self.state
            .borrow()
            .windows
            .get(&window.raw())
            .map(|w| w.title.clone())
    }
}

impl KeyStatePort for FakeDesktop {
    fn is_down(&self, key: ModifierKey) -> bool {
        self.state.borrow().held.contains(&key)
    }
}

#[derive(Default)]
struct SurfaceState {
    next_id: isize,
    created: Vec<OverlaySpec>,
    live: Vec<OverlayId>,
    destroyed: Vec<OverlayId>,
    fail_create: bool,
}

/// Overlay surface that records windows instead of drawing them
#[derive(Clone)]
pub struct FakeSurface {
    state: Rc<RefCell<SurfaceState>>,
    close_requests: Arc<Mutex<Vec<OverlayId>>>,
}

impl FakeSurface {
    /// Each character is 10px wide, lines are as tall as the font size
    pub fn new() -> Self {
        let state = SurfaceState {
            next_id: 0x9000,
            ..Default::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
            close_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.state.borrow_mut().fail_create = fail;
    }

    pub fn created(&self) -> Vec<OverlaySpec> {
        self.state.borrow().created.clone()
    }

    pub fn live_windows(&self) -> Vec<OverlayId> {
        self.state.borrow().live.clone()
    }

    pub fn destroyed(&self) -> Vec<OverlayId> {
        self.state.borrow().destroyed.clone()
    }

    pub fn close_requests(&self) -> Vec<OverlayId> {
        self.close_requests.lock().clone()
    }
}

/// Records close requests instead of posting them
pub struct RecordingCloser {
    requests: Arc<Mutex<Vec<OverlayId>>>,
}

impl OverlayCloser for RecordingCloser {
    fn request_close(&self, id: OverlayId) {
        self.requests.lock().push(id);
    }
}

impl OverlaySurface for FakeSurface {
    type Closer = RecordingCloser;

    fn measure_text(&self, text: &str, font: &FontSpec) -> Result<TextExtent, QuickSwitchError> {
        Ok(TextExtent {
            width: 10 * text.chars().count() as i32,
            height: font.size,
        })
    }

    fn create(&self, spec: &OverlaySpec) -> Result<OverlayId, QuickSwitchError> {
        let mut state = self.state.borrow_mut();
        if state.fail_create {
            return Err(QuickSwitchError::WindowCreation("out of handles".into()));
        }
        state.next_id += 1;
        let id = OverlayId(state.next_id);
        state.created.push(spec.clone());
        state.live.push(id);
        Ok(id)
    }

    fn destroy(&self, id: OverlayId) {
        let mut state = self.state.borrow_mut();
        state.live.retain(|&live| live != id);
        state.destroyed.push(id);
    }

    fn closer(&self) -> RecordingCloser {
        RecordingCloser {
            requests: Arc::clone(&self.close_requests),
        }
    }
}

/// Scheduler that holds tasks until the test runs them
#[derive(Clone, Default)]
pub struct ManualScheduler {
    tasks: Rc<RefCell<Vec<(Duration, DeferredTask)>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.tasks.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    /// Run every pending task as if its deadline had passed
    pub fn run_all(&self) {
        let tasks: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
        for (_, task) in tasks {
            task();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask) {
        self.tasks.borrow_mut().push((delay, task));
    }
}

/// Notifier that keeps every message
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl OverlayNotifier for RecordingNotifier {
    fn notify(&self, text: String) {
        self.messages.borrow_mut().push(text);
    }
}
