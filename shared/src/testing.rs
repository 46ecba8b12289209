//! Fakes for the device, surface and transport seams.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::channel::oneshot;

use crate::classify::{ClassifyRequest, Transport, TransportResponse};
use crate::error::{ClassifyError, DeviceError};
use crate::model::{CameraFacing, FrameSize};
use crate::session::{CameraDevice, CameraStream, CaptureSession, VideoSurface};

pub type FakeSession = CaptureSession<FakeCamera, FakeSurface>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn jpeg_data_url(bytes: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes))
}

/// Collects results of spawned futures.
pub struct Outcomes<T = Result<(), DeviceError>>(Rc<RefCell<Vec<T>>>);

impl<T> Clone for Outcomes<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Default for Outcomes<T> {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }
}

impl<T> Outcomes<T> {
    pub fn push(&self, outcome: T) {
        self.0.borrow_mut().push(outcome);
    }

    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// Every stream the fake camera ever handed out, and which are still live.
#[derive(Clone, Default)]
pub struct Ledger(Rc<LedgerInner>);

#[derive(Default)]
struct LedgerInner {
    next_id: Cell<u64>,
    opened: Cell<usize>,
    peak: Cell<usize>,
    live: RefCell<Vec<(u64, CameraFacing)>>,
}

impl Ledger {
    fn open(&self, facing: CameraFacing) -> FakeStream {
        let id = self.0.next_id.get() + 1;
        self.0.next_id.set(id);
        self.0.opened.set(self.0.opened.get() + 1);

        let mut live = self.0.live.borrow_mut();
        live.push((id, facing));
        self.0.peak.set(self.0.peak.get().max(live.len()));

        FakeStream {
            id,
            ledger: self.clone(),
            stopped: Cell::new(false),
        }
    }

    fn close(&self, id: u64) {
        self.0.live.borrow_mut().retain(|(live_id, _)| *live_id != id);
    }

    pub fn live(&self) -> usize {
        self.0.live.borrow().len()
    }

    pub fn live_facings(&self) -> Vec<CameraFacing> {
        self.0.live.borrow().iter().map(|(_, facing)| *facing).collect()
    }

    pub fn opened(&self) -> usize {
        self.0.opened.get()
    }

    pub fn peak(&self) -> usize {
        self.0.peak.get()
    }

    pub fn last_opened(&self) -> Option<u64> {
        match self.0.next_id.get() {
            0 => None,
            id => Some(id),
        }
    }
}

pub struct FakeStream {
    id: u64,
    ledger: Ledger,
    stopped: Cell<bool>,
}

impl CameraStream for FakeStream {
    fn stop_tracks(&self) {
        if !self.stopped.replace(true) {
            self.ledger.close(self.id);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GrantMode {
    Immediate,
    Deny,
    Manual,
}

#[derive(Clone)]
pub struct FakeCamera {
    inner: Rc<CameraInner>,
}

struct CameraInner {
    mode: GrantMode,
    deny_next: Cell<bool>,
    pending: RefCell<Vec<oneshot::Sender<()>>>,
    ledger: Ledger,
}

impl FakeCamera {
    fn with_mode(mode: GrantMode) -> Self {
        Self {
            inner: Rc::new(CameraInner {
                mode,
                deny_next: Cell::new(false),
                pending: RefCell::new(Vec::new()),
                ledger: Ledger::default(),
            }),
        }
    }

    pub fn granting() -> Self {
        Self::with_mode(GrantMode::Immediate)
    }

    pub fn denying() -> Self {
        Self::with_mode(GrantMode::Deny)
    }

    /// Requests wait until granted by the test.
    pub fn manual() -> Self {
        Self::with_mode(GrantMode::Manual)
    }

    pub fn ledger(&self) -> Ledger {
        self.inner.ledger.clone()
    }

    pub fn deny_next(&self) {
        self.inner.deny_next.set(true);
    }

    pub fn pending(&self) -> usize {
        self.inner.pending.borrow().len()
    }

    pub fn grant_all(&self) {
        let senders: Vec<_> = self.inner.pending.borrow_mut().drain(..).collect();
        for sender in senders {
            let _ = sender.send(());
        }
    }

    pub fn grant_latest(&self) {
        let sender = self.inner.pending.borrow_mut().pop();
        if let Some(sender) = sender {
            let _ = sender.send(());
        }
    }
}

impl CameraDevice for FakeCamera {
    type Stream = FakeStream;

    async fn open(&self, facing: CameraFacing) -> Result<FakeStream, DeviceError> {
        if self.inner.deny_next.replace(false) || self.inner.mode == GrantMode::Deny {
            return Err(DeviceError::PermissionDenied("Permission denied".into()));
        }

        if self.inner.mode == GrantMode::Manual {
            let (sender, receiver) = oneshot::channel();
            self.inner.pending.borrow_mut().push(sender);
            if receiver.await.is_err() {
                return Err(DeviceError::Unavailable("request abandoned".into()));
            }
        }

        Ok(self.inner.ledger.open(facing))
    }
}

pub struct FakeSurface {
    mounted: bool,
    size: FrameSize,
    attached: Cell<Option<u64>>,
    rasterized: Cell<usize>,
    last_quality: Cell<Option<f64>>,
    last_size: Cell<Option<FrameSize>>,
}

impl FakeSurface {
    pub fn mounted(width: u32, height: u32) -> Self {
        Self {
            mounted: true,
            size: FrameSize::new(width, height),
            attached: Cell::new(None),
            rasterized: Cell::new(0),
            last_quality: Cell::new(None),
            last_size: Cell::new(None),
        }
    }

    pub fn unmounted() -> Self {
        Self {
            mounted: false,
            ..Self::mounted(0, 0)
        }
    }

    pub fn attached(&self) -> Option<u64> {
        self.attached.get()
    }

    pub fn rasterized(&self) -> usize {
        self.rasterized.get()
    }

    pub fn last_quality(&self) -> Option<f64> {
        self.last_quality.get()
    }

    pub fn last_size(&self) -> Option<FrameSize> {
        self.last_size.get()
    }
}

impl VideoSurface for FakeSurface {
    type Stream = FakeStream;

    fn attach(&self, stream: &FakeStream) -> Result<(), DeviceError> {
        if !self.mounted {
            return Err(DeviceError::SurfaceUnavailable);
        }
        self.attached.set(Some(stream.id));
        Ok(())
    }

    fn detach(&self) {
        self.attached.set(None);
    }

    fn frame_size(&self) -> FrameSize {
        self.size
    }

    fn rasterize(&self, size: FrameSize, quality: f64) -> Result<String, DeviceError> {
        self.rasterized.set(self.rasterized.get() + 1);
        self.last_quality.set(Some(quality));
        self.last_size.set(Some(size));
        Ok(jpeg_data_url(&[0xFF, 0xD8, 0xFF, 0xD9]))
    }
}

pub struct FakeTransport {
    reply: Result<TransportResponse, ClassifyError>,
    hold: bool,
    gates: RefCell<Vec<oneshot::Sender<()>>>,
    requests: RefCell<Vec<ClassifyRequest>>,
}

impl FakeTransport {
    fn new(reply: Result<TransportResponse, ClassifyError>, hold: bool) -> Self {
        Self {
            reply,
            hold,
            gates: RefCell::new(Vec::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn replying(status: u16, body: &str) -> Self {
        Self::new(
            Ok(TransportResponse {
                status,
                body: body.to_string(),
            }),
            false,
        )
    }

    /// Like `replying`, but each request waits for `release`.
    pub fn held(status: u16, body: &str) -> Self {
        Self {
            hold: true,
            ..Self::replying(status, body)
        }
    }

    pub fn failing(message: &str) -> Self {
        Self::new(Err(ClassifyError::Network(message.to_string())), false)
    }

    pub fn requests(&self) -> Vec<ClassifyRequest> {
        self.requests.borrow().clone()
    }

    pub fn release(&self) {
        let gates: Vec<_> = self.gates.borrow_mut().drain(..).collect();
        for gate in gates {
            let _ = gate.send(());
        }
    }
}

impl Transport for FakeTransport {
    async fn post(&self, request: ClassifyRequest) -> Result<TransportResponse, ClassifyError> {
        self.requests.borrow_mut().push(request);
        if self.hold {
            let (sender, receiver) = oneshot::channel();
            self.gates.borrow_mut().push(sender);
            let _ = receiver.await;
        }
        self.reply.clone()
    }
}
