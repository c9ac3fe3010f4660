//! Shared handle to the application service.
//!
//! The control thread and the HTTP server task both need the service.
//! [`SharedController`] puts it behind one `Arc<Mutex<_>>`; every tick,
//! command and status query takes the lock exactly once, so no reader can
//! see `desired_on` updated without the matching timer change.
//!
//! A panic while the lock is held poisons it.  The guard is recovered
//! rather than propagated: each mutation is a plain field write that
//! either happened or did not, so the state is still coherent and the
//! control loop must keep running.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::arbiter::Decision;
use crate::clock::Instant;
use crate::state::ControllerState;
use crate::status::Status;

use super::commands::{CommandOutcome, ControlRequest};
use super::ports::{ActuatorPort, EventSink, InputPort};
use super::service::AppService;

#[derive(Clone)]
pub struct SharedController {
    inner: Arc<Mutex<AppService>>,
}

impl SharedController {
    pub fn new(service: AppService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    /// One control cycle under the lock.
    pub fn tick(
        &self,
        now: Instant,
        hw: &mut (impl InputPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> Decision {
        self.lock().tick(now, hw, sink)
    }

    pub fn handle_command(
        &self,
        req: &ControlRequest,
        now: Instant,
        sink: &mut impl EventSink,
    ) -> CommandOutcome {
        self.lock().handle_command(req, now, sink)
    }

    pub fn status(&self, now: Instant) -> Status {
        self.lock().status(now)
    }

    /// Copy of the full state, taken under the lock.
    pub fn state(&self) -> ControllerState {
        self.lock().state().clone()
    }

    /// Run `f` with exclusive access to the service.
    pub fn with<R>(&self, f: impl FnOnce(&mut AppService) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, AppService> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
