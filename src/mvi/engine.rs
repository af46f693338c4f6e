//! Serialized event loop owning one screen's state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use super::effect::{EffectBus, EffectStream};
use super::event::Event;
use super::view_model::{Transition, ViewModel};

enum Command<Ev> {
    Event(Ev),
    Flush { respond_to: oneshot::Sender<()> },
}

/// Cloneable submission side of an [`Engine`].
///
/// Any number of callers may submit concurrently; the engine handles
/// events strictly one at a time in arrival order.
pub struct EngineHandle<Ev> {
    sender: mpsc::UnboundedSender<Command<Ev>>,
    pending: Arc<AtomicUsize>,
}

impl<Ev> Clone for EngineHandle<Ev> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<Ev: Event> EngineHandle<Ev> {
    /// Enqueue an event. Never blocks and never fails; after the engine
    /// stopped the event is dropped with a warning.
    pub fn set_event(&self, event: Ev) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.sender.send(Command::Event(event)).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            tracing::warn!("event dropped, engine is no longer running");
        }
    }

    /// Resolves once every event submitted before this call is committed.
    pub async fn flush(&self) {
        let (respond_to, receiver) = oneshot::channel();
        if self.sender.send(Command::Flush { respond_to }).is_err() {
            return;
        }
        if receiver.await.is_err() {
            tracing::trace!("flush abandoned, engine stopped");
        }
    }

    /// Number of events queued or in flight.
    pub fn pending_events(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }
}

/// Single-writer state container driving a [`ViewModel`].
///
/// The worker runs on the current tokio runtime. Dropping the engine
/// aborts the worker: a suspended transition is cancelled and the view
/// model, with every subscription it holds, is dropped.
///
/// Indices captured from a state snapshot are only meaningful for events
/// submitted before any other event that reshapes the same collection.
pub struct Engine<VM: ViewModel> {
    handle: EngineHandle<VM::Event>,
    state: watch::Receiver<VM::State>,
    effects: EffectBus<VM::Effect>,
    worker: JoinHandle<()>,
}

impl<VM: ViewModel> Engine<VM> {
    /// Start the event loop with `initial` as the first committed state.
    pub fn spawn(view_model: VM, initial: VM::State) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(initial);
        let effects = EffectBus::new();
        let pending = Arc::new(AtomicUsize::new(0));

        let worker = tokio::spawn(run(
            view_model,
            receiver,
            state_tx,
            effects.clone(),
            Arc::clone(&pending),
        ));

        Self {
            handle: EngineHandle { sender, pending },
            state: state_rx,
            effects,
            worker,
        }
    }

    pub fn set_event(&self, event: VM::Event) {
        self.handle.set_event(event);
    }

    /// Latest committed snapshot. Never blocks.
    pub fn current_state(&self) -> VM::State {
        self.state.borrow().clone()
    }

    /// Observer of committed states.
    pub fn states(&self) -> watch::Receiver<VM::State> {
        self.state.clone()
    }

    /// Attach an effect listener. Effects emitted earlier are not replayed.
    pub fn effects(&self) -> EffectStream<VM::Effect> {
        self.effects.subscribe()
    }

    pub fn handle(&self) -> EngineHandle<VM::Event> {
        self.handle.clone()
    }

    pub async fn flush(&self) {
        self.handle.flush().await;
    }

    pub fn pending_events(&self) -> usize {
        self.handle.pending_events()
    }

    pub fn is_running(&self) -> bool {
        !self.worker.is_finished()
    }

    /// Stop the worker and wait until the view model has been released.
    pub async fn shutdown(mut self) {
        self.worker.abort();
        if let Err(err) = (&mut self.worker).await {
            if !err.is_cancelled() {
                tracing::error!(error = %err, "engine worker failed");
            }
        }
    }
}

impl<VM: ViewModel> Drop for Engine<VM> {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn run<VM: ViewModel>(
    view_model: VM,
    mut receiver: mpsc::UnboundedReceiver<Command<VM::Event>>,
    state: watch::Sender<VM::State>,
    effects: EffectBus<VM::Effect>,
    pending: Arc<AtomicUsize>,
) {
    let _stopped = scopeguard::guard((), |_| tracing::debug!("engine worker stopped"));

    while let Some(command) = receiver.recv().await {
        match command {
            Command::Event(event) => {
                // Released on completion and on cancellation alike.
                let _in_flight = scopeguard::guard(Arc::clone(&pending), |pending| {
                    pending.fetch_sub(1, Ordering::SeqCst);
                });

                let current = state.borrow().clone();
                let Transition {
                    state: next,
                    effects: emitted,
                } = view_model.handle(event, current).await;

                state.send_if_modified(|committed| {
                    if *committed == next {
                        false
                    } else {
                        *committed = next;
                        true
                    }
                });

                for effect in emitted {
                    effects.emit(effect);
                }
            }
            Command::Flush { respond_to } => {
                if respond_to.send(()).is_err() {
                    tracing::trace!("flush response dropped (receiver gone)");
                }
            }
        }
    }
}
