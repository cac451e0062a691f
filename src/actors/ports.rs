//! Basic primitives for communicating with actors running as Tokio tasks.

use std::{fmt::Debug, result::Result};
use thiserror::Error;
use tokio::sync::{mpsc, mpsc::error::SendError, oneshot, watch};

/// The [oneshot::Receiver] on which the result of an operation invoked by a
/// [Request] is delivered.
type ResponseReceiver<R, E> = oneshot::Receiver<Result<R, E>>;

/// A request sent to an actor.
///
/// Carries a payload matching the payload type of the target [ActorPort] and
/// a [oneshot] sender on which the outcome of the operation is returned.
pub struct Request<P, R, E> {
    pub payload: P,
    pub response_sender: oneshot::Sender<Result<R, E>>,
}

impl<P, R, E> Request<P, R, E> {
    /// Creates a new [Request] wrapping the given payload, along with the
    /// [ResponseReceiver] on which its response will arrive.
    pub fn new(payload: P) -> (Request<P, R, E>, ResponseReceiver<R, E>) {
        let (response_sender, response_receiver) = oneshot::channel();
        let request = Request {
            payload,
            response_sender,
        };
        (request, response_receiver)
    }

    /// Sends a response on the [Request]'s [oneshot] channel.
    pub fn respond(self, response: Result<R, E>) -> Result<(), Result<R, E>> {
        self.response_sender.send(response)
    }
}

/// An error occurring during the exchange of messages with an actor.
#[derive(Debug, Error, Clone)]
pub enum ActorRequestError<E: Debug> {
    #[error("error when sending message to actor")]
    Send,

    #[error("error while awaiting request response channel")]
    Recv,

    #[error("internal actor error: {0:?}")]
    Actor(E),
}

/// A communication channel with an actor.
///
/// An actor is nothing more than a [tokio::task] holding the receiving side
/// of this channel. ActorPorts are clone-able, so an actor must not assume it
/// talks to a single peer, and it must not expect an explicit stop message:
/// cleanup happens once [mpsc::Receiver::recv] returns None, meaning all
/// ports were dropped.
#[derive(Debug)]
pub struct ActorPort<P, R, E: Debug> {
    message_sender: mpsc::Sender<Request<P, R, E>>,
    shutdown_receiver: watch::Receiver<()>,
}

// Manual Clone implementation: the derived one would require all type
// parameters to be Clone, and E tends to be anyhow::Error, which isn't.
impl<P, R, E: Debug> Clone for ActorPort<P, R, E> {
    fn clone(&self) -> Self {
        Self {
            message_sender: self.message_sender.clone(),
            shutdown_receiver: self.shutdown_receiver.clone(),
        }
    }
}

impl<P, R, E: Debug> ActorPort<P, R, E> {
    /// Creates an ActorPort sending requests through the given sender.
    pub fn new(
        message_sender: mpsc::Sender<Request<P, R, E>>,
        shutdown_receiver: watch::Receiver<()>,
    ) -> ActorPort<P, R, E> {
        ActorPort {
            message_sender,
            shutdown_receiver,
        }
    }

    /// Creates a connected [ActorPort] / [ActorReceiver] pair.
    ///
    /// The receiver is moved into the actor's task while the port is kept by
    /// the spawner.
    pub fn make() -> (ActorPort<P, R, E>, ActorReceiver<P, R, E>) {
        let (req_tx, req_rx) = mpsc::channel::<Request<P, R, E>>(8);
        let (shutdown_tx, shutdown_rx) = watch::channel(());
        (
            ActorPort::new(req_tx, shutdown_rx),
            ActorReceiver::new(req_rx, shutdown_tx),
        )
    }

    /// Sends an already constructed [Request] without awaiting its response.
    /// Prefer the [Self::request] method.
    pub async fn raw_request(
        &self,
        r: Request<P, R, E>,
    ) -> Result<(), SendError<Request<P, R, E>>> {
        self.message_sender.send(r).await
    }

    /// Constructs a [Request] with the given payload, sends it on this port
    /// and waits for the actor's response.
    pub async fn request(&self, payload: P) -> Result<R, ActorRequestError<E>> {
        let (req, rx) = Request::new(payload);
        if self.raw_request(req).await.is_err() {
            return Err(ActorRequestError::Send);
        }
        match rx.await {
            Err(_) => Err(ActorRequestError::Recv),
            Ok(inner_result) => match inner_result {
                Ok(response) => Ok(response),
                Err(actor_error) => Err(ActorRequestError::Actor(actor_error)),
            },
        }
    }

    /// Awaits actor termination.
    ///
    /// Drops this port's message sender and waits until every other clone of
    /// this port is gone and the actor drops its [ActorReceiver].
    pub async fn await_shutdown(self) {
        // The actor treats the closing of its message receiver as the
        // shutdown signal, so our sender has to go first.
        drop(self.message_sender);
        let mut shutdown_receiver = self.shutdown_receiver;

        // The watch sender lives in the ActorReceiver; its drop is the last
        // thing the actor does.
        let result = shutdown_receiver.changed().await;
        assert!(result.is_err());
    }
}

/// The receiving side of an [ActorPort].
///
/// Also carries the termination notification for the ports, so dropping this
/// struct must be the last thing an actor does.
#[derive(Debug)]
pub struct ActorReceiver<P, R, E: Debug> {
    pub request_receiver: mpsc::Receiver<Request<P, R, E>>,
    _shutdown_notifier: watch::Sender<()>,
}

impl<P, R, E: Debug> ActorReceiver<P, R, E> {
    pub fn new(
        request_receiver: mpsc::Receiver<Request<P, R, E>>,
        shutdown_notifier: watch::Sender<()>,
    ) -> Self {
        ActorReceiver {
            request_receiver,
            _shutdown_notifier: shutdown_notifier,
        }
    }

    /// Receives the next request. Semantics are those of
    /// [mpsc::Receiver::recv].
    pub async fn recv(&mut self) -> Option<Request<P, R, E>> {
        self.request_receiver.recv().await
    }
}

/// A handle signalizing termination to an actor and allowing to wait for it.
///
/// A Handle is a restricted [ActorPort] with single-parent semantics: the
/// only "message" it can deliver is its own drop, which the owning actor
/// interprets as a request to terminate.
pub struct Handle(ActorPort<(), (), ()>);

impl Handle {
    /// Creates a new Handle and the child side to be kept by the spawned
    /// actor.
    pub fn new() -> (Handle, HandleChild) {
        let (port, receiver) = ActorPort::make();
        (Handle(port), HandleChild(receiver))
    }

    /// Signals termination and waits until the actor drops its
    /// [HandleChild].
    pub async fn await_shutdown(self) {
        self.0.await_shutdown().await
    }
}

/// The side of the [Handle] belonging to the child actor.
///
/// Must not be dropped while the actor still operates or cleans up,
/// otherwise [Handle::await_shutdown] returns early.
pub struct HandleChild(ActorReceiver<(), (), ()>);

impl HandleChild {
    /// Waits until the parent [Handle] is dropped or its
    /// [await_shutdown](`Handle::await_shutdown`) method is called.
    ///
    /// This only ever resolves once, so call it inside a [tokio::select!]
    /// block.
    pub async fn should_terminate(&mut self) {
        let res = self.0.recv().await;
        assert!(res.is_none());
    }
}
