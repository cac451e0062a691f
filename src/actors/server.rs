//! Server abstraction on top of [super::ports]

use super::ActorPort;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::oneshot;

/// Structured request-response actors with three lifecycle phases.
///
/// Initialization runs first; [spawn_server] doesn't return until it has
/// finished, either successfully or with an error. In the handling phase,
/// [Server::handle_message] is invoked for each request arriving on the
/// [ActorPort] returned by [spawn_server]. After all ports are dropped the
/// teardown phase runs for asynchronous cleanup; synchronous cleanup belongs
/// in an impl of [Drop].
#[async_trait]
pub trait Server<P, R>: Send + 'static {
    /// Returns the name of the Server, used in logging messages.
    fn get_name(&self) -> String;

    /// Handles a request sent to the [ActorPort] of the actor.
    ///
    /// The returned success or failure is delivered to the requester via the
    /// request's response channel.
    async fn handle_message(&mut self, payload: P) -> Result<R>;

    /// Performs server initialization tasks.
    ///
    /// An error here makes [spawn_server] fail with it. The default
    /// implementation just returns `Ok(())`.
    async fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Performs server teardown tasks.
    ///
    /// Runs at a non-deterministic time, after all ports are dropped;
    /// errors are only logged.
    async fn tear_down(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Starts a task for the given [Server], handling the low-level details of
/// request receiving and response sending.
///
/// Waits for the server's initialization before returning its [ActorPort];
/// if initialization fails, the error is returned instead.
pub async fn spawn_server<P, R>(
    mut server: impl Server<P, R>,
) -> Result<ActorPort<P, R, anyhow::Error>>
where
    P: Send + 'static,
    R: Send + 'static,
{
    let name = server.get_name();
    log::debug!("{} spawning", name);
    let (port, mut rx) = ActorPort::make();
    let (initialization_sender, initialization_receiver) = oneshot::channel::<Result<()>>();
    tokio::spawn(async move {
        let name = server.get_name();
        let init_result = server.initialize().await;
        let had_init_error = init_result.is_err();
        initialization_sender
            .send(init_result)
            .expect("Initialization sender failure");
        if had_init_error {
            return;
        }
        log::info!("{} initialized successfully", name);
        loop {
            match rx.recv().await {
                Some(req) => {
                    let res = server.handle_message(req.payload).await;
                    if let Err(e) = &res {
                        log::error!("{} message handler returned error: {}", name, e);
                    }
                    if req.response_sender.send(res).is_err() {
                        log::error!(
                            "{} failed to respond to request (requester went away?)",
                            name
                        );
                    }
                }
                None => {
                    log::debug!("{} stopping", name);
                    if let Err(e) = server.tear_down().await {
                        log::error!("{} failed to tear down: {}", name, e);
                    }
                    log::debug!("{} stopped", name);
                    return;
                }
            }
        }
    });

    match initialization_receiver.await {
        Ok(Ok(_)) => Ok(port),
        Ok(Err(e)) => {
            log::error!("Error initializing {}: {}", name, e);
            Err(e)
        }
        Err(e) => Err(anyhow!(e)),
    }
}
