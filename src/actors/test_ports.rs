use super::ports;
use std::sync::{atomic::AtomicBool, atomic::Ordering, Arc};
use tokio;

#[tokio::test]
async fn test_request_response() {
    let (request, receiver): (ports::Request<(), bool, ()>, _) = ports::Request::new(());
    assert_eq!(request.payload, ());
    request
        .respond(Ok(true))
        .expect("Channel failure when sending response");
    let response = receiver
        .await
        .expect("Channel failure when receiving response");
    assert_eq!(response, Ok(true));
}

#[tokio::test]
async fn test_actor_port() {
    let termination_flag = make_termination_flag();
    let port = spawn_toggle_actor(termination_flag.clone());
    assert!(port
        .request(ToggleMessage::Set(true))
        .await
        .expect("Expected a successful response"));
    assert!(!port
        .request(ToggleMessage::Set(false))
        .await
        .expect("Expected a successful response"));
    let error = port
        .request(ToggleMessage::Set(true))
        .await
        .expect_err("Expected an error from actor");
    if let ports::ActorRequestError::Actor(e) = error {
        assert_eq!(e.to_string(), "Toggle worn out");
        assert_eq!(e.kind(), std::io::ErrorKind::Other);
    } else {
        panic!("An error from Actor is not translated correctly");
    }
    assert!(!termination_flag.load(Ordering::Acquire));
    port.await_shutdown().await;
    assert!(termination_flag.load(Ordering::Acquire));
}

#[tokio::test]
async fn test_request_errors() {
    let termination_flag = make_termination_flag();
    let port = spawn_toggle_actor(termination_flag.clone());
    assert!(!termination_flag.load(Ordering::Acquire));
    let recv_error = port
        .request(ToggleMessage::Die)
        .await
        .expect_err("Actor should close the oneshot channel when terminating");
    if let ports::ActorRequestError::Recv = recv_error {
    } else {
        panic!("A RecvError is not translated correctly");
    }
    let send_error = port
        .request(ToggleMessage::Set(true))
        .await
        .expect_err("Actor request channel is still sendable after actor termination");
    if let ports::ActorRequestError::Send = send_error {
    } else {
        panic!("A SendError is not translated correctly");
    }

    // Hangs forever if the shutdown notifier's sender side is not closed
    // correctly on drop.
    port.await_shutdown().await;
}

enum ToggleMessage {
    Set(bool),
    // Don't use this in your code! Actors should terminate on their own,
    // this exists just to test error translation.
    Die,
}

/// Spawns an actor which accepts two Set messages, echoing the set value
/// back, and fails every request after that.
fn spawn_toggle_actor(
    termination_flag: Arc<AtomicBool>,
) -> ports::ActorPort<ToggleMessage, bool, std::io::Error> {
    let (port, mut rx) = ports::ActorPort::make();
    tokio::spawn(async move {
        let mut handled = 0;
        while let Some(req) = rx.recv().await {
            match req.payload {
                ToggleMessage::Set(value) => {
                    if handled < 2 {
                        req.respond(Ok(value)).expect("Couldn't respond to request");
                        handled += 1;
                    } else {
                        req.respond(Err(std::io::Error::new(
                            std::io::ErrorKind::Other,
                            "Toggle worn out",
                        )))
                        .expect("Couldn't respond to request");
                    }
                }
                // Intentionally incorrect, an actor should always respond to
                // a message it has been sent. We want to exercise the error
                // handling in ActorPort though.
                ToggleMessage::Die => return,
            }
        }
        termination_flag.store(true, Ordering::Release);
    });
    port
}

#[tokio::test]
async fn test_handle_drop() {
    let flag = make_termination_flag();
    let handle = spawn_handle_tester(flag.clone());
    assert!(!flag.load(Ordering::Acquire));
    drop(handle);
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    assert!(flag.load(Ordering::Acquire));
}

#[tokio::test]
async fn test_handle_await() {
    let flag = make_termination_flag();
    let handle = spawn_handle_tester(flag.clone());
    assert!(!flag.load(Ordering::Acquire));
    handle.await_shutdown().await;
    assert!(flag.load(Ordering::Acquire));
}

fn spawn_handle_tester(termination_flag: Arc<AtomicBool>) -> ports::Handle {
    let (handle, mut handle_child) = ports::Handle::new();
    tokio::spawn(async move {
        handle_child.should_terminate().await;
        termination_flag.store(true, Ordering::Release);
    });
    handle
}

fn make_termination_flag() -> Arc<AtomicBool> {
    Arc::new(AtomicBool::new(false))
}
