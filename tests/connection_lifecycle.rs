//! Integration tests for the client connection lifecycle.
//!
//! Tests connecting, registering, failing to register and disconnecting
//! against a scripted server over real TCP.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{TestServer, init_tracing, wait_for_event, wait_for_state};
use ircwire::{
    ClientError, ClientEvent, ClientOptions, ClientState, EventDelegate, IrcClient, RetryDecision,
};
use ircwire_proto::{ChannelName, Command, NickName};
use tokio::sync::mpsc::UnboundedReceiver;

fn options(port: u16) -> ClientOptions {
    ClientOptions::new(NickName::new("noze").unwrap())
        .with_host("127.0.0.1")
        .with_port(port)
}

fn spawn(options: ClientOptions) -> (IrcClient, UnboundedReceiver<ClientEvent>) {
    init_tracing();
    let (delegate, events) = EventDelegate::channel();
    (IrcClient::new(options, Arc::new(delegate)), events)
}

#[tokio::test]
async fn test_basic_registration() -> anyhow::Result<()> {
    let server = TestServer::bind().await?;
    let (client, mut events) = spawn(options(server.port()));
    assert!(matches!(client.state(), ClientState::Disconnected));

    client.connect();
    let mut conn = server.accept().await?;

    let burst = conn.expect_registration().await?;
    let names: Vec<String> = burst.iter().map(|m| m.command.name()).collect();
    assert_eq!(names, ["NICK", "USER"]);
    assert_eq!(
        burst[1].to_string(),
        "USER noze 127.0.0.1 127.0.0.1 :NIO IRC User\r\n"
    );
    wait_for_state(&client, |s| matches!(s, ClientState::Registering { .. })).await?;

    conn.welcome("noze").await?;
    let event = wait_for_event(&mut events, |e| {
        matches!(e, ClientEvent::Registered { .. })
    })
    .await?;
    match event {
        ClientEvent::Registered { nick, .. } => assert_eq!(nick.as_str(), "noze"),
        other => panic!("unexpected {other:?}"),
    }

    wait_for_state(&client, ClientState::is_registered).await?;
    assert_eq!(client.usermask().as_deref(), Some("noze!~noze@127.0.0.1"));
    assert_eq!(client.retry_info().times_connected, 1);
    assert_eq!(client.retry_info().attempt, 0);
    Ok(())
}

#[tokio::test]
async fn test_password_is_sent_first() -> anyhow::Result<()> {
    let server = TestServer::bind().await?;
    let (client, _events) = spawn(options(server.port()).with_password("sekrit"));

    client.connect();
    let mut conn = server.accept().await?;
    let burst = conn.expect_registration().await?;
    let names: Vec<String> = burst.iter().map(|m| m.command.name()).collect();
    assert_eq!(names, ["PASS", "NICK", "USER"]);
    assert_eq!(
        burst[0].command,
        Command::Other("PASS".into(), vec!["sekrit".into()])
    );
    Ok(())
}

#[tokio::test]
async fn test_ping_is_answered() -> anyhow::Result<()> {
    let server = TestServer::bind().await?;
    let (client, _events) = spawn(options(server.port()));

    client.connect();
    let mut conn = server.accept().await?;
    conn.expect_registration().await?;
    conn.welcome("noze").await?;
    wait_for_state(&client, ClientState::is_registered).await?;

    // A malformed line in between changes nothing.
    conn.send_raw("NICK").await?;
    conn.send_raw("PING :irc.test").await?;
    let pong = conn.recv().await?;
    assert_eq!(pong.command, Command::PONG("irc.test".into(), None));
    Ok(())
}

#[tokio::test]
async fn test_nickname_in_use_fails_registration() -> anyhow::Result<()> {
    let server = TestServer::bind().await?;
    let (client, mut events) = spawn(options(server.port()));

    client.connect();
    let mut conn = server.accept().await?;
    conn.expect_registration().await?;
    conn.send_raw(":irc.test 433 * noze :Nickname is already in use")
        .await?;

    let event = wait_for_event(&mut events, |e| {
        matches!(e, ClientEvent::RegistrationFailed(_))
    })
    .await?;
    assert!(matches!(
        event,
        ClientEvent::RegistrationFailed(ClientError::RegistrationFailed(433))
    ));

    let state = wait_for_state(&client, |s| matches!(s, ClientState::Error(_))).await?;
    assert!(matches!(
        state,
        ClientState::Error(ClientError::RegistrationFailed(433))
    ));

    // The client hangs up on its own and does not pick another nick.
    let rest = conn.read_to_close().await?;
    assert!(rest.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_server_hangup_during_registration() -> anyhow::Result<()> {
    let server = TestServer::bind().await?;
    let (client, mut events) = spawn(options(server.port()));

    client.connect();
    let mut conn = server.accept().await?;
    conn.expect_registration().await?;
    drop(conn);

    let event = wait_for_event(&mut events, |e| {
        matches!(e, ClientEvent::RegistrationFailed(_))
    })
    .await?;
    assert!(matches!(
        event,
        ClientEvent::RegistrationFailed(ClientError::Stopped)
    ));
    wait_for_state(&client, |s| matches!(s, ClientState::Disconnected)).await?;
    Ok(())
}

#[tokio::test]
async fn test_refused_connection() -> anyhow::Result<()> {
    let server = TestServer::bind().await?;
    let port = server.port();
    drop(server);

    let (client, mut events) = spawn(options(port));
    client.connect();

    let event = wait_for_event(&mut events, |e| {
        matches!(e, ClientEvent::RegistrationFailed(_))
    })
    .await?;
    assert!(matches!(
        event,
        ClientEvent::RegistrationFailed(ClientError::Connect(_))
    ));

    wait_for_state(&client, |s| matches!(s, ClientState::Error(_))).await?;
    let info = client.retry_info();
    assert_eq!(info.attempt, 1);
    assert!(matches!(info.last_error, Some(ClientError::Connect(_))));
    match client.retry_decision() {
        RetryDecision::RetryAfter(delay) => assert_eq!(delay, Duration::from_millis(200)),
        other => panic!("unexpected {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_quit_handshake() -> anyhow::Result<()> {
    let server = TestServer::bind().await?;
    let (client, _events) = spawn(options(server.port()));

    client.connect();
    let mut conn = server.accept().await?;
    conn.expect_registration().await?;
    conn.welcome("noze").await?;
    wait_for_state(&client, ClientState::is_registered).await?;

    client.quit(Some("see you".into()));
    let rest = conn.read_to_close().await?;
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].command, Command::QUIT(Some("see you".into())));
    drop(conn);

    wait_for_state(&client, |s| matches!(s, ClientState::Quit)).await?;

    // Quit is terminal.
    client.connect();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(matches!(client.state(), ClientState::Quit));
    Ok(())
}

#[tokio::test]
async fn test_close_then_reconnect_rejoins_channels() -> anyhow::Result<()> {
    let server = TestServer::bind().await?;
    let (client, mut events) = spawn(options(server.port()));

    client.connect();
    let mut conn = server.accept().await?;
    conn.expect_registration().await?;
    conn.welcome("noze").await?;
    wait_for_state(&client, ClientState::is_registered).await?;

    let rust = ChannelName::new("#rust").unwrap();
    client.join(vec![rust.clone()], None);
    assert_eq!(conn.recv().await?.to_string(), "JOIN #rust\r\n");
    conn.send_raw(":noze!noze@127.0.0.1 JOIN #rust").await?;
    let joined = wait_for_event(&mut events, |e| matches!(e, ClientEvent::Joined { .. })).await?;
    match joined {
        ClientEvent::Joined { user, channels } => {
            assert_eq!(user.nick.as_str(), "noze");
            assert_eq!(channels, vec![rust.clone()]);
        }
        other => panic!("unexpected {other:?}"),
    }

    client.close();
    wait_for_state(&client, |s| matches!(s, ClientState::Disconnected)).await?;
    conn.read_to_close().await?;
    drop(conn);

    client.connect();
    let mut conn = server.accept().await?;
    conn.expect_registration().await?;
    conn.welcome("noze").await?;
    let rejoin = conn.recv().await?;
    assert_eq!(rejoin.command, Command::JOIN(vec![rust], None));
    assert_eq!(client.retry_info().times_connected, 2);
    Ok(())
}

#[tokio::test]
async fn test_send_while_disconnected_is_stopped() -> anyhow::Result<()> {
    let (client, _events) = spawn(options(1));
    let err = client
        .send_batch(vec![ircwire_proto::Message::pong("x")])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Stopped));
    Ok(())
}
