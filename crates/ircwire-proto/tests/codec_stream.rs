//! End-to-end decoding through `FramedRead` and encoding through `FramedWrite`.

use futures_util::{SinkExt, StreamExt};
use ircwire_proto::{ChannelName, Command, IrcCodec, Message, NickName, ParseError};
use tokio_util::codec::{FramedRead, FramedWrite};

#[tokio::test]
async fn bad_lines_do_not_end_the_stream() {
    let input: &[u8] = b":srv 001 me :Welcome\r\nNICK\r\n\r\n:srv!x@y N0PE\r\nPING :srv\r\n";
    let mut frames = FramedRead::new(input, IrcCodec::new());

    let mut items = Vec::new();
    while let Some(item) = frames.next().await {
        items.push(item.expect("no fatal codec error"));
    }

    assert_eq!(items.len(), 4);
    assert!(items[0].as_ref().unwrap().command.is_numeric());
    assert!(matches!(
        items[1],
        Err(ParseError::InvalidArgumentCount { .. })
    ));
    assert!(matches!(items[2], Err(ParseError::InvalidCommand(_))));
    assert_eq!(
        items[3].as_ref().unwrap().command,
        Command::PING("srv".into(), None)
    );
}

#[tokio::test]
async fn partial_trailing_line_is_dropped_at_eof() {
    let input: &[u8] = b"PING :a\r\nPING :unfinished";
    let frames: Vec<_> = FramedRead::new(input, IrcCodec::new()).collect().await;
    assert_eq!(frames.len(), 1);
    assert!(frames[0].as_ref().unwrap().is_ok());
}

#[tokio::test]
async fn oversized_line_is_fatal() {
    let input: &[u8] = b"PRIVMSG #a :this line is longer than the limit\r\n";
    let mut frames = FramedRead::new(input, IrcCodec::with_max_len(16));
    assert!(frames.next().await.unwrap().is_err());
}

#[tokio::test]
async fn batch_is_written_in_order() {
    let mut out = Vec::new();
    {
        let mut sink = FramedWrite::new(&mut out, IrcCodec::new());
        let msgs = [
            Message::from(Command::NICK(NickName::new("a").unwrap())),
            Message::from(Command::JOIN(vec![ChannelName::new("#b").unwrap()], None)),
            Message::from(Command::QUIT(Some("c d".into()))),
        ];
        for msg in msgs {
            sink.feed(msg).await.unwrap();
        }
        // Both `Message` and `&Message` are sink items, so name one.
        SinkExt::<Message>::flush(&mut sink).await.unwrap();
    }
    assert_eq!(out, b"NICK a\r\nJOIN #b\r\nQUIT :c d\r\n");
}
