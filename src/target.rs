//! Outbound helpers for anything that can send messages.

use async_trait::async_trait;
use ircwire_proto::{Command, Message, Recipient, Response};

use crate::client::IrcClient;
use crate::error::ClientError;

/// Something messages can be sent through.
///
/// Only [`send_messages`](MessageTarget::send_messages) is required; the rest
/// build on it.
#[async_trait]
pub trait MessageTarget: Send + Sync {
    /// Origin stamped on built messages. `None` for clients.
    fn origin(&self) -> Option<&str> {
        None
    }

    /// Sends `messages` in order as one batch.
    async fn send_messages(&self, messages: Vec<Message>) -> Result<(), ClientError>;

    async fn send_message(&self, message: Message) -> Result<(), ClientError> {
        self.send_messages(vec![message]).await
    }

    /// One PRIVMSG per line of `text`.
    async fn send_text(&self, text: &str, recipients: &[Recipient]) -> Result<(), ClientError> {
        let messages = line_messages(self.origin(), text, recipients, Command::PRIVMSG);
        if messages.is_empty() {
            return Ok(());
        }
        self.send_messages(messages).await
    }

    /// One NOTICE per line of `text`.
    async fn send_notice(&self, text: &str, recipients: &[Recipient]) -> Result<(), ClientError> {
        let messages = line_messages(self.origin(), text, recipients, Command::NOTICE);
        if messages.is_empty() {
            return Ok(());
        }
        self.send_messages(messages).await
    }

    async fn send_raw_reply(
        &self,
        code: Response,
        args: Vec<String>,
    ) -> Result<(), ClientError> {
        let mut message = Message::from(Command::Response(code, args));
        if let Some(origin) = self.origin() {
            message = message.with_origin(origin);
        }
        self.send_message(message).await
    }
}

/// Splits `text` on line feeds, dropping carriage returns and empty lines.
fn line_messages(
    origin: Option<&str>,
    text: &str,
    recipients: &[Recipient],
    build: fn(Vec<Recipient>, String) -> Command,
) -> Vec<Message> {
    if recipients.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|line| line.replace('\r', ""))
        .filter(|line| !line.is_empty())
        .map(|line| {
            let message = Message::from(build(recipients.to_vec(), line));
            match origin {
                Some(origin) => message.with_origin(origin),
                None => message,
            }
        })
        .collect()
}

#[async_trait]
impl MessageTarget for IrcClient {
    async fn send_messages(&self, messages: Vec<Message>) -> Result<(), ClientError> {
        self.send_batch(messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ircwire_proto::{ChannelName, NickName};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collect {
        origin: Option<String>,
        batches: Mutex<Vec<Vec<Message>>>,
    }

    #[async_trait]
    impl MessageTarget for Collect {
        fn origin(&self) -> Option<&str> {
            self.origin.as_deref()
        }

        async fn send_messages(&self, messages: Vec<Message>) -> Result<(), ClientError> {
            self.batches.lock().unwrap().push(messages);
            Ok(())
        }
    }

    fn rust() -> Recipient {
        Recipient::Channel(ChannelName::new("#rust").unwrap())
    }

    #[tokio::test]
    async fn multi_line_text_is_one_batch_of_privmsgs() {
        let target = Collect::default();
        target
            .send_text("hello\r\nworld\n\n", &[rust()])
            .await
            .unwrap();

        let batches = target.batches.lock().unwrap();
        assert_eq!(batches.len(), 1);
        let lines: Vec<String> = batches[0].iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            ["PRIVMSG #rust :hello\r\n", "PRIVMSG #rust :world\r\n"]
        );
    }

    #[tokio::test]
    async fn nothing_is_sent_without_recipients_or_text() {
        let target = Collect::default();
        target.send_notice("hi", &[]).await.unwrap();
        target.send_text("\r\n", &[rust()]).await.unwrap();
        assert!(target.batches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn notices_and_replies_carry_the_origin() {
        let target = Collect {
            origin: Some("irc.example.net".into()),
            ..Default::default()
        };
        let bob = Recipient::Nickname(NickName::new("bob").unwrap());
        target.send_notice("heads up", &[bob]).await.unwrap();
        target
            .send_raw_reply(
                Response::RPL_WELCOME,
                vec!["bob".into(), "Welcome to the network".into()],
            )
            .await
            .unwrap();

        let batches = target.batches.lock().unwrap();
        assert_eq!(
            batches[0][0].to_string(),
            ":irc.example.net NOTICE bob :heads up\r\n"
        );
        assert_eq!(
            batches[1][0].to_string(),
            ":irc.example.net 001 bob :Welcome to the network\r\n"
        );
    }
}
