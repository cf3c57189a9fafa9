use std::{collections::HashMap, net::SocketAddr};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::{
    io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
};
use url::Url;

use crate::{
    ai::{inference::parse_score, RelevanceScorer, ScoreError},
    domain::EmailMessage,
    infrastructure::mailer::Mailer,
    web_content::PageSource,
};

/// Serves canned HTML per URL; unknown URLs fail like a dead host.
#[derive(Default)]
pub struct FakePages {
    pages: HashMap<String, Result<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl FakePages {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(html.to_string()));
        self
    }

    pub fn with_failure(mut self, url: &str, error: &str) -> Self {
        self.pages.insert(url.to_string(), Err(error.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl PageSource for FakePages {
    async fn fetch_html(&self, url: &Url) -> Result<String> {
        self.calls.lock().push(url.to_string());
        match self.pages.get(url.as_str()) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(error)) => Err(anyhow!("{error}")),
            None => Err(anyhow!("connection refused: {url}")),
        }
    }
}

/// Answers with a fixed raw model response per keyword, parsed the same
/// way a live response would be.
#[derive(Default)]
pub struct FakeScorer {
    answers: HashMap<String, String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeScorer {
    pub fn answer(mut self, keyword: &str, raw: &str) -> Self {
        self.answers.insert(keyword.to_string(), raw.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl RelevanceScorer for FakeScorer {
    async fn score(&self, text: &str, keyword: &str) -> Result<u8, ScoreError> {
        self.calls.lock().push((text.to_string(), keyword.to_string()));
        match self.answers.get(keyword) {
            Some(raw) => parse_score(raw),
            None => Err(ScoreError::Request(anyhow!("quota exceeded"))),
        }
    }
}

/// Records every message; recipients listed in `failing` are refused.
#[derive(Default)]
pub struct FakeMailer {
    failing: Vec<String>,
    sent: Mutex<Vec<EmailMessage>>,
    attempts: Mutex<usize>,
}

impl FakeMailer {
    pub fn failing_for(mut self, recipient: &str) -> Self {
        self.failing.push(recipient.to_string());
        self
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        *self.attempts.lock() += 1;
        if self.failing.contains(&message.recipient) {
            return Err(anyhow!("550 mailbox unavailable"));
        }
        self.sent.lock().push(message.clone());
        Ok(())
    }
}

/// Client that ignores proxy settings from the environment.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}

/// Answers every request on a local port with `status` and `body`.
pub async fn serve_http(status: &'static str, body: &str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let body = body.clone();
            tokio::spawn(async move {
                let _ = respond(stream, status, &body).await;
            });
        }
    });
    addr
}

async fn respond(stream: TcpStream, status: &str, body: &str) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    // drain the request body so closing the socket does not reset it
    let mut request_body = vec![0; content_length];
    reader.read_exact(&mut request_body).await?;

    let mut stream = reader.into_inner();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}
