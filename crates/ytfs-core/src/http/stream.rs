//! Forward-only HTTP stream.
//!
//! A single GET runs on a worker thread and hands body chunks to the reader
//! through a bounded channel. Dropping the reader aborts the transfer on the
//! next chunk.

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Read};
use std::str;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;

use super::{new_easy, parse_status_line, HttpOptions};
use crate::error::FsError;
use crate::retry::FetchError;

/// Chunks buffered between the transfer thread and the reader.
const CHANNEL_DEPTH: usize = 16;

enum Msg {
    /// Final (non-redirect) response status, sent once before any data.
    Status(u32),
    Data(Vec<u8>),
    Done(Result<(), FetchError>),
}

pub struct HttpStream {
    url: String,
    rx: Receiver<Msg>,
    chunk: Vec<u8>,
    chunk_pos: usize,
    pos: u64,
    finished: bool,
}

impl HttpStream {
    /// Starts the GET and waits for the response status.
    pub fn open(
        url: &str,
        headers: HashMap<String, String>,
        opts: HttpOptions,
    ) -> Result<Self, FsError> {
        let (tx, rx) = mpsc::sync_channel(CHANNEL_DEPTH);
        let worker_url = url.to_string();
        thread::Builder::new()
            .name("ytfs-http-stream".into())
            .spawn(move || {
                let result = transfer(&worker_url, &headers, &opts, &tx);
                let _ = tx.send(Msg::Done(result));
            })?;

        let remote_err = |msg: String| FsError::RemoteConnection {
            msg: format!("{url}: {msg}"),
        };
        match rx.recv() {
            Ok(Msg::Status(code)) if (200..300).contains(&code) => {}
            Ok(Msg::Status(code)) => return Err(remote_err(format!("HTTP {code}"))),
            Ok(Msg::Done(Err(e))) => return Err(remote_err(e.to_string())),
            Ok(_) | Err(_) => return Err(remote_err("transfer ended before response".into())),
        }

        Ok(Self {
            url: url.to_string(),
            rx,
            chunk: Vec::new(),
            chunk_pos: 0,
            pos: 0,
            finished: false,
        })
    }

    pub fn tell(&self) -> u64 {
        self.pos
    }
}

fn transfer(
    url: &str,
    headers: &HashMap<String, String>,
    opts: &HttpOptions,
    tx: &SyncSender<Msg>,
) -> Result<(), FetchError> {
    let mut easy = new_easy(url, headers, opts)?;
    let status: Cell<Option<u32>> = Cell::new(None);
    let status_sent = Cell::new(false);
    let receiver_gone = Cell::new(false);

    let result = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            let line = str::from_utf8(data).unwrap_or("").trim_end();
            if let Some(code) = parse_status_line(line) {
                status.set(Some(code));
            } else if line.is_empty() {
                // End of a header block; redirects produce more blocks.
                if let Some(code) = status.get() {
                    if !(300..400).contains(&code) && !status_sent.get() {
                        status_sent.set(true);
                        if tx.send(Msg::Status(code)).is_err() {
                            receiver_gone.set(true);
                            return false;
                        }
                    }
                }
            }
            true
        })?;
        transfer.write_function(|data| {
            if !matches!(status.get(), Some(c) if (200..300).contains(&c)) {
                // Error page body; the status already told the reader.
                return Ok(data.len());
            }
            if tx.send(Msg::Data(data.to_vec())).is_err() {
                receiver_gone.set(true);
                return Ok(0);
            }
            Ok(data.len())
        })?;
        transfer.perform()
    };

    match result {
        Ok(()) => {}
        Err(_) if receiver_gone.get() => return Ok(()),
        Err(e) => return Err(FetchError::Curl(e)),
    }
    let code = easy.response_code()?;
    if !status_sent.get() {
        let _ = tx.send(Msg::Status(code));
    }
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    Ok(())
}

impl Read for HttpStream {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        while self.chunk_pos >= self.chunk.len() {
            if self.finished {
                return Ok(0);
            }
            match self.rx.recv() {
                Ok(Msg::Data(data)) => {
                    self.chunk = data;
                    self.chunk_pos = 0;
                }
                Ok(Msg::Status(_)) => {}
                Ok(Msg::Done(Ok(()))) => self.finished = true,
                Ok(Msg::Done(Err(e))) => {
                    self.finished = true;
                    return Err(io::Error::from(FsError::RemoteConnection {
                        msg: format!("{}: {e}", self.url),
                    }));
                }
                Err(_) => {
                    self.finished = true;
                    return Err(io::Error::new(
                        io::ErrorKind::BrokenPipe,
                        "stream worker exited unexpectedly",
                    ));
                }
            }
        }
        let avail = &self.chunk[self.chunk_pos..];
        let n = avail.len().min(out.len());
        out[..n].copy_from_slice(&avail[..n]);
        self.chunk_pos += n;
        self.pos += n as u64;
        Ok(n)
    }
}

impl fmt::Debug for HttpStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpStream")
            .field("url", &self.url)
            .field("pos", &self.pos)
            .field("finished", &self.finished)
            .finish()
    }
}
