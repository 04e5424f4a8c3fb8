//! Node host: drives a [`Node`] from a framed byte stream
//!
//! # Message Flow
//!
//! ```text
//! runtime ──frame──► NodeHost ──InboundMessage──► Node::handle
//!    ▲                                               │
//!    └──────frame────── OutboundMessage (if any) ◄───┘
//! ```
//!
//! # Error Handling
//!
//! - **Undecodable payload**: logged and skipped, the exchange continues
//! - **Recoverable node error**: reported as an `error` message
//! - **Fatal node error**: returned to the caller, the exchange stops
//! - **EOF at a frame boundary**: clean shutdown

use super::messages::{InboundMessage, OutboundMessage};
use super::wire::{Serializer, read_frame, write_frame};
use crate::error::Result;
use std::io::{Read, Write};

/// Anything that answers inbound messages one at a time
pub trait Node {
    /// Process one message to completion. `None` means no reply.
    fn handle(&mut self, msg: InboundMessage) -> Result<Option<OutboundMessage>>;
}

/// Counters reported when the exchange ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    /// Frames decoded and handed to the node
    pub received: u64,
    /// Frames written back
    pub sent: u64,
    /// Frames dropped because they could not be decoded
    pub skipped: u64,
}

/// Framed request/response loop over a reader and a writer
pub struct NodeHost<R: Read, W: Write> {
    reader: R,
    writer: W,
    serializer: Serializer,
    stats: HostStats,
}

impl<R: Read, W: Write> NodeHost<R, W> {
    pub fn new(reader: R, writer: W, serializer: Serializer) -> Self {
        Self {
            reader,
            writer,
            serializer,
            stats: HostStats::default(),
        }
    }

    /// Serve `node` until the input stream ends
    pub fn run<N: Node>(&mut self, node: &mut N) -> Result<HostStats> {
        log::info!(
            "Node host started (wire format: {:?})",
            self.serializer.format()
        );

        while let Some(payload) = read_frame(&mut self.reader)? {
            let msg: InboundMessage = match self.serializer.deserialize(&payload) {
                Ok(msg) => msg,
                Err(e) => {
                    log::warn!("Discarding undecodable message: {}", e);
                    self.stats.skipped += 1;
                    continue;
                }
            };
            self.stats.received += 1;
            log::debug!("Received {:?}", msg);

            match node.handle(msg) {
                Ok(Some(reply)) => self.send(&reply)?,
                Ok(None) => {}
                Err(e) if e.is_recoverable() => {
                    log::warn!("Request failed: {}", e);
                    self.send(&OutboundMessage::Error(e.to_string()))?;
                }
                Err(e) => {
                    log::error!("Fatal error handling request: {}", e);
                    return Err(e);
                }
            }
        }

        log::info!(
            "Input closed: {} received, {} sent, {} skipped",
            self.stats.received,
            self.stats.sent,
            self.stats.skipped
        );
        Ok(self.stats)
    }

    fn send(&mut self, msg: &OutboundMessage) -> Result<()> {
        let bytes = self.serializer.serialize(msg)?;
        write_frame(&mut self.writer, &bytes)?;
        self.writer.flush()?;
        self.stats.sent += 1;
        Ok(())
    }

    /// Consume the host, returning the writer
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::protocol::wire::WireFormat;
    use std::io::Cursor;

    /// Counts seeds, replies `finished` to every request, fails on seed 13
    struct Echo {
        seeds: Vec<u64>,
    }

    impl Node for Echo {
        fn handle(&mut self, msg: InboundMessage) -> Result<Option<OutboundMessage>> {
            match msg {
                InboundMessage::Seed(13) => Err(Error::Inconsistent("unlucky".into())),
                InboundMessage::Seed(0) => Err(Error::PlacementInfeasible {
                    placed: 0,
                    requested: 1,
                    attempts: 1,
                }),
                InboundMessage::Seed(s) => {
                    self.seeds.push(s);
                    Ok(None)
                }
                InboundMessage::NextScenario => Ok(Some(OutboundMessage::Finished)),
            }
        }
    }

    fn frames(payloads: &[&[u8]]) -> Cursor<Vec<u8>> {
        let mut buf = Vec::new();
        for p in payloads {
            write_frame(&mut buf, p).unwrap();
        }
        Cursor::new(buf)
    }

    fn replies(bytes: Vec<u8>) -> Vec<OutboundMessage> {
        let serializer = Serializer::new(WireFormat::Json);
        let mut cursor = Cursor::new(bytes);
        let mut out = Vec::new();
        while let Some(frame) = read_frame(&mut cursor).unwrap() {
            out.push(serializer.deserialize(&frame).unwrap());
        }
        out
    }

    #[test]
    fn test_dispatch_and_reply() {
        let input = frames(&[br#"{"seed":5}"#, br#""next_scenario""#]);
        let mut host = NodeHost::new(input, Vec::new(), Serializer::new(WireFormat::Json));
        let mut node = Echo { seeds: Vec::new() };

        let stats = host.run(&mut node).unwrap();
        assert_eq!(stats.received, 2);
        assert_eq!(stats.sent, 1);
        assert_eq!(node.seeds, vec![5]);
        assert_eq!(replies(host.into_writer()), vec![OutboundMessage::Finished]);
    }

    #[test]
    fn test_garbage_is_skipped() {
        let input = frames(&[b"%%%", br#""next_scenario""#]);
        let mut host = NodeHost::new(input, Vec::new(), Serializer::new(WireFormat::Json));
        let mut node = Echo { seeds: Vec::new() };

        let stats = host.run(&mut node).unwrap();
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.received, 1);
    }

    #[test]
    fn test_recoverable_error_is_reported() {
        let input = frames(&[br#"{"seed":0}"#, br#""next_scenario""#]);
        let mut host = NodeHost::new(input, Vec::new(), Serializer::new(WireFormat::Json));
        let mut node = Echo { seeds: Vec::new() };

        host.run(&mut node).unwrap();
        let out = replies(host.into_writer());
        assert_eq!(out.len(), 2);
        assert!(matches!(&out[0], OutboundMessage::Error(msg) if msg.contains("infeasible")));
        assert_eq!(out[1], OutboundMessage::Finished);
    }

    #[test]
    fn test_fatal_error_stops_loop() {
        let input = frames(&[br#"{"seed":13}"#, br#""next_scenario""#]);
        let mut host = NodeHost::new(input, Vec::new(), Serializer::new(WireFormat::Json));
        let mut node = Echo { seeds: Vec::new() };

        assert!(matches!(host.run(&mut node), Err(Error::Inconsistent(_))));
        assert!(host.into_writer().is_empty());
    }
}
