//! Request/response exchange with the hosting runtime.
//!
//! - [`messages`]: inbound (`seed`, `next_scenario`) and outbound
//!   (`scenario`, `finished`, `error`) message types
//! - [`wire`]: length-prefixed framing and payload encoding
//! - [`host`]: loop feeding framed messages to a [`Node`]

pub mod host;
pub mod messages;
pub mod wire;

pub use host::{HostStats, Node, NodeHost};
pub use messages::{InboundMessage, OutboundMessage};
pub use wire::{MAX_FRAME_SIZE, Serializer, WireFormat, read_frame, write_frame};
