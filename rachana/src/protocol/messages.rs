//! Message types exchanged with the hosting runtime.
//!
//! JSON encodings:
//!
//! | Message | JSON |
//! |---------|------|
//! | seed | `{"seed": 42}` |
//! | next scenario | `"next_scenario"` |
//! | scenario | `{"scenario": {"scenario_name": ..., "environment": ..., "robots": {...}}}` |
//! | finished | `"finished"` |
//! | error | `{"error": "..."}` |

use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};

/// Requests received from the runtime
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InboundMessage {
    /// Reseed and regenerate all configured scenarios
    Seed(u64),
    /// Dispense the oldest pending scenario
    NextScenario,
}

/// Responses sent back to the runtime
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OutboundMessage {
    /// One dispensed scenario
    Scenario(Scenario),
    /// No scenario pending
    Finished,
    /// A request failed but the node keeps serving
    Error(String),
}
