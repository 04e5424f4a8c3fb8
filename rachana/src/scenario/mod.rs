//! Scenario records and their assembly from placed poses.

mod assembler;
mod types;

pub use assembler::{assemble_scenario, scenario_name};
pub use types::{
    MotionIntent, ProtocolDescriptor, RobotConfiguration, RobotSpec, RoleCategory, Scenario,
};
