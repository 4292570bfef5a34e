//! Fanar ABM — Core library.
//! Stakeholder registry, checksum-seeded policy impact simulation, and the Fanar chat relay.

pub mod agents;
pub mod config;
pub mod error;
pub mod impact;
pub mod narrative;
pub mod relay;
pub mod simulation;

pub use agents::{Agent, AgentRegistry};
pub use config::RelayConfig;
pub use error::{RegistryError, RelayError, RelayResult};
pub use impact::{estimate, policy_seed, severity, Impact};
pub use narrative::Language;
pub use relay::{extract_reply, ChatMessage, ChatOptions, ChatRelay, RelayMode};
pub use simulation::{SimulationRequest, SimulationResult, Simulator, TargetGroup, NO_DATA, SYSTEM_AGENT};
