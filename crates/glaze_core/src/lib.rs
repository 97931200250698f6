//! Glaze Core Runtime
//!
//! Foundational primitives shared by the Glaze crates:
//!
//! - **State Machines**: flat, typed statecharts with transition history
//!
//! # Example
//!
//! ```rust
//! use glaze_core::fsm::StateMachine;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum Light { Off, On }
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum Switch { Flip }
//!
//! let mut fsm = StateMachine::builder(Light::Off)
//!     .on(Light::Off, Switch::Flip, Light::On)
//!     .on(Light::On, Switch::Flip, Light::Off)
//!     .build();
//!
//! assert_eq!(fsm.send(Switch::Flip), Light::On);
//! ```

pub mod fsm;

pub use fsm::{StateMachine, StateMachineBuilder, Transition};
