//! Resource type definitions
//!
//! The API exposes the following resources:
//!
//! - [`Organization`] - top-level tenant, parent of everything else
//! - [`Team`] - permission group inside an organization
//! - [`Workspace`] - infrastructure code checkout inside an organization
//! - [`Module`] - private registry module inside an organization
//! - [`Variable`] - workspace variable (terraform or environment)

pub mod module;
pub mod organization;
pub mod team;
pub mod variable;
pub mod workspace;

pub use module::Module;
pub use organization::Organization;
pub use team::Team;
pub use variable::Variable;
pub use workspace::Workspace;
