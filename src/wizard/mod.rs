//! Wizard engine: step cursor, per-step validation, controller, and the
//! session phase machine.

pub mod controller;
pub mod phase;
pub mod step;
pub mod validator;

pub use controller::WizardController;
pub use phase::SessionPhase;
pub use step::WizardStep;
pub use validator::validate_step;
