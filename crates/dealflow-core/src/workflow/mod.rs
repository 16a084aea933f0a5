//! Four-stage investor workflow: profiling, discovery, detail, conversation.

pub mod intent;
pub mod machine;
pub mod stage;
pub mod view;

pub use intent::Intent;
pub use machine::{Transition, WorkflowMachine, WorkflowState};
pub use stage::Stage;
pub use view::{DetailView, StageView};
