//! Domain layer: pure workflow rules with no HTTP or database dependencies.

pub mod eligibility;
pub mod order_email;
pub mod receipt;
pub mod status;
pub mod validation;

pub use eligibility::{evaluate, Eligibility, PriorRequest};
pub use order_email::{compose_order_email, formspree_endpoint, OrderEmail};
pub use status::{DecisionStage, RequestStatus};
