//! Application service layer.
//!
//! Services contain business logic and orchestrate the validators and the
//! profile repository. They provide a clean boundary between the MCP
//! handlers and the data access layer.

mod kyc_service;
mod profile_service;

pub use kyc_service::{
    CompareAndUpdateParams, KycDecision, KycOutcome, KycService, KycServiceImpl, KycSubmission,
    VerificationStatusReport,
};
pub use profile_service::{NewProfileParams, ProfileService, ProfileServiceImpl};
