//! Funnel generation for FunnelForge.
//!
//! Generation is simulated: a validated [`BusinessProfile`] goes through a
//! fixed sequence of timed stages ([`GenerationWorkflow`]) and the result is
//! synthesized by interpolating profile strings into canned templates
//! ([`synthesize`]). A remote generation backend can stand in for the
//! simulation through the [`GenerationService`] trait ([`HttpGenerationClient`]).

mod client;
mod error;
mod profile;
mod service;
mod templates;
mod workflow;

pub use client::{HttpGenerationClient, HttpGenerationConfig};
pub use error::{GenerationError, GenerationResult};
pub use profile::{BusinessProfile, RequiredField};
pub use service::{
    FunnelGenerator, GeneratedContent, GenerationRequest, GenerationService,
    SimulatedGenerationService,
};
pub use templates::{synthesize, ContentBlock, EmailDraft, FunnelBlueprint};
pub use workflow::{GenerationWorkflow, StageProgress, WorkflowConfig, DEFAULT_STAGES};
