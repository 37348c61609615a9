pub mod candidate;
pub mod chat;
pub mod ports;
pub mod profile;
pub mod ranking;
pub mod recommendation;

pub use candidate::{CandidateRecord, CandidateText, ScoredCandidate};
pub use profile::{UserProfile, ValidationError};
pub use recommendation::{LabRecommendation, MentorRecommendation, YearCount};
