pub mod mock_data;
pub mod narrative_service;
pub mod normalize;
pub mod prompts;
pub mod ranking_service;
pub mod recommendation_service;
pub mod synthesis_service;

pub use recommendation_service::RecommendationService;
