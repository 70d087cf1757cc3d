pub mod deployments;
pub mod errors;
pub mod search;

pub use deployments::{DeploymentMetadata, DeploymentSearchResponse, DeploymentsSearchResponse};
pub use errors::{BasicFailedReply, BasicFailedReplyElement};
pub use search::{
    BoolQuery, ExistsQuery, NestedQuery, QueryContainer, QueryStringQuery, SearchRequest, TermQuery,
};
