use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::images::ImageResult;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ImageQuery {
    /// Free-text search terms.
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageSearchResponse {
    pub images: Vec<ImageResult>,
}
