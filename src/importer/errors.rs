use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::{
    articles::ArticleInputError, auth::dtos::ErrorResponse, extractor::ExtractionError,
    fetcher::FetchError, repositories::StoreError, rewriter::RewriteError,
};

/// Terminal failure of one import request. Display strings are shown to the
/// editor as-is.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Chave da API Grok não configurada. Vá em Configurações para adicionar.")]
    NoCredential,

    #[error("Não foi possível acessar o ge.globo.com")]
    ListingFetchFailed(#[source] FetchError),

    #[error("Nenhum artigo encontrado na página do GE")]
    NoCandidates,

    #[error(
        "Todos os artigos da página já foram importados. Volte mais tarde para novos artigos."
    )]
    AllConsumed,

    #[error("Não foi possível acessar o artigo")]
    ArticleFetchFailed(#[source] FetchError),

    #[error("Não foi possível extrair o conteúdo do artigo")]
    ArticleExtractionFailed(#[source] ExtractionError),

    #[error("Erro na geração do conteúdo pela IA. Tente novamente.")]
    RewriteFormat(#[source] RewriteError),

    #[error("Erro ao importar: {0}")]
    RewriteUnavailable(#[source] RewriteError),

    #[error("{0}")]
    Validation(#[from] ArticleInputError),

    #[error("URL de origem é obrigatória")]
    MissingOriginalUrl,

    #[error("Erro ao salvar: {0}")]
    Storage(#[source] StoreError),

    #[error("Erro ao importar: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ImportError {
    /// Status the source site answered with, for fetch failures.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::ListingFetchFailed(e) | Self::ArticleFetchFailed(e) => {
                e.status().map(|s| s.as_u16())
            }
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoCredential | Self::Validation(_) | Self::MissingOriginalUrl => {
                StatusCode::BAD_REQUEST
            }
            Self::NoCandidates | Self::AllConsumed => StatusCode::NOT_FOUND,
            Self::ArticleExtractionFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ListingFetchFailed(_) | Self::ArticleFetchFailed(_) => StatusCode::BAD_GATEWAY,
            Self::RewriteFormat(_)
            | Self::RewriteUnavailable(_)
            | Self::Storage(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RewriteError> for ImportError {
    fn from(err: RewriteError) -> Self {
        match err {
            RewriteError::Format(_) => Self::RewriteFormat(err),
            other => Self::RewriteUnavailable(other),
        }
    }
}

impl IntoResponse for ImportError {
    fn into_response(self) -> Response {
        let status = self.status();
        let cause = std::error::Error::source(&self).map(|s| s.to_string());
        let upstream = self.upstream_status();
        if status.is_server_error() {
            error!(status = %status, ?upstream, cause = ?cause, "import failed: {self}");
        } else {
            warn!(status = %status, ?upstream, cause = ?cause, "import stopped: {self}");
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_failure_kind() {
        assert_eq!(ImportError::NoCredential.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ImportError::AllConsumed.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ImportError::ListingFetchFailed(FetchError::RequestTimeout).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ImportError::ArticleExtractionFailed(ExtractionError::MissingContent).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn fetch_failures_carry_upstream_status() {
        let err = ImportError::ArticleFetchFailed(FetchError::Http {
            status: reqwest::StatusCode::NOT_FOUND,
        });
        assert_eq!(err.upstream_status(), Some(404));
        assert_eq!(
            ImportError::ListingFetchFailed(FetchError::RequestTimeout).upstream_status(),
            None
        );
        assert_eq!(ImportError::NoCandidates.upstream_status(), None);
    }

    #[test]
    fn validation_messages_pass_through() {
        let err: ImportError = ArticleInputError::TitleTooLong.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Título muito longo");
    }

    #[test]
    fn rewrite_errors_split_by_kind() {
        let format: ImportError = RewriteError::Format("expected value".into()).into();
        assert!(matches!(format, ImportError::RewriteFormat(_)));
        assert_eq!(
            format.to_string(),
            "Erro na geração do conteúdo pela IA. Tente novamente."
        );

        let down: ImportError = RewriteError::Request("connection refused".into()).into();
        assert!(matches!(down, ImportError::RewriteUnavailable(_)));
        assert_eq!(down.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
