//! Serve mode.

use super::*;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;

mod header_map_ext;

pub use header_map_ext::HeaderMapExt;

/// Serve rssreader over http.
pub async fn serve_cli(
    address: Option<String>,
    config: &Config,
    state: AppState,
    cancel_token: CancellationToken,
) -> Result<()> {
    let app = router(state);
    let address = config.address(address.as_deref());
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => bail!("Unable to bind to {}: {}", address, e),
    };

    // Serve.
    tracing::info!("rssreader serve");
    tracing::info!("Serving feeds @ {}", address);

    let served = axum::serve(listener, app).into_future();
    let cancelled = cancel_token.cancelled();
    tokio::select! {
        served_res = served => {
            if let Err(e) = served_res {
                tracing::error!("Error serving: {}", e);
                cancel_token.cancel();
            }
        },
        _ = cancelled => {
            // Quit.
        },
    };

    Ok(())
}

/// Routes for `/sources` and `/feeds`.
pub fn router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/sources", axum::routing::get(get_sources))
        .route("/feeds", axum::routing::get(get_feeds))
        .with_state(Arc::new(state))
}

type StateType = State<Arc<AppState>>;

async fn get_sources(
    State(state): StateType,
) -> Result<(HeaderMap, String), ApiError> {
    tracing::debug!("/sources");
    let body = encode(&SourceList::from(state.registry.as_ref()))?;
    Ok((HeaderMap::json_headers(), body))
}

async fn get_feeds(
    State(state): StateType,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<(HeaderMap, String), ApiError> {
    let Query(pairs) =
        query.map_err(|e| ApiError::Validation(e.body_text()))?;
    let params = FeedQueryParams::from_pairs(&pairs);
    tracing::debug!("/feeds {:?}", params);
    let query = FeedQuery::try_from(&params)?;
    let articles = query.articles(&state).await?;
    Ok((HeaderMap::json_headers(), encode(&articles)?))
}
