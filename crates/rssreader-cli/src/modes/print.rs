//! Print mode.

use super::*;

/// Run one `/feeds` traversal and print the result.
pub async fn feeds_cli(
    params: &FeedQueryParams,
    state: AppState,
) -> Result<()> {
    let query = FeedQuery::try_from(params)?;
    let articles = query.articles(&state).await?;
    println!("{}", serde_json::to_string_pretty(&articles)?);
    Ok(())
}

/// Print the configured sources.
pub fn sources_cli(registry: &feeds::SourceRegistry) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&SourceList::from(registry))?);
    Ok(())
}
