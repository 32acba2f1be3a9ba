use axum::Form;
use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;

use arxiv_finder_core::find_citation;

use crate::models::{AppError, FindForm};
use crate::state::AppState;
use crate::template;

pub async fn index() -> Html<String> {
    template::render_index(None)
}

pub async fn find(
    State(state): State<Arc<AppState>>,
    Form(form): Form<FindForm>,
) -> Result<Html<String>, AppError> {
    let title = form.title.ok_or(AppError::MissingTitle)?;
    let result = find_citation(&title, state.provider.as_ref(), &state.client, &state.config).await?;
    Ok(template::render_index(Some(&result.to_string())))
}
