mod clear_form_draft;
mod load_form_draft;
mod save_form_draft;

pub use clear_form_draft::ClearFormDraftUseCase;
pub use load_form_draft::LoadFormDraftUseCase;
pub use save_form_draft::SaveFormDraftUseCase;

use votewatch_domain::DomainError;

pub(crate) fn validate_key(key: &str) -> Result<&str, DomainError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(DomainError::Storage("draft key cannot be empty".into()));
    }
    Ok(key)
}
