use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("theme \"custom\" is selected but no custom colors are configured")]
    MissingCustomColors,
}
