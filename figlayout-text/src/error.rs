use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FigLayoutTextError {
    #[error("Invalid font weight `{0}`, expected normal, bold or a number between 1 and 1000")]
    InvalidFontWeight(String),

    #[error("Invalid font style `{0}`, expected normal or italic")]
    InvalidFontStyle(String),
}
