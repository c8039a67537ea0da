use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template has {0} channels, the maximum is 500")]
    TooManyChannels(usize),

    #[error("Template has {0} roles, the maximum is 200")]
    TooManyRoles(usize),

    #[error("Template has no categories or roles")]
    Empty,

    #[error("Structure text is empty")]
    EmptyStructure,
}
