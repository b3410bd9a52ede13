//! Shared clap helper types for CLI commands.

use clap::ValueEnum;

/// Template selector accepted by render commands.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum TemplateArg {
    Portrait,
    Mat,
}

impl TemplateArg {
    /// The registry name this flag selects.
    pub fn name(self) -> &'static str {
        match self {
            TemplateArg::Portrait => "portrait",
            TemplateArg::Mat => "mat",
        }
    }
}
