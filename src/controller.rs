//! Built-in controllers and their bundled templates

use std::fmt;

/// A controller the generator ships a template for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Controller {
    /// STMicroelectronics STM32F4 (Cortex-M4)
    Stm32f4,
}

impl Controller {
    /// All built-in controllers
    pub const ALL: &'static [Controller] = &[Controller::Stm32f4];

    /// Lowercase identifier used on the command line and as registry key
    pub fn identifier(self) -> &'static str {
        match self {
            Controller::Stm32f4 => "stm32f4",
        }
    }

    /// Template path, relative to the templates directory
    pub fn template_path(self) -> &'static str {
        match self {
            Controller::Stm32f4 => "templates/stm32f4/bsp.c",
        }
    }
}

impl fmt::Display for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
