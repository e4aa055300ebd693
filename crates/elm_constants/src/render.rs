//! Rendering the Elm module text.
//!
//! ```elm
//! module Env exposing (apiUrl, commit)
//!
//!
//! apiUrl : String
//! apiUrl =
//!     "https://example.com"
//!
//! commit : String
//! commit =
//!     "4f2a9c1"
//! ```
//!
//! Values are inserted verbatim. A value containing `"` or `\` produces
//! a module that Elm will not compile.

use std::fmt::{self, Display, Formatter};

use crate::resolve::ResolvedConstant;

/// A module ready to be written.
#[derive(Clone, Copy, Debug)]
pub struct ElmModule<'a> {
    name: &'a str,
    constants: &'a [ResolvedConstant],
}

impl<'a> ElmModule<'a> {
    /// Creates a module named `name` exposing `constants` in order.
    #[must_use]
    pub const fn new(name: &'a str, constants: &'a [ResolvedConstant]) -> Self {
        Self { name, constants }
    }

    /// Number of exposed constants.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.constants.len()
    }

    /// Whether the module exposes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}

impl Display for ElmModule<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "module {} exposing (", self.name)?;
        for (i, constant) in self.constants.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", constant.name)?;
        }
        f.write_str(")\n\n\n")?;

        for (i, constant) in self.constants.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            let name = &constant.name;
            write!(f, "{name} : String\n{name} =\n    \"{}\"\n", constant.value)?;
        }

        Ok(())
    }
}

/// Renders `constants` as an Elm module named `module_name`.
#[must_use]
pub fn render(module_name: &str, constants: &[ResolvedConstant]) -> String {
    ElmModule::new(module_name, constants).to_string()
}
