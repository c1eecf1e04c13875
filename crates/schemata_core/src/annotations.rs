//! Names and argument keys of the core annotations

/// Example value, argument [`EXAMPLE_VALUE`] (string). May repeat.
pub const EXAMPLE: &str = "Example";
pub const EXAMPLE_VALUE: &str = "example";

/// Description text, argument [`DESCRIPTION_VALUE`] (string)
pub const DESCRIPTION: &str = "Description";
pub const DESCRIPTION_VALUE: &str = "description";

/// Deprecation flag, argument [`DEPRECATED_VALUE`] (boolean, `true` when absent)
pub const DEPRECATED: &str = "Deprecated";
pub const DEPRECATED_VALUE: &str = "deprecated";

/// Default value, argument [`DEFAULT_VALUE`] (string, number or boolean)
pub const DEFAULT: &str = "Default";
pub const DEFAULT_VALUE: &str = "default";

/// Display title, argument [`TITLE_VALUE`] (string)
pub const TITLE: &str = "Title";
pub const TITLE_VALUE: &str = "title";

/// Marks a property as not required. No arguments.
pub const OPTIONAL: &str = "Optional";
