//! Fixed file layout of a chart directory managed by `helm apply-vars` and
//! `helm install`.

/// Working values file carrying `@{KEY}` placeholders.
pub const VALUES: ManagedFile = ManagedFile::new("values.yaml", "values.default");

/// Tag overrides merged on top of [`VALUES`] at install time.
pub const VALUES_TAG: ManagedFile = ManagedFile::new("values-tag.yaml", "values-tag.default");

/// Flat JSON map supplying placeholder values.
pub const VARIABLES: ManagedFile = ManagedFile::new("variables.json", "variables.default");

/// A file with a fixed working name and a fixed default-snapshot sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagedFile {
    /// Working file name, e.g. `values.yaml`
    pub name: &'static str,
    /// Default snapshot name, e.g. `values.default`
    pub default_name: &'static str,
}

impl ManagedFile {
    pub const fn new(name: &'static str, default_name: &'static str) -> Self {
        Self { name, default_name }
    }
}

/// The set of files that make up a chart's values workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLayout {
    pub values: ManagedFile,
    pub values_tag: ManagedFile,
    pub variables: ManagedFile,
}

impl ChartLayout {
    /// Values files that receive placeholder substitution, in processing order.
    pub fn templated(&self) -> [ManagedFile; 2] {
        [self.values, self.values_tag]
    }

    /// Every managed file, in snapshot and restore order.
    pub fn all(&self) -> [ManagedFile; 3] {
        [self.values, self.values_tag, self.variables]
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            values: VALUES,
            values_tag: VALUES_TAG,
            variables: VARIABLES,
        }
    }
}
