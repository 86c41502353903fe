use clap::ValueEnum;

/// What an import does with a line that fails to parse or validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ImportPolicy {
    /// The first bad line aborts the import; nothing is persisted.
    #[default]
    Strict,
    /// Bad lines are reported and skipped; the rest is persisted.
    SkipInvalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    pub import_policy: ImportPolicy,
    pub default_page_size: usize,
}

impl ServiceConfig {
    pub const DEFAULT_PAGE_SIZE: usize = 20;

    pub fn with_import_policy(mut self, policy: ImportPolicy) -> Self {
        self.import_policy = policy;
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            import_policy: ImportPolicy::default(),
            default_page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}
