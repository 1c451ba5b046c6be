/// Options fixed at bootstrap.
#[derive(Clone, Debug)]
pub struct Config {
    /// Exposed to programs as `process.argv`; `argv[0]` is the program name.
    pub argv: Vec<String>,
    /// Install `Math`, `parseInt`, `Infinity` and `process` next to `console`.
    pub install_prelude: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            argv: Vec::new(),
            install_prelude: true,
        }
    }
}

impl Config {
    pub fn with_argv<I, S>(mut self, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argv = argv.into_iter().map(Into::into).collect();
        self
    }

    pub fn without_prelude(mut self) -> Self {
        self.install_prelude = false;
        self
    }
}
