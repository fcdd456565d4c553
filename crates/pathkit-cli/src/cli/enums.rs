use clap::ValueEnum;

/// Path categories accepted by `--from`, `--to` and `--type`
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum PathTypeArg {
    /// `./x`, `../x`
    #[value(name = "relative")]
    Relative,

    /// `/x`, `C:/x`
    #[value(name = "absolute")]
    Absolute,

    /// `@/x`, `~/x`
    #[value(name = "alias")]
    Alias,

    /// Third-party package or URL without a local counterpart
    #[value(name = "bare")]
    Bare,

    /// `import("x")`
    #[value(name = "dynamic")]
    Dynamic,

    /// Workspace library, or a URL import
    #[value(name = "module")]
    Module,
}

/// Platform flavor for `pathkit path`
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum PlatformArg {
    #[value(name = "posix")]
    Posix,

    #[value(name = "win32", alias = "windows")]
    Win32,
}

/// Statement kinds for `pathkit scan`
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum KindArg {
    #[value(name = "import")]
    Import,

    #[value(name = "export")]
    Export,

    #[value(name = "all")]
    All,
}
