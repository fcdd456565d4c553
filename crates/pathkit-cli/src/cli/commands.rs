use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::*;
use crate::cli::validation::{parse_key_val, parse_lib};

/// Available pathkit subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert import/export paths across a directory tree
    ///
    /// Every matching file below DIR is scanned and the paths of the
    /// selected type are rewritten in place. Settings come from defaults,
    /// pathkit.toml (or --config), PATHKIT_* environment variables and
    /// finally these flags.
    Convert(ConvertArgs),

    /// List the import and export statements of a file
    Scan(ScanArgs),

    /// Run one path algebra operation and print the result
    Path(PathArgs),
}

/// Arguments for the convert command
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Root of the tree to rewrite [default: baseDir from config, or "."]
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Type of paths to rewrite
    #[arg(short = 'f', long = "from", value_enum)]
    pub from: Option<PathTypeArg>,

    /// Type to rewrite them to
    #[arg(short = 't', long = "to", value_enum)]
    pub to: Option<PathTypeArg>,

    /// Alias that stands for DIR, e.g. "@/"
    #[arg(short = 'p', long, value_name = "PREFIX")]
    pub alias_prefix: Option<String>,

    /// Extra alias (repeatable)
    ///
    /// Examples:
    ///   --alias '~/=src' --alias '#lib=src/lib'
    #[arg(long = "alias", value_name = "ALIAS=TARGET", value_parser = parse_key_val)]
    pub aliases: Vec<(String, String)>,

    /// Map a URL import to a local file (repeatable)
    #[arg(long = "url", value_name = "URL=PATH", value_parser = parse_key_val)]
    pub url_map: Vec<(String, String)>,

    /// Declare a workspace library and its entry file (repeatable)
    ///
    /// Examples:
    ///   --lib '@acme/core=libs/core/index.ts'
    #[arg(long = "lib", value_name = "NAME=MAIN", value_parser = parse_lib)]
    pub libs: Vec<(String, String)>,

    /// Library the tree belongs to; never rewritten to a module path
    #[arg(long, value_name = "NAME")]
    pub current_lib: Option<String>,

    /// Leading segment to strip from converted paths (repeatable)
    #[arg(long = "strip", value_name = "SEGMENT")]
    pub strip: Vec<String>,

    /// Only convert alias paths written with this extension ("none" for
    /// paths without one)
    #[arg(long, value_name = "EXT")]
    pub ext_filter: Option<String>,

    /// Extension written in place of script extensions, e.g. ".js"
    #[arg(long = "target-ext", value_name = "EXT")]
    pub target_extension: Option<String>,

    /// File extension to process (repeatable; replaces the defaults)
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    pub file_extensions: Vec<String>,

    /// Maximum files processed at once within a directory
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Report changes without writing files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Write a .map file next to every rewritten file
    #[arg(long)]
    pub source_map: bool,

    /// Path to a config file (.toml, .json or .yaml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the per-file results as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// File to scan
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Statement kinds to list
    #[arg(short = 'k', long, value_enum, default_value = "all")]
    pub kind: KindArg,

    /// Only list statements whose path has this type (repeatable)
    #[arg(short = 't', long = "type", value_enum)]
    pub path_types: Vec<PathTypeArg>,

    /// Keep at most N statements per kind and path type
    #[arg(short = 'l', long, value_name = "N")]
    pub limit: Option<usize>,

    /// Alias prefix to recognize (repeatable; defaults to "@/" and "~/")
    #[arg(short = 'p', long = "alias-prefix", value_name = "PREFIX")]
    pub alias_prefixes: Vec<String>,

    /// Workspace library names to classify as modules (repeatable)
    #[arg(long = "lib", value_name = "NAME")]
    pub libs: Vec<String>,

    /// Print statements as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the path command
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Platform flavor used for separators and namespaced paths
    #[arg(long, value_enum, default_value = "posix", global = true)]
    pub platform: PlatformArg,

    /// Working directory for resolve and relative [default: current directory]
    #[arg(long, value_name = "DIR", global = true)]
    pub cwd: Option<String>,

    #[command(subcommand)]
    pub op: PathOp,
}

/// Path algebra operations
#[derive(Subcommand, Debug)]
pub enum PathOp {
    /// Collapse `.`/`..` segments and duplicate separators
    Normalize { path: String },
    /// Join segments and normalize the result
    Join {
        #[arg(num_args = 0..)]
        segments: Vec<String>,
    },
    /// Resolve segments right to left into an absolute path
    Resolve {
        #[arg(num_args = 0..)]
        segments: Vec<String>,
    },
    /// Path from FROM to TO
    Relative { from: String, to: String },
    Dirname { path: String },
    Basename {
        path: String,
        /// Suffix removed from the result
        #[arg(long)]
        ext: Option<String>,
    },
    Extname { path: String },
    /// Print root, dir, base, ext and name as JSON
    Parse { path: String },
    /// Print the namespaced (`\\?\`) form on win32
    Namespaced { path: String },
    IsAbsolute { path: String },
    /// Resolve an alias path against an alias table
    ResolveAlias {
        path: String,
        #[arg(long = "alias", value_name = "ALIAS=TARGET", value_parser = parse_key_val)]
        aliases: Vec<(String, String)>,
    },
    /// List the alias forms of a path, most specific first
    ReverseAlias {
        path: String,
        #[arg(long = "alias", value_name = "ALIAS=TARGET", value_parser = parse_key_val)]
        aliases: Vec<(String, String)>,
    },
}
