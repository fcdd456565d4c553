use indexmap::IndexMap;
use pathkit::{KindFilter, LibraryEntry, PathType, Platform};

use crate::cli::{ConvertArgs, KindArg, PathTypeArg, PlatformArg};
use crate::config::ConfigOverrides;

// CLI enums -> library types

impl From<PathTypeArg> for PathType {
    fn from(t: PathTypeArg) -> Self {
        match t {
            PathTypeArg::Relative => PathType::Relative,
            PathTypeArg::Absolute => PathType::Absolute,
            PathTypeArg::Alias => PathType::Alias,
            PathTypeArg::Bare => PathType::Bare,
            PathTypeArg::Dynamic => PathType::Dynamic,
            PathTypeArg::Module => PathType::Module,
        }
    }
}

impl From<PlatformArg> for Platform {
    fn from(p: PlatformArg) -> Self {
        match p {
            PlatformArg::Posix => Platform::Posix,
            PlatformArg::Win32 => Platform::Win32,
        }
    }
}

impl From<KindArg> for KindFilter {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Import => KindFilter::Import,
            KindArg::Export => KindFilter::Export,
            KindArg::All => KindFilter::All,
        }
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

fn pairs_to_map(pairs: &[(String, String)]) -> Option<IndexMap<String, String>> {
    (!pairs.is_empty()).then(|| pairs.iter().cloned().collect())
}

impl From<&ConvertArgs> for ConfigOverrides {
    /// Only flags that were given become overrides; boolean switches
    /// override when set.
    fn from(args: &ConvertArgs) -> Self {
        Self {
            base_dir: args.dir.clone(),
            from_type: args.from.map(Into::into),
            to_type: args.to.map(Into::into),
            alias_prefix: args.alias_prefix.clone(),
            aliases: pairs_to_map(&args.aliases),
            libs: (!args.libs.is_empty()).then(|| {
                args.libs
                    .iter()
                    .map(|(name, main)| (name.clone(), LibraryEntry::new(main.clone())))
                    .collect()
            }),
            current_lib_name: args.current_lib.clone(),
            url_map: pairs_to_map(&args.url_map),
            strip: non_empty(args.strip.clone()),
            ext_filter: args.ext_filter.clone(),
            target_extension: args.target_extension.clone(),
            file_extensions: non_empty(args.file_extensions.clone()),
            concurrency: args.concurrency,
            dry_run: args.dry_run.then_some(true),
            generate_source_map: args.source_map.then_some(true),
        }
    }
}
