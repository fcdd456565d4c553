use std::fs;

use indexmap::IndexMap;
use tempfile::TempDir;

use super::*;
use crate::classify::PathType;
use crate::error::ConfigError;
use crate::path::to_slash_path;
use crate::test_utils::TestRuntime;

struct Fixture {
    _temp: TempDir,
    base: String,
    runtime: TestRuntime,
}

impl Fixture {
    fn new(files: &[&str]) -> Self {
        let temp = TempDir::new().unwrap();
        for file in files {
            let path = temp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "export {};\n").unwrap();
        }
        let base = to_slash_path(temp.path()).unwrap();
        let runtime = TestRuntime::new(temp.path().to_path_buf());
        Self {
            _temp: temp,
            base,
            runtime,
        }
    }

    fn builder(&self) -> ConversionContextBuilder {
        ConversionContext::builder(self.base.clone()).alias_prefix(Some("@/".into()))
    }

    fn file(&self, rel: &str) -> String {
        format!("{}/{rel}", self.base)
    }
}

fn convert(
    fixture: &Fixture,
    ctx: &ConversionContext,
    importer: &str,
    from: PathType,
    to: PathType,
    path: &str,
) -> Conversion {
    let source_file = fixture.file(importer);
    let fc = FileContext::new(ctx, &source_file, &fixture.runtime);
    ConversionMatrix::standard().convert(from, to, path, &fc)
}

#[test]
fn relative_alias_round_trip() {
    let fx = Fixture::new(&["src/a.ts", "src/utils/b.ts"]);
    let ctx = fx.builder().build().unwrap();

    let alias = convert(&fx, &ctx, "src/a.ts", PathType::Relative, PathType::Alias, "./utils/b");
    assert_eq!(alias, Conversion::Converted("@/src/utils/b".into()));

    let back = convert(&fx, &ctx, "src/a.ts", PathType::Alias, PathType::Relative, "@/src/utils/b");
    assert_eq!(back, Conversion::Converted("./utils/b".into()));
}

#[test]
fn base_dir_itself_round_trips_through_alias() {
    let fx = Fixture::new(&["index.ts", "src/a.ts"]);
    let ctx = fx.builder().build().unwrap();

    let alias = convert(&fx, &ctx, "index.ts", PathType::Relative, PathType::Alias, ".");
    assert_eq!(alias, Conversion::Converted("@/".into()));
    assert_eq!(ctx.classifier().classify("@/").path_type, PathType::Alias);

    let back = convert(&fx, &ctx, "index.ts", PathType::Alias, PathType::Relative, "@/");
    assert_eq!(back, Conversion::Converted(".".into()));

    let up = convert(&fx, &ctx, "src/a.ts", PathType::Relative, PathType::Alias, "..");
    assert_eq!(up, Conversion::Converted("@/".into()));
}

#[test]
fn alias_to_alias_is_unchanged() {
    let fx = Fixture::new(&["src/a.ts"]);
    let ctx = fx.builder().build().unwrap();
    let result = convert(&fx, &ctx, "src/a.ts", PathType::Alias, PathType::Alias, "@/src/utils/b");
    assert_eq!(result, Conversion::Unchanged);
}

#[test]
fn identity_pairs_are_unchanged() {
    let fx = Fixture::new(&["src/a.ts"]);
    let ctx = fx.builder().build().unwrap();
    let result = convert(&fx, &ctx, "src/a.ts", PathType::Relative, PathType::Relative, "./b");
    assert_eq!(result, Conversion::Unchanged);
}

#[test]
fn relative_and_absolute() {
    let fx = Fixture::new(&["src/a.ts", "src/utils/b.ts"]);
    let ctx = fx.builder().build().unwrap();

    let abs = convert(&fx, &ctx, "src/a.ts", PathType::Relative, PathType::Absolute, "./utils/b");
    assert_eq!(abs, Conversion::Converted(fx.file("src/utils/b")));

    let up = convert(
        &fx,
        &ctx,
        "src/utils/b.ts",
        PathType::Absolute,
        PathType::Relative,
        &fx.file("src/a"),
    );
    assert_eq!(up, Conversion::Converted("../a".into()));
}

#[test]
fn workspace_library_conversions() {
    let fx = Fixture::new(&["src/a.ts", "libs/core/index.ts", "libs/core/util.ts"]);
    let ctx = fx
        .builder()
        .lib("@acme/core", LibraryEntry::new("libs/core/index.ts"))
        .build()
        .unwrap();

    let module = convert(
        &fx,
        &ctx,
        "src/a.ts",
        PathType::Relative,
        PathType::Module,
        "../libs/core/index",
    );
    assert_eq!(module, Conversion::Converted("@acme/core".into()));

    let sub = convert(
        &fx,
        &ctx,
        "src/a.ts",
        PathType::Relative,
        PathType::Module,
        "../libs/core/util",
    );
    assert_eq!(sub, Conversion::Converted("@acme/core/util".into()));

    let main = convert(&fx, &ctx, "src/a.ts", PathType::Module, PathType::Relative, "@acme/core");
    assert_eq!(main, Conversion::Converted("../libs/core/index.ts".into()));

    let probed = convert(
        &fx,
        &ctx,
        "src/a.ts",
        PathType::Module,
        PathType::Relative,
        "@acme/core/util",
    );
    assert_eq!(probed, Conversion::Converted("../libs/core/util.ts".into()));
}

#[test]
fn current_library_is_not_a_module_target() {
    let fx = Fixture::new(&["libs/core/index.ts", "libs/core/a.ts"]);
    let ctx = fx
        .builder()
        .lib("@acme/core", LibraryEntry::new("libs/core/index.ts"))
        .current_lib(Some("@acme/core".into()))
        .build()
        .unwrap();

    let result = convert(
        &fx,
        &ctx,
        "libs/core/a.ts",
        PathType::Relative,
        PathType::Module,
        "./index",
    );
    assert_eq!(result, Conversion::Unchanged);
}

#[test]
fn bare_urls_map_to_local_files() {
    let fx = Fixture::new(&["src/a.ts", "vendor/lodash.js"]);
    let mut url_map = IndexMap::new();
    url_map.insert("lodash".to_string(), "vendor/lodash.js".to_string());
    let ctx = fx.builder().url_map(url_map).build().unwrap();

    let dynamic = convert(&fx, &ctx, "src/a.ts", PathType::Bare, PathType::Dynamic, "lodash");
    assert_eq!(dynamic, Conversion::Converted("../vendor/lodash.js".into()));

    let relative = convert(&fx, &ctx, "src/a.ts", PathType::Bare, PathType::Relative, "lodash");
    assert_eq!(relative, Conversion::Converted("../vendor/lodash.js".into()));

    let bare = convert(
        &fx,
        &ctx,
        "src/a.ts",
        PathType::Relative,
        PathType::Bare,
        "../vendor/lodash.js",
    );
    assert_eq!(bare, Conversion::Converted("lodash".into()));

    let unknown = convert(&fx, &ctx, "src/a.ts", PathType::Bare, PathType::Dynamic, "react");
    assert_eq!(unknown, Conversion::Unchanged);
}

#[test]
fn dynamic_source_uses_real_type() {
    let fx = Fixture::new(&["src/a.ts", "src/utils/b.ts"]);
    let ctx = fx.builder().build().unwrap();
    let result = convert(
        &fx,
        &ctx,
        "src/a.ts",
        PathType::Dynamic,
        PathType::Relative,
        "@/src/utils/b",
    );
    assert_eq!(result, Conversion::Converted("./utils/b".into()));
}

#[test]
fn extension_filter_limits_alias_to_relative() {
    let fx = Fixture::new(&["src/a.ts", "src/utils/b.ts"]);
    let ctx = fx
        .builder()
        .extension_filter(ExtensionFilter::NoExtension)
        .build()
        .unwrap();

    let with_ext = convert(
        &fx,
        &ctx,
        "src/a.ts",
        PathType::Alias,
        PathType::Relative,
        "@/src/utils/b.ts",
    );
    assert_eq!(with_ext, Conversion::Unchanged);

    let without = convert(
        &fx,
        &ctx,
        "src/a.ts",
        PathType::Alias,
        PathType::Relative,
        "@/src/utils/b",
    );
    assert_eq!(without, Conversion::Converted("./utils/b".into()));
}

#[test]
fn target_extension_rewrites_script_extensions() {
    let fx = Fixture::new(&["src/a.ts", "src/utils/b.ts"]);
    let ctx = fx
        .builder()
        .target_extension(Some("js".into()))
        .build()
        .unwrap();
    let result = convert(
        &fx,
        &ctx,
        "src/a.ts",
        PathType::Alias,
        PathType::Relative,
        "@/src/utils/b.ts",
    );
    assert_eq!(result, Conversion::Converted("./utils/b.js".into()));
}

#[test]
fn strip_recomputes_alias_origin_paths() {
    let fx = Fixture::new(&["src/deep/a.ts", "lib/x.ts"]);
    let ctx = fx.builder().strip_segments(["src"]).build().unwrap();
    let result = convert(
        &fx,
        &ctx,
        "src/deep/a.ts",
        PathType::Alias,
        PathType::Relative,
        "@/lib/x",
    );
    assert_eq!(result, Conversion::Converted("../lib/x".into()));
}

#[test]
fn strip_keeps_exact_path_when_target_would_move() {
    let fx = Fixture::new(&["lib/x.ts", "src/utils/b.ts"]);
    let ctx = fx.builder().strip_segments(["src"]).build().unwrap();
    let result = convert(
        &fx,
        &ctx,
        "lib/x.ts",
        PathType::Absolute,
        PathType::Relative,
        &fx.file("src/utils/b"),
    );
    assert_eq!(result, Conversion::Converted("../src/utils/b".into()));
}

#[test]
fn strip_applies_when_stripped_target_exists() {
    let fx = Fixture::new(&["lib/x.ts", "src/utils/b.ts", "utils/b.ts"]);
    let ctx = fx.builder().strip_segments(["src"]).build().unwrap();
    let result = convert(
        &fx,
        &ctx,
        "lib/x.ts",
        PathType::Absolute,
        PathType::Relative,
        &fx.file("src/utils/b"),
    );
    assert_eq!(result, Conversion::Converted("../utils/b".into()));
}

#[test]
fn strip_never_points_absolute_results_at_missing_files() {
    let fx = Fixture::new(&["src/index.ts", "src/foo.ts"]);
    let root_segment = fx.base.trim_start_matches('/').split('/').next().unwrap().to_string();
    let ctx = fx.builder().strip_segments([root_segment]).build().unwrap();
    let result = convert(
        &fx,
        &ctx,
        "src/index.ts",
        PathType::Relative,
        PathType::Absolute,
        "./foo",
    );
    assert_eq!(result, Conversion::Converted(fx.file("src/foo")));
}

#[test]
fn strip_skips_alias_results_it_cannot_resolve() {
    let fx = Fixture::new(&["app/a.ts", "src/utils/b.ts", "utils/b.ts"]);
    let ctx = fx.builder().strip_segments(["@"]).build().unwrap();
    let kept = convert(
        &fx,
        &ctx,
        "app/a.ts",
        PathType::Relative,
        PathType::Alias,
        "../src/utils/b",
    );
    assert_eq!(kept, Conversion::Converted("@/src/utils/b".into()));
}

#[test]
fn empty_matrix_reports_unsupported() {
    let fx = Fixture::new(&["src/a.ts"]);
    let ctx = fx.builder().build().unwrap();
    let source_file = fx.file("src/a.ts");
    let fc = FileContext::new(&ctx, &source_file, &fx.runtime);

    let mut matrix = ConversionMatrix::empty();
    assert!(!matrix.supports(PathType::Relative, PathType::Alias));
    assert_eq!(
        matrix.convert(PathType::Relative, PathType::Alias, "./b", &fc),
        Conversion::Unsupported
    );

    matrix.register(PathType::Relative, PathType::Alias, |path, _| {
        Some(path.replacen("./", "@/", 1))
    });
    assert_eq!(
        matrix.convert(PathType::Relative, PathType::Alias, "./b", &fc),
        Conversion::Converted("@/b".into())
    );
}

#[test]
fn validation_reports_missing_configuration() {
    let fx = Fixture::new(&[]);
    let bare = ConversionContext::builder(fx.base.clone()).build().unwrap();

    assert_eq!(
        bare.validate_for(PathType::Relative, PathType::Alias),
        Err(ConfigError::MissingAliasPrefix {
            from: PathType::Relative,
            to: PathType::Alias,
        })
    );
    assert_eq!(
        bare.validate_for(PathType::Module, PathType::Relative),
        Err(ConfigError::MissingLibraries {
            from: PathType::Module,
            to: PathType::Relative,
        })
    );
    assert_eq!(
        bare.validate_for(PathType::Bare, PathType::Dynamic),
        Err(ConfigError::MissingUrlMap {
            from: PathType::Bare,
            to: PathType::Dynamic,
        })
    );
    assert_eq!(bare.validate_for(PathType::Relative, PathType::Absolute), Ok(()));
}

#[test]
fn builder_requires_absolute_base_dir() {
    let err = ConversionContext::builder("relative/dir").build().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { field: "baseDir", .. }));
}

#[test]
fn extension_filter_parses() {
    assert_eq!("any".parse::<ExtensionFilter>().unwrap(), ExtensionFilter::Any);
    assert_eq!("none".parse::<ExtensionFilter>().unwrap(), ExtensionFilter::NoExtension);
    assert_eq!(
        "ts".parse::<ExtensionFilter>().unwrap(),
        ExtensionFilter::Only(".ts".into())
    );
    assert!("a/b".parse::<ExtensionFilter>().is_err());
}
