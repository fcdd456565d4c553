//! Path command implementation.
//!
//! Prints the result of one path algebra operation to stdout.

use pathkit::{PathContext, Platform, alias};

use crate::cli::{PathArgs, PathOp};
use crate::error::Result;

/// Execute the path command.
pub fn execute(args: PathArgs) -> Result<()> {
    println!("{}", evaluate(&args)?);
    Ok(())
}

/// Result of the operation in `args`, as printed.
pub fn evaluate(args: &PathArgs) -> Result<String> {
    let platform = Platform::from(args.platform);
    let ctx = match &args.cwd {
        Some(cwd) => PathContext::new(cwd),
        None => PathContext::from_env().map_err(pathkit::Error::from)?,
    };

    let out = match &args.op {
        PathOp::Normalize { path } => platform.normalize(path),
        PathOp::Join { segments } => platform.join(segments),
        PathOp::Resolve { segments } => platform.resolve(&ctx, segments),
        PathOp::Relative { from, to } => platform.relative(&ctx, from, to),
        PathOp::Dirname { path } => platform.dirname(path),
        PathOp::Basename { path, ext } => platform.basename(path, ext.as_deref()),
        PathOp::Extname { path } => platform.extname(path),
        PathOp::Parse { path } => serde_json::to_string_pretty(&platform.parse(path))?,
        PathOp::Namespaced { path } => platform.to_namespaced_path(path),
        PathOp::IsAbsolute { path } => platform.is_absolute(path).to_string(),
        PathOp::ResolveAlias { path, aliases } => alias::resolve_alias(path, aliases.clone()),
        PathOp::ReverseAlias { path, aliases } => {
            alias::reverse_resolve_alias(path, aliases.clone()).join("\n")
        }
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PlatformArg;

    fn run(op: PathOp) -> String {
        evaluate(&PathArgs {
            platform: PlatformArg::Posix,
            cwd: Some("/work".to_string()),
            op,
        })
        .unwrap()
    }

    #[test]
    fn test_normalize_and_join() {
        assert_eq!(
            run(PathOp::Normalize {
                path: "C:\\a\\..\\b".to_string()
            }),
            "C:/b"
        );
        assert_eq!(
            run(PathOp::Join {
                segments: vec!["a".to_string(), "../b".to_string(), "c".to_string()]
            }),
            "b/c"
        );
    }

    #[test]
    fn test_resolve_uses_cwd() {
        assert_eq!(
            run(PathOp::Resolve {
                segments: vec!["src".to_string(), "a.ts".to_string()]
            }),
            "/work/src/a.ts"
        );
    }

    #[test]
    fn test_relative() {
        assert_eq!(
            run(PathOp::Relative {
                from: "/a/b/c".to_string(),
                to: "/a/d".to_string()
            }),
            "../../d"
        );
    }

    #[test]
    fn test_parse_prints_json() {
        let out = run(PathOp::Parse {
            path: "/home/u/file.txt".to_string(),
        });
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["name"], "file");
        assert_eq!(parsed["ext"], ".txt");
    }

    #[test]
    fn test_namespaced_on_win32() {
        let out = evaluate(&PathArgs {
            platform: PlatformArg::Win32,
            cwd: Some("/".to_string()),
            op: PathOp::Namespaced {
                path: "C:\\foo".to_string(),
            },
        })
        .unwrap();
        assert_eq!(out, r"\\?\C:\foo");
    }

    #[test]
    fn test_alias_ops() {
        let aliases = vec![("~/".to_string(), "/root/src".to_string())];
        assert_eq!(
            run(PathOp::ResolveAlias {
                path: "~/utils/a".to_string(),
                aliases: aliases.clone(),
            }),
            "/root/src/utils/a"
        );
        assert_eq!(
            run(PathOp::ReverseAlias {
                path: "/root/src/utils/a".to_string(),
                aliases,
            }),
            "~/utils/a"
        );
    }
}
