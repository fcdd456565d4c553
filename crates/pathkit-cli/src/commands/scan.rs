//! Scan command implementation.

use pathkit::{
    ImportExportStatement, NativeRuntime, PathClassifier, PathType, Runtime, ScanOptions,
};

use crate::cli::ScanArgs;
use crate::error::Result;

/// Execute the scan command: print the statements of one file to stdout.
pub async fn execute(args: ScanArgs) -> Result<()> {
    let runtime = NativeRuntime::new();
    let source = runtime
        .read_to_string(&args.file)
        .await
        .map_err(|source| pathkit::Error::FileIo {
            path: args.file.clone(),
            source,
        })?;

    let classifier = PathClassifier::new()
        .with_alias_prefixes(args.alias_prefixes.iter().cloned())
        .with_libraries(args.libs.iter().cloned());
    let options = ScanOptions {
        kind: args.kind.into(),
        path_types: (!args.path_types.is_empty())
            .then(|| args.path_types.iter().map(|&t| PathType::from(t)).collect()),
        limit_per_type: args.limit,
    };

    let statements = pathkit::scan(&source, &options, &classifier);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&statements)?);
    } else {
        for statement in &statements {
            println!("{}", describe(statement));
        }
    }
    Ok(())
}

/// One-line description: `kind form type 'path' {bindings}`.
pub fn describe(statement: &ImportExportStatement) -> String {
    let mut line = format!(
        "{:<6} {:<7}",
        format!("{:?}", statement.kind).to_lowercase(),
        format!("{:?}", statement.form).to_lowercase()
    );

    match (&statement.source, statement.path_type) {
        (Some(source), Some(path_type)) => {
            line.push_str(&format!(" {:<8} {}", path_type.as_str(), source.value));
        }
        (Some(source), None) => line.push_str(&format!(" {:<8} {}", "-", source.value)),
        (None, _) => line.push_str(&format!(" {:<8} -", "local")),
    }

    if statement.is_type_only {
        line.push_str(" (type)");
    }
    if !statement.specifiers.is_empty() {
        let names: Vec<String> = statement
            .specifiers
            .iter()
            .map(|s| match &s.local_alias {
                Some(alias) if alias != &s.name => format!("{} as {}", s.name, alias),
                _ => s.name.clone(),
            })
            .collect();
        line.push_str(&format!(" {{ {} }}", names.join(", ")));
    }
    line
}
