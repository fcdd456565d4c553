//! Property tests for the path algebra.

use pathkit::path::{normalize, relative_with_cwd, resolve_with_cwd};
use pathkit::{AliasTable, normalize_aliases};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["a", "bc", "d-e", ".", "..", "x.ts"])
}

fn plain_segment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["a", "bc", "d", "src", "x.ts"])
}

fn any_path() -> impl Strategy<Value = String> {
    (
        any::<bool>(),
        prop::collection::vec(segment(), 0..6),
        any::<bool>(),
    )
        .prop_map(|(rooted, segments, trailing)| {
            let mut path = segments.join("/");
            if rooted {
                path.insert(0, '/');
            }
            if trailing && !path.is_empty() && !path.ends_with('/') {
                path.push('/');
            }
            path
        })
}

fn absolute_path() -> impl Strategy<Value = String> {
    prop::collection::vec(plain_segment(), 0..5).prop_map(|segments| format!("/{}", segments.join("/")))
}

proptest! {
    #[test]
    fn normalize_is_idempotent(path in any_path()) {
        let once = normalize(&path);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_accepts_backslashes(path in any_path()) {
        prop_assert_eq!(normalize(&path.replace('/', "\\")), normalize(&path));
    }

    #[test]
    fn resolve_of_relative_returns_target(from in absolute_path(), to in absolute_path()) {
        let rel = relative_with_cwd("/", &from, &to);
        prop_assert_eq!(
            resolve_with_cwd("/", [from.as_str(), rel.as_str()]),
            resolve_with_cwd("/", [to.as_str()])
        );
    }

    #[test]
    fn alias_normalization_is_idempotent(
        keys in prop::collection::vec(prop::sample::select(vec!["@", "@/ui", "~", "#lib", "@/ui/x"]), 0..5),
        targets in prop::collection::vec(absolute_path(), 5),
    ) {
        let raw: Vec<(&str, String)> = keys.iter().copied().zip(targets).collect();
        let table = normalize_aliases(raw);
        let again = AliasTable::normalize(table.clone());
        prop_assert_eq!(again, table);
    }
}
