//! Property tests for manifest extraction through the public API.

#![allow(clippy::expect_used)]

use std::collections::BTreeSet;
use std::fmt::Write as _;

use proptest::prelude::*;
use tether_cli::domain::manifest::from_yaml_str;
use tether_cli::domain::{Manifest, Service, Test};

/// RFC 1123 labels, minus the YAML null keyword that would drop a key.
fn label() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,10}[a-z0-9]".prop_filter("YAML null", |s| s != "null")
}

fn path() -> impl Strategy<Value = String> {
    "(/[a-z0-9_]{1,8}){1,4}"
}

proptest! {
    /// Services and tests come out sorted no matter the declaration order.
    #[test]
    fn v2_output_is_sorted_and_complete(
        services in prop::collection::btree_set(label(), 1..8),
        tests in prop::collection::btree_set(label(), 0..5),
        reverse in any::<bool>(),
    ) {
        let mut names: Vec<&String> = services.iter().collect();
        if reverse {
            names.reverse();
        }
        let mut yaml = String::from("dev:\n");
        for name in &names {
            writeln!(yaml, "  {name}: {{}}").expect("write");
        }
        if !tests.is_empty() {
            yaml.push_str("test:\n");
            for name in tests.iter().rev() {
                writeln!(yaml, "  {name}: {{}}").expect("write");
            }
        }

        let manifest = from_yaml_str(&yaml).expect("manifest");
        let got: Vec<&str> = manifest.services().iter().map(|s| s.name.as_str()).collect();
        let want: Vec<&str> = services.iter().map(String::as_str).collect();
        prop_assert_eq!(got, want);
        let got: Vec<&str> = manifest.tests().iter().map(|t| t.name.as_str()).collect();
        let want: Vec<&str> = tests.iter().map(String::as_str).collect();
        prop_assert_eq!(got, want);
    }

    /// Without `workdir`, the remote side of the first sync entry is used.
    #[test]
    fn v2_workdir_is_last_segment_of_first_sync(
        name in label(),
        local in path(),
        first in path(),
        second in path(),
    ) {
        let yaml = format!(
            "dev:\n  {name}:\n    sync:\n      - {local}:{first}\n      - .:{second}\n"
        );
        let manifest = from_yaml_str(&yaml).expect("manifest");
        prop_assert_eq!(&manifest.services()[0].workdir, &first);
    }

    /// An explicit workdir always wins over sync folders.
    #[test]
    fn v2_explicit_workdir_wins(name in label(), workdir in path(), remote in path()) {
        let yaml = format!(
            "dev:\n  {name}:\n    workdir: {workdir}\n    sync:\n      - .:{remote}\n"
        );
        let manifest = from_yaml_str(&yaml).expect("manifest");
        prop_assert_eq!(&manifest.services()[0].workdir, &workdir);
    }

    /// Compose bind mounts yield services; declared named volumes never do.
    #[test]
    fn compose_named_volumes_never_become_services(
        service in label(),
        volume in label(),
        target in path(),
        bound in path(),
    ) {
        let yaml = format!(
            "services:\n  {service}:\n    volumes:\n      - {volume}:{target}\n      - .:{bound}\nvolumes:\n  {volume}: {{}}\n"
        );
        let manifest = from_yaml_str(&yaml).expect("manifest");
        prop_assert_eq!(manifest.services().len(), 1);
        prop_assert_eq!(&manifest.services()[0].workdir, &bound);
        prop_assert!(manifest.tests().is_empty());
    }

    /// Building a manifest from its own output changes nothing.
    #[test]
    fn manifest_new_is_idempotent(names in prop::collection::vec(label(), 0..10)) {
        let services: Vec<Service> = names
            .iter()
            .map(|name| Service { name: name.clone(), workdir: String::new(), port: 0 })
            .collect();
        let tests: Vec<Test> = names.iter().map(|name| Test { name: name.clone() }).collect();
        let once = Manifest::new(services, tests);
        let twice = Manifest::new(once.services().to_vec(), once.tests().to_vec());
        prop_assert_eq!(&once, &twice);

        let unique: BTreeSet<&str> = once.services().iter().map(|s| s.name.as_str()).collect();
        prop_assert!(unique.len() <= names.len());
    }
}
