use proptest::prelude::*;
use shellfs::namespace::Namespace;

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.-]{0,7}".prop_filter("dot names are reserved", |name| name != "." && name != "..")
}

fn fresh() -> Namespace {
    Namespace::bootstrap("/home/user", &["/tmp"]).unwrap()
}

proptest! {
    #[test]
    fn touched_file_reads_empty(name in name_strategy()) {
        let mut ns = fresh();
        ns.touch(&name).unwrap();
        prop_assert_eq!(ns.read(&name).unwrap(), "");
    }

    #[test]
    fn write_then_append_concatenates(
        name in name_strategy(),
        first in "[ -~]{0,20}",
        second in "[ -~]{0,20}",
    ) {
        let mut ns = fresh();
        ns.touch(&name).unwrap();
        ns.write(&name, &first).unwrap();
        ns.append(&name, &second).unwrap();
        prop_assert_eq!(ns.read(&name).unwrap(), format!("{first}{second}"));
    }

    #[test]
    fn cd_to_a_directory_path_returns_to_it(names in prop::collection::vec(name_strategy(), 1..5)) {
        let mut ns = fresh();
        for name in &names {
            if ns.mkdir(name).is_ok() {
                ns.cd(name).unwrap();
            }
        }
        let target = ns.cursor();
        let path = ns.cwd();
        ns.cd("/").unwrap();
        prop_assert_eq!(ns.cd(&path).unwrap(), target);
        prop_assert_eq!(ns.cwd(), path);
    }

    #[test]
    fn ls_is_sorted_and_repeatable(names in prop::collection::btree_set(name_strategy(), 0..8)) {
        let mut ns = fresh();
        for (index, name) in names.iter().enumerate() {
            if index % 2 == 0 {
                ns.mkdir(name).unwrap();
            } else {
                ns.touch(name).unwrap();
            }
        }
        let first: Vec<String> = ns.ls().map(str::to_string).collect();
        let second: Vec<String> = ns.ls().map(str::to_string).collect();
        let expected: Vec<String> = names.into_iter().collect();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, expected);
    }

    #[test]
    fn deleting_an_empty_directory_makes_it_unreachable(name in name_strategy()) {
        let mut ns = fresh();
        ns.mkdir(&name).unwrap();
        let before = ns.tree().len();
        ns.delete(&name).unwrap();
        prop_assert!(ns.find(&name).is_err());
        prop_assert_eq!(ns.tree().len(), before - 1);
    }
}
