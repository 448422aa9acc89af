use shellfs::namespace::Namespace;
use shellfs::store::persistence::FileSnapshotStore;
use shellfs::store::{load_namespace, load_or_bootstrap, save_namespace, SnapshotStore};
use std::fs;
use tempfile::TempDir;

fn sample() -> Namespace {
    let mut ns = Namespace::bootstrap("/home/user", &["/etc", "/tmp"]).unwrap();
    ns.mkdir("projects").unwrap();
    ns.touch("todo.txt").unwrap();
    ns.write("todo.txt", "Buy milk").unwrap();
    ns.cd("projects").unwrap();
    ns
}

#[test]
fn saved_namespace_loads_back_identically() {
    let dir = TempDir::new().unwrap();
    let store = FileSnapshotStore::new(dir.path().join("state").join("fs.bin"))
        .with_mirror(dir.path().join("state").join("fs.json"));
    let original = sample();
    save_namespace(&store, &original).unwrap();

    let restored = load_namespace(&store, "/home/user", &["/ignored"]).unwrap();
    assert_eq!(restored.cwd(), "/home/user/projects");
    assert_eq!(restored.read("/home/user/todo.txt").unwrap(), "Buy milk");
    assert!(restored.find("/ignored").is_err());

    let timestamps = |ns: &Namespace| {
        let mut entries: Vec<(String, String, String)> = ns
            .nodes()
            .map(|(path, node)| {
                (path, node.created().to_rfc3339(), node.modified().to_rfc3339())
            })
            .collect();
        entries.sort();
        entries
    };
    let before = timestamps(&original);
    let after = timestamps(&restored);
    assert_eq!(before, after);
}

#[test]
fn mirror_is_nested_json() {
    let dir = TempDir::new().unwrap();
    let mirror_path = dir.path().join("fs.json");
    let store = FileSnapshotStore::new(dir.path().join("fs.bin")).with_mirror(&mirror_path);
    save_namespace(&store, &sample()).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&mirror_path).unwrap()).unwrap();
    assert_eq!(json["cwd"], "/home/user/projects");
    assert_eq!(json["root"]["type"], "dir");
    let todo = &json["root"]["children"]["home"]["children"]["user"]["children"]["todo.txt"];
    assert_eq!(todo["type"], "file");
    assert_eq!(todo["content"], "Buy milk");
}

#[test]
fn missing_snapshot_bootstraps() {
    let dir = TempDir::new().unwrap();
    let store = FileSnapshotStore::new(dir.path().join("none.bin"));
    assert!(store.load().unwrap().is_none());
    let ns = load_namespace(&store, "/home/user", &["/etc"]).unwrap();
    assert_eq!(ns.cwd(), "/home/user");
    assert!(ns.find_directory("/etc").is_ok());
}

#[test]
fn corrupt_snapshot_falls_back_to_fresh_namespace() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fs.bin");
    fs::write(&path, b"definitely not bincode").unwrap();
    let store = FileSnapshotStore::new(&path);

    assert!(load_namespace(&store, "/home/user", &["/etc"]).is_err());
    let ns = load_or_bootstrap(&store, "/home/user", &["/etc"]).unwrap();
    assert_eq!(ns.cwd(), "/home/user");
    assert!(ns.find_directory("/etc").is_ok());
}
