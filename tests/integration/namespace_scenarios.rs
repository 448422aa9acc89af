use shellfs::error::NamespaceError;
use shellfs::namespace::Namespace;

#[test]
fn readme_and_todo_scenario() {
    let mut ns = Namespace::new("/home/user").unwrap();
    ns.mkdir("home").unwrap();
    ns.mkdir("etc").unwrap();
    ns.touch("README.md").unwrap();
    ns.cd("home").unwrap();
    ns.mkdir("user").unwrap();
    ns.cd("user").unwrap();
    ns.touch("todo.txt").unwrap();
    ns.write("todo.txt", "Buy milk").unwrap();

    let dir_id = ns.find_directory("/home/user").unwrap();
    let dir = ns.node(dir_id).unwrap().as_directory().unwrap();
    let files: Vec<&str> = dir
        .files()
        .iter()
        .map(|id| ns.node(*id).unwrap().name())
        .collect();
    assert_eq!(files, vec!["todo.txt"]);
    assert_eq!(ns.read("/home/user/todo.txt").unwrap(), "Buy milk");
    assert_eq!(ns.read("/README.md").unwrap(), "");
}

#[test]
fn relative_and_absolute_paths_agree() {
    let mut ns = Namespace::bootstrap("/home/user", &["/usr/local/lib"]).unwrap();
    ns.cd("/usr").unwrap();
    let relative = ns.find_directory("local/lib").unwrap();
    let absolute = ns.find_directory("/usr/local/lib").unwrap();
    let dotted = ns.find_directory("./local/../local/lib").unwrap();
    assert_eq!(relative, absolute);
    assert_eq!(dotted, absolute);
}

#[test]
fn tilde_paths_resolve_under_home() {
    let mut ns = Namespace::bootstrap("/home/user", &["/tmp"]).unwrap();
    ns.mkdir("projects").unwrap();
    ns.cd("/tmp").unwrap();
    ns.cd("~/projects").unwrap();
    assert_eq!(ns.cwd(), "/home/user/projects");
}

#[test]
fn errors_leave_namespace_untouched() {
    let mut ns = Namespace::bootstrap("/home/user", &["/etc"]).unwrap();
    ns.touch("notes").unwrap();
    let before = ns.tree().len();

    assert!(matches!(ns.mkdir("notes"), Err(NamespaceError::AlreadyExists(_))));
    assert!(matches!(ns.mkdir("a/b"), Err(NamespaceError::InvalidName(_))));
    assert!(matches!(ns.cd("notes"), Err(NamespaceError::NotADirectory(_))));
    assert!(matches!(ns.cd("/missing"), Err(NamespaceError::NoSuchPath(_))));
    assert!(matches!(ns.delete("/home"), Err(NamespaceError::DirectoryNotEmpty(_))));
    assert!(matches!(ns.delete("/"), Err(NamespaceError::RootDeletion)));

    assert_eq!(ns.tree().len(), before);
    assert_eq!(ns.cwd(), "/home/user");
}

#[test]
fn moving_a_directory_carries_its_contents() {
    let mut ns = Namespace::bootstrap("/home/user", &["/tmp"]).unwrap();
    ns.mkdir("docs").unwrap();
    ns.cd("docs").unwrap();
    ns.touch("a.txt").unwrap();
    ns.write("a.txt", "alpha").unwrap();
    ns.cd("..").unwrap();

    ns.move_node("docs", "/tmp").unwrap();
    assert_eq!(ns.read("/tmp/docs/a.txt").unwrap(), "alpha");
    assert!(ns.find("docs").is_err());
    assert!(matches!(
        ns.move_node("/tmp", "/tmp/docs"),
        Err(NamespaceError::MoveIntoSelf(_))
    ));
}
