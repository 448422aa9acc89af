use shellfs::namespace::Namespace;
use shellfs::shell::{render_prompt, Shell};

fn run(script: &str, show_prompt: bool) -> (Namespace, String) {
    let namespace = Namespace::bootstrap("/home/user", &["/etc", "/tmp"]).unwrap();
    let mut shell = Shell::new(namespace, Vec::new());
    shell.run(script.as_bytes(), show_prompt).unwrap();
    let (namespace, out) = shell.into_parts();
    (namespace, String::from_utf8(out).unwrap())
}

#[test]
fn scripted_session_builds_tree() {
    let script = "\
mkdir projects notes
cd projects
touch main.rs
echo fn main() {} > main.rs
cd ..
ls
cat projects/main.rs
pwd
";
    let (ns, out) = run(script, false);
    assert_eq!(out, "notes\nprojects\nfn main() {}\n/home/user\n");
    assert_eq!(ns.read("/home/user/projects/main.rs").unwrap(), "fn main() {}");
}

#[test]
fn prompts_track_the_current_directory() {
    let (_, out) = run("cd projects\nmkdir projects\ncd projects\ncd /\nexit\n", true);
    assert_eq!(
        out,
        "~ $ cd: 'projects': No such file or directory\n~ $ ~ $ /home/user/projects $ / $ "
    );
}

#[test]
fn exit_aliases_stop_the_loop() {
    for alias in ["exit", "e", "x"] {
        let (ns, _) = run(&format!("mkdir before\n{alias}\nmkdir after\n"), false);
        assert!(ns.find_directory("before").is_ok());
        assert!(ns.find_directory("after").is_err(), "alias {alias} did not exit");
    }
}

#[test]
fn ll_is_an_alias_for_ls() {
    let (_, out) = run("mkdir b a\nll\n", false);
    assert_eq!(out, "a\nb\n");
}

#[test]
fn prompt_rendering() {
    assert_eq!(render_prompt("/home/user", "/home/user"), "~ $ ");
    assert_eq!(render_prompt("/home/user/src", "/home/user"), "/home/user/src $ ");
    assert_eq!(render_prompt("/etc", "/home/user"), "/etc $ ");
    assert_eq!(render_prompt("/", "/home/user"), "/ $ ");
}

#[test]
fn prompt_shows_tilde_for_unnormalized_home() {
    let namespace = Namespace::bootstrap("/home/user/", &["/etc"]).unwrap();
    let shell = Shell::new(namespace, Vec::new());
    assert_eq!(shell.prompt(), "~ $ ");
}
